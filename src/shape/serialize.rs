use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Geometry, Shape, ShapeKind};
use crate::error::{ShapeError, ShapeResult};
use crate::style::ShapeStyle;

/// Structural snapshot of a shape for persistence and export.
///
/// ```json
/// {"id": "…", "type": "arrow", "data": {"start": {"x": 0, "y": 0}, "end": {"x": 5, "y": 5}},
///  "style": {"strokeColor": "#ff0000ff", "strokeWidth": 3.0}}
/// ```
///
/// `id` and `type` stay plain strings so that one bad entry in a larger
/// document fails on its own instead of failing the whole parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedShape {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
    pub style: ShapeStyle,
}

impl Shape {
    pub fn serialize(&self) -> SerializedShape {
        let data = match &self.geometry {
            Geometry::Rectangle(r) => to_data(r),
            Geometry::Circle(c) => to_data(c),
            Geometry::Blur(b) => to_data(b),
            Geometry::Pen(f) | Geometry::Highlighter(f) => to_data(f),
            Geometry::Arrow(s) | Geometry::DualArrow(s) | Geometry::Line(s) => to_data(s),
            Geometry::Text(t) => to_data(t),
        };

        SerializedShape {
            id: self.id.to_string(),
            kind: self.kind().as_str().to_owned(),
            data,
            style: self.style,
        }
    }

    /// Rebuild a shape, failing fast on anything that would leave it with
    /// partial geometry.
    pub fn deserialize(serialized: &SerializedShape) -> ShapeResult<Shape> {
        let id = serialized
            .id
            .parse()
            .map_err(|_| ShapeError::InvalidId(serialized.id.clone()))?;
        let kind: ShapeKind = serialized.kind.parse()?;
        let data = &serialized.data;

        let geometry = match kind {
            ShapeKind::Rectangle => Geometry::Rectangle(from_data(kind, data)?),
            ShapeKind::Circle => Geometry::Circle(from_data(kind, data)?),
            ShapeKind::Blur => Geometry::Blur(from_data(kind, data)?),
            ShapeKind::Pen => Geometry::Pen(from_data(kind, data)?),
            ShapeKind::Highlighter => Geometry::Highlighter(from_data(kind, data)?),
            ShapeKind::Arrow => Geometry::Arrow(from_data(kind, data)?),
            ShapeKind::DualArrow => Geometry::DualArrow(from_data(kind, data)?),
            ShapeKind::Line => Geometry::Line(from_data(kind, data)?),
            ShapeKind::Text => Geometry::Text(from_data(kind, data)?),
        };

        let shape = Shape::with_id(id, serialized.style, geometry);
        shape.validate()?;
        Ok(shape)
    }
}

fn to_data<T: Serialize>(geometry: &T) -> Value {
    // Geometry structs hold only numbers and strings, which always convert
    serde_json::to_value(geometry).unwrap_or(Value::Null)
}

fn from_data<T: DeserializeOwned>(kind: ShapeKind, data: &Value) -> ShapeResult<T> {
    T::deserialize(data).map_err(|source| ShapeError::MalformedData {
        kind: kind.as_str(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};
    use serde_json::json;

    #[test]
    fn wire_shape_uses_type_tag() {
        let shape = Shape::dual_arrow(ShapeStyle::default(), pos2(0.0, 0.0), pos2(5.0, 5.0));
        let wire = serde_json::to_value(shape.serialize()).unwrap();
        assert_eq!(wire["type"], "dual-arrow");
        assert_eq!(wire["data"]["end"]["x"], 5.0);
        assert_eq!(wire["id"], shape.id().to_string());
    }

    #[test]
    fn missing_field_is_reported_with_kind() {
        let mut serialized =
            Shape::rectangle(ShapeStyle::default(), pos2(1.0, 2.0), vec2(3.0, 4.0)).serialize();
        serialized.data = json!({ "origin": { "x": 1.0, "y": 2.0 } });

        let err = Shape::deserialize(&serialized).unwrap_err();
        assert!(matches!(err, ShapeError::MalformedData { kind: "rectangle", .. }));
        assert!(err.to_string().contains("size"));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut serialized = Shape::line(ShapeStyle::default(), pos2(0.0, 0.0), pos2(1.0, 1.0)).serialize();
        serialized.kind = "hexagon".to_owned();
        assert!(matches!(
            Shape::deserialize(&serialized),
            Err(ShapeError::UnknownKind(kind)) if kind == "hexagon"
        ));
    }

    #[test]
    fn empty_pen_is_rejected() {
        let mut serialized = Shape::pen(ShapeStyle::default(), vec![pos2(0.0, 0.0)]).serialize();
        serialized.data = json!({ "points": [] });
        assert!(matches!(
            Shape::deserialize(&serialized),
            Err(ShapeError::InvalidGeometry(_))
        ));
    }
}

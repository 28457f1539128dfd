use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ShapeError;

/// Stroke width used when nothing else is configured.
pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;
/// Blur strength used by blur regions when the style carries none.
pub const DEFAULT_BLUR_RADIUS: f32 = 8.0;

/// Visual style of a single shape.
///
/// A shape's style never changes in place; restyling swaps in a whole new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    #[serde(with = "hex_color")]
    pub stroke_color: Color32,
    pub stroke_width: f32,
    #[serde(default, with = "hex_color::option", skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<f32>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::stroke(Color32::RED, DEFAULT_STROKE_WIDTH)
    }
}

impl ShapeStyle {
    /// Outline-only style.
    pub fn stroke(color: Color32, width: f32) -> Self {
        Self {
            stroke_color: color,
            stroke_width: width,
            fill_color: None,
            blur: None,
        }
    }

    pub fn with_fill(self, fill: Color32) -> Self {
        Self {
            fill_color: Some(fill),
            ..self
        }
    }

    pub fn with_blur(self, radius: f32) -> Self {
        Self {
            blur: Some(radius),
            ..self
        }
    }

    pub fn is_filled(&self) -> bool {
        self.fill_color.is_some()
    }

    pub(crate) fn validate(&self) -> Result<(), ShapeError> {
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ShapeError::InvalidGeometry(format!(
                "stroke width must be a non-negative number, got {}",
                self.stroke_width
            )));
        }
        if let Some(blur) = self.blur {
            if !blur.is_finite() || blur < 0.0 {
                return Err(ShapeError::InvalidGeometry(format!(
                    "blur radius must be a non-negative number, got {blur}"
                )));
            }
        }
        Ok(())
    }
}

/// Colors travel as `#rrggbbaa` strings. Components are the premultiplied
/// values `Color32` stores, so translucent colors round-trip exactly.
pub(crate) mod hex_color {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::error::ShapeError;

    pub fn to_hex(color: Color32) -> String {
        let [r, g, b, a] = color.to_array();
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }

    /// Accepts `#rrggbb` (opaque) and `#rrggbbaa`.
    pub fn parse(text: &str) -> Result<Color32, ShapeError> {
        let invalid = || ShapeError::InvalidColor(text.to_owned());
        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        // from_str_radix alone would accept a leading `+`
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) || !matches!(digits.len(), 6 | 8) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Color32::from_rgba_premultiplied(
            channel(0)?,
            channel(2)?,
            channel(4)?,
            a,
        ))
    }

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use egui::Color32;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            color: &Option<Color32>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match color {
                Some(color) => serializer.serialize_some(&super::to_hex(*color)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Color32>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|text| super::parse(&text).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

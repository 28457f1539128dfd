use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::Primitive;
use super::common;
use crate::error::ShapeError;
use crate::geometry::BoundingBox;
use crate::style::ShapeStyle;
use crate::surface::Surface;

/// Axis-aligned rectangle outline, optionally filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub origin: Pos2,
    pub size: Vec2,
}

impl Rectangle {
    /// Negative sizes are folded so that `origin` is always the top-left corner.
    pub fn new(origin: Pos2, size: Vec2) -> Self {
        let bounds = BoundingBox::from_corners(origin, origin + size);
        Self {
            origin: bounds.min(),
            size: bounds.size(),
        }
    }

    pub fn from_corners(a: Pos2, b: Pos2) -> Self {
        let bounds = BoundingBox::from_corners(a, b);
        Self {
            origin: bounds.min(),
            size: bounds.size(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.origin, self.size)
    }
}

impl Primitive for Rectangle {
    fn draw(&self, surface: &mut dyn Surface, style: &ShapeStyle) {
        let rect = self.rect();
        if let Some(fill) = common::visible_fill(style) {
            surface.fill_rect(rect, fill);
        }
        surface.stroke_rect(rect, style.stroke_color, style.stroke_width);
    }

    fn hit_test(&self, point: Pos2, style: &ShapeStyle) -> bool {
        let bounds = self.bounds();
        if bounds.is_degenerate() {
            return false;
        }

        let tolerance = common::hit_tolerance(style);
        if !bounds.expand(tolerance).contains(point) {
            return false;
        }
        if style.is_filled() {
            return true;
        }

        // Outline only: reject points deep inside the frame
        let inner = bounds.expand(-tolerance);
        inner.is_degenerate() || !inner.contains(point)
    }

    fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.origin.x, self.origin.y, self.size.x, self.size.y)
    }

    fn validate(&self) -> Result<(), ShapeError> {
        common::require_finite_point(self.origin, "rectangle origin")?;
        common::require_non_negative(self.size.x, "rectangle width")?;
        common::require_non_negative(self.size.y, "rectangle height")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn negative_size_is_folded() {
        let rect = Rectangle::new(pos2(50.0, 40.0), vec2(-20.0, -10.0));
        assert_eq!(rect.origin, pos2(30.0, 30.0));
        assert_eq!(rect.size, vec2(20.0, 10.0));
    }

    #[test]
    fn outline_hits_edges_not_center() {
        let rect = Rectangle::new(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let style = ShapeStyle::default();
        assert!(rect.hit_test(pos2(0.0, 50.0), &style));
        assert!(rect.hit_test(pos2(102.0, 50.0), &style));
        assert!(!rect.hit_test(pos2(50.0, 50.0), &style));
        assert!(!rect.hit_test(pos2(120.0, 50.0), &style));
    }

    #[test]
    fn filled_hits_center() {
        let rect = Rectangle::new(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let style = ShapeStyle::default().with_fill(egui::Color32::WHITE);
        assert!(rect.hit_test(pos2(50.0, 50.0), &style));
    }

    #[test]
    fn zero_area_never_hits() {
        let rect = Rectangle::new(pos2(10.0, 10.0), vec2(0.0, 30.0));
        assert!(!rect.hit_test(pos2(10.0, 20.0), &ShapeStyle::default()));
        assert_eq!(rect.bounds(), BoundingBox::new(10.0, 10.0, 0.0, 30.0));
    }
}

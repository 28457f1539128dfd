use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::Primitive;
use super::common;
use crate::error::ShapeError;
use crate::geometry::BoundingBox;
use crate::style::ShapeStyle;
use crate::surface::Surface;

/// Region of the capture to obscure, e.g. a password or an email address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlurRegion {
    pub origin: Pos2,
    pub size: Vec2,
    pub radius: f32,
}

impl BlurRegion {
    pub fn from_corners(a: Pos2, b: Pos2, radius: f32) -> Self {
        let bounds = BoundingBox::from_corners(a, b);
        Self {
            origin: bounds.min(),
            size: bounds.size(),
            radius: radius.abs(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.origin, self.size)
    }
}

impl Primitive for BlurRegion {
    fn draw(&self, surface: &mut dyn Surface, _style: &ShapeStyle) {
        surface.blur_rect(self.rect(), self.radius);
    }

    /// The whole region is selectable, as if filled.
    fn hit_test(&self, point: Pos2, _style: &ShapeStyle) -> bool {
        let bounds = self.bounds();
        !bounds.is_degenerate() && bounds.contains(point)
    }

    fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.origin.x, self.origin.y, self.size.x, self.size.y)
    }

    fn validate(&self) -> Result<(), ShapeError> {
        common::require_finite_point(self.origin, "blur origin")?;
        common::require_non_negative(self.size.x, "blur width")?;
        common::require_non_negative(self.size.y, "blur height")?;
        common::require_non_negative(self.radius, "blur radius")
    }
}

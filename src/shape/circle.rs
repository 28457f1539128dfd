use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use super::Primitive;
use super::common;
use crate::error::ShapeError;
use crate::geometry::BoundingBox;
use crate::style::ShapeStyle;
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Pos2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Pos2, radius: f32) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    /// Circle centred on `center` whose edge passes through `edge`.
    pub fn through(center: Pos2, edge: Pos2) -> Self {
        Self::new(center, center.distance(edge))
    }
}

impl Primitive for Circle {
    fn draw(&self, surface: &mut dyn Surface, style: &ShapeStyle) {
        let radius = Vec2::splat(self.radius);
        if let Some(fill) = common::visible_fill(style) {
            surface.fill_ellipse(self.center, radius, fill);
        }
        surface.stroke_ellipse(self.center, radius, style.stroke_color, style.stroke_width);
    }

    fn hit_test(&self, point: Pos2, style: &ShapeStyle) -> bool {
        if self.radius <= 0.0 {
            return false;
        }

        let tolerance = common::hit_tolerance(style);
        let distance = self.center.distance(point);
        if style.is_filled() {
            distance <= self.radius + tolerance
        } else {
            (distance - self.radius).abs() <= tolerance
        }
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    fn bounds(&self) -> BoundingBox {
        let offset = Vec2::splat(self.radius);
        BoundingBox::from_corners(self.center - offset, self.center + offset)
    }

    fn validate(&self) -> Result<(), ShapeError> {
        common::require_finite_point(self.center, "circle center")?;
        common::require_non_negative(self.radius, "circle radius")
    }
}

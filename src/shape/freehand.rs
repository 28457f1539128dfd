use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use super::Primitive;
use super::common;
use crate::error::ShapeError;
use crate::geometry::BoundingBox;
use crate::geometry::hit_testing::distance_to_polyline;
use crate::style::ShapeStyle;
use crate::surface::Surface;

/// Free-form stroke shared by the pen and the highlighter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    pub points: Vec<Pos2>,
}

impl Freehand {
    pub fn new(points: Vec<Pos2>) -> Self {
        Self { points }
    }
}

impl Primitive for Freehand {
    fn draw(&self, surface: &mut dyn Surface, style: &ShapeStyle) {
        match self.points.as_slice() {
            [] => {}
            // A click without movement leaves a dot
            [dot] => {
                let radius = Vec2::splat(style.stroke_width / 2.0);
                surface.fill_ellipse(*dot, radius, style.stroke_color);
            }
            points => surface.stroke_path(points, style.stroke_color, style.stroke_width),
        }
    }

    fn hit_test(&self, point: Pos2, style: &ShapeStyle) -> bool {
        distance_to_polyline(point, &self.points) <= common::hit_tolerance(style)
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points).unwrap_or_default()
    }

    fn validate(&self) -> Result<(), ShapeError> {
        if self.points.is_empty() {
            return Err(ShapeError::InvalidGeometry(
                "freehand stroke needs at least one point".to_owned(),
            ));
        }
        for point in &self.points {
            common::require_finite_point(*point, "freehand point")?;
        }
        Ok(())
    }
}

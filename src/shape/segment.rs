use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use super::Primitive;
use super::common;
use crate::error::ShapeError;
use crate::geometry::BoundingBox;
use crate::geometry::hit_testing::{arrow_head, distance_to_segment};
use crate::style::ShapeStyle;
use crate::surface::Surface;

/// Which ends of a segment carry an arrow head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heads {
    None,
    End,
    Both,
}

/// Straight segment between two endpoints. Lines, arrows and dual arrows
/// share this geometry and differ only in their heads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Pos2,
    pub end: Pos2,
}

impl Segment {
    pub fn new(start: Pos2, end: Pos2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub(crate) fn draw_with_heads(&self, surface: &mut dyn Surface, style: &ShapeStyle, heads: Heads) {
        surface.stroke_path(&[self.start, self.end], style.stroke_color, style.stroke_width);

        let length = common::arrow_head_length(style);
        if matches!(heads, Heads::End | Heads::Both) {
            if let Some(head) = arrow_head(self.start, self.end, length) {
                surface.fill_path(&head, style.stroke_color);
            }
        }
        if heads == Heads::Both {
            if let Some(head) = arrow_head(self.end, self.start, length) {
                surface.fill_path(&head, style.stroke_color);
            }
        }
    }
}

impl Primitive for Segment {
    fn draw(&self, surface: &mut dyn Surface, style: &ShapeStyle) {
        self.draw_with_heads(surface, style, Heads::None);
    }

    /// Only the shaft is tested; heads sit on top of its ends.
    fn hit_test(&self, point: Pos2, style: &ShapeStyle) -> bool {
        distance_to_segment(point, self.start, self.end) <= common::hit_tolerance(style)
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_corners(self.start, self.end)
    }

    fn validate(&self) -> Result<(), ShapeError> {
        common::require_finite_point(self.start, "segment start")?;
        common::require_finite_point(self.end, "segment end")
    }
}

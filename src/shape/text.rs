use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use super::Primitive;
use super::common;
use crate::error::ShapeError;
use crate::geometry::BoundingBox;
use crate::style::ShapeStyle;
use crate::surface::Surface;

pub const DEFAULT_TEXT_SIZE: f32 = 20.0;
// Layout estimates: the core has no font metrics of its own
const GLYPH_WIDTH_FACTOR: f32 = 0.6;
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Finished text handed over by the text-input overlay once the user commits.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub text: String,
    pub anchor: Pos2,
}

impl TextPlacement {
    pub fn new(text: impl Into<String>, anchor: Pos2) -> Self {
        Self {
            text: text.into(),
            anchor,
        }
    }

    /// Blank input is a cancelled placement.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Text label anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub anchor: Pos2,
    pub text: String,
    #[serde(default = "default_text_size")]
    pub font_size: f32,
}

fn default_text_size() -> f32 {
    DEFAULT_TEXT_SIZE
}

impl TextLabel {
    pub fn new(anchor: Pos2, text: impl Into<String>, font_size: f32) -> Self {
        Self {
            anchor,
            text: text.into(),
            font_size,
        }
    }

    fn estimated_size(&self) -> Vec2 {
        if self.text.is_empty() {
            return Vec2::ZERO;
        }
        let lines = self.text.lines().count().max(1);
        let widest = self
            .text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        Vec2::new(
            widest as f32 * self.font_size * GLYPH_WIDTH_FACTOR,
            lines as f32 * self.font_size * LINE_HEIGHT_FACTOR,
        )
    }
}

impl Primitive for TextLabel {
    fn draw(&self, surface: &mut dyn Surface, style: &ShapeStyle) {
        if self.text.is_empty() {
            return;
        }
        surface.text(self.anchor, &self.text, self.font_size, style.stroke_color);
    }

    fn hit_test(&self, point: Pos2, _style: &ShapeStyle) -> bool {
        let bounds = self.bounds();
        !bounds.is_degenerate() && bounds.contains(point)
    }

    fn translate(&mut self, delta: Vec2) {
        self.anchor += delta;
    }

    fn bounds(&self) -> BoundingBox {
        let size = self.estimated_size();
        BoundingBox::new(self.anchor.x, self.anchor.y, size.x, size.y)
    }

    fn validate(&self) -> Result<(), ShapeError> {
        common::require_finite_point(self.anchor, "text anchor")?;
        common::require_non_negative(self.font_size, "font size")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn bounds_follow_longest_line() {
        let label = TextLabel::new(pos2(10.0, 10.0), "ab\nabcd", 10.0);
        let bounds = label.bounds();
        assert!((bounds.width - 24.0).abs() < 1e-4);
        assert!((bounds.height - 24.0).abs() < 1e-4);
    }

    #[test]
    fn empty_text_never_hits() {
        let label = TextLabel::new(pos2(10.0, 10.0), "", 10.0);
        assert!(!label.hit_test(pos2(10.0, 10.0), &ShapeStyle::default()));
        assert!(TextPlacement::new("  \n", pos2(0.0, 0.0)).is_blank());
    }
}

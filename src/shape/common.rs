use egui::{Color32, Pos2};

use crate::error::ShapeError;
use crate::style::ShapeStyle;

// Hit testing constants shared by every shape variant
pub const MIN_HIT_TOLERANCE: f32 = 4.0;
pub const HIGHLIGHTER_WIDTH_FACTOR: f32 = 4.0;
pub const HIGHLIGHTER_OPACITY: f32 = 0.4;
pub const ARROW_HEAD_MIN_LENGTH: f32 = 10.0;
pub const ARROW_HEAD_WIDTH_FACTOR: f32 = 3.0;

/// Half-width of the band around a stroke that still counts as a hit.
///
/// Thin strokes get at least `MIN_HIT_TOLERANCE` so they stay selectable.
pub fn hit_tolerance(style: &ShapeStyle) -> f32 {
    (style.stroke_width / 2.0).max(MIN_HIT_TOLERANCE)
}

/// The style a highlighter actually paints with: wider and translucent.
pub fn highlighter_style(style: &ShapeStyle) -> ShapeStyle {
    ShapeStyle {
        stroke_color: style.stroke_color.gamma_multiply(HIGHLIGHTER_OPACITY),
        stroke_width: style.stroke_width * HIGHLIGHTER_WIDTH_FACTOR,
        ..*style
    }
}

pub fn arrow_head_length(style: &ShapeStyle) -> f32 {
    (style.stroke_width * ARROW_HEAD_WIDTH_FACTOR).max(ARROW_HEAD_MIN_LENGTH)
}

/// Fill color for filled shapes, `None` when the fill would be invisible.
pub fn visible_fill(style: &ShapeStyle) -> Option<Color32> {
    style.fill_color.filter(|color| *color != Color32::TRANSPARENT)
}

pub(crate) fn require_finite_point(point: Pos2, what: &str) -> Result<(), ShapeError> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err(ShapeError::InvalidGeometry(format!(
            "{what} must have finite coordinates, got {point:?}"
        )))
    }
}

pub(crate) fn require_non_negative(value: f32, what: &str) -> Result<(), ShapeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ShapeError::InvalidGeometry(format!(
            "{what} must be a non-negative number, got {value}"
        )))
    }
}

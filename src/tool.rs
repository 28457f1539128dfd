use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::shape::{Shape, ShapeKind};
use crate::style::ShapeStyle;

/// Tool the user is annotating with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Pick and drag existing shapes
    #[default]
    Select,
    Rectangle,
    Circle,
    Blur,
    Pen,
    Highlighter,
    Arrow,
    DualArrow,
    Line,
    /// Places text through the text-input overlay
    Text,
}

impl Tool {
    /// The kind of shape this tool produces, if any.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Tool::Select => None,
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Blur => Some(ShapeKind::Blur),
            Tool::Pen => Some(ShapeKind::Pen),
            Tool::Highlighter => Some(ShapeKind::Highlighter),
            Tool::Arrow => Some(ShapeKind::Arrow),
            Tool::DualArrow => Some(ShapeKind::DualArrow),
            Tool::Line => Some(ShapeKind::Line),
            Tool::Text => Some(ShapeKind::Text),
        }
    }

    /// Tools whose gesture records every pointer position.
    pub fn is_freehand(&self) -> bool {
        matches!(self, Tool::Pen | Tool::Highlighter)
    }

    /// Tools that create a shape from a press-drag-release gesture.
    pub fn draws_by_dragging(&self) -> bool {
        !matches!(self, Tool::Select | Tool::Text)
    }
}

/// Turn a finished drag gesture into a shape.
///
/// `path` holds the recorded pointer positions for freehand tools. Gestures
/// shorter than `min_distance` are treated as stray clicks and produce nothing,
/// except for freehand tools where a click leaves a dot.
pub fn build_shape(
    tool: Tool,
    style: ShapeStyle,
    start: Pos2,
    end: Pos2,
    path: &[Pos2],
    min_distance: f32,
) -> Option<Shape> {
    let travelled = start.distance(end) >= min_distance;
    let spans_area = (end.x - start.x).abs() >= min_distance || (end.y - start.y).abs() >= min_distance;

    match tool {
        Tool::Select | Tool::Text => None,
        Tool::Rectangle => spans_area.then(|| Shape::rectangle(style, start, end - start)),
        Tool::Blur => spans_area.then(|| Shape::blur(style, start, end)),
        Tool::Circle => travelled.then(|| Shape::circle(style, start, start.distance(end))),
        Tool::Arrow => travelled.then(|| Shape::arrow(style, start, end)),
        Tool::DualArrow => travelled.then(|| Shape::dual_arrow(style, start, end)),
        Tool::Line => travelled.then(|| Shape::line(style, start, end)),
        Tool::Pen | Tool::Highlighter => {
            let mut points = if path.is_empty() { vec![start] } else { path.to_vec() };
            if points.last() != Some(&end) {
                points.push(end);
            }
            Some(if tool == Tool::Pen {
                Shape::pen(style, points)
            } else {
                Shape::highlighter(style, points)
            })
        }
    }
}

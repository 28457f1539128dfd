//! The drawing sink shapes render onto.
//!
//! Shapes only need a handful of 2D primitives. `egui::Painter` satisfies the
//! contract directly; [`Recorder`] captures the calls so renders can be compared.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

/// Minimal 2D drawing capability.
pub trait Surface {
    /// Open polyline through `points`.
    fn stroke_path(&mut self, points: &[Pos2], color: Color32, width: f32);

    /// Filled convex polygon.
    fn fill_path(&mut self, points: &[Pos2], color: Color32);

    fn stroke_rect(&mut self, rect: Rect, color: Color32, width: f32);

    fn fill_rect(&mut self, rect: Rect, color: Color32);

    fn stroke_ellipse(&mut self, center: Pos2, radius: Vec2, color: Color32, width: f32);

    fn fill_ellipse(&mut self, center: Pos2, radius: Vec2, color: Color32);

    /// Text with its top-left corner at `anchor`.
    fn text(&mut self, anchor: Pos2, text: &str, size: f32, color: Color32);

    /// Obscure whatever lies under `rect`.
    fn blur_rect(&mut self, rect: Rect, radius: f32);
}

/// Painters cannot sample the pixels beneath them, so blur regions render as a
/// frosted veil. The real pixel blur happens in [`crate::export`].
const FROSTED_VEIL: Color32 = Color32::from_rgba_premultiplied(96, 96, 96, 200);

impl Surface for Painter {
    fn stroke_path(&mut self, points: &[Pos2], color: Color32, width: f32) {
        self.add(egui::Shape::line(points.to_vec(), Stroke::new(width, color)));
    }

    fn fill_path(&mut self, points: &[Pos2], color: Color32) {
        self.add(egui::Shape::convex_polygon(points.to_vec(), color, Stroke::NONE));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color32, width: f32) {
        self.rect_stroke(rect, 0.0, Stroke::new(width, color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.rect_filled(rect, 0.0, color);
    }

    fn stroke_ellipse(&mut self, center: Pos2, radius: Vec2, color: Color32, width: f32) {
        self.add(egui::Shape::ellipse_stroke(center, radius, Stroke::new(width, color)));
    }

    fn fill_ellipse(&mut self, center: Pos2, radius: Vec2, color: Color32) {
        self.add(egui::Shape::ellipse_filled(center, radius, color));
    }

    fn text(&mut self, anchor: Pos2, text: &str, size: f32, color: Color32) {
        Painter::text(self, anchor, Align2::LEFT_TOP, text, FontId::proportional(size), color);
    }

    fn blur_rect(&mut self, rect: Rect, _radius: f32) {
        self.rect_filled(rect, 0.0, FROSTED_VEIL);
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    StrokePath { points: Vec<Pos2>, color: Color32, width: f32 },
    FillPath { points: Vec<Pos2>, color: Color32 },
    StrokeRect { rect: Rect, color: Color32, width: f32 },
    FillRect { rect: Rect, color: Color32 },
    StrokeEllipse { center: Pos2, radius: Vec2, color: Color32, width: f32 },
    FillEllipse { center: Pos2, radius: Vec2, color: Color32 },
    Text { anchor: Pos2, text: String, size: f32, color: Color32 },
    Blur { rect: Rect, radius: f32 },
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Surface for Recorder {
    fn stroke_path(&mut self, points: &[Pos2], color: Color32, width: f32) {
        self.ops.push(DrawOp::StrokePath {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn fill_path(&mut self, points: &[Pos2], color: Color32) {
        self.ops.push(DrawOp::FillPath {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color32, width: f32) {
        self.ops.push(DrawOp::StrokeRect { rect, color, width });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_ellipse(&mut self, center: Pos2, radius: Vec2, color: Color32, width: f32) {
        self.ops.push(DrawOp::StrokeEllipse {
            center,
            radius,
            color,
            width,
        });
    }

    fn fill_ellipse(&mut self, center: Pos2, radius: Vec2, color: Color32) {
        self.ops.push(DrawOp::FillEllipse {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, anchor: Pos2, text: &str, size: f32, color: Color32) {
        self.ops.push(DrawOp::Text {
            anchor,
            text: text.to_owned(),
            size,
            color,
        });
    }

    fn blur_rect(&mut self, rect: Rect, radius: f32) {
        self.ops.push(DrawOp::Blur { rect, radius });
    }
}

use std::fmt;
use std::str::FromStr;

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

mod blur;
mod circle;
mod collection;
pub(crate) mod common;
mod freehand;
mod rect;
mod segment;
mod serialize;
pub(crate) mod text;

pub use blur::BlurRegion;
pub use circle::Circle;
pub use collection::ShapeCollection;
pub use common::MIN_HIT_TOLERANCE;
pub use freehand::Freehand;
pub use rect::Rectangle;
pub use segment::{Heads, Segment};
pub use serialize::SerializedShape;
pub use text::{TextLabel, TextPlacement};

use crate::error::ShapeError;
use crate::geometry::BoundingBox;
use crate::id_generator::ShapeId;
use crate::style::ShapeStyle;
use crate::surface::Surface;

/// Behavior every concrete geometry provides. The owning [`Shape`] supplies
/// the style.
pub trait Primitive {
    /// Render onto `surface`. Must not mutate and must be repeatable.
    fn draw(&self, surface: &mut dyn Surface, style: &ShapeStyle);

    /// Whether `point` selects this geometry.
    fn hit_test(&self, point: Pos2, style: &ShapeStyle) -> bool;

    /// Translate every point by `delta`.
    fn translate(&mut self, delta: Vec2);

    /// Tight bounds of the current geometry.
    fn bounds(&self) -> BoundingBox;

    /// Reject geometry that would poison hit testing or bounds math.
    fn validate(&self) -> Result<(), ShapeError>;
}

/// Type tag of a shape as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Blur,
    Pen,
    Highlighter,
    Arrow,
    DualArrow,
    Line,
    Text,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Blur,
        ShapeKind::Pen,
        ShapeKind::Highlighter,
        ShapeKind::Arrow,
        ShapeKind::DualArrow,
        ShapeKind::Line,
        ShapeKind::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Blur => "blur",
            ShapeKind::Pen => "pen",
            ShapeKind::Highlighter => "highlighter",
            ShapeKind::Arrow => "arrow",
            ShapeKind::DualArrow => "dual-arrow",
            ShapeKind::Line => "line",
            ShapeKind::Text => "text",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ShapeError::UnknownKind(s.to_owned()))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of annotation geometries.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Rectangle(Rectangle),
    Circle(Circle),
    Blur(BlurRegion),
    Pen(Freehand),
    Highlighter(Freehand),
    Arrow(Segment),
    DualArrow(Segment),
    Line(Segment),
    Text(TextLabel),
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Rectangle(_) => ShapeKind::Rectangle,
            Geometry::Circle(_) => ShapeKind::Circle,
            Geometry::Blur(_) => ShapeKind::Blur,
            Geometry::Pen(_) => ShapeKind::Pen,
            Geometry::Highlighter(_) => ShapeKind::Highlighter,
            Geometry::Arrow(_) => ShapeKind::Arrow,
            Geometry::DualArrow(_) => ShapeKind::DualArrow,
            Geometry::Line(_) => ShapeKind::Line,
            Geometry::Text(_) => ShapeKind::Text,
        }
    }

    fn primitive(&self) -> &dyn Primitive {
        match self {
            Geometry::Rectangle(r) => r,
            Geometry::Circle(c) => c,
            Geometry::Blur(b) => b,
            Geometry::Pen(f) | Geometry::Highlighter(f) => f,
            Geometry::Arrow(s) | Geometry::DualArrow(s) | Geometry::Line(s) => s,
            Geometry::Text(t) => t,
        }
    }

    fn primitive_mut(&mut self) -> &mut dyn Primitive {
        match self {
            Geometry::Rectangle(r) => r,
            Geometry::Circle(c) => c,
            Geometry::Blur(b) => b,
            Geometry::Pen(f) | Geometry::Highlighter(f) => f,
            Geometry::Arrow(s) | Geometry::DualArrow(s) | Geometry::Line(s) => s,
            Geometry::Text(t) => t,
        }
    }
}

/// A drawable, hit-testable, movable and serializable annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    style: ShapeStyle,
    geometry: Geometry,
}

impl Shape {
    /// Create a shape with a freshly minted id.
    pub fn new(style: ShapeStyle, geometry: Geometry) -> Self {
        Self::with_id(ShapeId::generate(), style, geometry)
    }

    pub fn with_id(id: ShapeId, style: ShapeStyle, geometry: Geometry) -> Self {
        Self {
            id,
            style,
            geometry,
        }
    }

    pub fn rectangle(style: ShapeStyle, origin: Pos2, size: Vec2) -> Self {
        Self::new(style, Geometry::Rectangle(Rectangle::new(origin, size)))
    }

    pub fn circle(style: ShapeStyle, center: Pos2, radius: f32) -> Self {
        Self::new(style, Geometry::Circle(Circle::new(center, radius)))
    }

    pub fn blur(style: ShapeStyle, a: Pos2, b: Pos2) -> Self {
        let radius = style.blur.unwrap_or(crate::style::DEFAULT_BLUR_RADIUS);
        Self::new(style, Geometry::Blur(BlurRegion::from_corners(a, b, radius)))
    }

    pub fn pen(style: ShapeStyle, points: Vec<Pos2>) -> Self {
        Self::new(style, Geometry::Pen(Freehand::new(points)))
    }

    pub fn highlighter(style: ShapeStyle, points: Vec<Pos2>) -> Self {
        Self::new(style, Geometry::Highlighter(Freehand::new(points)))
    }

    pub fn arrow(style: ShapeStyle, start: Pos2, end: Pos2) -> Self {
        Self::new(style, Geometry::Arrow(Segment::new(start, end)))
    }

    pub fn dual_arrow(style: ShapeStyle, start: Pos2, end: Pos2) -> Self {
        Self::new(style, Geometry::DualArrow(Segment::new(start, end)))
    }

    pub fn line(style: ShapeStyle, start: Pos2, end: Pos2) -> Self {
        Self::new(style, Geometry::Line(Segment::new(start, end)))
    }

    pub fn text(style: ShapeStyle, anchor: Pos2, text: impl Into<String>, font_size: f32) -> Self {
        Self::new(style, Geometry::Text(TextLabel::new(anchor, text, font_size)))
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Swap in a new style, returning the old one.
    pub(crate) fn replace_style(&mut self, style: ShapeStyle) -> ShapeStyle {
        std::mem::replace(&mut self.style, style)
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match &self.geometry {
            Geometry::Highlighter(stroke) => {
                stroke.draw(surface, &common::highlighter_style(&self.style));
            }
            Geometry::Arrow(segment) => segment.draw_with_heads(surface, &self.style, Heads::End),
            Geometry::DualArrow(segment) => {
                segment.draw_with_heads(surface, &self.style, Heads::Both);
            }
            geometry => geometry.primitive().draw(surface, &self.style),
        }
    }

    pub fn hit_test(&self, point: Pos2) -> bool {
        match &self.geometry {
            Geometry::Highlighter(stroke) => {
                stroke.hit_test(point, &common::highlighter_style(&self.style))
            }
            geometry => geometry.primitive().hit_test(point, &self.style),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.geometry.primitive_mut().translate(delta);
    }

    pub fn bounds(&self) -> BoundingBox {
        self.geometry.primitive().bounds()
    }

    pub(crate) fn validate(&self) -> Result<(), ShapeError> {
        self.style.validate()?;
        self.geometry.primitive().validate()
    }
}

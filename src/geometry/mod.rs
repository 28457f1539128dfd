use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

pub mod hit_testing;

/// A plane coordinate. Annotation geometry is expressed in the pixel space of
/// the captured image.
pub type Point = Pos2;

/// Axis-aligned box enclosing a shape's geometry.
///
/// Always recomputed from live geometry; `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box from two opposite corners, in any order.
    pub fn from_corners(a: Pos2, b: Pos2) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self {
            x: min_x,
            y: min_y,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Tight bounds of a point set. `None` for an empty set.
    pub fn from_points(points: &[Pos2]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;

        for point in &points[1..] {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        Some(Self::from_corners(min, max))
    }

    /// A zero-size box sitting at `point`.
    pub fn at(point: Pos2) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    pub fn min(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    pub fn max(&self) -> Pos2 {
        Pos2::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Pos2 {
        Pos2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True when the box encloses no area.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Pos2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Grow the box by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    pub fn translate(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    pub fn union(&self, other: &BoundingBox) -> Self {
        Self::from_corners(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// Component-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &BoundingBox, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }

    pub fn to_rect(&self) -> Rect {
        Rect::from_min_max(self.min(), self.max())
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self::from_corners(rect.min, rect.max)
    }
}

impl From<BoundingBox> for Rect {
    fn from(bounds: BoundingBox) -> Self {
        bounds.to_rect()
    }
}

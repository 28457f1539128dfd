use egui::Vec2;
use log::{debug, warn};

use crate::id_generator::ShapeId;
use crate::shape::{Shape, ShapeCollection};
use crate::style::ShapeStyle;

/// Reversible mutations of the shape collection.
///
/// Each variant carries exactly the data needed to reverse itself. Shapes are
/// addressed by id; the collection passed to `execute`/`undo` owns them.
/// `execute` and `undo` must strictly alternate, which [`super::CommandStack`]
/// guarantees.
#[derive(Debug, Clone)]
pub enum Command {
    /// Append a shape. While the command is not applied the shape lives in
    /// `pending`; once applied it lives in the collection.
    AddShape {
        id: ShapeId,
        pending: Option<Shape>,
    },

    /// Remove a shape, remembering where it sat.
    DeleteShape {
        id: ShapeId,
        removed: Option<(usize, Shape)>,
    },

    /// Translate a shape.
    MoveShape { id: ShapeId, delta: Vec2 },

    /// Replace a shape's style. Holds the style that is *not* currently applied.
    RestyleShape { id: ShapeId, style: ShapeStyle },
}

impl Command {
    pub fn add_shape(shape: Shape) -> Self {
        Command::AddShape {
            id: shape.id(),
            pending: Some(shape),
        }
    }

    pub fn delete_shape(id: ShapeId) -> Self {
        Command::DeleteShape { id, removed: None }
    }

    pub fn move_shape(id: ShapeId, dx: f32, dy: f32) -> Self {
        Command::MoveShape {
            id,
            delta: Vec2::new(dx, dy),
        }
    }

    pub fn restyle_shape(id: ShapeId, style: ShapeStyle) -> Self {
        Command::RestyleShape { id, style }
    }

    /// The shape this command acts on.
    pub fn target(&self) -> ShapeId {
        match self {
            Command::AddShape { id, .. }
            | Command::DeleteShape { id, .. }
            | Command::MoveShape { id, .. }
            | Command::RestyleShape { id, .. } => *id,
        }
    }

    /// Short label, e.g. for an "Undo …" menu entry.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddShape { .. } => "Add shape",
            Command::DeleteShape { .. } => "Delete shape",
            Command::MoveShape { .. } => "Move shape",
            Command::RestyleShape { .. } => "Change style",
        }
    }

    pub(crate) fn execute(&mut self, shapes: &mut ShapeCollection) {
        match self {
            Command::AddShape { id, pending } => {
                if shapes.contains(*id) {
                    // Ids are unique within the collection
                    warn!("AddShape {id}: a shape with this id is already on the canvas");
                    return;
                }
                match pending.take() {
                    Some(shape) => shapes.push(shape),
                    None => warn!("AddShape {id} executed while already applied"),
                }
            }

            Command::DeleteShape { id, removed } => {
                *removed = shapes.remove(*id);
                if removed.is_none() {
                    // Already gone; undo must not resurrect anything
                    debug!("DeleteShape {id}: no such shape, nothing removed");
                }
            }

            Command::MoveShape { id, delta } => match shapes.get_mut(*id) {
                Some(shape) => shape.translate(*delta),
                None => warn!("MoveShape {id}: no such shape"),
            },

            Command::RestyleShape { id, style } => match shapes.get_mut(*id) {
                Some(shape) => *style = shape.replace_style(*style),
                None => warn!("RestyleShape {id}: no such shape"),
            },
        }
    }

    pub(crate) fn undo(&mut self, shapes: &mut ShapeCollection) {
        match self {
            Command::AddShape { id, pending } => {
                if pending.is_some() {
                    debug!("AddShape {id} was rejected, nothing to undo");
                    return;
                }
                match shapes.remove(*id) {
                    Some((_, shape)) => *pending = Some(shape),
                    None => warn!("AddShape {id} undone but the shape is missing"),
                }
            }

            Command::DeleteShape { removed, .. } => {
                if let Some((index, shape)) = removed.take() {
                    shapes.insert(index, shape);
                }
            }

            Command::MoveShape { id, delta } => match shapes.get_mut(*id) {
                Some(shape) => shape.translate(-*delta),
                None => warn!("MoveShape {id}: no such shape to move back"),
            },

            // Swapping is its own inverse
            Command::RestyleShape { id, style } => match shapes.get_mut(*id) {
                Some(shape) => *style = shape.replace_style(*style),
                None => warn!("RestyleShape {id}: no such shape"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2, vec2};

    fn rect() -> Shape {
        Shape::rectangle(ShapeStyle::default(), pos2(10.0, 10.0), vec2(50.0, 30.0))
    }

    #[test]
    fn add_then_undo_moves_ownership_back() {
        let mut shapes = ShapeCollection::new();
        let mut cmd = Command::add_shape(rect());

        cmd.execute(&mut shapes);
        assert_eq!(shapes.len(), 1);
        assert!(matches!(&cmd, Command::AddShape { pending: None, .. }));

        cmd.undo(&mut shapes);
        assert!(shapes.is_empty());
        assert!(matches!(&cmd, Command::AddShape { pending: Some(_), .. }));
    }

    #[test]
    fn add_with_live_id_is_rejected() {
        let mut shapes = ShapeCollection::new();
        let original = rect();
        let id = original.id();
        let mut add_original = Command::add_shape(original);
        add_original.execute(&mut shapes);

        let twin = Shape::with_id(
            id,
            ShapeStyle::default(),
            crate::shape::Geometry::Rectangle(crate::shape::Rectangle::new(
                pos2(100.0, 100.0),
                vec2(5.0, 5.0),
            )),
        );
        let mut add_twin = Command::add_shape(twin);
        add_twin.execute(&mut shapes);
        assert_eq!(shapes.len(), 1);
        assert!(matches!(&add_twin, Command::AddShape { pending: Some(_), .. }));

        add_twin.undo(&mut shapes);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes.get(id).unwrap().bounds().min(), pos2(10.0, 10.0));
    }

    #[test]
    fn delete_restores_original_index() {
        let mut shapes = ShapeCollection::new();
        let (a, b, c) = (rect(), rect(), rect());
        let b_id = b.id();
        shapes.push(a);
        shapes.push(b);
        shapes.push(c);

        let mut cmd = Command::delete_shape(b_id);
        cmd.execute(&mut shapes);
        assert_eq!(shapes.len(), 2);
        assert!(!shapes.contains(b_id));

        cmd.undo(&mut shapes);
        assert_eq!(shapes.position(b_id), Some(1));
    }

    #[test]
    fn restyle_swaps_back_and_forth() {
        let mut shapes = ShapeCollection::new();
        let shape = rect();
        let id = shape.id();
        let original = *shape.style();
        shapes.push(shape);

        let blue = ShapeStyle::stroke(Color32::BLUE, 8.0);
        let mut cmd = Command::restyle_shape(id, blue);
        cmd.execute(&mut shapes);
        assert_eq!(shapes.get(id).unwrap().style(), &blue);

        cmd.undo(&mut shapes);
        assert_eq!(shapes.get(id).unwrap().style(), &original);
    }
}

use log::debug;

use super::Command;
use crate::shape::ShapeCollection;

/// Linear undo/redo history.
///
/// Commands move between the two stacks and are never in both. Executing a
/// new command discards everything that could have been redone.
#[derive(Debug, Default)]
pub struct CommandStack {
    /// Applied commands, most recent last
    undo_stack: Vec<Command>,
    /// Undone commands, most recently undone last
    redo_stack: Vec<Command>,
    /// Oldest entries are dropped beyond this many undo steps
    limit: Option<usize>,
}

impl CommandStack {
    /// Creates a new empty, unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Apply `command` and record it.
    pub fn execute(&mut self, mut command: Command, shapes: &mut ShapeCollection) {
        command.execute(shapes);
        debug!("execute: {} {}", command.name(), command.target());

        self.undo_stack.push(command);
        self.redo_stack.clear();
        self.enforce_limit();
    }

    /// Revert the most recent command. `false` when there is nothing to undo.
    pub fn undo(&mut self, shapes: &mut ShapeCollection) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };
        command.undo(shapes);
        debug!("undo: {} {}", command.name(), command.target());
        self.redo_stack.push(command);
        true
    }

    /// Re-apply the most recently undone command. `false` when there is nothing to redo.
    pub fn redo(&mut self, shapes: &mut ShapeCollection) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        command.execute(shapes);
        debug!("redo: {} {}", command.name(), command.target());
        self.undo_stack.push(command);
        true
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// The command `undo` would revert next.
    pub fn next_undo(&self) -> Option<&Command> {
        self.undo_stack.last()
    }

    /// The command `redo` would re-apply next.
    pub fn next_redo(&self) -> Option<&Command> {
        self.redo_stack.last()
    }

    /// Drop all history, e.g. when a new capture starts a new session.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use crate::style::ShapeStyle;
    use egui::pos2;

    fn line(n: f32) -> Shape {
        Shape::line(ShapeStyle::default(), pos2(n, n), pos2(n + 1.0, n + 1.0))
    }

    #[test]
    fn new_command_clears_redo_stack() {
        let mut shapes = ShapeCollection::new();
        let mut history = CommandStack::new();
        history.execute(Command::add_shape(line(0.0)), &mut shapes);
        assert!(history.undo(&mut shapes));
        assert_eq!(history.redo_len(), 1);

        history.execute(Command::add_shape(line(1.0)), &mut shapes);
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn empty_stacks_report_false() {
        let mut shapes = ShapeCollection::new();
        let mut history = CommandStack::new();
        assert!(!history.undo(&mut shapes));
        assert!(!history.redo(&mut shapes));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn limit_drops_oldest_entries() {
        let mut shapes = ShapeCollection::new();
        let mut history = CommandStack::with_limit(Some(2));
        for n in 0..4 {
            history.execute(Command::add_shape(line(n as f32)), &mut shapes);
        }
        assert_eq!(history.undo_len(), 2);
        assert_eq!(shapes.len(), 4);

        assert!(history.undo(&mut shapes));
        assert!(history.undo(&mut shapes));
        assert!(!history.undo(&mut shapes));
        assert_eq!(shapes.len(), 2);
    }
}

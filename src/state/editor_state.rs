//! The single source of truth for what the canvas looks like and what the
//! user is currently doing.
//!
//! `EditorState` owns the shape collection and the command history that
//! mutates it. Every change to the shapes goes through a [`Command`]; tool,
//! color, width and selection are plain state that never enters history.
//!
//! # Gestures
//!
//! ```text
//!              begin_drag            drag_to*            end_drag
//!   ┌──────┐ ────────────► ┌──────────┐ ───┐   ┌─────────────────────┐
//!   │ Idle │               │ Dragging │ ◄──┘──►│ one AddShape or     │
//!   │      │ ◄──────────── │          │        │ MoveShape dispatched│
//!   └──────┘  cancel_drag  └──────────┘        └─────────────────────┘
//!             (nothing dispatched)
//! ```
//!
//! A whole gesture becomes exactly one history entry. While a selected shape
//! is being dragged it is only *rendered* at its offset; the collection is
//! untouched until `end_drag` dispatches the move.
//!
//! # Selection
//!
//! After every dispatch, undo, redo or reset the selection is checked against
//! the collection and cleared if its shape is gone, so it never dangles.

use egui::{Color32, Pos2, Vec2};
use log::{debug, info, warn};

use crate::command::{Command, CommandStack};
use crate::config::EditorConfig;
use crate::id_generator::ShapeId;
use crate::shape::{Shape, ShapeCollection, TextPlacement};
use crate::style::{DEFAULT_BLUR_RADIUS, ShapeStyle};
use crate::surface::Surface;
use crate::tool::{self, Tool};

const SELECTION_COLOR: Color32 = Color32::from_rgb(0, 120, 215);
const SELECTION_MARGIN: f32 = 4.0;

#[derive(Debug)]
pub struct EditorState {
    active_tool: Tool,
    active_color: Color32,
    active_width: f32,
    text_size: f32,
    min_drag_distance: f32,

    shapes: ShapeCollection,
    history: CommandStack,

    selected: Option<ShapeId>,

    is_dragging: bool,
    drag_start: Option<Pos2>,
    drag_current: Option<Pos2>,
    /// Pointer trail of a freehand gesture
    drag_path: Vec<Pos2>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::with_config(&EditorConfig::default())
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            active_tool: config.default_tool,
            active_color: config.default_color,
            active_width: config.default_width,
            text_size: config.text_size,
            min_drag_distance: config.min_drag_distance,
            shapes: ShapeCollection::new(),
            history: CommandStack::with_limit(config.history_limit),
            selected: None,
            is_dragging: false,
            drag_start: None,
            drag_current: None,
            drag_path: Vec::new(),
        }
    }

    // --- tool & style -------------------------------------------------------

    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    /// Switching tools abandons any gesture in progress.
    pub fn set_active_tool(&mut self, tool: Tool) {
        if tool != self.active_tool {
            self.cancel_drag();
            if tool != Tool::Select {
                self.selected = None;
            }
            self.active_tool = tool;
        }
    }

    pub fn active_color(&self) -> Color32 {
        self.active_color
    }

    pub fn set_active_color(&mut self, color: Color32) {
        self.active_color = color;
    }

    pub fn active_width(&self) -> f32 {
        self.active_width
    }

    pub fn set_active_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.active_width = width;
        } else {
            warn!("Ignoring invalid stroke width {width}");
        }
    }

    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    /// Style new shapes are created with.
    pub fn active_style(&self) -> ShapeStyle {
        let style = ShapeStyle::stroke(self.active_color, self.active_width);
        if self.active_tool == Tool::Blur {
            style.with_blur(DEFAULT_BLUR_RADIUS)
        } else {
            style
        }
    }

    // --- shapes & history ---------------------------------------------------

    pub fn shapes(&self) -> &ShapeCollection {
        &self.shapes
    }

    pub fn history(&self) -> &CommandStack {
        &self.history
    }

    pub fn dispatch(&mut self, command: Command) {
        self.history.execute(command, &mut self.shapes);
        self.reconcile_selection();
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.shapes);
        self.reconcile_selection();
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.shapes);
        self.reconcile_selection();
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Start a new session over a new capture: no shapes, no history.
    pub fn reset(&mut self) {
        self.cancel_drag();
        self.shapes.clear();
        self.history.clear();
        self.selected = None;
        info!("Editor reset");
    }

    /// Install `shapes` as a fresh session. History starts empty so it cannot
    /// disagree with what is on the canvas.
    pub(crate) fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        self.reset();
        for shape in shapes {
            self.shapes.push(shape);
        }
    }

    // --- selection ----------------------------------------------------------

    pub fn selected_shape_id(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.shapes.get(id))
    }

    /// Select `id` if it is on the canvas.
    pub fn select(&mut self, id: ShapeId) -> bool {
        if self.shapes.contains(id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Topmost shape under `point`.
    pub fn shape_at(&self, point: Pos2) -> Option<ShapeId> {
        self.shapes.topmost_at(point).map(Shape::id)
    }

    /// Select the topmost shape under `point`, or clear the selection.
    pub fn select_at(&mut self, point: Pos2) -> Option<ShapeId> {
        self.selected = self.shape_at(point);
        self.selected
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => {
                self.dispatch(Command::delete_shape(id));
                true
            }
            None => false,
        }
    }

    pub fn restyle_selected(&mut self, style: ShapeStyle) -> bool {
        match self.selected_shape() {
            Some(shape) if *shape.style() != style => {
                let id = shape.id();
                self.dispatch(Command::restyle_shape(id, style));
                true
            }
            _ => false,
        }
    }

    fn reconcile_selection(&mut self) {
        if let Some(id) = self.selected {
            if !self.shapes.contains(id) {
                debug!("Clearing selection of removed shape {id}");
                self.selected = None;
            }
        }
    }

    // --- gestures -----------------------------------------------------------

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn drag_start(&self) -> Option<Pos2> {
        self.drag_start
    }

    /// How far the pointer has travelled in the current gesture.
    pub fn drag_offset(&self) -> Option<Vec2> {
        Some(self.drag_current? - self.drag_start?)
    }

    /// Press. With the select tool this picks the shape to drag; returns
    /// `false` when the press starts no gesture.
    pub fn begin_drag(&mut self, point: Pos2) -> bool {
        match self.active_tool {
            Tool::Text => return false,
            Tool::Select => {
                if self.select_at(point).is_none() {
                    return false;
                }
            }
            _ => {}
        }

        self.is_dragging = true;
        self.drag_start = Some(point);
        self.drag_current = Some(point);
        self.drag_path.clear();
        if self.active_tool.is_freehand() {
            self.drag_path.push(point);
        }
        true
    }

    /// Pointer motion during a gesture.
    pub fn drag_to(&mut self, point: Pos2) {
        if !self.is_dragging {
            return;
        }
        self.drag_current = Some(point);
        if self.active_tool.is_freehand() && self.drag_path.last() != Some(&point) {
            self.drag_path.push(point);
        }
    }

    /// Release. Dispatches the single command summarizing the gesture and
    /// returns the shape it affected.
    pub fn end_drag(&mut self, point: Pos2) -> Option<ShapeId> {
        if !self.is_dragging {
            return None;
        }
        self.drag_to(point);
        let start = self.drag_start?;
        let path = std::mem::take(&mut self.drag_path);
        self.clear_drag();

        if self.active_tool == Tool::Select {
            let id = self.selected?;
            let delta = point - start;
            // Jitter during a click is not a move
            if delta != Vec2::ZERO && delta.length() >= self.min_drag_distance {
                self.dispatch(Command::move_shape(id, delta.x, delta.y));
            }
            return Some(id);
        }

        let shape = tool::build_shape(
            self.active_tool,
            self.active_style(),
            start,
            point,
            &path,
            self.min_drag_distance,
        )?;
        let id = shape.id();
        self.dispatch(Command::add_shape(shape));
        Some(id)
    }

    /// Abandon the gesture. Nothing is dispatched.
    pub fn cancel_drag(&mut self) {
        if self.is_dragging {
            debug!("Gesture cancelled");
        }
        self.drag_path.clear();
        self.clear_drag();
    }

    fn clear_drag(&mut self) {
        self.is_dragging = false;
        self.drag_start = None;
        self.drag_current = None;
    }

    /// Commit text from the text-input overlay.
    pub fn place_text(&mut self, placement: TextPlacement) -> Option<ShapeId> {
        if placement.is_blank() {
            return None;
        }
        let style = ShapeStyle::stroke(self.active_color, self.active_width);
        let shape = Shape::text(style, placement.anchor, placement.text, self.text_size);
        let id = shape.id();
        self.dispatch(Command::add_shape(shape));
        Some(id)
    }

    /// Shape being drawn by the current gesture, for live feedback.
    pub fn preview(&self) -> Option<Shape> {
        if !self.is_dragging || !self.active_tool.draws_by_dragging() {
            return None;
        }
        tool::build_shape(
            self.active_tool,
            self.active_style(),
            self.drag_start?,
            self.drag_current?,
            &self.drag_path,
            0.0,
        )
    }

    // --- rendering ----------------------------------------------------------

    /// Draw the canvas bottom to top, then gesture feedback and the selection frame.
    pub fn render(&self, surface: &mut dyn Surface) {
        let moving = if self.active_tool == Tool::Select && self.is_dragging {
            self.selected.zip(self.drag_offset())
        } else {
            None
        };

        for shape in &self.shapes {
            match moving {
                Some((id, offset)) if id == shape.id() => {
                    let mut dragged = shape.clone();
                    dragged.translate(offset);
                    dragged.draw(surface);
                }
                _ => shape.draw(surface),
            }
        }

        if let Some(preview) = self.preview() {
            preview.draw(surface);
        }

        if let Some(shape) = self.selected_shape() {
            let mut bounds = shape.bounds().expand(SELECTION_MARGIN);
            if let Some((_, offset)) = moving {
                bounds = bounds.translate(offset);
            }
            surface.stroke_rect(bounds.to_rect(), SELECTION_COLOR, 1.0);
        }
    }
}

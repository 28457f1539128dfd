use egui::{Color32, pos2, vec2};
use snapmark::shape::Geometry;
use snapmark::surface::DrawOp;
use snapmark::{
    Command, EditorConfig, EditorState, Recorder, Shape, ShapeKind, ShapeStyle, TextPlacement,
    Tool,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn editor_with_rect() -> (EditorState, snapmark::ShapeId) {
    let mut editor = EditorState::new();
    let rect = Shape::rectangle(
        ShapeStyle::default().with_fill(Color32::WHITE),
        pos2(10.0, 10.0),
        vec2(50.0, 30.0),
    );
    let id = rect.id();
    editor.dispatch(Command::add_shape(rect));
    (editor, id)
}

#[test]
fn test_config_drives_initial_state() {
    let config = EditorConfig {
        default_tool: Tool::Arrow,
        default_color: Color32::BLUE,
        default_width: 7.0,
        history_limit: Some(1),
        ..EditorConfig::default()
    };
    let mut editor = EditorState::with_config(&config);
    assert_eq!(editor.active_tool(), Tool::Arrow);
    assert_eq!(editor.active_style(), ShapeStyle::stroke(Color32::BLUE, 7.0));

    editor.begin_drag(pos2(0.0, 0.0));
    editor.end_drag(pos2(10.0, 10.0));
    editor.begin_drag(pos2(0.0, 20.0));
    editor.end_drag(pos2(10.0, 30.0));
    assert_eq!(editor.shapes().len(), 2);
    assert_eq!(editor.history().undo_len(), 1);
}

#[test]
fn test_drawing_gesture_dispatches_one_add() {
    init_logging();
    let mut editor = EditorState::new();
    editor.set_active_tool(Tool::Rectangle);

    assert!(editor.begin_drag(pos2(10.0, 10.0)));
    assert!(editor.is_dragging());
    editor.drag_to(pos2(30.0, 20.0));
    editor.drag_to(pos2(60.0, 40.0));
    assert!(editor.shapes().is_empty(), "nothing is committed mid-gesture");
    assert_eq!(editor.preview().map(|s| s.kind()), Some(ShapeKind::Rectangle));

    let id = editor.end_drag(pos2(60.0, 40.0)).unwrap();
    assert!(!editor.is_dragging());
    assert_eq!(editor.drag_start(), None);
    assert_eq!(editor.shapes().len(), 1);
    assert_eq!(editor.history().undo_len(), 1);
    assert_eq!(editor.shapes().get(id).unwrap().bounds().size(), vec2(50.0, 30.0));
}

#[test]
fn test_pen_gesture_records_path() {
    let mut editor = EditorState::new();
    editor.set_active_tool(Tool::Pen);
    editor.begin_drag(pos2(0.0, 0.0));
    editor.drag_to(pos2(5.0, 5.0));
    editor.drag_to(pos2(5.0, 5.0));
    editor.drag_to(pos2(10.0, 0.0));
    let id = editor.end_drag(pos2(10.0, 0.0)).unwrap();

    match editor.shapes().get(id).unwrap().geometry() {
        Geometry::Pen(stroke) => assert_eq!(
            stroke.points,
            vec![pos2(0.0, 0.0), pos2(5.0, 5.0), pos2(10.0, 0.0)]
        ),
        other => panic!("expected pen, got {other:?}"),
    }
}

#[test]
fn test_cancelled_gesture_dispatches_nothing() {
    let mut editor = EditorState::new();
    editor.set_active_tool(Tool::Circle);
    editor.begin_drag(pos2(0.0, 0.0));
    editor.drag_to(pos2(40.0, 0.0));
    editor.cancel_drag();

    assert!(!editor.is_dragging());
    assert!(editor.shapes().is_empty());
    assert!(!editor.can_undo());
    assert_eq!(editor.end_drag(pos2(50.0, 0.0)), None);
}

#[test]
fn test_select_and_drag_moves_through_history() {
    let (mut editor, id) = editor_with_rect();
    editor.set_active_tool(Tool::Select);

    assert!(editor.begin_drag(pos2(20.0, 20.0)));
    assert_eq!(editor.selected_shape_id(), Some(id));
    editor.drag_to(pos2(25.0, 15.0));
    assert_eq!(editor.drag_offset(), Some(vec2(5.0, -5.0)));

    // Live feedback draws the shape at its offset without mutating it
    let mut recorder = Recorder::new();
    editor.render(&mut recorder);
    assert!(recorder.ops.iter().any(|op| matches!(
        op,
        DrawOp::FillRect { rect, .. } if rect.min == pos2(15.0, 5.0)
    )));
    assert_eq!(editor.shapes().get(id).unwrap().bounds().min(), pos2(10.0, 10.0));

    editor.end_drag(pos2(25.0, 15.0));
    assert_eq!(editor.shapes().get(id).unwrap().bounds().min(), pos2(15.0, 5.0));
    assert_eq!(editor.history().undo_len(), 2);

    assert!(editor.undo());
    assert_eq!(editor.shapes().get(id).unwrap().bounds().min(), pos2(10.0, 10.0));
}

#[test]
fn test_click_without_motion_records_no_move() {
    let (mut editor, id) = editor_with_rect();
    editor.begin_drag(pos2(20.0, 20.0));
    assert_eq!(editor.end_drag(pos2(20.0, 20.0)), Some(id));
    assert_eq!(editor.history().undo_len(), 1);
}

#[test]
fn test_select_jitter_below_threshold_records_no_move() {
    let (mut editor, id) = editor_with_rect();
    editor.begin_drag(pos2(20.0, 20.0));
    editor.drag_to(pos2(21.0, 20.5));
    assert_eq!(editor.end_drag(pos2(21.0, 20.5)), Some(id));

    assert_eq!(editor.history().undo_len(), 1);
    assert_eq!(editor.shapes().get(id).unwrap().bounds().min(), pos2(10.0, 10.0));
}

#[test]
fn test_press_on_empty_canvas_clears_selection() {
    let (mut editor, id) = editor_with_rect();
    assert!(editor.select(id));
    assert!(!editor.begin_drag(pos2(500.0, 500.0)));
    assert_eq!(editor.selected_shape_id(), None);
    assert!(!editor.is_dragging());
}

#[test]
fn test_hit_testing_prefers_topmost() {
    let mut editor = EditorState::new();
    let filled = ShapeStyle::default().with_fill(Color32::WHITE);
    let bottom = Shape::rectangle(filled, pos2(0.0, 0.0), vec2(100.0, 100.0));
    let top = Shape::circle(filled, pos2(50.0, 50.0), 10.0);
    let (bottom_id, top_id) = (bottom.id(), top.id());
    editor.dispatch(Command::add_shape(bottom));
    editor.dispatch(Command::add_shape(top));

    assert_eq!(editor.shape_at(pos2(50.0, 50.0)), Some(top_id));
    assert_eq!(editor.shape_at(pos2(5.0, 5.0)), Some(bottom_id));
    assert_eq!(editor.shape_at(pos2(500.0, 5.0)), None);
}

#[test]
fn test_selection_never_dangles() {
    let (mut editor, id) = editor_with_rect();
    editor.select(id);

    assert!(editor.delete_selected());
    assert_eq!(editor.selected_shape_id(), None);

    assert!(editor.undo());
    assert!(editor.shapes().contains(id));
    editor.select(id);

    // Undoing the add removes the selected shape
    assert!(editor.undo());
    assert_eq!(editor.selected_shape_id(), None);

    assert!(editor.redo());
    editor.select(id);
    editor.dispatch(Command::delete_shape(id));
    assert_eq!(editor.selected_shape_id(), None);
    assert!(editor.selected_shape().is_none());

    assert!(!editor.select(id));
}

#[test]
fn test_restyle_selected_is_undoable() {
    let (mut editor, id) = editor_with_rect();
    let original = *editor.shapes().get(id).unwrap().style();
    editor.select(id);

    let green = ShapeStyle::stroke(Color32::GREEN, 5.0);
    assert!(editor.restyle_selected(green));
    assert!(!editor.restyle_selected(green), "same style is not a change");
    assert_eq!(editor.shapes().get(id).unwrap().style(), &green);

    assert!(editor.undo());
    assert_eq!(editor.shapes().get(id).unwrap().style(), &original);
}

#[test]
fn test_place_text_from_overlay() {
    let mut editor = EditorState::new();
    editor.set_active_tool(Tool::Text);
    editor.set_active_color(Color32::BLACK);
    assert!(!editor.begin_drag(pos2(5.0, 5.0)));

    assert_eq!(editor.place_text(TextPlacement::new("   ", pos2(5.0, 5.0))), None);
    assert!(!editor.can_undo());

    let id = editor
        .place_text(TextPlacement::new("Bug here", pos2(5.0, 5.0)))
        .unwrap();
    let shape = editor.shapes().get(id).unwrap();
    assert_eq!(shape.kind(), ShapeKind::Text);
    assert_eq!(shape.style().stroke_color, Color32::BLACK);
    assert!(shape.hit_test(pos2(10.0, 10.0)));
}

#[test]
fn test_tool_and_style_changes_are_not_history() {
    let mut editor = EditorState::new();
    editor.set_active_tool(Tool::Highlighter);
    editor.set_active_color(Color32::YELLOW);
    editor.set_active_width(12.0);
    editor.set_active_width(f32::NAN);
    assert_eq!(editor.active_width(), 12.0);
    assert!(!editor.can_undo());
}

#[test]
fn test_reset_severs_history() {
    let (mut editor, id) = editor_with_rect();
    editor.select(id);
    editor.reset();

    assert!(editor.shapes().is_empty());
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert_eq!(editor.selected_shape_id(), None);
}

#[test]
fn test_render_draws_in_z_order_with_selection_frame() {
    let mut editor = EditorState::new();
    let line = Shape::line(ShapeStyle::default(), pos2(0.0, 0.0), pos2(10.0, 0.0));
    let text = Shape::text(ShapeStyle::default(), pos2(0.0, 20.0), "top", 12.0);
    let text_id = text.id();
    editor.dispatch(Command::add_shape(line));
    editor.dispatch(Command::add_shape(text));
    editor.select(text_id);

    let mut recorder = Recorder::new();
    editor.render(&mut recorder);

    assert!(matches!(recorder.ops[0], DrawOp::StrokePath { .. }));
    assert!(matches!(recorder.ops[1], DrawOp::Text { .. }));
    assert!(matches!(recorder.ops.last(), Some(DrawOp::StrokeRect { .. })));
}

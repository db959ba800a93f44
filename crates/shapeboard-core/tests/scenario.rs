//! End-to-end interaction sequences against the headless backend.

use kurbo::Point;
use shapeboard_core::{
    HeadlessBackend, InteractionController, InteractionConfig, Key, KeyEvent, KeyTarget,
    Modifiers, Shape, ShapeId, ToolKind,
};
use std::collections::HashSet;

type Controller = InteractionController<HeadlessBackend>;

fn controller() -> Controller {
    InteractionController::with_defaults(HeadlessBackend::new())
}

fn drag_create(c: &mut Controller, tool: ToolKind, from: Point, to: Point) -> ShapeId {
    c.set_tool(tool);
    c.renderer_mut().set_pointer(Some(from));
    assert!(c.pointer_down(Modifiers::NONE).is_consumed());
    let id = c.selection().first().expect("new shape is selected");
    c.renderer_mut().set_pointer(Some(to));
    c.pointer_move();
    c.pointer_up();
    c.click(to, Modifiers::NONE);
    c.paint_frame();
    id
}

fn press(c: &mut Controller, key: Key) -> bool {
    c.key_down(KeyEvent::new(key))
}

#[test]
fn draw_select_delete_and_nudge() {
    let mut c = controller();
    c.set_canvas_focused(true);

    let rect = drag_create(
        &mut c,
        ToolKind::Rectangle,
        Point::new(50.0, 50.0),
        Point::new(150.0, 120.0),
    );
    let Some(Shape::Rectangle(r)) = c.document().find(rect) else {
        panic!("rectangle missing");
    };
    assert!((r.width - 200.0).abs() < f64::EPSILON);
    assert!((r.height - 170.0).abs() < f64::EPSILON);
    assert_eq!(c.tool(), ToolKind::Select);

    let circle = drag_create(
        &mut c,
        ToolKind::Circle,
        Point::new(0.0, 0.0),
        Point::new(30.0, 40.0),
    );
    let Some(Shape::Circle(ci)) = c.document().find(circle) else {
        panic!("circle missing");
    };
    assert!((ci.radius - 75.0).abs() < f64::EPSILON);

    // The circle paints on top, so pick a point only the rectangle covers.
    c.click(Point::new(200.0, 200.0), Modifiers::NONE);
    assert_eq!(c.selection().ids(), &[rect]);
    assert!(press(&mut c, Key::Delete));
    assert!(c.document().find(rect).is_none());
    assert!(c.selection().is_empty());

    c.click(Point::new(0.0, 0.0), Modifiers::NONE);
    assert_eq!(c.selection().ids(), &[circle]);
    for _ in 0..5 {
        assert!(press(&mut c, Key::ArrowRight));
    }
    assert_eq!(c.document().find(circle).unwrap().position(), Point::new(5.0, 0.0));
}

#[test]
fn every_created_shape_is_unique() {
    let mut c = controller();
    let mut ids = HashSet::new();
    for (i, tool) in [ToolKind::Rectangle, ToolKind::Circle, ToolKind::Text]
        .into_iter()
        .cycle()
        .take(9)
        .enumerate()
    {
        let at = Point::new(i as f64 * 400.0, 0.0);
        ids.insert(drag_create(&mut c, tool, at, at));
    }
    assert_eq!(ids.len(), 9);
    assert_eq!(c.document().len(), 9);

    let labels: Vec<_> = c
        .document()
        .shapes()
        .filter_map(Shape::as_text)
        .map(|text| text.content().to_string())
        .collect();
    assert_eq!(labels, vec!["Text 1", "Text 2", "Text 3"]);
}

#[test]
fn plain_click_replaces_and_shift_click_toggles() {
    let mut c = controller();
    let a = drag_create(&mut c, ToolKind::Rectangle, Point::ZERO, Point::ZERO);
    let b = drag_create(
        &mut c,
        ToolKind::Rectangle,
        Point::new(300.0, 0.0),
        Point::new(300.0, 0.0),
    );

    c.click(Point::new(50.0, 50.0), Modifiers::NONE);
    c.click(Point::new(350.0, 50.0), Modifiers::NONE);
    assert_eq!(c.selection().ids(), &[b]);

    c.click(Point::new(50.0, 50.0), Modifiers::SHIFT);
    assert_eq!(c.selection().ids(), &[b, a]);
    assert_eq!(c.renderer().transformer_nodes(), &[b, a]);

    c.click(Point::new(350.0, 50.0), Modifiers::SHIFT);
    assert_eq!(c.selection().ids(), &[a]);

    c.click(Point::new(1000.0, 1000.0), Modifiers::NONE);
    assert!(c.selection().is_empty());
}

#[test]
fn backspace_on_canvas_deletes_selection() {
    let mut c = controller();
    let keep = drag_create(
        &mut c,
        ToolKind::Circle,
        Point::new(400.0, 0.0),
        Point::new(400.0, 0.0),
    );
    let id = drag_create(&mut c, ToolKind::Rectangle, Point::ZERO, Point::ZERO);
    assert_eq!(c.selection().ids(), &[id]);

    let event = KeyEvent {
        key: Key::from_dom("Backspace"),
        target: KeyTarget::from_element("DIV", false),
    };
    assert!(c.key_down(event));
    assert!(!c.document().contains(id));
    assert!(c.document().contains(keep));
    assert!(c.selection().is_empty());
    assert!(c.renderer().transformer_nodes().is_empty());
}

#[test]
fn keys_typed_into_text_fields_are_ignored() {
    let mut c = controller();
    c.set_canvas_focused(true);
    let id = drag_create(&mut c, ToolKind::Rectangle, Point::ZERO, Point::ZERO);

    let event = KeyEvent {
        key: Key::from_dom("Backspace"),
        target: KeyTarget::from_element("TEXTAREA", false),
    };
    assert!(!c.key_down(event));
    assert!(c.document().contains(id));

    c.set_canvas_focused(false);
    assert!(!press(&mut c, Key::ArrowDown));
    assert_eq!(c.document().find(id).unwrap().position(), Point::ZERO);
}

#[test]
fn text_edit_round_trip() {
    let mut c = controller();
    let id = drag_create(&mut c, ToolKind::Text, Point::ZERO, Point::ZERO);
    assert_eq!(c.renderer().transformer_nodes(), &[id]);

    c.double_click(Point::new(10.0, 10.0));
    assert_eq!(c.editing(), Some(id));
    assert!(c.renderer().transformer_nodes().is_empty());
    assert!(!c.renderer().node(id).unwrap().visible);
    let surface = c.renderer().edit_surface().unwrap();
    assert_eq!(surface.text, "Text 1");
    assert_eq!(surface.font_size, 50);

    // Entering again is harmless.
    c.double_click(Point::new(10.0, 10.0));
    assert_eq!(c.editing(), Some(id));

    c.text_edit_blur(id, "Hello\nworld".to_string());
    let text = c.document().find(id).unwrap().as_text().unwrap();
    assert_eq!(text.content(), "Hello\nworld");
    assert_eq!(text.font_size, 50);
    assert_eq!(text.position, Point::ZERO);
    assert!(c.renderer().node(id).unwrap().visible);
    assert_eq!(c.renderer().transformer_nodes(), &[id]);
}

#[test]
fn blur_after_delete_is_ignored() {
    let mut c = controller();
    c.set_canvas_focused(true);
    let id = drag_create(&mut c, ToolKind::Text, Point::ZERO, Point::ZERO);
    c.double_click(Point::new(10.0, 10.0));

    assert!(press(&mut c, Key::Delete));
    c.text_edit_blur(id, "gone".to_string());
    assert!(c.document().is_empty());
    assert_eq!(c.editing(), None);
}

#[test]
fn custom_config_changes_defaults() {
    let config = InteractionConfig::from_json(
        r##"{ "defaultSize": 40, "minSize": 40, "defaultFill": "#ff0000", "nudgeStep": 10 }"##,
    )
    .unwrap();
    let mut c = InteractionController::new(config, HeadlessBackend::new()).unwrap();
    c.set_canvas_focused(true);

    let id = drag_create(&mut c, ToolKind::Rectangle, Point::ZERO, Point::ZERO);
    let Some(Shape::Rectangle(r)) = c.document().find(id) else {
        panic!("rectangle missing");
    };
    assert!((r.width - 40.0).abs() < f64::EPSILON);
    assert_eq!(r.fill.to_hex(), "#ff0000");

    press(&mut c, Key::ArrowLeft);
    assert_eq!(c.document().find(id).unwrap().position(), Point::new(-10.0, 0.0));
}

#[test]
fn invalid_config_is_rejected() {
    assert!(InteractionConfig::from_json(r#"{ "nudgeStep": -1 }"#).is_err());

    let config = InteractionConfig {
        min_size: 0.0,
        ..InteractionConfig::default()
    };
    assert!(InteractionController::new(config, HeadlessBackend::new()).is_err());
}

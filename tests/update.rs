//! Message layer tests - pointer drags, hover cursors, panel messages

mod common;

use common::{assert_tree_sound, sample_engine, sample_model};
use dockspace::cli::replay;
use dockspace::commands::Cmd;
use dockspace::config::EngineConfig;
use dockspace::layout_def::FloatDef;
use dockspace::messages::{script_from_yaml, Msg, PanelMsg, PointerMsg, ViewportMsg};
use dockspace::model::{FloatRect, NodePath};
use dockspace::update::update;
use dockspace::{AppModel, PanelRef};

fn down(x: f64, y: f64) -> Msg {
    Msg::Pointer(PointerMsg::Down { x, y })
}

fn move_to(x: f64, y: f64) -> Msg {
    Msg::Pointer(PointerMsg::Move { x, y })
}

fn up() -> Msg {
    Msg::Pointer(PointerMsg::Up)
}

fn root_sizes(model: &AppModel) -> Vec<f64> {
    model.engine.root().split().unwrap().sizes()
}

// ============================================================================
// Split Drags
// ============================================================================

#[test]
fn test_drag_root_splitter() {
    let mut model = sample_model(1000.0, 600.0);

    let cmd = update(&mut model, down(100.0, 150.0)).unwrap();
    assert_eq!(cmd.cursor(), Some("ew-resize"));
    assert!(model.ui.is_dragging());

    update(&mut model, move_to(130.0, 150.0));
    update(&mut model, move_to(150.0, 150.0));
    update(&mut model, up());

    let sizes = root_sizes(&model);
    assert!((sizes[0] - 15.0).abs() < 1e-9);
    assert!((sizes[1] - 85.0).abs() < 1e-9);
    assert!(!model.ui.is_dragging());
    assert!(!model.engine.is_dragging());

    // Frame is refreshed for the next hit test
    let tools = model.ui.frame.pane(&NodePath::new(vec![0])).unwrap();
    assert!((tools.rect.width - 150.0).abs() < 1e-9);
}

#[test]
fn test_cancel_restores_split() {
    let mut model = sample_model(1000.0, 600.0);
    let before = root_sizes(&model);

    update(&mut model, down(100.0, 150.0));
    update(&mut model, move_to(400.0, 150.0));
    assert_ne!(root_sizes(&model), before);
    assert_eq!(
        update(&mut model, Msg::Pointer(PointerMsg::Cancel)),
        Some(Cmd::Redraw)
    );
    assert_eq!(root_sizes(&model), before);
}

#[test]
fn test_drag_past_floor_stops_at_minimum() {
    let mut model = sample_model(1000.0, 600.0);
    update(&mut model, down(100.0, 150.0));
    update(&mut model, move_to(-500.0, 150.0));
    update(&mut model, up());

    assert_eq!(root_sizes(&model), vec![10.0, 90.0]);
    assert_tree_sound(model.engine.root());
}

#[test]
fn test_lost_pointer_up_commits_previous_drag() {
    let mut model = sample_model(1000.0, 600.0);
    update(&mut model, down(100.0, 150.0));
    update(&mut model, move_to(150.0, 150.0));

    // No Up arrives; the next press lands on a plain pane
    assert_eq!(update(&mut model, down(50.0, 50.0)), None);
    assert!(!model.ui.is_dragging());
    assert!(!model.engine.is_dragging());
    assert!((root_sizes(&model)[0] - 15.0).abs() < 1e-9);
}

#[test]
fn test_release_applies_throttled_move() {
    let config = EngineConfig {
        pointer_move_interval_ms: 60_000,
        ..EngineConfig::default()
    };
    let mut model = AppModel::new(sample_engine(), config);
    update(
        &mut model,
        Msg::Viewport(ViewportMsg::Resize {
            width: 1000.0,
            height: 600.0,
        }),
    );

    update(&mut model, down(100.0, 150.0));
    assert_eq!(update(&mut model, move_to(130.0, 150.0)), Some(Cmd::Redraw));
    // Held back by the throttle
    assert_eq!(update(&mut model, move_to(150.0, 150.0)), None);
    assert!((root_sizes(&model)[0] - 13.0).abs() < 1e-9);

    update(&mut model, up());
    assert!((root_sizes(&model)[0] - 15.0).abs() < 1e-9);
    assert!(model.ui.pending_pointer.is_none());
}

#[test]
fn test_cancel_discards_throttled_move() {
    let config = EngineConfig {
        pointer_move_interval_ms: 60_000,
        ..EngineConfig::default()
    };
    let mut model = AppModel::new(sample_engine(), config);
    update(
        &mut model,
        Msg::Viewport(ViewportMsg::Resize {
            width: 1000.0,
            height: 600.0,
        }),
    );

    update(&mut model, down(100.0, 150.0));
    update(&mut model, move_to(130.0, 150.0));
    update(&mut model, move_to(150.0, 150.0));
    update(&mut model, Msg::Pointer(PointerMsg::Cancel));
    assert_eq!(root_sizes(&model), vec![10.0, 90.0]);
    assert!(model.ui.pending_pointer.is_none());
}

// ============================================================================
// Float Drags
// ============================================================================

#[test]
fn test_title_drag_moves_float() {
    let mut model = sample_model(1000.0, 600.0);
    let id = model.engine.floats().iter().next().unwrap().id();

    let cmd = update(&mut model, down(400.0, 130.0)).unwrap();
    assert_eq!(cmd.cursor(), Some("move"));
    update(&mut model, move_to(420.0, 160.0));
    update(&mut model, up());

    let rect = model.engine.float(id).unwrap().rect();
    assert!((rect.left - 38.1).abs() < 1e-9);
    assert!((rect.top - 25.52).abs() < 1e-9);
    assert_eq!(rect.width, 20.0);
    assert_eq!(rect.height, 30.0);
}

#[test]
fn test_corner_drag_resizes_float() {
    let mut model = sample_model(1000.0, 600.0);
    let id = model.engine.floats().iter().next().unwrap().id();
    let frame_rect = model.ui.frame.float(id).unwrap().rect;

    // Bottom-right corner, just inside
    let (x, y) = (frame_rect.right() - 1.0, frame_rect.bottom() - 1.0);
    let cmd = update(&mut model, down(x, y)).unwrap();
    assert_eq!(cmd.cursor(), Some("nw-resize"));

    // Try to collapse it entirely
    update(&mut model, move_to(0.0, 0.0));
    update(&mut model, up());

    let rect = model.engine.float(id).unwrap().rect();
    assert_eq!(rect.width, 10.0);
    assert_eq!(rect.height, 10.0);
    assert!((rect.left - 36.1).abs() < 1e-9);
    assert!((rect.top - 20.52).abs() < 1e-9);
}

#[test]
fn test_click_float_body_raises_without_drag() {
    let mut model = sample_model(1000.0, 600.0);
    let original = model.engine.floats().iter().next().unwrap().id();
    let def = FloatDef {
        top: 50.0,
        left: 50.0,
        width: 30.0,
        height: 30.0,
        components: vec!["Covering".into()],
        ..FloatDef::default()
    };
    update(&mut model, Msg::Panel(PanelMsg::OpenFloat(def)));
    assert_ne!(model.engine.floats().topmost().unwrap().id(), original);

    // Middle of the sample float body, clear of the new one
    let rect = model.ui.frame.float(original).unwrap().rect;
    let cmd = update(&mut model, down(rect.x + rect.width / 2.0, rect.bottom() - 20.0));
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert!(!model.ui.is_dragging());
    assert_eq!(model.engine.floats().topmost().unwrap().id(), original);
}

// ============================================================================
// Hover
// ============================================================================

#[test]
fn test_hover_reports_cursor_changes_only() {
    let mut model = sample_model(1000.0, 600.0);

    assert_eq!(
        update(&mut model, move_to(100.0, 150.0)),
        Some(Cmd::SetCursor("ew-resize"))
    );
    assert_eq!(update(&mut model, move_to(101.0, 150.0)), None);
    // Horizontal bar of /1 at y = 300
    assert_eq!(
        update(&mut model, move_to(800.0, 300.0)),
        Some(Cmd::SetCursor("ns-resize"))
    );
    assert_eq!(
        update(&mut model, move_to(50.0, 50.0)),
        Some(Cmd::SetCursor("default"))
    );
}

#[test]
fn test_up_without_drag_is_ignored() {
    let mut model = sample_model(1000.0, 600.0);
    assert_eq!(update(&mut model, up()), None);
    assert_eq!(update(&mut model, Msg::Pointer(PointerMsg::Cancel)), None);
}

// ============================================================================
// Panel and Viewport Messages
// ============================================================================

#[test]
fn test_activate_message() {
    let mut model = sample_model(1000.0, 600.0);
    let msg = Msg::Panel(PanelMsg::Activate {
        panel: PanelRef::Docked(NodePath::new(vec![1, 1, 0])),
        component: "EffectsPanel".into(),
    });
    assert_eq!(update(&mut model, msg), Some(Cmd::Redraw));

    let pane = model.ui.frame.pane(&NodePath::new(vec![1, 1, 0])).unwrap();
    assert_eq!(pane.active.as_str(), "EffectsPanel");
}

#[test]
fn test_rejected_message_produces_no_command() {
    let mut model = sample_model(1000.0, 600.0);
    let msg = Msg::Panel(PanelMsg::Activate {
        panel: PanelRef::Docked(NodePath::new(vec![0])),
        component: "Missing".into(),
    });
    assert_eq!(update(&mut model, msg), None);
}

#[test]
fn test_close_float_mid_drag_drops_drag() {
    let mut model = sample_model(1000.0, 600.0);
    let id = model.engine.floats().iter().next().unwrap().id();
    update(&mut model, down(400.0, 130.0));
    assert!(model.ui.is_dragging());

    update(&mut model, Msg::Panel(PanelMsg::CloseFloat(id)));
    assert!(!model.ui.is_dragging());
    assert!(!model.engine.is_dragging());
    // Moves are hover again
    assert_eq!(
        update(&mut model, move_to(500.0, 200.0)),
        Some(Cmd::SetCursor("default"))
    );
}

#[test]
fn test_viewport_resize_rescales_frame() {
    let mut model = sample_model(1000.0, 600.0);
    update(
        &mut model,
        Msg::Viewport(ViewportMsg::Resize {
            width: 2000.0,
            height: 600.0,
        }),
    );
    let tools = model.ui.frame.pane(&NodePath::new(vec![0])).unwrap();
    assert_eq!(tools.rect.width, 200.0);
}

// ============================================================================
// Replay
// ============================================================================

#[test]
fn test_replay_sample_script() {
    let script = include_str!("../samples/drag_script.yaml");
    let msgs = script_from_yaml(script).unwrap();
    let mut model = sample_model(100.0, 100.0);
    let id = model.engine.floats().iter().next().unwrap().id();

    let handled = replay(&mut model, msgs);
    assert!(handled > 0);

    let sizes = root_sizes(&model);
    assert!((sizes[0] - 15.0).abs() < 1e-9);
    let rect: FloatRect = model.engine.float(id).unwrap().rect();
    assert!((rect.left - 38.1).abs() < 1e-9);
    let timeline = model.engine.root().get(&NodePath::new(vec![1, 1, 0])).unwrap();
    assert_eq!(timeline.tabs().unwrap().active().as_str(), "EffectsPanel");
}

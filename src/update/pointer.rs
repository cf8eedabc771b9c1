//! Pointer message handlers
//!
//! down → begin a drag on the handle under the pointer,
//! move → feed the delta since the last dispatched position,
//! up → end, cancel → abort.

use crate::commands::Cmd;
use crate::engine::{DragKind, DragSession};
use crate::error::LayoutResult;
use crate::messages::PointerMsg;
use crate::model::{AppModel, Delta};
use crate::view::{hit_test, HitTarget};

/// Handle pointer messages
pub fn update_pointer(model: &mut AppModel, msg: PointerMsg) -> Option<Cmd> {
    match msg {
        PointerMsg::Down { x, y } => pointer_down(model, x, y),
        PointerMsg::Move { x, y } => {
            if model.ui.is_dragging() {
                drag_move(model, x, y)
            } else {
                hover(model, x, y)
            }
        }
        PointerMsg::Up => {
            // Apply the last move the throttle held back
            if let Some((x, y)) = model.ui.pending_pointer.take() {
                apply_pointer(model, x, y);
            }
            let session = model.ui.drag.take()?;
            model.ui.last_pointer = None;
            finish(model.engine.end_drag(session), "end")
        }
        PointerMsg::Cancel => {
            model.ui.pending_pointer = None;
            let session = model.ui.drag.take()?;
            model.ui.last_pointer = None;
            finish(model.engine.abort_drag(session), "abort")
        }
    }
}

fn finish(result: LayoutResult<()>, what: &str) -> Option<Cmd> {
    match result {
        Ok(()) => Some(Cmd::Redraw),
        Err(e) => {
            tracing::debug!("Could not {} drag: {}", what, e);
            None
        }
    }
}

fn pointer_down(model: &mut AppModel, x: f64, y: f64) -> Option<Cmd> {
    // A pointer-up went missing; commit what that drag did so far
    if let Some(stale) = model.ui.drag.take() {
        tracing::warn!("Committing {} left open by a lost pointer-up", stale.label());
        if let Err(e) = model.engine.end_drag(stale) {
            tracing::debug!("Stale drag was already closed: {}", e);
        }
    }
    model.ui.pending_pointer = None;
    model.ui.last_pointer = Some((x, y));
    model.ui.throttle.reset();

    let target = hit_test(&model.ui.frame, x, y, &model.hit_metrics())?;
    let started: LayoutResult<Option<DragSession>> = match &target {
        HitTarget::FloatGrip { float, handle } => model
            .engine
            .begin_float_resize(*float, *handle)
            .map(Some),
        HitTarget::FloatTitle { float } => model.engine.begin_float_move(*float).map(Some),
        HitTarget::FloatBody { float } => model.engine.bring_float_to_front(*float).map(|_| None),
        HitTarget::Splitter { handle, .. } => {
            model.engine.begin_split_resize(handle.clone()).map(Some)
        }
        HitTarget::Pane { .. } => return None,
    };

    match started {
        Ok(session) => {
            if let Some(session) = &session {
                tracing::debug!("Started {}", session.label());
            }
            model.ui.drag = session;
            model.ui.hover = Some(target.clone());
            let cursor = target.cursor();
            if cursor != model.ui.cursor {
                model.ui.cursor = cursor;
                Some(Cmd::Batch(vec![Cmd::SetCursor(cursor), Cmd::Redraw]))
            } else {
                Some(Cmd::Redraw)
            }
        }
        Err(e) => {
            tracing::debug!("Rejected drag on {:?}: {}", target, e);
            None
        }
    }
}

fn drag_move(model: &mut AppModel, x: f64, y: f64) -> Option<Cmd> {
    if !model.ui.throttle.ready() {
        model.ui.pending_pointer = Some((x, y));
        return None;
    }
    model.ui.pending_pointer = None;
    apply_pointer(model, x, y)
}

/// Feed the drag the distance from the last dispatched position to `(x, y)`
fn apply_pointer(model: &mut AppModel, x: f64, y: f64) -> Option<Cmd> {
    let Some((last_x, last_y)) = model.ui.last_pointer.replace((x, y)) else {
        return None;
    };
    let delta = Delta::new(x - last_x, y - last_y);
    if delta.is_zero() {
        return None;
    }

    let session = model.ui.drag.as_mut()?;
    let result = match session.kind() {
        DragKind::Split { orientation, .. } => {
            let along = delta.along(*orientation);
            model.engine.apply_split_resize_delta(session, along)
        }
        DragKind::FloatResize { .. } => model.engine.apply_float_resize_delta(session, delta),
        DragKind::FloatMove { .. } => model.engine.apply_float_move_delta(session, delta),
    };

    match result {
        Ok(()) => Some(Cmd::Redraw),
        Err(e) => {
            // The engine no longer knows this session
            tracing::debug!("Dropping drag {}: {}", session.label(), e);
            model.ui.drag = None;
            None
        }
    }
}

fn hover(model: &mut AppModel, x: f64, y: f64) -> Option<Cmd> {
    model.ui.last_pointer = Some((x, y));
    let target = hit_test(&model.ui.frame, x, y, &model.hit_metrics());
    let cursor = target.as_ref().map_or("default", HitTarget::cursor);
    model.ui.hover = target;

    if cursor == model.ui.cursor {
        return None;
    }
    model.ui.cursor = cursor;
    Some(Cmd::SetCursor(cursor))
}

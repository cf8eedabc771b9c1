//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. Rejected engine
//! operations are logged at debug level and produce no command.

mod panel;
mod pointer;
mod viewport;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::SizeSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use panel::update_panel;
pub use pointer::update_pointer;
pub use viewport::update_viewport;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(feature = "profile-tracing")]
    let _span = tracing::info_span!("update_inner").entered();

    let result = match msg {
        Msg::Pointer(m) => pointer::update_pointer(model, m),
        Msg::Panel(m) => panel::update_panel(model, m),
        Msg::Viewport(m) => viewport::update_viewport(model, m),
    };

    if result.as_ref().is_some_and(Cmd::needs_redraw) {
        model.refresh_frame();
    }
    result
}

/// Update with tracing instrumentation (debug builds only)
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::PointerMsg;

    // Hover moves arrive constantly; only log moves that drive a drag
    let is_noisy = matches!(&msg, Msg::Pointer(PointerMsg::Move { .. })) && !model.ui.is_dragging();

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = SizeSnapshot::from_engine(&model.engine);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = SizeSnapshot::from_engine(&model.engine);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "sizes", %diff, "layout changed");
    }

    model.engine.assert_invariants();

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments.
/// Example outputs:
/// - `Pointer::Down { x: 10.0, y: 20.0 }`
/// - `Panel::BringToFront(FloatId(2))`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Pointer(m) => format!("Pointer::{:?}", m),
        Msg::Panel(m) => format!("Panel::{:?}", m),
        Msg::Viewport(m) => format!("Viewport::{:?}", m),
    }
}

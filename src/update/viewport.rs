//! Viewport message handlers

use crate::commands::Cmd;
use crate::messages::ViewportMsg;
use crate::model::{AppModel, Rect};

/// Handle host window changes
pub fn update_viewport(model: &mut AppModel, msg: ViewportMsg) -> Option<Cmd> {
    match msg {
        ViewportMsg::Resize { width, height } => {
            let viewport = Rect::new(0.0, 0.0, width, height);
            match model.engine.set_viewport(viewport) {
                Ok(()) => Some(Cmd::Redraw),
                Err(e) => {
                    tracing::debug!("Ignoring resize to {}x{}: {}", width, height, e);
                    None
                }
            }
        }
    }
}

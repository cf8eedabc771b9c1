//! Panel message handlers (tab activation, float stacking, open/close)

use crate::commands::Cmd;
use crate::error::LayoutResult;
use crate::messages::PanelMsg;
use crate::model::AppModel;

/// Handle panel messages
pub fn update_panel(model: &mut AppModel, msg: PanelMsg) -> Option<Cmd> {
    let result: LayoutResult<()> = match &msg {
        PanelMsg::Activate { panel, component } => {
            model.engine.toggle_component_active(panel, component)
        }
        PanelMsg::BringToFront(id) => model.engine.bring_float_to_front(*id).map(|_| ()),
        PanelMsg::OpenFloat(def) => model.engine.open_float(def).map(|_| ()),
        PanelMsg::CloseFloat(id) => {
            let closed = model.engine.close_float(*id);
            if closed.is_ok() && model.ui.drag.as_ref().and_then(|d| d.float()) == Some(*id) {
                model.ui.drag = None;
            }
            closed
        }
    };

    match result {
        Ok(()) => Some(Cmd::Redraw),
        Err(e) => {
            tracing::debug!("Rejected {:?}: {}", msg, e);
            None
        }
    }
}

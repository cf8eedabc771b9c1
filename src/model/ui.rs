//! UI state - pointer tracking, the drag in flight and the cached frame

use crate::engine::DragSession;
use crate::util::Throttle;
use crate::view::{HitTarget, LayoutFrame};

/// Transient interaction state owned by the message loop
#[derive(Debug, Clone)]
pub struct UiState {
    /// Drag started by the last pointer-down, if it is still live
    pub drag: Option<DragSession>,
    /// Pointer position of the last dispatched down or move
    pub last_pointer: Option<(f64, f64)>,
    /// Latest drag move held back by the throttle, applied on release
    pub pending_pointer: Option<(f64, f64)>,
    /// Rate limit for pointer-move dispatch
    pub throttle: Throttle,
    /// Target under the pointer when no drag is live
    pub hover: Option<HitTarget>,
    /// Cursor currently requested from the host
    pub cursor: &'static str,
    /// Geometry from the most recent layout pass, used for hit testing
    pub frame: LayoutFrame,
}

impl UiState {
    pub fn new(throttle: Throttle) -> Self {
        Self {
            drag: None,
            last_pointer: None,
            pending_pointer: None,
            throttle,
            hover: None,
            cursor: "default",
            frame: LayoutFrame::default(),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Throttle::default())
    }
}

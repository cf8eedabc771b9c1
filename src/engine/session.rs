//! Drag sessions - one continuous pointer drag from begin to end or abort
//!
//! A session captures the starting geometry of whatever it drags and the sum
//! of every delta applied so far. Each apply recomputes from the snapshot, so
//! many small moves never drift and an abort is a plain restore.

use std::fmt;

use serde::Serialize;

use super::split_resize::SiblingPair;
use crate::model::{Delta, FloatHandle, FloatId, FloatRect, Orientation, SplitHandle};

/// Identifier of a drag session, unique per engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "drag-{}", self.0)
    }
}

/// What a session drags, with its starting snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum DragKind {
    Split {
        handle: SplitHandle,
        orientation: Orientation,
        /// Absolute extent of the branch when the drag began
        extent: f64,
        start: SiblingPair,
        /// Cumulative pointer travel along `orientation`, absolute units
        travel: f64,
    },
    FloatResize {
        float: FloatId,
        handle: FloatHandle,
        start: FloatRect,
        /// Cumulative pointer travel, percent units
        travel: Delta,
    },
    FloatMove {
        float: FloatId,
        start: FloatRect,
        travel: Delta,
    },
}

/// A live drag
///
/// Returned by the engine's `begin_*` calls and handed back to every apply,
/// end and abort call.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    id: SessionId,
    kind: DragKind,
}

impl DragSession {
    pub(crate) fn new(id: SessionId, kind: DragKind) -> Self {
        Self { id, kind }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn kind(&self) -> &DragKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut DragKind {
        &mut self.kind
    }

    /// Float this session drags, if any
    pub fn float(&self) -> Option<FloatId> {
        match &self.kind {
            DragKind::Split { .. } => None,
            DragKind::FloatResize { float, .. } | DragKind::FloatMove { float, .. } => {
                Some(*float)
            }
        }
    }

    /// Short label for logs
    pub fn label(&self) -> String {
        match &self.kind {
            DragKind::Split { handle, .. } => format!("{} split {}", self.id, handle),
            DragKind::FloatResize { float, handle, .. } => {
                format!("{} resize {} via {:?}", self.id, float, handle)
            }
            DragKind::FloatMove { float, .. } => format!("{} move {}", self.id, float),
        }
    }
}

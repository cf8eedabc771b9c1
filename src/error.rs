//! Error types for layout operations
//!
//! Every failure is a local validation failure reported at the call that
//! triggered it. A rejected operation never leaves a partial mutation behind.

use thiserror::Error;

use crate::model::ComponentId;

/// Errors produced by the layout engine and the layout definition parser
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Structural violation in a layout definition or a would-be tree state
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A resize handle, drag session, node path or float id that does not
    /// refer to anything live
    #[error("invalid handle: {0}")]
    InvalidHandle(String),

    /// Activation of a component the panel does not hold
    #[error("component not found: {component}")]
    ComponentNotFound { component: ComponentId },
}

impl LayoutError {
    pub(crate) fn invalid_layout(msg: impl Into<String>) -> Self {
        LayoutError::InvalidLayout(msg.into())
    }

    pub(crate) fn invalid_handle(msg: impl Into<String>) -> Self {
        LayoutError::InvalidHandle(msg.into())
    }
}

pub type LayoutResult<T> = Result<T, LayoutError>;

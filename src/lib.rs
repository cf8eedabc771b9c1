//! Dockspace - docking and resize layout engine
//!
//! This crate provides the split-tree and floating-panel model of an
//! editor-style workspace, the resize algorithms that redistribute space
//! under minimum-size constraints, and an Elm-style message layer that turns
//! pointer input into engine calls.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod engine;
pub mod error;
pub mod layout_def;
pub mod messages;
pub mod model;
pub mod tracing;
pub mod update;
pub mod util;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EngineConfig;
pub use engine::{DragSession, LayoutEngine, PanelRef};
pub use error::{LayoutError, LayoutResult};
pub use layout_def::LayoutDef;
pub use messages::Msg;
pub use model::AppModel;

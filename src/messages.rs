//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. They are
//! serde-serializable so a recorded sequence can be replayed.

use serde::{Deserialize, Serialize};

use crate::engine::PanelRef;
use crate::layout_def::FloatDef;
use crate::model::{ComponentId, FloatId};

/// Pointer input in absolute viewport units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerMsg {
    /// Button pressed; starts a drag on whatever handle is under the pointer
    Down { x: f64, y: f64 },
    /// Pointer moved; feeds the live drag or updates the hover cursor
    Move { x: f64, y: f64 },
    /// Button released; commits the live drag
    Up,
    /// Drag cancelled (escape, focus loss); restores the starting geometry
    Cancel,
}

/// Panel-level operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelMsg {
    /// Make a component the active tab of a docked leaf or float
    Activate {
        panel: PanelRef,
        component: ComponentId,
    },
    /// Raise a float above all others
    BringToFront(FloatId),
    /// Create a float on top of the others
    OpenFloat(FloatDef),
    /// Remove a float
    CloseFloat(FloatId),
}

/// Host window changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportMsg {
    Resize { width: f64, height: f64 },
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Msg {
    Pointer(PointerMsg),
    Panel(PanelMsg),
    Viewport(ViewportMsg),
}

/// Parse a YAML message script
///
/// Variants are written as single-key maps (`pointer: { down: { x: 1, y: 2 } }`)
/// rather than YAML tags, matching the JSON form.
pub fn script_from_yaml(yaml: &str) -> Result<Vec<Msg>, serde_yaml::Error> {
    serde_yaml::with::singleton_map_recursive::deserialize(serde_yaml::Deserializer::from_str(yaml))
}

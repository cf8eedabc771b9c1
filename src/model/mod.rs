//! Application model - the complete state of a workspace
//!
//! The layout engine owns the split tree and floats; everything the message
//! loop needs on top of that lives in [`UiState`].

pub mod float;
pub mod geometry;
pub mod tabs;
pub mod tree;
pub mod ui;

pub use float::{
    FloatHandle, FloatId, FloatLayer, FloatNode, FloatRect, FloatSeed, MinSize, ResizeEdge,
};
pub use geometry::{Delta, Orientation, Rect};
pub use tabs::{ComponentId, Tabs};
pub use tree::{
    compute_extent, LayoutNode, NodeKind, NodePath, Split, SplitHandle, FULL_PERCENT,
};
pub use ui::UiState;

use crate::config::EngineConfig;
use crate::engine::LayoutEngine;
use crate::util::Throttle;
use crate::view::HitMetrics;

/// The complete application model
#[derive(Debug, Clone)]
pub struct AppModel {
    /// Split tree, floats and the live drag session
    pub engine: LayoutEngine,
    /// Pointer and hover state
    pub ui: UiState,
    /// Persisted settings
    pub config: EngineConfig,
}

impl AppModel {
    pub fn new(engine: LayoutEngine, config: EngineConfig) -> Self {
        let throttle = Throttle::from_millis(config.pointer_move_interval_ms);
        let mut model = Self {
            engine,
            ui: UiState::new(throttle),
            config,
        };
        model.refresh_frame();
        model
    }

    /// Recompute the cached frame after the engine changed
    pub fn refresh_frame(&mut self) {
        self.ui.frame = self.engine.compute_layout(self.config.splitter_width);
    }

    pub fn hit_metrics(&self) -> HitMetrics {
        HitMetrics::from_config(&self.config)
    }
}

//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use dockspace::config::EngineConfig;
use dockspace::engine::LayoutEngine;
use dockspace::layout_def::LayoutDef;
use dockspace::messages::{Msg, ViewportMsg};
use dockspace::model::{
    AppModel, FloatId, FloatRect, FloatSeed, LayoutNode, MinSize, NodeKind, NodePath,
    Orientation, Tabs,
};
use dockspace::update::update;

/// The demo workspace shipped in `samples/`
pub const SAMPLE_WORKSPACE: &str = include_str!("../../samples/workspace.yaml");

pub fn sample_engine() -> LayoutEngine {
    let def = LayoutDef::from_yaml(SAMPLE_WORKSPACE).unwrap();
    LayoutEngine::from_def(&def).unwrap()
}

/// A model over the demo workspace filling a `width` x `height` window
pub fn sample_model(width: f64, height: f64) -> AppModel {
    let mut model = AppModel::new(sample_engine(), EngineConfig::default());
    update(
        &mut model,
        Msg::Viewport(ViewportMsg::Resize { width, height }),
    );
    model
}

/// A single row of leaves `P0`, `P1`, ... laid out left-to-right
pub fn row(sizes: &[f64], mins: &[f64]) -> LayoutNode {
    let children = sizes
        .iter()
        .zip(mins)
        .enumerate()
        .map(|(i, (&size, &min))| LayoutNode::leaf(size, min, Tabs::single(format!("P{}", i))))
        .collect();
    LayoutNode::branch(100.0, 0.0, Orientation::Vertical, children)
}

pub fn row_engine(sizes: &[f64], mins: &[f64]) -> LayoutEngine {
    LayoutEngine::new(row(sizes, mins), vec![]).unwrap()
}

/// Seed for a float at `{top, left, width, height}` with a 10x10 minimum
pub fn float_seed(top: f64, left: f64, width: f64, height: f64) -> FloatSeed {
    FloatSeed {
        rect: FloatRect::new(top, left, width, height),
        min: MinSize::new(10.0, 10.0),
        z_index: None,
        tabs: Tabs::new(vec!["UserPanel".into(), "ExportPanel".into()], None).unwrap(),
    }
}

/// An engine with a 50/50 row and the given floats
pub fn float_engine(seeds: Vec<FloatSeed>) -> (LayoutEngine, Vec<FloatId>) {
    let engine = LayoutEngine::new(row(&[50.0, 50.0], &[0.0, 0.0]), seeds).unwrap();
    let ids = engine.floats().iter().map(|f| f.id()).collect();
    (engine, ids)
}

/// Child sizes of the branch at `path`
pub fn sizes_at(engine: &LayoutEngine, path: &[usize]) -> Vec<f64> {
    engine
        .root()
        .get(&NodePath::new(path.to_vec()))
        .and_then(LayoutNode::split)
        .map(|split| split.sizes())
        .unwrap_or_default()
}

/// Assert every branch sums to 100 and every node respects its minimum
pub fn assert_tree_sound(node: &LayoutNode) {
    if let NodeKind::Branch(split) = node.kind() {
        let total: f64 = split.sizes().iter().sum();
        assert!(
            (total - 100.0).abs() < 1e-6,
            "children sum to {} instead of 100",
            total
        );
        for child in &split.children {
            assert!(
                child.size() >= child.min_size() - 1e-9,
                "child at {} is below its minimum {}",
                child.size(),
                child.min_size()
            );
            assert_tree_sound(child);
        }
    }
}

//! Layout frame - absolute geometry handed to whatever draws the workspace
//!
//! A frame is recomputed top-down from the viewport on every pass and never
//! cached inside the model. It lists every docked pane, every splitter bar
//! (with the handle it drives) and every float in draw order.


use serde::Serialize;

use crate::model::{
    ComponentId, FloatId, FloatLayer, LayoutNode, NodeKind, NodePath, Orientation, Rect,
    SplitHandle,
};

pub use hit_test::{hit_test, HitMetrics, HitTarget};

/// Thickness of splitter bars in absolute units
pub const SPLITTER_WIDTH: f64 = 6.0;

/// A docked leaf
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaneRect {
    pub path: NodePath,
    pub rect: Rect,
    pub components: Vec<ComponentId>,
    pub active: ComponentId,
}

/// The draggable bar between two siblings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitterBar {
    pub handle: SplitHandle,
    /// Orientation of the branch this bar belongs to
    pub orientation: Orientation,
    /// Hit area, centred on the boundary between the two children
    pub rect: Rect,
}

impl SplitterBar {
    pub fn cursor(&self) -> &'static str {
        match self.orientation {
            Orientation::Vertical => "ew-resize",
            Orientation::Horizontal => "ns-resize",
        }
    }
}

/// A float resolved to absolute units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatFrame {
    pub id: FloatId,
    pub rect: Rect,
    pub z_index: i64,
    pub components: Vec<ComponentId>,
    pub active: ComponentId,
}

/// Everything a renderer needs for one pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutFrame {
    pub viewport: Rect,
    /// Leaves in layout order
    pub panes: Vec<PaneRect>,
    /// Splitters, outer branches first
    pub splitters: Vec<SplitterBar>,
    /// Floats bottom-to-top
    pub floats: Vec<FloatFrame>,
}

impl LayoutFrame {
    pub fn pane(&self, path: &NodePath) -> Option<&PaneRect> {
        self.panes.iter().find(|p| &p.path == path)
    }

    pub fn splitter(&self, handle: &SplitHandle) -> Option<&SplitterBar> {
        self.splitters.iter().find(|s| &s.handle == handle)
    }

    pub fn float(&self, id: FloatId) -> Option<&FloatFrame> {
        self.floats.iter().find(|f| f.id == id)
    }

    /// Splitter whose hit area contains the point. Inner splitters win.
    pub fn splitter_at_point(&self, x: f64, y: f64) -> Option<&SplitterBar> {
        self.splitters.iter().rev().find(|s| s.rect.contains(x, y))
    }

    pub fn pane_at_point(&self, x: f64, y: f64) -> Option<&PaneRect> {
        self.panes.iter().find(|p| p.rect.contains(x, y))
    }
}

/// Resolve the tree and floats against `viewport`
pub fn compute_frame(
    root: &LayoutNode,
    floats: &FloatLayer,
    viewport: Rect,
    splitter_width: f64,
) -> LayoutFrame {
    #[cfg(feature = "profile-tracing")]
    let _span = tracing::info_span!("compute_frame").entered();

    let mut frame = LayoutFrame {
        viewport,
        ..LayoutFrame::default()
    };
    layout_node(
        root,
        &NodePath::root(),
        viewport,
        splitter_width,
        &mut frame,
    );

    frame.floats = floats
        .draw_order()
        .into_iter()
        .map(|float| FloatFrame {
            id: float.id(),
            rect: float.rect().to_rect(&viewport),
            z_index: float.z_index(),
            components: float.tabs().components().to_vec(),
            active: float.tabs().active().clone(),
        })
        .collect();

    frame
}

fn layout_node(
    node: &LayoutNode,
    path: &NodePath,
    rect: Rect,
    splitter_width: f64,
    frame: &mut LayoutFrame,
) {
    match node.kind() {
        NodeKind::Leaf(tabs) => frame.panes.push(PaneRect {
            path: path.clone(),
            rect,
            components: tabs.components().to_vec(),
            active: tabs.active().clone(),
        }),
        NodeKind::Branch(split) => {
            let orientation = split.orientation;
            let total = orientation.extent(&rect);
            let last = split.children.len().saturating_sub(1);
            let mut offset = 0.0;
            let mut child_rects = Vec::with_capacity(split.children.len());

            for (i, child) in split.children.iter().enumerate() {
                let size = child.compute_extent(total);
                child_rects.push(rect.slice(orientation, offset, size));
                offset += size;

                // Bar between children (not after the last one)
                if i < last {
                    let half = splitter_width / 2.0;
                    let bar = match orientation {
                        Orientation::Vertical => {
                            Rect::new(rect.x + offset - half, rect.y, splitter_width, rect.height)
                        }
                        Orientation::Horizontal => {
                            Rect::new(rect.x, rect.y + offset - half, rect.width, splitter_width)
                        }
                    };
                    frame.splitters.push(SplitterBar {
                        handle: SplitHandle::new(path.clone(), i),
                        orientation,
                        rect: bar,
                    });
                }
            }

            for (i, (child, child_rect)) in split.children.iter().zip(child_rects).enumerate() {
                layout_node(child, &path.child(i), child_rect, splitter_width, frame);
            }
        }
    }
}

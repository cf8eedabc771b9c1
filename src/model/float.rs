//! Floating panels - free-standing, overlapping windows outside the split tree
//!
//! Floats live in the same percentage coordinate space as the split tree.
//! Each one is independently positioned, sized and stacked; none of them
//! affect each other or the tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::tabs::Tabs;
use crate::error::{LayoutError, LayoutResult};
use crate::util::IdGenerator;

/// Engine-assigned identifier of a float
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloatId(pub u64);

impl fmt::Display for FloatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "float-{}", self.0)
    }
}

/// Position and size of a float, in percent of the workspace
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl FloatRect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Scale into absolute units of `viewport`
    pub fn to_rect(&self, viewport: &Rect) -> Rect {
        Rect::new(
            viewport.x + viewport.width * self.left / 100.0,
            viewport.y + viewport.height * self.top / 100.0,
            viewport.width * self.width / 100.0,
            viewport.height * self.height / 100.0,
        )
    }

    fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.left.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Minimum float dimensions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MinSize {
    pub width: f64,
    pub height: f64,
}

impl MinSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// Resize handles
// ============================================================================

/// One axis-resize operation
///
/// Dragging an edge moves that edge only; the opposite edge stays put even
/// when the minimum size kicks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl ResizeEdge {
    /// Apply `delta` (along this edge's axis) to `rect`, clamping to `min`
    pub fn apply(self, rect: FloatRect, delta: f64, min: MinSize) -> FloatRect {
        let mut out = rect;
        match self {
            ResizeEdge::Left => {
                if rect.width - delta >= min.width {
                    out.left = rect.left + delta;
                    out.width = rect.width - delta;
                } else {
                    out.width = min.width;
                    out.left = rect.right() - min.width;
                }
            }
            ResizeEdge::Right => {
                out.width = (rect.width + delta).max(min.width);
            }
            ResizeEdge::Top => {
                if rect.height - delta >= min.height {
                    out.top = rect.top + delta;
                    out.height = rect.height - delta;
                } else {
                    out.height = min.height;
                    out.top = rect.bottom() - min.height;
                }
            }
            ResizeEdge::Bottom => {
                out.height = (rect.height + delta).max(min.height);
            }
        }
        out
    }

    /// Whether this edge reads the horizontal pointer delta
    pub fn is_horizontal(self) -> bool {
        matches!(self, ResizeEdge::Left | ResizeEdge::Right)
    }
}

/// The eight grips around a float: four edges and four corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FloatHandle {
    Left,
    Right,
    Top,
    Bottom,
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
}

impl FloatHandle {
    pub const ALL: [FloatHandle; 8] = [
        FloatHandle::Left,
        FloatHandle::Right,
        FloatHandle::Top,
        FloatHandle::Bottom,
        FloatHandle::LeftTop,
        FloatHandle::LeftBottom,
        FloatHandle::RightTop,
        FloatHandle::RightBottom,
    ];

    /// Edges this handle drives; corners drive two
    pub fn edges(self) -> &'static [ResizeEdge] {
        use ResizeEdge::*;
        match self {
            FloatHandle::Left => &[Left],
            FloatHandle::Right => &[Right],
            FloatHandle::Top => &[Top],
            FloatHandle::Bottom => &[Bottom],
            FloatHandle::LeftTop => &[Left, Top],
            FloatHandle::LeftBottom => &[Left, Bottom],
            FloatHandle::RightTop => &[Right, Top],
            FloatHandle::RightBottom => &[Right, Bottom],
        }
    }

    /// Handle driving exactly `edges`, in any order
    pub fn from_edges(edges: &[ResizeEdge]) -> Option<FloatHandle> {
        FloatHandle::ALL.into_iter().find(|handle| {
            let own = handle.edges();
            own.len() == edges.len() && edges.iter().all(|e| own.contains(e))
        })
    }

    /// CSS-style cursor name shown while hovering this handle
    pub fn cursor(self) -> &'static str {
        match self {
            FloatHandle::Left | FloatHandle::Right => "ew-resize",
            FloatHandle::Top | FloatHandle::Bottom => "ns-resize",
            FloatHandle::LeftTop | FloatHandle::RightBottom => "nw-resize",
            FloatHandle::LeftBottom | FloatHandle::RightTop => "ne-resize",
        }
    }
}

// ============================================================================
// Float nodes
// ============================================================================

/// A floating panel
#[derive(Debug, Clone, PartialEq)]
pub struct FloatNode {
    id: FloatId,
    rect: FloatRect,
    min: MinSize,
    z_index: i64,
    tabs: Tabs,
    /// Activation stamp; breaks z-index ties in favour of the most recent
    activated: u64,
}

impl FloatNode {
    pub fn id(&self) -> FloatId {
        self.id
    }

    pub fn rect(&self) -> FloatRect {
        self.rect
    }

    pub fn min_size(&self) -> MinSize {
        self.min
    }

    pub fn z_index(&self) -> i64 {
        self.z_index
    }

    pub fn tabs(&self) -> &Tabs {
        &self.tabs
    }

    pub(crate) fn tabs_mut(&mut self) -> &mut Tabs {
        &mut self.tabs
    }

    /// Replace the rectangle. Callers have already clamped it.
    pub(crate) fn set_rect(&mut self, rect: FloatRect) {
        debug_assert!(rect.width >= self.min.width && rect.height >= self.min.height);
        self.rect = rect;
    }
}

/// Everything needed to create a float
#[derive(Debug, Clone, PartialEq)]
pub struct FloatSeed {
    pub rect: FloatRect,
    pub min: MinSize,
    /// Explicit stacking position; `None` places the float on top
    pub z_index: Option<i64>,
    pub tabs: Tabs,
}

/// The set of floats owned by one workspace
#[derive(Debug, Clone)]
pub struct FloatLayer {
    floats: Vec<FloatNode>,
    ids: IdGenerator,
    activations: IdGenerator,
}

impl FloatLayer {
    pub fn new() -> Self {
        Self {
            floats: Vec::new(),
            ids: IdGenerator::starting_at(1),
            activations: IdGenerator::new(),
        }
    }

    /// Validate and add a float
    pub fn insert(&mut self, seed: FloatSeed) -> LayoutResult<FloatId> {
        let FloatSeed {
            rect,
            min,
            z_index,
            tabs,
        } = seed;

        if !rect.is_finite() || !min.width.is_finite() || !min.height.is_finite() {
            return Err(LayoutError::invalid_layout("float geometry must be finite"));
        }
        if min.width < 0.0 || min.height < 0.0 {
            return Err(LayoutError::invalid_layout(
                "float minimum size must not be negative",
            ));
        }
        if rect.width < min.width || rect.height < min.height {
            return Err(LayoutError::invalid_layout(format!(
                "float {}x{} is smaller than its minimum {}x{}",
                rect.width, rect.height, min.width, min.height
            )));
        }

        let id = FloatId(self.ids.next_id());
        let z_index = z_index.unwrap_or_else(|| self.next_z());
        let activated = self.activations.next_id();
        self.floats.push(FloatNode {
            id,
            rect,
            min,
            z_index,
            tabs,
            activated,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: FloatId) -> Option<FloatNode> {
        let index = self.floats.iter().position(|f| f.id == id)?;
        Some(self.floats.remove(index))
    }

    pub fn get(&self, id: FloatId) -> Option<&FloatNode> {
        self.floats.iter().find(|f| f.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: FloatId) -> Option<&mut FloatNode> {
        self.floats.iter_mut().find(|f| f.id == id)
    }

    pub fn contains(&self, id: FloatId) -> bool {
        self.get(id).is_some()
    }

    /// Floats in creation order
    pub fn iter(&self) -> impl Iterator<Item = &FloatNode> {
        self.floats.iter()
    }

    pub fn len(&self) -> usize {
        self.floats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floats.is_empty()
    }

    /// Highest z-index in use
    pub fn max_z(&self) -> Option<i64> {
        self.floats.iter().map(|f| f.z_index).max()
    }

    fn next_z(&self) -> i64 {
        self.max_z().map_or(0, |z| z + 1)
    }

    /// Raise `id` above every other float. Returns the new z-index.
    pub fn bring_to_front(&mut self, id: FloatId) -> LayoutResult<i64> {
        let z_index = self.next_z();
        let activated = self.activations.next_id();
        let float = self
            .get_mut(id)
            .ok_or_else(|| LayoutError::invalid_handle(format!("{} does not exist", id)))?;
        float.z_index = z_index;
        float.activated = activated;
        Ok(z_index)
    }

    /// Mark `id` as the most recently activated without touching its z-index
    pub(crate) fn touch(&mut self, id: FloatId) {
        let activated = self.activations.next_id();
        if let Some(float) = self.get_mut(id) {
            float.activated = activated;
        }
    }

    /// Floats bottom-to-top
    pub fn draw_order(&self) -> Vec<&FloatNode> {
        let mut ordered: Vec<&FloatNode> = self.floats.iter().collect();
        ordered.sort_by_key(|f| (f.z_index, f.activated));
        ordered
    }

    /// The float drawn above all others
    pub fn topmost(&self) -> Option<&FloatNode> {
        self.floats.iter().max_by_key(|f| (f.z_index, f.activated))
    }
}

impl Default for FloatLayer {
    fn default() -> Self {
        Self::new()
    }
}

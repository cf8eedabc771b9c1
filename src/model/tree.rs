//! Split tree - recursive partition of the workspace into docked panels
//!
//! Every node carries its size as a percentage of its parent's extent along
//! the parent's orientation, plus a minimum percentage. Absolute geometry is
//! never stored: it is derived top-down from the viewport on every layout
//! pass, so a resize of one node cascades to its descendants for free.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::{Orientation, Rect};
use super::tabs::Tabs;
use crate::error::{LayoutError, LayoutResult};
use crate::util::SIZE_EPSILON;

/// Percentage every branch's children add up to
pub const FULL_PERCENT: f64 = 100.0;

// ============================================================================
// Addressing
// ============================================================================

/// Location of a node: child indices walked from the root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> NodePath {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    /// Parent path and this node's index within the parent
    pub fn parent(&self) -> Option<(NodePath, usize)> {
        let (last, rest) = self.0.split_last()?;
        Some((NodePath(rest.to_vec()), *last))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// The draggable bar between `children[index]` and `children[index + 1]` of
/// the branch at `branch`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitHandle {
    pub branch: NodePath,
    pub index: usize,
}

impl SplitHandle {
    pub fn new(branch: impl Into<NodePath>, index: usize) -> Self {
        Self {
            branch: branch.into(),
            index,
        }
    }
}

impl fmt::Display for SplitHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.branch, self.index)
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// A container that splits space between children
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub orientation: Orientation,
    pub children: Vec<LayoutNode>,
}

impl Split {
    /// Current child sizes, in order
    pub fn sizes(&self) -> Vec<f64> {
        self.children.iter().map(|c| c.size).collect()
    }

    /// Sum of child sizes (100 when valid)
    pub fn total(&self) -> f64 {
        self.children.iter().map(|c| c.size).sum()
    }

    /// Sum of child minimums
    pub fn min_total(&self) -> f64 {
        self.children.iter().map(|c| c.min_size).sum()
    }
}

/// Leaf or branch - never both
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Leaf(Tabs),
    Branch(Split),
}

/// A node in the split tree
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    size: f64,
    min_size: f64,
    kind: NodeKind,
}

impl LayoutNode {
    pub fn leaf(size: f64, min_size: f64, tabs: Tabs) -> Self {
        Self {
            size,
            min_size,
            kind: NodeKind::Leaf(tabs),
        }
    }

    pub fn branch(
        size: f64,
        min_size: f64,
        orientation: Orientation,
        children: Vec<LayoutNode>,
    ) -> Self {
        Self {
            size,
            min_size,
            kind: NodeKind::Branch(Split {
                orientation,
                children,
            }),
        }
    }

    /// Re-anchor a node as the tree root (full size, no minimum)
    pub fn into_root(mut self) -> Self {
        self.size = FULL_PERCENT;
        self.min_size = 0.0;
        self
    }

    /// Size as a percentage of the parent's extent
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    #[inline]
    pub fn is_branch(&self) -> bool {
        matches!(self.kind, NodeKind::Branch(_))
    }

    pub fn tabs(&self) -> Option<&Tabs> {
        match &self.kind {
            NodeKind::Leaf(tabs) => Some(tabs),
            NodeKind::Branch(_) => None,
        }
    }

    pub(crate) fn tabs_mut(&mut self) -> Option<&mut Tabs> {
        match &mut self.kind {
            NodeKind::Leaf(tabs) => Some(tabs),
            NodeKind::Branch(_) => None,
        }
    }

    pub fn split(&self) -> Option<&Split> {
        match &self.kind {
            NodeKind::Branch(split) => Some(split),
            NodeKind::Leaf(_) => None,
        }
    }

    pub(crate) fn split_mut(&mut self) -> Option<&mut Split> {
        match &mut self.kind {
            NodeKind::Branch(split) => Some(split),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Children of a branch; empty for leaves
    pub fn children(&self) -> &[LayoutNode] {
        match &self.kind {
            NodeKind::Branch(split) => &split.children,
            NodeKind::Leaf(_) => &[],
        }
    }

    pub(crate) fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    /// Absolute extent of this node given its parent's resolved extent
    #[inline]
    pub fn compute_extent(&self, parent_extent: f64) -> f64 {
        compute_extent(self.size, parent_extent)
    }

    /// Node at `path`, if it exists
    pub fn get(&self, path: &NodePath) -> Option<&LayoutNode> {
        path.indices()
            .iter()
            .try_fold(self, |node, &i| node.children().get(i))
    }

    pub(crate) fn get_mut(&mut self, path: &NodePath) -> Option<&mut LayoutNode> {
        let mut node = self;
        for &i in path.indices() {
            node = node.split_mut()?.children.get_mut(i)?;
        }
        Some(node)
    }

    /// Absolute rect of the node at `path` when this node fills `rect`
    pub fn rect_of(&self, path: &NodePath, rect: Rect) -> Option<Rect> {
        let mut node = self;
        let mut rect = rect;
        for &index in path.indices() {
            let split = node.split()?;
            let child = split.children.get(index)?;
            let extent = split.orientation.extent(&rect);
            let offset: f64 = split.children[..index]
                .iter()
                .map(|c| c.compute_extent(extent))
                .sum();
            rect = rect.slice(split.orientation, offset, child.compute_extent(extent));
            node = child;
        }
        Some(rect)
    }

    /// Visit every leaf with its path, in layout order
    pub fn for_each_leaf(&self, mut f: impl FnMut(&NodePath, &Tabs)) {
        fn walk(node: &LayoutNode, path: &NodePath, f: &mut dyn FnMut(&NodePath, &Tabs)) {
            match &node.kind {
                NodeKind::Leaf(tabs) => f(path, tabs),
                NodeKind::Branch(split) => {
                    for (i, child) in split.children.iter().enumerate() {
                        walk(child, &path.child(i), f);
                    }
                }
            }
        }
        walk(self, &NodePath::root(), &mut f);
    }

    /// Number of leaves under (and including) this node
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.for_each_leaf(|_, _| count += 1);
        count
    }

    /// Find the leaf holding `component`
    pub fn find_component(&self, component: &super::ComponentId) -> Option<NodePath> {
        let mut found = None;
        self.for_each_leaf(|path, tabs| {
            if found.is_none() && tabs.contains(component) {
                found = Some(path.clone());
            }
        });
        found
    }

    /// Check every structural and sizing invariant of the subtree
    pub fn validate(&self) -> LayoutResult<()> {
        validate_node(self, &NodePath::root())
    }
}

/// `size_percent` of `parent_extent`
#[inline]
pub fn compute_extent(size_percent: f64, parent_extent: f64) -> f64 {
    parent_extent * size_percent / FULL_PERCENT
}

fn validate_node(node: &LayoutNode, path: &NodePath) -> LayoutResult<()> {
    if !node.size.is_finite() || !node.min_size.is_finite() {
        return Err(LayoutError::invalid_layout(format!(
            "node {} has a non-finite size",
            path
        )));
    }
    if node.min_size < 0.0 {
        return Err(LayoutError::invalid_layout(format!(
            "node {} has a negative minimum size {}",
            path, node.min_size
        )));
    }
    if node.size > FULL_PERCENT + SIZE_EPSILON {
        return Err(LayoutError::invalid_layout(format!(
            "node {} is larger than its parent ({}%)",
            path, node.size
        )));
    }
    if node.size < node.min_size - SIZE_EPSILON {
        return Err(LayoutError::invalid_layout(format!(
            "node {} is below its minimum ({}% < {}%)",
            path, node.size, node.min_size
        )));
    }

    match &node.kind {
        NodeKind::Leaf(tabs) => {
            if tabs.is_empty() {
                return Err(LayoutError::invalid_layout(format!(
                    "leaf {} holds no components",
                    path
                )));
            }
            Ok(())
        }
        NodeKind::Branch(split) => {
            if split.children.is_empty() {
                return Err(LayoutError::invalid_layout(format!(
                    "branch {} has no children",
                    path
                )));
            }
            let min_total = split.min_total();
            if min_total > FULL_PERCENT + SIZE_EPSILON {
                return Err(LayoutError::invalid_layout(format!(
                    "children of {} need at least {}%, more than the whole",
                    path, min_total
                )));
            }
            let total = split.total();
            if (total - FULL_PERCENT).abs() > SIZE_EPSILON {
                return Err(LayoutError::invalid_layout(format!(
                    "children of {} add up to {}%, not 100%",
                    path, total
                )));
            }
            for (i, child) in split.children.iter().enumerate() {
                validate_node(child, &path.child(i))?;
            }
            Ok(())
        }
    }
}

//! Split resize - zero-sum transfer of space between two adjacent siblings
//!
//! Only the two children on either side of a handle ever change. Whatever one
//! gains the other loses, so the branch total stays at 100%. The transfer is
//! clamped so neither child drops below its minimum; once both are pinned in
//! the drag direction any further delta transfers nothing.

use crate::error::{LayoutError, LayoutResult};
use crate::model::{LayoutNode, SplitHandle};

/// Starting sizes and floors of the two children around a handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiblingPair {
    pub leading: f64,
    pub trailing: f64,
    pub leading_min: f64,
    pub trailing_min: f64,
}

impl SiblingPair {
    pub fn new(leading: f64, trailing: f64, leading_min: f64, trailing_min: f64) -> Self {
        Self {
            leading,
            trailing,
            leading_min,
            trailing_min,
        }
    }

    /// Capture the pair around `handle` from a tree
    pub fn capture(root: &LayoutNode, handle: &SplitHandle) -> LayoutResult<Self> {
        let split = root
            .get(&handle.branch)
            .and_then(LayoutNode::split)
            .ok_or_else(|| {
                LayoutError::invalid_handle(format!("{} is not a branch", handle.branch))
            })?;
        let (Some(leading), Some(trailing)) = (
            split.children.get(handle.index),
            split.children.get(handle.index + 1),
        ) else {
            return Err(LayoutError::invalid_handle(format!(
                "handle {} does not sit between two children of a {}-child branch",
                handle,
                split.children.len()
            )));
        };
        Ok(Self::new(
            leading.size(),
            trailing.size(),
            leading.min_size(),
            trailing.min_size(),
        ))
    }

    /// Combined size of the pair; never changes during a resize
    pub fn total(&self) -> f64 {
        self.leading + self.trailing
    }

    /// How far the handle can move toward the leading child (negative bound)
    /// and toward the trailing child (positive bound)
    pub fn bounds(&self) -> (f64, f64) {
        let shrink = (self.leading - self.leading_min).max(0.0);
        let grow = (self.trailing - self.trailing_min).max(0.0);
        (-shrink, grow)
    }

    /// The part of `delta` (percent) that keeps both children above their floors
    pub fn clamp_delta(&self, delta: f64) -> f64 {
        if delta == 0.0 || !delta.is_finite() {
            return 0.0;
        }
        let (lower, upper) = self.bounds();
        delta.clamp(lower, upper)
    }

    /// New `(leading, trailing)` sizes after moving the handle by `delta`
    pub fn resized(&self, delta: f64) -> (f64, f64) {
        let applied = self.clamp_delta(delta);
        if applied == 0.0 {
            return (self.leading, self.trailing);
        }

        // Snap exactly onto the floor that was hit so neither child lands a
        // rounding error below its minimum.
        let (lower, upper) = self.bounds();
        let total = self.total();
        if applied == lower {
            (
                self.leading_min,
                (total - self.leading_min).max(self.trailing_min),
            )
        } else if applied == upper {
            (
                (total - self.trailing_min).max(self.leading_min),
                self.trailing_min,
            )
        } else {
            (
                (self.leading + applied).max(self.leading_min),
                (self.trailing - applied).max(self.trailing_min),
            )
        }
    }
}

/// Write `(leading, trailing)` sizes into the children around `handle`
pub(crate) fn write_pair(
    root: &mut LayoutNode,
    handle: &SplitHandle,
    sizes: (f64, f64),
) -> LayoutResult<()> {
    let split = root
        .get_mut(&handle.branch)
        .and_then(LayoutNode::split_mut)
        .ok_or_else(|| LayoutError::invalid_handle(format!("{} is not a branch", handle.branch)))?;
    if handle.index + 1 >= split.children.len() {
        return Err(LayoutError::invalid_handle(format!(
            "handle {} is out of range",
            handle
        )));
    }
    split.children[handle.index].set_size(sizes.0);
    split.children[handle.index + 1].set_size(sizes.1);
    Ok(())
}

/// One-shot resize of the pair around `handle` by `delta` percent
///
/// Returns the delta actually applied after clamping.
pub fn resize_siblings(
    root: &mut LayoutNode,
    handle: &SplitHandle,
    delta: f64,
) -> LayoutResult<f64> {
    let pair = SiblingPair::capture(root, handle)?;
    let applied = pair.clamp_delta(delta);
    if applied != 0.0 {
        write_pair(root, handle, pair.resized(delta))?;
    }
    Ok(applied)
}

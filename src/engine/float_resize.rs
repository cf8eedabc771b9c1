//! Float resize and move
//!
//! A handle is interpreted by folding its edges over the starting rectangle.
//! Corner handles drive one horizontal and one vertical edge; those touch
//! disjoint fields so the fold order does not matter.

use crate::model::{Delta, FloatHandle, FloatRect, MinSize};

/// Rectangle after dragging `handle` by `delta` from `start`
pub fn resize_float(start: FloatRect, handle: FloatHandle, delta: Delta, min: MinSize) -> FloatRect {
    let delta = sanitize(delta);
    handle.edges().iter().fold(start, |rect, edge| {
        let d = if edge.is_horizontal() {
            delta.dx
        } else {
            delta.dy
        };
        edge.apply(rect, d, min)
    })
}

/// Rectangle after dragging the title bar by `delta` from `start`
pub fn move_float(start: FloatRect, delta: Delta) -> FloatRect {
    let delta = sanitize(delta);
    FloatRect {
        top: start.top + delta.dy,
        left: start.left + delta.dx,
        ..start
    }
}

fn sanitize(delta: Delta) -> Delta {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    Delta::new(finite(delta.dx), finite(delta.dy))
}

//! Property-based tests for drag sequences
//!
//! Any sequence of split or float drags, committed or aborted, must keep
//! every branch summing to 100 and every node and float at or above its
//! minimum.

mod common;

use common::{assert_tree_sound, sample_engine};
use dockspace::engine::{LayoutEngine, SiblingPair};
use dockspace::model::{Delta, FloatHandle, Rect};
use dockspace::view::SPLITTER_WIDTH;
use proptest::prelude::*;

// ============================================================================
// Test Strategies
// ============================================================================

/// One split drag: which splitter, the pointer deltas, and whether it is aborted
#[derive(Debug, Clone)]
struct SplitDrag {
    splitter: usize,
    deltas: Vec<f64>,
    abort: bool,
}

/// One float drag: `None` moves by the title, `Some(i)` resizes by grip `i`
#[derive(Debug, Clone)]
struct FloatDrag {
    grip: Option<usize>,
    deltas: Vec<(f64, f64)>,
    abort: bool,
}

fn split_drag_strategy() -> impl Strategy<Value = SplitDrag> {
    (
        0usize..64,
        proptest::collection::vec(-800.0f64..800.0, 1..12),
        any::<bool>(),
    )
        .prop_map(|(splitter, deltas, abort)| SplitDrag {
            splitter,
            deltas,
            abort,
        })
}

fn float_drag_strategy() -> impl Strategy<Value = FloatDrag> {
    (
        proptest::option::of(0usize..FloatHandle::ALL.len()),
        proptest::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 1..8),
        any::<bool>(),
    )
        .prop_map(|(grip, deltas, abort)| FloatDrag {
            grip,
            deltas,
            abort,
        })
}

fn engine() -> LayoutEngine {
    let mut engine = sample_engine();
    engine
        .set_viewport(Rect::new(0.0, 0.0, 1000.0, 600.0))
        .unwrap();
    engine
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn test_split_drags_keep_tree_sound(drags in proptest::collection::vec(split_drag_strategy(), 1..30)) {
        let mut engine = engine();
        let handles: Vec<_> = engine
            .compute_layout(SPLITTER_WIDTH)
            .splitters
            .into_iter()
            .map(|bar| bar.handle)
            .collect();

        for drag in drags {
            let handle = handles[drag.splitter % handles.len()].clone();
            let mut session = engine.begin_split_resize(handle).unwrap();
            for delta in drag.deltas {
                engine.apply_split_resize_delta(&mut session, delta).unwrap();
                assert_tree_sound(engine.root());
            }
            if drag.abort {
                engine.abort_drag(session).unwrap();
            } else {
                engine.end_split_resize(session).unwrap();
            }
            assert_tree_sound(engine.root());
            prop_assert!(!engine.is_dragging());
        }
    }

    #[test]
    fn test_aborted_split_drag_restores_sizes(drag in split_drag_strategy()) {
        let mut engine = engine();
        let before = engine.to_def();
        let handles: Vec<_> = engine
            .compute_layout(SPLITTER_WIDTH)
            .splitters
            .into_iter()
            .map(|bar| bar.handle)
            .collect();

        let handle = handles[drag.splitter % handles.len()].clone();
        let mut session = engine.begin_split_resize(handle).unwrap();
        for delta in drag.deltas {
            engine.apply_split_resize_delta(&mut session, delta).unwrap();
        }
        engine.abort_drag(session).unwrap();
        prop_assert_eq!(engine.to_def(), before);
    }

    #[test]
    fn test_float_drags_respect_minimum(drags in proptest::collection::vec(float_drag_strategy(), 1..20)) {
        let mut engine = engine();
        let id = engine.floats().iter().next().unwrap().id();
        let min = engine.float(id).unwrap().min_size();

        for drag in drags {
            let start = engine.float(id).unwrap().rect();
            let mut session = match drag.grip {
                Some(i) => engine.begin_float_resize(id, FloatHandle::ALL[i]).unwrap(),
                None => engine.begin_float_move(id).unwrap(),
            };
            for (dx, dy) in drag.deltas {
                let delta = Delta::new(dx, dy);
                match drag.grip {
                    Some(_) => engine.apply_float_resize_delta(&mut session, delta).unwrap(),
                    None => engine.apply_float_move_delta(&mut session, delta).unwrap(),
                }
                let rect = engine.float(id).unwrap().rect();
                prop_assert!(rect.width >= min.width, "width {} below {}", rect.width, min.width);
                prop_assert!(rect.height >= min.height, "height {} below {}", rect.height, min.height);
                if drag.grip.is_none() {
                    prop_assert_eq!(rect.width, start.width);
                    prop_assert_eq!(rect.height, start.height);
                }
            }
            if drag.abort {
                engine.abort_drag(session).unwrap();
                prop_assert_eq!(engine.float(id).unwrap().rect(), start);
            } else {
                engine.end_drag(session).unwrap();
            }
        }
    }

    #[test]
    fn test_sibling_pair_never_dips_below_floor(
        leading in 0.0f64..100.0,
        trailing in 0.0f64..100.0,
        leading_frac in 0.0f64..=1.0,
        trailing_frac in 0.0f64..=1.0,
        delta in -200.0f64..200.0,
    ) {
        let leading_min = leading * leading_frac;
        let trailing_min = trailing * trailing_frac;
        let pair = SiblingPair::new(leading, trailing, leading_min, trailing_min);

        let (l, t) = pair.resized(delta);
        prop_assert!(l >= leading_min, "leading {} below {}", l, leading_min);
        prop_assert!(t >= trailing_min, "trailing {} below {}", t, trailing_min);
        prop_assert!(((l + t) - (leading + trailing)).abs() < 1e-9);
    }
}

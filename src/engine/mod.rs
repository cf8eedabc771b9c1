//! Layout engine - the only owner and mutator of the split tree and floats
//!
//! Every mutation goes through a method here. Each one validates first and
//! then applies, so a rejected call leaves the model exactly as it was.
//!
//! Pointer drags are modelled as [`DragSession`]s. At most one session is live
//! per engine: beginning a new one commits the old, and a stale session is
//! rejected with [`LayoutError::InvalidHandle`].

mod float_resize;
mod session;
mod split_resize;

pub use float_resize::{move_float, resize_float};
pub use session::{DragKind, DragSession, SessionId};
pub use split_resize::{resize_siblings, SiblingPair};

use tracing::{debug, warn};

use crate::error::{LayoutError, LayoutResult};
use crate::layout_def::{FloatDef, LayoutDef};
use crate::model::{
    ComponentId, Delta, FloatHandle, FloatId, FloatLayer, FloatNode, FloatRect, FloatSeed,
    LayoutNode, NodePath, Rect, SplitHandle,
};
use crate::util::IdGenerator;
use crate::view::{compute_frame, LayoutFrame};

/// A panel that holds tabbed components: a docked leaf or a float
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelRef {
    Docked(NodePath),
    Floating(FloatId),
}

impl std::fmt::Display for PanelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelRef::Docked(path) => write!(f, "leaf {}", path),
            PanelRef::Floating(id) => write!(f, "{}", id),
        }
    }
}

/// Split tree, float set and the drag currently in flight
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    root: LayoutNode,
    floats: FloatLayer,
    viewport: Rect,
    sessions: IdGenerator,
    active: Option<SessionId>,
    /// Float dragged by the live session
    active_float: Option<FloatId>,
}

impl LayoutEngine {
    /// Build an engine from a tree and float seeds
    ///
    /// The root is forced to 100% and the whole tree is validated. The
    /// viewport starts as a 100x100 square, so absolute units and percentages
    /// coincide until [`set_viewport`](Self::set_viewport) is called.
    pub fn new(root: LayoutNode, floats: Vec<FloatSeed>) -> LayoutResult<Self> {
        let root = root.into_root();
        root.validate()?;

        let mut layer = FloatLayer::new();
        for seed in floats {
            layer.insert(seed)?;
        }

        debug!(
            leaves = root.leaf_count(),
            floats = layer.len(),
            "layout engine created"
        );

        Ok(Self {
            root,
            floats: layer,
            viewport: Rect::new(0.0, 0.0, 100.0, 100.0),
            sessions: IdGenerator::starting_at(1),
            active: None,
            active_float: None,
        })
    }

    pub fn from_def(def: &LayoutDef) -> LayoutResult<Self> {
        let (root, floats) = def.build()?;
        Self::new(root, floats)
    }

    /// Describe the current state as a definition
    pub fn to_def(&self) -> LayoutDef {
        LayoutDef::from_model(&self.root, &self.floats)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn root(&self) -> &LayoutNode {
        &self.root
    }

    pub fn floats(&self) -> &FloatLayer {
        &self.floats
    }

    pub fn float(&self, id: FloatId) -> Option<&FloatNode> {
        self.floats.get(id)
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Id of the live drag session, if any
    pub fn active_session(&self) -> Option<SessionId> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Resize the area the layout fills
    pub fn set_viewport(&mut self, viewport: Rect) -> LayoutResult<()> {
        let finite = [viewport.x, viewport.y, viewport.width, viewport.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || viewport.width < 0.0 || viewport.height < 0.0 {
            return Err(LayoutError::invalid_layout(format!(
                "viewport {}x{} is not a valid area",
                viewport.width, viewport.height
            )));
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            "viewport resized"
        );
        self.viewport = viewport;
        Ok(())
    }

    /// Absolute rectangles for every pane, splitter and float
    pub fn compute_layout(&self, splitter_width: f64) -> LayoutFrame {
        compute_frame(&self.root, &self.floats, self.viewport, splitter_width)
    }

    // =========================================================================
    // Split resize
    // =========================================================================

    /// Start dragging the splitter between `handle.index` and `handle.index + 1`
    pub fn begin_split_resize(&mut self, handle: SplitHandle) -> LayoutResult<DragSession> {
        let start = SiblingPair::capture(&self.root, &handle)?;
        let (orientation, extent) = match (
            self.root.get(&handle.branch).and_then(LayoutNode::split),
            self.root.rect_of(&handle.branch, self.viewport),
        ) {
            (Some(split), Some(rect)) => (split.orientation, split.orientation.extent(&rect)),
            _ => {
                return Err(LayoutError::invalid_handle(format!(
                    "{} is not a branch",
                    handle.branch
                )))
            }
        };

        let session = self.open_session(DragKind::Split {
            handle,
            orientation,
            extent,
            start,
            travel: 0.0,
        });
        debug!(session = %session.label(), extent, "split resize started");
        Ok(session)
    }

    /// Feed an incremental pointer delta (absolute units along the branch)
    pub fn apply_split_resize_delta(
        &mut self,
        session: &mut DragSession,
        delta: f64,
    ) -> LayoutResult<()> {
        self.ensure_active(session)?;
        let id = session.id();
        let DragKind::Split {
            handle,
            extent,
            start,
            travel,
            ..
        } = session.kind_mut()
        else {
            return Err(LayoutError::invalid_handle(format!(
                "{} is not a split resize",
                id
            )));
        };
        if delta == 0.0 || !delta.is_finite() {
            return Ok(());
        }

        let next_travel = *travel + delta;
        let percent = if *extent > 0.0 {
            next_travel / *extent * 100.0
        } else {
            0.0
        };
        split_resize::write_pair(&mut self.root, handle, start.resized(percent))?;
        *travel = next_travel;
        Ok(())
    }

    pub fn end_split_resize(&mut self, session: DragSession) -> LayoutResult<()> {
        if !matches!(session.kind(), DragKind::Split { .. }) {
            return Err(LayoutError::invalid_handle(format!(
                "{} is not a split resize",
                session.id()
            )));
        }
        self.end_drag(session)
    }

    // =========================================================================
    // Float resize and move
    // =========================================================================

    /// Start dragging one of the eight grips of `float`; raises it to the top
    pub fn begin_float_resize(
        &mut self,
        float: FloatId,
        handle: FloatHandle,
    ) -> LayoutResult<DragSession> {
        let start = self.float_rect(float)?;
        let session = self.open_session(DragKind::FloatResize {
            float,
            handle,
            start,
            travel: Delta::ZERO,
        });
        self.floats.bring_to_front(float)?;
        debug!(session = %session.label(), "float resize started");
        Ok(session)
    }

    /// Feed an incremental pointer delta (absolute units)
    pub fn apply_float_resize_delta(
        &mut self,
        session: &mut DragSession,
        delta: Delta,
    ) -> LayoutResult<()> {
        self.ensure_active(session)?;
        let id = session.id();
        let scaled = self.to_percent(delta);
        let DragKind::FloatResize {
            float,
            handle,
            start,
            travel,
        } = session.kind_mut()
        else {
            return Err(LayoutError::invalid_handle(format!(
                "{} is not a float resize",
                id
            )));
        };
        if scaled.is_zero() {
            return Ok(());
        }

        let node = self
            .floats
            .get_mut(*float)
            .ok_or_else(|| LayoutError::invalid_handle(format!("{} was closed", float)))?;
        let next_travel = *travel + scaled;
        node.set_rect(resize_float(*start, *handle, next_travel, node.min_size()));
        *travel = next_travel;
        Ok(())
    }

    pub fn end_float_resize(&mut self, session: DragSession) -> LayoutResult<()> {
        if !matches!(session.kind(), DragKind::FloatResize { .. }) {
            return Err(LayoutError::invalid_handle(format!(
                "{} is not a float resize",
                session.id()
            )));
        }
        self.end_drag(session)
    }

    /// Start dragging the title bar of `float`; raises it to the top
    pub fn begin_float_move(&mut self, float: FloatId) -> LayoutResult<DragSession> {
        let start = self.float_rect(float)?;
        let session = self.open_session(DragKind::FloatMove {
            float,
            start,
            travel: Delta::ZERO,
        });
        self.floats.bring_to_front(float)?;
        debug!(session = %session.label(), "float move started");
        Ok(session)
    }

    pub fn apply_float_move_delta(
        &mut self,
        session: &mut DragSession,
        delta: Delta,
    ) -> LayoutResult<()> {
        self.ensure_active(session)?;
        let id = session.id();
        let scaled = self.to_percent(delta);
        let DragKind::FloatMove {
            float,
            start,
            travel,
        } = session.kind_mut()
        else {
            return Err(LayoutError::invalid_handle(format!(
                "{} is not a float move",
                id
            )));
        };
        if scaled.is_zero() {
            return Ok(());
        }

        let node = self
            .floats
            .get_mut(*float)
            .ok_or_else(|| LayoutError::invalid_handle(format!("{} was closed", float)))?;
        let next_travel = *travel + scaled;
        node.set_rect(move_float(*start, next_travel));
        *travel = next_travel;
        Ok(())
    }

    pub fn end_float_move(&mut self, session: DragSession) -> LayoutResult<()> {
        if !matches!(session.kind(), DragKind::FloatMove { .. }) {
            return Err(LayoutError::invalid_handle(format!(
                "{} is not a float move",
                session.id()
            )));
        }
        self.end_drag(session)
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Finish any kind of drag, keeping what it did
    pub fn end_drag(&mut self, session: DragSession) -> LayoutResult<()> {
        self.ensure_active(&session)?;
        self.clear_active();
        debug!(session = %session.label(), "drag ended");
        Ok(())
    }

    /// Cancel a drag and restore whatever it touched to its starting geometry
    ///
    /// Z-order changes made when the drag began are kept.
    pub fn abort_drag(&mut self, session: DragSession) -> LayoutResult<()> {
        self.ensure_active(&session)?;
        match session.kind() {
            DragKind::Split { handle, start, .. } => {
                split_resize::write_pair(&mut self.root, handle, (start.leading, start.trailing))?;
            }
            DragKind::FloatResize { float, start, .. } | DragKind::FloatMove { float, start, .. } => {
                if let Some(node) = self.floats.get_mut(*float) {
                    node.set_rect(*start);
                }
            }
        }
        self.clear_active();
        debug!(session = %session.label(), "drag aborted");
        Ok(())
    }

    fn open_session(&mut self, kind: DragKind) -> DragSession {
        if let Some(previous) = self.active.take() {
            warn!(%previous, "drag began while another was live; committing the old one");
        }
        let id = SessionId(self.sessions.next_id());
        let session = DragSession::new(id, kind);
        self.active = Some(id);
        self.active_float = session.float();
        session
    }

    fn clear_active(&mut self) {
        self.active = None;
        self.active_float = None;
    }

    fn ensure_active(&self, session: &DragSession) -> LayoutResult<()> {
        if self.active == Some(session.id()) {
            Ok(())
        } else {
            Err(LayoutError::invalid_handle(format!(
                "{} is no longer active",
                session.id()
            )))
        }
    }

    fn float_rect(&self, float: FloatId) -> LayoutResult<FloatRect> {
        self.floats
            .get(float)
            .map(FloatNode::rect)
            .ok_or_else(|| LayoutError::invalid_handle(format!("{} does not exist", float)))
    }

    /// Absolute pointer delta as a percentage of the viewport
    fn to_percent(&self, delta: Delta) -> Delta {
        let scale = |d: f64, extent: f64| {
            if extent > 0.0 && d.is_finite() {
                d / extent * 100.0
            } else {
                0.0
            }
        };
        Delta::new(
            scale(delta.dx, self.viewport.width),
            scale(delta.dy, self.viewport.height),
        )
    }

    // =========================================================================
    // Panels
    // =========================================================================

    /// Raise `float` above every other float. Returns its new z-index.
    pub fn bring_float_to_front(&mut self, float: FloatId) -> LayoutResult<i64> {
        let z_index = self.floats.bring_to_front(float)?;
        debug!(%float, z_index, "float brought to front");
        Ok(z_index)
    }

    /// Make `component` the active tab of `panel`
    ///
    /// Activating a tab inside a float also raises the float.
    pub fn toggle_component_active(
        &mut self,
        panel: &PanelRef,
        component: &ComponentId,
    ) -> LayoutResult<()> {
        match panel {
            PanelRef::Docked(path) => {
                let node = self
                    .root
                    .get_mut(path)
                    .ok_or_else(|| LayoutError::invalid_handle(format!("no node at {}", path)))?;
                let tabs = node.tabs_mut().ok_or_else(|| LayoutError::ComponentNotFound {
                    component: component.clone(),
                })?;
                tabs.activate(component)?;
            }
            PanelRef::Floating(id) => {
                let node = self
                    .floats
                    .get_mut(*id)
                    .ok_or_else(|| LayoutError::invalid_handle(format!("{} does not exist", id)))?;
                node.tabs_mut().activate(component)?;
                self.floats.bring_to_front(*id)?;
            }
        }
        debug!(%panel, %component, "component activated");
        Ok(())
    }

    /// Find the panel currently holding `component`
    pub fn find_component(&self, component: &ComponentId) -> Option<PanelRef> {
        if let Some(path) = self.root.find_component(component) {
            return Some(PanelRef::Docked(path));
        }
        self.floats
            .iter()
            .find(|f| f.tabs().contains(component))
            .map(|f| PanelRef::Floating(f.id()))
    }

    /// Create a float from a definition and place it on top
    pub fn open_float(&mut self, def: &FloatDef) -> LayoutResult<FloatId> {
        let mut seed = def.seed()?;
        seed.z_index = None;
        let id = self.floats.insert(seed)?;
        self.floats.touch(id);
        debug!(%id, "float opened");
        Ok(id)
    }

    /// Remove a float. A drag on it is dropped without restoring anything.
    pub fn close_float(&mut self, float: FloatId) -> LayoutResult<()> {
        if !self.floats.contains(float) {
            return Err(LayoutError::invalid_handle(format!(
                "{} does not exist",
                float
            )));
        }
        self.floats.remove(float);
        if self.active_float == Some(float) {
            debug!(%float, "dropping drag on closed float");
            self.clear_active();
        }
        debug!(%float, "float closed");
        Ok(())
    }

    // =========================================================================
    // Debug Invariant Validation
    // =========================================================================

    /// Panic if the tree or any float violates its constraints.
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        if let Err(e) = self.root.validate() {
            panic!("split tree invariant violated: {}", e);
        }
        for float in self.floats.iter() {
            let (rect, min) = (float.rect(), float.min_size());
            assert!(
                rect.width >= min.width && rect.height >= min.height,
                "{} is {}x{}, below its minimum {}x{}",
                float.id(),
                rect.width,
                rect.height,
                min.width,
                min.height
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MinSize, Orientation, Tabs};
    use crate::util::{approx_eq, SIZE_EPSILON};

    fn engine() -> LayoutEngine {
        let root = LayoutNode::branch(
            100.0,
            0.0,
            Orientation::Vertical,
            vec![
                LayoutNode::leaf(40.0, 10.0, Tabs::single("Left")),
                LayoutNode::leaf(20.0, 10.0, Tabs::single("Middle")),
                LayoutNode::leaf(40.0, 10.0, Tabs::single("Right")),
            ],
        );
        let float = FloatSeed {
            rect: FloatRect::new(10.0, 10.0, 30.0, 20.0),
            min: MinSize::new(10.0, 10.0),
            z_index: None,
            tabs: Tabs::new(vec!["User".into(), "Export".into()], None).unwrap(),
        };
        LayoutEngine::new(root, vec![float]).unwrap()
    }

    fn sizes(engine: &LayoutEngine) -> Vec<f64> {
        engine.root().split().unwrap().sizes()
    }

    fn first_float(engine: &LayoutEngine) -> FloatId {
        engine.floats().iter().next().unwrap().id()
    }

    #[test]
    fn test_split_drag_clamps_and_preserves_sum() {
        let mut engine = engine();
        let mut session = engine
            .begin_split_resize(SplitHandle::new(NodePath::root(), 0))
            .unwrap();
        engine.apply_split_resize_delta(&mut session, -50.0).unwrap();
        assert_eq!(sizes(&engine), vec![10.0, 50.0, 40.0]);
        assert!(approx_eq(sizes(&engine).iter().sum(), 100.0, SIZE_EPSILON));
        engine.end_split_resize(session).unwrap();
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_abort_restores_start_sizes() {
        let mut engine = engine();
        let before = sizes(&engine);
        let mut session = engine
            .begin_split_resize(SplitHandle::new(NodePath::root(), 1))
            .unwrap();
        for d in [5.0, -3.0, 10.0] {
            engine.apply_split_resize_delta(&mut session, d).unwrap();
        }
        assert_ne!(sizes(&engine), before);
        engine.abort_drag(session).unwrap();
        assert_eq!(sizes(&engine), before);
    }

    #[test]
    fn test_split_delta_scaled_by_branch_extent() {
        let mut engine = engine();
        engine
            .set_viewport(Rect::new(0.0, 0.0, 1000.0, 500.0))
            .unwrap();
        let mut session = engine
            .begin_split_resize(SplitHandle::new(NodePath::root(), 0))
            .unwrap();
        // 50px of a 1000px branch is 5%
        engine.apply_split_resize_delta(&mut session, 50.0).unwrap();
        assert_eq!(sizes(&engine), vec![45.0, 15.0, 40.0]);
    }

    #[test]
    fn test_begin_commits_previous_session() {
        let mut engine = engine();
        let mut first = engine
            .begin_split_resize(SplitHandle::new(NodePath::root(), 0))
            .unwrap();
        engine.apply_split_resize_delta(&mut first, 5.0).unwrap();
        let second = engine
            .begin_split_resize(SplitHandle::new(NodePath::root(), 1))
            .unwrap();
        assert_eq!(sizes(&engine), vec![45.0, 15.0, 40.0]);

        let err = engine.apply_split_resize_delta(&mut first, 5.0).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidHandle(_)));
        let err = engine.abort_drag(first).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidHandle(_)));
        assert_eq!(sizes(&engine), vec![45.0, 15.0, 40.0]);
        engine.end_drag(second).unwrap();
    }

    #[test]
    fn test_invalid_split_handle() {
        let mut engine = engine();
        let err = engine
            .begin_split_resize(SplitHandle::new(NodePath::root(), 2))
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidHandle(_)));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_float_resize_clamps_to_minimum() {
        let mut engine = engine();
        let id = first_float(&engine);
        let mut session = engine
            .begin_float_resize(id, FloatHandle::RightBottom)
            .unwrap();
        engine
            .apply_float_resize_delta(&mut session, Delta::new(-25.0, -15.0))
            .unwrap();
        assert_eq!(
            engine.float(id).unwrap().rect(),
            FloatRect::new(10.0, 10.0, 10.0, 10.0)
        );
        engine.end_float_resize(session).unwrap();
    }

    #[test]
    fn test_float_move_raises_and_aborts() {
        let mut engine = engine();
        let id = first_float(&engine);
        let z = engine.float(id).unwrap().z_index();
        let mut session = engine.begin_float_move(id).unwrap();
        assert!(engine.float(id).unwrap().z_index() > z);

        engine
            .apply_float_move_delta(&mut session, Delta::new(5.0, 5.0))
            .unwrap();
        assert_eq!(engine.float(id).unwrap().rect().left, 15.0);
        engine.abort_drag(session).unwrap();
        assert_eq!(
            engine.float(id).unwrap().rect(),
            FloatRect::new(10.0, 10.0, 30.0, 20.0)
        );
    }

    #[test]
    fn test_end_with_wrong_kind_is_rejected() {
        let mut engine = engine();
        let id = first_float(&engine);
        let session = engine.begin_float_move(id).unwrap();
        let err = engine.end_split_resize(session.clone()).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidHandle(_)));
        assert!(engine.is_dragging());
        engine.end_float_move(session).unwrap();
    }

    #[test]
    fn test_toggle_component_active() {
        let mut engine = engine();
        let id = first_float(&engine);
        let z = engine.float(id).unwrap().z_index();

        engine
            .toggle_component_active(&PanelRef::Floating(id), &"Export".into())
            .unwrap();
        let float = engine.float(id).unwrap();
        assert_eq!(float.tabs().active().as_str(), "Export");
        assert!(float.z_index() > z);

        let err = engine
            .toggle_component_active(&PanelRef::Docked(NodePath::new(vec![0])), &"Nope".into())
            .unwrap_err();
        assert!(matches!(err, LayoutError::ComponentNotFound { .. }));

        let err = engine
            .toggle_component_active(&PanelRef::Docked(NodePath::new(vec![9])), &"Left".into())
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidHandle(_)));
    }

    #[test]
    fn test_close_float_invalidates_its_drag() {
        let mut engine = engine();
        let id = first_float(&engine);
        let mut session = engine.begin_float_move(id).unwrap();
        engine.close_float(id).unwrap();
        let err = engine
            .apply_float_move_delta(&mut session, Delta::new(1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidHandle(_)));
        assert!(!engine.is_dragging());
        assert!(engine.close_float(id).is_err());
    }

    #[test]
    fn test_open_float_goes_on_top() {
        let mut engine = engine();
        let def = FloatDef {
            top: 0.0,
            left: 0.0,
            width: 20.0,
            height: 20.0,
            z_index: Some(-5),
            components: vec!["Search".into()],
            ..FloatDef::default()
        };
        let id = engine.open_float(&def).unwrap();
        assert_eq!(engine.floats().topmost().unwrap().id(), id);
    }
}

//! Declarative layout definitions (YAML / JSON)
//!
//! A definition is a nested node object describing the split tree plus a
//! `floating` list:
//!
//! ```yaml
//! orient: v
//! children:
//!   - components: [ToolPanel]
//!     width: 10
//!     minWidth: 10
//!   - components: [DocumentPanel]
//!     width: 90
//! floating:
//!   - { top: 20, left: 36, width: 20, height: 30, minWidth: 10, minHeight: 10,
//!       components: [UserPanel] }
//! ```
//!
//! A child is sized by `width`/`minWidth` under a `v` parent and by
//! `height`/`minHeight` under an `h` parent. Children without a size share
//! whatever percentage the others leave.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::model::{
    ComponentId, FloatLayer, FloatRect, FloatSeed, LayoutNode, MinSize, NodeKind, NodePath,
    Orientation, Tabs, FULL_PERCENT,
};

/// Root of a layout definition file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDef {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub floating: Vec<FloatDef>,
    #[serde(flatten)]
    pub root: NodeDef,
}

/// One split-tree node as written in a definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orient: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_component: Option<ComponentId>,
}

/// One floating panel as written in a definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatDef {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub min_width: f64,
    #[serde(default)]
    pub min_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    pub components: Vec<ComponentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_component: Option<ComponentId>,
}

impl LayoutDef {
    /// Parse a YAML definition
    pub fn from_yaml(yaml: &str) -> LayoutResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| LayoutError::invalid_layout(format!("malformed YAML layout: {}", e)))
    }

    /// Parse a JSON definition
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| LayoutError::invalid_layout(format!("malformed JSON layout: {}", e)))
    }

    pub fn to_yaml(&self) -> LayoutResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| LayoutError::invalid_layout(format!("failed to serialize layout: {}", e)))
    }

    pub fn to_json(&self) -> LayoutResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::invalid_layout(format!("failed to serialize layout: {}", e)))
    }

    /// Convert into a validated split tree and float seeds
    pub fn build(&self) -> LayoutResult<(LayoutNode, Vec<FloatSeed>)> {
        let root = build_node(&self.root, FULL_PERCENT, 0.0, &NodePath::root())?.into_root();
        root.validate()?;

        let floats = self
            .floating
            .iter()
            .enumerate()
            .map(|(i, def)| def.to_seed(i))
            .collect::<LayoutResult<Vec<_>>>()?;

        Ok((root, floats))
    }

    /// Describe an existing model
    pub fn from_model(root: &LayoutNode, floats: &FloatLayer) -> Self {
        Self {
            floating: floats
                .draw_order()
                .into_iter()
                .map(|float| {
                    let rect = float.rect();
                    let min = float.min_size();
                    let tabs = float.tabs();
                    FloatDef {
                        top: rect.top,
                        left: rect.left,
                        width: rect.width,
                        height: rect.height,
                        min_width: min.width,
                        min_height: min.height,
                        z_index: Some(float.z_index()),
                        components: tabs.components().to_vec(),
                        active_component: Some(tabs.active().clone()),
                    }
                })
                .collect(),
            root: describe_node(root, None),
        }
    }
}

impl FloatDef {
    fn to_seed(&self, index: usize) -> LayoutResult<FloatSeed> {
        let tabs = Tabs::new(self.components.clone(), self.active_component.clone())
            .map_err(|e| prefix(e, &format!("float #{}", index)))?;
        Ok(FloatSeed {
            rect: FloatRect::new(self.top, self.left, self.width, self.height),
            min: MinSize::new(self.min_width, self.min_height),
            z_index: self.z_index,
            tabs,
        })
    }

    /// Convert into a seed for a float opened at runtime
    pub fn seed(&self) -> LayoutResult<FloatSeed> {
        self.to_seed(0)
    }
}

fn prefix(err: LayoutError, context: &str) -> LayoutError {
    match err {
        LayoutError::InvalidLayout(msg) => {
            LayoutError::InvalidLayout(format!("{}: {}", context, msg))
        }
        other => other,
    }
}

/// Size and minimum of `def` measured along its parent's orientation
fn sizing(def: &NodeDef, parent: Orientation) -> (Option<f64>, Option<f64>) {
    match parent {
        Orientation::Vertical => (def.width, def.min_width),
        Orientation::Horizontal => (def.height, def.min_height),
    }
}

fn build_node(def: &NodeDef, size: f64, min_size: f64, path: &NodePath) -> LayoutResult<LayoutNode> {
    if def.children.is_empty() {
        let tabs = Tabs::new(def.components.clone(), def.active_component.clone())
            .map_err(|e| prefix(e, &format!("leaf {}", path)))?;
        return Ok(LayoutNode::leaf(size, min_size, tabs));
    }

    if !def.components.is_empty() {
        return Err(LayoutError::invalid_layout(format!(
            "node {} has both children and components",
            path
        )));
    }
    let orientation = def.orient.ok_or_else(|| {
        LayoutError::invalid_layout(format!("branch {} is missing `orient`", path))
    })?;

    let explicit: f64 = def
        .children
        .iter()
        .filter_map(|c| sizing(c, orientation).0)
        .sum();
    let unsized_count = def
        .children
        .iter()
        .filter(|c| sizing(c, orientation).0.is_none())
        .count();
    let share = if unsized_count > 0 {
        let remainder = FULL_PERCENT - explicit;
        if remainder < 0.0 {
            return Err(LayoutError::invalid_layout(format!(
                "explicit sizes under {} already exceed 100% ({}%)",
                path, explicit
            )));
        }
        remainder / unsized_count as f64
    } else {
        0.0
    };

    let children = def
        .children
        .iter()
        .enumerate()
        .map(|(i, child)| {
            let (size, min) = sizing(child, orientation);
            build_node(
                child,
                size.unwrap_or(share),
                min.unwrap_or(0.0),
                &path.child(i),
            )
        })
        .collect::<LayoutResult<Vec<_>>>()?;

    Ok(LayoutNode::branch(size, min_size, orientation, children))
}

fn describe_node(node: &LayoutNode, parent: Option<Orientation>) -> NodeDef {
    let mut def = NodeDef::default();
    let min = (node.min_size() > 0.0).then_some(node.min_size());
    match parent {
        Some(Orientation::Vertical) => {
            def.width = Some(node.size());
            def.min_width = min;
        }
        Some(Orientation::Horizontal) => {
            def.height = Some(node.size());
            def.min_height = min;
        }
        None => {}
    }

    match node.kind() {
        NodeKind::Leaf(tabs) => {
            def.components = tabs.components().to_vec();
            def.active_component = Some(tabs.active().clone());
        }
        NodeKind::Branch(split) => {
            def.orient = Some(split.orientation);
            def.children = split
                .children
                .iter()
                .map(|child| describe_node(child, Some(split.orientation)))
                .collect();
        }
    }
    def
}

//! Tabbed component sets held by leaves and floats

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

/// Identifier of a panel component (e.g. `"ToolPanel"`)
///
/// The engine never interprets these; they are handed back to the renderer
/// so it can pick the component to draw.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Ordered components with exactly one active
///
/// Always holds at least one component; the active index always points at one
/// of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Tabs {
    components: Vec<ComponentId>,
    active_index: usize,
}

impl Tabs {
    /// Build a tab set. `active` defaults to the first component.
    pub fn new(components: Vec<ComponentId>, active: Option<ComponentId>) -> LayoutResult<Self> {
        if components.is_empty() {
            return Err(LayoutError::invalid_layout(
                "a panel must hold at least one component",
            ));
        }
        for (i, id) in components.iter().enumerate() {
            if components[..i].contains(id) {
                return Err(LayoutError::invalid_layout(format!(
                    "component {} listed twice",
                    id
                )));
            }
        }

        let active_index = match active {
            None => 0,
            Some(active) => components
                .iter()
                .position(|id| *id == active)
                .ok_or_else(|| {
                    LayoutError::invalid_layout(format!(
                        "active component {} is not one of [{}]",
                        active,
                        join(&components)
                    ))
                })?,
        };

        Ok(Self {
            components,
            active_index,
        })
    }

    /// Single-component tab set
    pub fn single(id: impl Into<ComponentId>) -> Self {
        Self {
            components: vec![id.into()],
            active_index: 0,
        }
    }

    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    pub fn active(&self) -> &ComponentId {
        &self.components[self.active_index]
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.components.contains(id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Make `id` the active component
    pub fn activate(&mut self, id: &ComponentId) -> LayoutResult<()> {
        let index = self
            .components
            .iter()
            .position(|c| c == id)
            .ok_or_else(|| LayoutError::ComponentNotFound {
                component: id.clone(),
            })?;
        self.active_index = index;
        Ok(())
    }

    /// Cycle to the next component
    pub fn next(&mut self) {
        if self.components.len() > 1 {
            self.active_index = (self.active_index + 1) % self.components.len();
        }
    }

    /// Cycle to the previous component
    pub fn prev(&mut self) {
        let len = self.components.len();
        if len > 1 {
            self.active_index = (self.active_index + len - 1) % len;
        }
    }
}

fn join(ids: &[ComponentId]) -> String {
    ids.iter()
        .map(ComponentId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

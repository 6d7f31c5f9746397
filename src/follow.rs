//! Node-following paths and the registry that owns them.

use crate::error::{OptionsError, OptionsResult};
use crate::options::Vector3;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn default_speed() -> f64 {
    1.0
}

/// A named path that a scene node travels along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePath {
    pub name: String,
    /// Name of the scene node that follows the path.
    pub node: String,
    pub waypoints: Vec<Vector3>,
    /// Units per second.
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default)]
    pub looped: bool,
}

impl NodePath {
    pub fn new(name: impl Into<String>, node: impl Into<String>, waypoints: Vec<Vector3>) -> Self {
        Self {
            name: name.into(),
            node: node.into(),
            waypoints,
            speed: default_speed(),
            looped: false,
        }
    }

    pub fn validate(&self) -> OptionsResult<()> {
        let invalid = |reason: &str| OptionsError::InvalidPath {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.waypoints.is_empty() {
            return Err(invalid("no waypoints"));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(invalid("speed must be positive"));
        }
        Ok(())
    }
}

/// Paths available for node following, keyed by name.
///
/// Owned by whoever sets up following; nothing is shared globally.
#[derive(Debug, Clone, Default)]
pub struct NodePathRegistry {
    paths: IndexMap<String, NodePath>,
}

impl NodePathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path, returning the one it replaced.
    pub fn add(&mut self, path: NodePath) -> Option<NodePath> {
        self.paths.insert(path.name.clone(), path)
    }

    pub fn get(&self, name: &str) -> Option<&NodePath> {
        self.paths.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<NodePath> {
        self.paths.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.paths.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }
}

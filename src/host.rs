//! The scene host boundary.
//!
//! A `SceneHost` is whatever actually renders the scene. This crate only
//! builds options and sequences calls; the host decides what they mean.
//! `DryRunHost` records calls instead of rendering, for previews and tests.

use crate::error::HostError;
use crate::follow::NodePath;
use crate::lighting::LightingMode;
use crate::options::{LineOptions, ModelOptions, PoiOptions, PolygonOptions, SceneObject};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Identifies an object the host created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeHandle {
    pub id: u64,
    pub name: String,
}

#[async_trait]
pub trait SceneHost: Send + Sync {
    async fn create_poi(&self, options: &PoiOptions) -> Result<NodeHandle, HostError>;

    async fn create_line(&self, options: &LineOptions) -> Result<NodeHandle, HostError>;

    async fn create_polygon(&self, options: &PolygonOptions) -> Result<NodeHandle, HostError>;

    async fn create_model(&self, options: &ModelOptions) -> Result<NodeHandle, HostError>;

    /// Start moving `path.node` along the path's waypoints.
    async fn follow_node(&self, path: &NodePath) -> Result<(), HostError>;

    async fn set_lighting(&self, mode: LightingMode) -> Result<(), HostError>;

    /// Create any kind of scene object.
    async fn create(&self, object: &SceneObject) -> Result<NodeHandle, HostError> {
        match object {
            SceneObject::Poi(o) => self.create_poi(o).await,
            SceneObject::Line(o) => self.create_line(o).await,
            SceneObject::Polygon(o) => self.create_polygon(o).await,
            SceneObject::Model(o) => self.create_model(o).await,
        }
    }
}

/// A call received by a [`DryRunHost`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HostCall {
    Create { object: SceneObject, id: u64 },
    FollowNode { path: String, node: String },
    SetLighting { mode: LightingMode },
}

/// Host that records every accepted call in order.
#[derive(Debug, Default)]
pub struct DryRunHost {
    calls: Mutex<Vec<HostCall>>,
    next_id: AtomicU64,
    reject: HashSet<String>,
    unavailable: bool,
}

impl DryRunHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any create or follow call targeting `name`.
    pub fn fail_on(mut self, name: impl Into<String>) -> Self {
        self.reject.insert(name.into());
        self
    }

    /// Fail every call as if the host had gone away.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Accepted calls so far, oldest first.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn check(&self, operation: &'static str, target: &str) -> Result<(), HostError> {
        if self.unavailable {
            return Err(HostError::Unavailable("dry run host marked unavailable".into()));
        }
        if self.reject.contains(target) {
            return Err(HostError::rejected(operation, target, "rejected by dry run"));
        }
        Ok(())
    }

    fn record(&self, call: HostCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    fn accept(&self, object: SceneObject) -> Result<NodeHandle, HostError> {
        let operation = match &object {
            SceneObject::Poi(_) => "create_poi",
            SceneObject::Line(_) => "create_line",
            SceneObject::Polygon(_) => "create_polygon",
            SceneObject::Model(_) => "create_model",
        };
        self.check(operation, object.name())?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = NodeHandle {
            id,
            name: object.name().to_string(),
        };
        self.record(HostCall::Create { object, id });
        Ok(handle)
    }
}

#[async_trait]
impl SceneHost for DryRunHost {
    async fn create_poi(&self, options: &PoiOptions) -> Result<NodeHandle, HostError> {
        self.accept(SceneObject::Poi(options.clone()))
    }

    async fn create_line(&self, options: &LineOptions) -> Result<NodeHandle, HostError> {
        self.accept(SceneObject::Line(options.clone()))
    }

    async fn create_polygon(&self, options: &PolygonOptions) -> Result<NodeHandle, HostError> {
        self.accept(SceneObject::Polygon(options.clone()))
    }

    async fn create_model(&self, options: &ModelOptions) -> Result<NodeHandle, HostError> {
        self.accept(SceneObject::Model(options.clone()))
    }

    async fn follow_node(&self, path: &NodePath) -> Result<(), HostError> {
        self.check("follow_node", &path.name)?;
        self.record(HostCall::FollowNode {
            path: path.name.clone(),
            node: path.node.clone(),
        });
        Ok(())
    }

    async fn set_lighting(&self, mode: LightingMode) -> Result<(), HostError> {
        self.check("set_lighting", &mode.to_string())?;
        self.record(HostCall::SetLighting { mode });
        Ok(())
    }
}

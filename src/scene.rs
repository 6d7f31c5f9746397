//! Applying a scene plan to a host.
//!
//! A plan is validated in full before the host sees anything: every object is
//! built and every follow target resolved first. Host calls then go through
//! task queues so objects are created one at a time in plan order and the
//! first rejection stops the rest.

use crate::error::{HostError, SceneError};
use crate::follow::{NodePath, NodePathRegistry};
use crate::host::{NodeHandle, SceneHost};
use crate::lighting::{LightingMode, LightingRequest, switch_lighting};
use crate::options::{OptionKind, OptionsBuilder, SceneObject};
use crate::queue::TaskQueue;
use crate::value::ConfigValue;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything a scene needs, as written by callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenePlan {
    pub lighting: Option<LightingRequest>,
    pub pois: Vec<ConfigValue>,
    pub lines: Vec<ConfigValue>,
    pub polygons: Vec<ConfigValue>,
    pub models: Vec<ConfigValue>,
    pub paths: Vec<NodePath>,
    /// Names of registered paths to start following, in order.
    pub follow: Vec<String>,
}

impl ScenePlan {
    /// Parse a plan from YAML (JSON is valid YAML too).
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Object inputs in creation order: POIs, lines, polygons, then models.
    pub fn objects(&self) -> impl Iterator<Item = (OptionKind, &ConfigValue)> {
        tagged(OptionKind::Poi, &self.pois)
            .chain(tagged(OptionKind::Line, &self.lines))
            .chain(tagged(OptionKind::Polygon, &self.polygons))
            .chain(tagged(OptionKind::Model, &self.models))
    }
}

fn tagged(
    kind: OptionKind,
    inputs: &[ConfigValue],
) -> impl Iterator<Item = (OptionKind, &ConfigValue)> {
    inputs.iter().map(move |input| (kind, input))
}

/// Outcome of a fully applied plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneReport {
    pub handles: Vec<NodeHandle>,
    pub followed: Vec<String>,
    pub lighting: LightingMode,
}

/// Apply `plan` through `host`.
///
/// `registry` receives the plan's paths and `lighting` tracks the host's
/// current mode; both belong to the caller and persist across plans.
pub async fn apply_scene(
    host: Arc<dyn SceneHost>,
    builder: &OptionsBuilder,
    registry: &mut NodePathRegistry,
    lighting: &mut LightingMode,
    plan: &ScenePlan,
) -> Result<SceneReport, SceneError> {
    let objects = plan
        .objects()
        .map(|(kind, input)| builder.build(kind, input))
        .collect::<Result<Vec<_>, _>>()?;

    for path in &plan.paths {
        path.validate()?;
    }
    for path in &plan.paths {
        if registry.add(path.clone()).is_some() {
            debug!(path = %path.name, "Replaced registered node path");
        }
    }
    let follow = plan
        .follow
        .iter()
        .map(|name| {
            registry
                .get(name)
                .cloned()
                .ok_or_else(|| SceneError::UnknownPath(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        objects = objects.len(),
        follow = follow.len(),
        "Applying scene plan"
    );

    if let Some(request) = plan.lighting {
        if switch_lighting(host.as_ref(), lighting, request).await? {
            info!(mode = %lighting, "Lighting switched");
        }
    }

    let handles = creation_queue(&host, objects)
        .run()
        .await
        .inspect_err(|e| warn!(error = %e, "Scene object creation stopped"))?;

    let followed = follow_queue(&host, follow)
        .run()
        .await
        .inspect_err(|e| warn!(error = %e, "Node following setup stopped"))?;

    Ok(SceneReport {
        handles,
        followed,
        lighting: *lighting,
    })
}

fn creation_queue(
    host: &Arc<dyn SceneHost>,
    objects: Vec<SceneObject>,
) -> TaskQueue<NodeHandle, HostError> {
    let mut queue = TaskQueue::new();
    for object in objects {
        let host = Arc::clone(host);
        let object = Arc::new(object);
        queue.push(move || {
            let host = Arc::clone(&host);
            let object = Arc::clone(&object);
            async move {
                debug!(kind = %object.kind(), name = object.name(), "Creating scene object");
                host.create(&object).await
            }
        });
    }
    queue
}

fn follow_queue(host: &Arc<dyn SceneHost>, paths: Vec<NodePath>) -> TaskQueue<String, HostError> {
    let mut queue = TaskQueue::new();
    for path in paths {
        let host = Arc::clone(host);
        let path = Arc::new(path);
        queue.push(move || {
            let host = Arc::clone(&host);
            let path = Arc::clone(&path);
            async move {
                debug!(path = %path.name, node = %path.node, "Starting node following");
                host.follow_node(&path).await?;
                Ok::<_, HostError>(path.name.clone())
            }
        });
    }
    queue
}

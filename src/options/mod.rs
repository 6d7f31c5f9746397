//! Scene object option builders.
//!
//! Callers describe objects as loose option objects. Building one takes three
//! steps:
//! 1. Deep-merge the configured defaults for that kind with the caller's input
//! 2. Deserialize the merged object into the kind's spec (all fields optional)
//! 3. Resolve the spec, filling the remaining defaults and wrapping values
//!    into engine types
//!
//! The resolved options serialize to the structure the scene host consumes.

pub mod geometry;
pub mod model;
pub mod poi;
pub mod values;

pub use geometry::{LineOptions, LineSpec, PolygonOptions, PolygonSpec};
pub use model::{ModelOptions, ModelSpec};
pub use poi::{PoiOptions, PoiSpec};
pub use values::{Colour, ColourSpec, Vector2, Vector3};

use crate::error::{OptionsError, OptionsResult};
use crate::merge::merge_deep;
use crate::value::ConfigValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Layer used when an object does not name one.
pub const DEFAULT_LAYER: &str = "default";

pub(crate) fn require<T>(value: Option<T>, kind: &'static str, field: &'static str) -> OptionsResult<T> {
    value.ok_or(OptionsError::MissingField { kind, field })
}

/// Kinds of scene object the builder knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    Poi,
    Line,
    Polygon,
    Model,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Poi => "poi",
            OptionKind::Line => "line",
            OptionKind::Polygon => "polygon",
            OptionKind::Model => "model",
        }
    }
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OptionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "poi" => Ok(OptionKind::Poi),
            "line" => Ok(OptionKind::Line),
            "polygon" => Ok(OptionKind::Polygon),
            "model" => Ok(OptionKind::Model),
            _ => Err(format!(
                "Invalid kind '{}'. Valid options: poi, line, polygon, model",
                s
            )),
        }
    }
}

/// A resolved object ready to hand to a scene host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneObject {
    Poi(PoiOptions),
    Line(LineOptions),
    Polygon(PolygonOptions),
    Model(ModelOptions),
}

impl SceneObject {
    pub fn kind(&self) -> OptionKind {
        match self {
            SceneObject::Poi(_) => OptionKind::Poi,
            SceneObject::Line(_) => OptionKind::Line,
            SceneObject::Polygon(_) => OptionKind::Polygon,
            SceneObject::Model(_) => OptionKind::Model,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SceneObject::Poi(o) => &o.name,
            SceneObject::Line(o) => &o.name,
            SceneObject::Polygon(o) => &o.name,
            SceneObject::Model(o) => &o.name,
        }
    }
}

/// Per-kind default option objects, usually taken from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionDefaults {
    #[serde(default, skip_serializing_if = "ConfigValue::is_undefined")]
    pub poi: ConfigValue,
    #[serde(default, skip_serializing_if = "ConfigValue::is_undefined")]
    pub line: ConfigValue,
    #[serde(default, skip_serializing_if = "ConfigValue::is_undefined")]
    pub polygon: ConfigValue,
    #[serde(default, skip_serializing_if = "ConfigValue::is_undefined")]
    pub model: ConfigValue,
}

impl OptionDefaults {
    pub fn for_kind(&self, kind: OptionKind) -> &ConfigValue {
        match kind {
            OptionKind::Poi => &self.poi,
            OptionKind::Line => &self.line,
            OptionKind::Polygon => &self.polygon,
            OptionKind::Model => &self.model,
        }
    }
}

/// Builds resolved scene objects from loose option objects.
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    defaults: OptionDefaults,
}

impl OptionsBuilder {
    pub fn new(defaults: OptionDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &OptionDefaults {
        &self.defaults
    }

    /// Merge the kind's defaults with `input` into a fresh object.
    ///
    /// Neither the defaults nor `input` are modified.
    pub fn prepare(&self, kind: OptionKind, input: &ConfigValue) -> ConfigValue {
        let mut merged = ConfigValue::object();
        merge_deep(&mut merged, &[self.defaults.for_kind(kind), input]);
        merged
    }

    pub fn build(&self, kind: OptionKind, input: &ConfigValue) -> OptionsResult<SceneObject> {
        Ok(match kind {
            OptionKind::Poi => SceneObject::Poi(self.build_poi(input)?),
            OptionKind::Line => SceneObject::Line(self.build_line(input)?),
            OptionKind::Polygon => SceneObject::Polygon(self.build_polygon(input)?),
            OptionKind::Model => SceneObject::Model(self.build_model(input)?),
        })
    }

    pub fn build_poi(&self, input: &ConfigValue) -> OptionsResult<PoiOptions> {
        self.spec::<PoiSpec>(OptionKind::Poi, input)?.resolve()
    }

    pub fn build_line(&self, input: &ConfigValue) -> OptionsResult<LineOptions> {
        self.spec::<LineSpec>(OptionKind::Line, input)?.resolve()
    }

    pub fn build_polygon(&self, input: &ConfigValue) -> OptionsResult<PolygonOptions> {
        self.spec::<PolygonSpec>(OptionKind::Polygon, input)?.resolve()
    }

    pub fn build_model(&self, input: &ConfigValue) -> OptionsResult<ModelOptions> {
        self.spec::<ModelSpec>(OptionKind::Model, input)?.resolve()
    }

    fn spec<S: DeserializeOwned>(&self, kind: OptionKind, input: &ConfigValue) -> OptionsResult<S> {
        self.prepare(kind, input)
            .deserialize_into()
            .map_err(|source| OptionsError::Deserialize {
                kind: kind.as_str(),
                source,
            })
    }
}

//! 3D model options.

use super::values::Vector3;
use super::{DEFAULT_LAYER, require};
use crate::error::OptionsResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelSpec {
    pub name: Option<String>,
    pub layer: Option<String>,
    pub mesh: Option<String>,
    pub position: Option<[f64; 3]>,
    pub scale: Option<[f64; 3]>,
    /// Euler angles in degrees.
    pub orientation: Option<[f64; 3]>,
    pub visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOptions {
    pub name: String,
    pub layer: String,
    pub mesh: String,
    pub position: Vector3,
    pub scale: Vector3,
    pub orientation: Vector3,
    pub visible: bool,
}

impl ModelSpec {
    pub fn resolve(self) -> OptionsResult<ModelOptions> {
        Ok(ModelOptions {
            name: require(self.name, "model", "name")?,
            layer: self.layer.unwrap_or_else(|| DEFAULT_LAYER.to_string()),
            mesh: require(self.mesh, "model", "mesh")?,
            position: require(self.position, "model", "position")?.into(),
            scale: self.scale.map(Vector3::from).unwrap_or(Vector3::splat(1.0)),
            orientation: self.orientation.unwrap_or_default().into(),
            visible: self.visible.unwrap_or(true),
        })
    }
}

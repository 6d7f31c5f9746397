//! Point-of-interest options.

use super::values::{Colour, ColourSpec, Vector2, Vector3, colour_or};
use super::{DEFAULT_LAYER, require};
use crate::error::OptionsResult;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ICON_SIZE: [f64; 2] = [32.0, 32.0];
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_MAX_VIEW_DISTANCE: f64 = 10_000.0;

/// POI options as supplied by callers. Every field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoiSpec {
    pub name: Option<String>,
    pub layer: Option<String>,
    pub position: Option<[f64; 3]>,
    pub icon: Option<String>,
    pub icon_size: Option<[f64; 2]>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_colour: Option<ColourSpec>,
    pub offset: Option<[f64; 2]>,
    pub visible: Option<bool>,
    pub max_view_distance: Option<f64>,
}

/// Fully resolved POI options in the shape the scene host expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiOptions {
    pub name: String,
    pub layer: String,
    pub position: Vector3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub icon_size: Vector2,
    pub text: String,
    pub font_size: f64,
    pub font_colour: Colour,
    pub offset: Vector2,
    pub visible: bool,
    pub max_view_distance: f64,
}

impl PoiSpec {
    /// Apply defaults. `name` and `position` are required.
    ///
    /// The label text defaults to the POI name.
    pub fn resolve(self) -> OptionsResult<PoiOptions> {
        let name = require(self.name, "poi", "name")?;
        let position = require(self.position, "poi", "position")?;
        let font_colour = colour_or(self.font_colour.as_ref(), Colour::WHITE)?;

        Ok(PoiOptions {
            text: self.text.unwrap_or_else(|| name.clone()),
            name,
            layer: self.layer.unwrap_or_else(|| DEFAULT_LAYER.to_string()),
            position: position.into(),
            icon: self.icon,
            icon_size: self.icon_size.unwrap_or(DEFAULT_ICON_SIZE).into(),
            font_size: self.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            font_colour,
            offset: self.offset.unwrap_or_default().into(),
            visible: self.visible.unwrap_or(true),
            max_view_distance: self.max_view_distance.unwrap_or(DEFAULT_MAX_VIEW_DISTANCE),
        })
    }
}

//! Line and polygon options.

use super::values::{Colour, ColourSpec, Vector3, colour_or};
use super::{DEFAULT_LAYER, require};
use crate::error::{OptionsError, OptionsResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LINE_WIDTH: f64 = 2.0;
pub const DEFAULT_BORDER_WIDTH: f64 = 1.0;

const LINE_COLOUR: Colour = Colour::rgba8(0, 255, 0, 255);
const POLYGON_FILL: Colour = Colour::rgba8(255, 255, 255, 128);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineSpec {
    pub name: Option<String>,
    pub layer: Option<String>,
    pub points: Option<Vec<[f64; 3]>>,
    pub colour: Option<ColourSpec>,
    pub width: Option<f64>,
    pub depth_test: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineOptions {
    pub name: String,
    pub layer: String,
    pub points: Vec<Vector3>,
    pub colour: Colour,
    pub width: f64,
    pub depth_test: bool,
}

impl LineSpec {
    /// Apply defaults. A line needs a name and at least two points.
    pub fn resolve(self) -> OptionsResult<LineOptions> {
        let name = require(self.name, "line", "name")?;
        let points = vertices(self.points, "line", &name, 2)?;

        Ok(LineOptions {
            layer: self.layer.unwrap_or_else(|| DEFAULT_LAYER.to_string()),
            points,
            colour: colour_or(self.colour.as_ref(), LINE_COLOUR)?,
            width: self.width.unwrap_or(DEFAULT_LINE_WIDTH),
            depth_test: self.depth_test.unwrap_or(true),
            name,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolygonSpec {
    pub name: Option<String>,
    pub layer: Option<String>,
    pub points: Option<Vec<[f64; 3]>>,
    pub fill_colour: Option<ColourSpec>,
    pub border_colour: Option<ColourSpec>,
    pub border_width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonOptions {
    pub name: String,
    pub layer: String,
    pub points: Vec<Vector3>,
    pub fill_colour: Colour,
    pub border_colour: Colour,
    pub border_width: f64,
    /// Extrusion height; zero draws a flat polygon.
    pub height: f64,
}

impl PolygonSpec {
    /// Apply defaults. A polygon needs a name and at least three points.
    pub fn resolve(self) -> OptionsResult<PolygonOptions> {
        let name = require(self.name, "polygon", "name")?;
        let points = vertices(self.points, "polygon", &name, 3)?;

        Ok(PolygonOptions {
            layer: self.layer.unwrap_or_else(|| DEFAULT_LAYER.to_string()),
            points,
            fill_colour: colour_or(self.fill_colour.as_ref(), POLYGON_FILL)?,
            border_colour: colour_or(self.border_colour.as_ref(), Colour::WHITE)?,
            border_width: self.border_width.unwrap_or(DEFAULT_BORDER_WIDTH),
            height: self.height.unwrap_or(0.0),
            name,
        })
    }
}

fn vertices(
    points: Option<Vec<[f64; 3]>>,
    kind: &'static str,
    name: &str,
    min: usize,
) -> OptionsResult<Vec<Vector3>> {
    let points = points.unwrap_or_default();
    if points.len() < min {
        return Err(OptionsError::TooFewPoints {
            kind,
            name: name.to_string(),
            min,
            got: points.len(),
        });
    }
    Ok(points.into_iter().map(Vector3::from).collect())
}

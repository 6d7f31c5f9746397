//! Engine value types: vectors and colours.

use crate::error::OptionsError;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// A point or direction. Deserializes from `[x, y, z]` or `{x, y, z}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl<'de> Deserialize<'de> for Vector3 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Array([f64; 3]),
            Object { x: f64, y: f64, z: f64 },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Array(xyz) => xyz.into(),
            Repr::Object { x, y, z } => Self { x, y, z },
        })
    }
}

/// RGBA colour with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    pub const WHITE: Colour = Colour::rgba8(255, 255, 255, 255);
    pub const BLACK: Colour = Colour::rgba8(0, 0, 0, 255);

    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    fn named(name: &str) -> Option<Self> {
        let rgb = match name {
            "white" => (255, 255, 255),
            "black" => (0, 0, 0),
            "red" => (255, 0, 0),
            "green" => (0, 255, 0),
            "blue" => (0, 0, 255),
            "yellow" => (255, 255, 0),
            "cyan" => (0, 255, 255),
            "magenta" => (255, 0, 255),
            "orange" => (255, 165, 0),
            "grey" | "gray" => (128, 128, 128),
            _ => return None,
        };
        Some(Self::rgba8(rgb.0, rgb.1, rgb.2, 255))
    }
}

impl FromStr for Colour {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || OptionsError::InvalidColour(s.to_string());

        let Some(hex) = trimmed.strip_prefix('#') else {
            return Colour::named(&trimmed.to_lowercase()).ok_or_else(invalid);
        };
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Colour::rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

/// A colour as written by callers: a string or a byte array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColourSpec {
    Text(String),
    Bytes(Vec<u8>),
}

impl ColourSpec {
    pub fn resolve(&self) -> Result<Colour, OptionsError> {
        match self {
            ColourSpec::Text(s) => s.parse(),
            ColourSpec::Bytes(bytes) => match bytes.as_slice() {
                [r, g, b] => Ok(Colour::rgba8(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Colour::rgba8(*r, *g, *b, *a)),
                _ => Err(OptionsError::InvalidColour(format!("{:?}", bytes))),
            },
        }
    }
}

/// Resolve an optional colour, falling back to `default`.
pub(crate) fn colour_or(spec: Option<&ColourSpec>, default: Colour) -> Result<Colour, OptionsError> {
    spec.map(ColourSpec::resolve).transpose().map(|c| c.unwrap_or(default))
}

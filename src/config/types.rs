//! Configuration types and structures.

use crate::format::OutputFormat;
use crate::lighting::LightingMode;
use crate::options::OptionDefaults;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Per-kind default option objects merged under every built object.
    #[serde(default)]
    pub defaults: OptionDefaults,

    #[serde(default)]
    pub lighting: LightingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Lighting configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightingConfig {
    /// Mode the host is assumed to start in (default: day).
    #[serde(default)]
    pub initial: LightingMode,
}

/// Output configuration for CLI rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: json (default) or yaml.
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output (default: true).
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

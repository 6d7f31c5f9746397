//! Configuration loader with tier-based merging.
//!
//! Loads configuration from multiple tiers and deep-merges them field-by-field.
//! Arrays merge index by index, like every other deep merge in this crate.

use super::types::Config;
use crate::format::OutputFormat;
use crate::lighting::LightingMode;
use crate::merge::merge_all;
use crate::value::ConfigValue;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the configuration file looked up in each tier directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// Project-level config ($CWD/scene-compose/)
    Project = 1,
    /// User-level config (~/.scene-compose/)
    User = 2,
    /// Environment variables (highest priority)
    Environment = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Paths for each configuration tier.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Single config file that replaces the project and user tiers
    pub explicit: Option<PathBuf>,
    /// Project-level config directory
    pub project_dir: Option<PathBuf>,
    /// User-level config directory
    pub user_dir: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover configuration paths from environment and defaults.
    pub fn discover() -> Self {
        let explicit = std::env::var("SCENE_COMPOSE_CONFIG_PATH")
            .ok()
            .map(PathBuf::from);

        // Project dir: SCENE_COMPOSE_PROJECT_DIR or $CWD/scene-compose
        let project_dir = std::env::var("SCENE_COMPOSE_PROJECT_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("scene-compose")));

        // User dir: SCENE_COMPOSE_USER_DIR or ~/.scene-compose
        let user_dir = std::env::var("SCENE_COMPOSE_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".scene-compose")));

        Self {
            explicit,
            project_dir,
            user_dir,
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            explicit: None,
            project_dir,
            user_dir,
        }
    }

    /// Use a single config file instead of the project and user tiers.
    pub fn with_explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }
}

/// Configuration loader that handles tier-based merging.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Paths for each tier
    pub paths: ConfigPaths,
    /// Loaded configuration
    config: Config,
    /// Files that contributed, lowest tier first
    sources: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration with explicit paths.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        Self::load_with_env(paths, |key| std::env::var(key).ok())
    }

    /// Load configuration, reading environment overrides through `var`.
    pub fn load_with_env(paths: ConfigPaths, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut layers: Vec<ConfigValue> = Vec::new();
        let mut sources = Vec::new();

        // Tier 1: Defaults
        layers.push(
            ConfigValue::from_serialize(&Config::default())
                .context("Failed to serialize default config")?,
        );

        if let Some(ref explicit) = paths.explicit {
            // An explicit file must exist and parse
            layers.push(read_layer(explicit)?);
            sources.push(explicit.clone());
        } else {
            // Tier 2: Project config, Tier 3: User config
            for (tier, dir) in [
                (ConfigTier::Project, &paths.project_dir),
                (ConfigTier::User, &paths.user_dir),
            ] {
                let Some(dir) = dir else { continue };
                let file = dir.join(CONFIG_FILE);
                if !file.exists() {
                    continue;
                }
                match read_layer(&file) {
                    Ok(layer) => {
                        debug!(tier = %tier, path = %file.display(), "Loaded config tier");
                        layers.push(layer);
                        sources.push(file);
                    }
                    Err(e) => warn!(tier = %tier, error = %e, "Ignoring unreadable config file"),
                }
            }
        }

        // Merge all layers
        let merged = merge_all(true, &layers);
        let mut config: Config = merged
            .deserialize_into()
            .context("Merged configuration is invalid")?;

        // Tier 4: Environment variable overrides
        Self::apply_env_overrides(&mut config, var);

        Ok(Self {
            paths,
            config,
            sources,
        })
    }

    /// Apply environment variable overrides to config.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
        if let Some(value) = var("SCENE_COMPOSE_LIGHTING") {
            match value.parse::<LightingMode>() {
                Ok(mode) => config.lighting.initial = mode,
                Err(e) => warn!(tier = %ConfigTier::Environment, "{}", e),
            }
        }

        if let Some(value) = var("SCENE_COMPOSE_OUTPUT_FORMAT") {
            match OutputFormat::from_str(&value) {
                Some(format) => config.output.format = format,
                None => warn!(
                    tier = %ConfigTier::Environment,
                    "Invalid output format '{}'. Valid options: json, yaml",
                    value
                ),
            }
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Config files that contributed, lowest tier first.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}

/// Read a YAML (or JSON) file into a loose value.
pub fn read_layer(path: &Path) -> Result<ConfigValue> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(dir: &Path, content: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn test_config_paths_discover() {
        let paths = ConfigPaths::discover();
        assert!(paths.project_dir.is_some());
        // user_dir may or may not exist depending on environment
    }

    #[test]
    fn test_load_defaults_only() {
        // Create empty temp dirs so no config files are found
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_dirs(
            Some(temp.path().join("project")),
            Some(temp.path().join("user")),
        );

        let loader = ConfigLoader::load_with_env(paths, no_env).unwrap();
        assert_eq!(loader.config(), &Config::default());
        assert!(loader.sources().is_empty());
    }

    #[test]
    fn test_project_config_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("scene-compose");
        write_config(
            &project_dir,
            r#"
lighting:
  initial: night
"#,
        );

        let paths = ConfigPaths::with_dirs(Some(project_dir), Some(temp.path().join("user")));
        let loader = ConfigLoader::load_with_env(paths, no_env).unwrap();
        let config = loader.config();

        assert_eq!(config.lighting.initial, LightingMode::Night);
        // output should be default
        assert!(config.output.pretty);
        assert_eq!(loader.sources().len(), 1);
    }

    #[test]
    fn test_user_config_overrides_project() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("scene-compose");
        let user_dir = temp.path().join("user");

        write_config(
            &project_dir,
            r#"
defaults:
  poi:
    layer: project-labels
    fontSize: 14
output:
  pretty: false
"#,
        );
        write_config(
            &user_dir,
            r#"
defaults:
  poi:
    layer: user-labels
"#,
        );

        let paths = ConfigPaths::with_dirs(Some(project_dir), Some(user_dir));
        let loader = ConfigLoader::load_with_env(paths, no_env).unwrap();
        let config = loader.config();

        let poi = &config.defaults.poi;
        // layer should be from user
        assert_eq!(poi.get("layer").and_then(ConfigValue::as_str), Some("user-labels"));
        // fontSize and pretty should be from project
        assert_eq!(poi.get("fontSize").and_then(ConfigValue::as_f64), Some(14.0));
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_env_overrides_files() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("scene-compose");
        write_config(&project_dir, "lighting:\n  initial: night\n");

        let paths = ConfigPaths::with_dirs(Some(project_dir), None);
        let loader = ConfigLoader::load_with_env(paths, |key| match key {
            "SCENE_COMPOSE_LIGHTING" => Some("day".to_string()),
            "SCENE_COMPOSE_OUTPUT_FORMAT" => Some("yaml".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(loader.config().lighting.initial, LightingMode::Day);
        assert_eq!(loader.config().output.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_invalid_env_value_ignored() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_dirs(Some(temp.path().to_path_buf()), None);
        let loader = ConfigLoader::load_with_env(paths, |key| {
            (key == "SCENE_COMPOSE_LIGHTING").then(|| "dusk".to_string())
        })
        .unwrap();
        assert_eq!(loader.config().lighting.initial, LightingMode::Day);
    }

    #[test]
    fn test_unparseable_tier_skipped() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("scene-compose");
        write_config(&project_dir, "lighting: [unterminated");

        let paths = ConfigPaths::with_dirs(Some(project_dir), None);
        let loader = ConfigLoader::load_with_env(paths, no_env).unwrap();
        assert_eq!(loader.config(), &Config::default());
    }

    #[test]
    fn test_explicit_file_replaces_tiers() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("scene-compose");
        write_config(&project_dir, "lighting:\n  initial: night\n");

        let explicit = temp.path().join("custom.yaml");
        std::fs::write(&explicit, "output:\n  format: yaml\n").unwrap();

        let paths = ConfigPaths::with_dirs(Some(project_dir), None).with_explicit(&explicit);
        let loader = ConfigLoader::load_with_env(paths, no_env).unwrap();

        assert_eq!(loader.config().lighting.initial, LightingMode::Day);
        assert_eq!(loader.config().output.format, OutputFormat::Yaml);
        assert_eq!(loader.sources(), &[explicit]);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::default().with_explicit(temp.path().join("missing.yaml"));
        assert!(ConfigLoader::load_with_env(paths, no_env).is_err());
    }
}

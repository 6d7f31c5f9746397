//! Unified configuration system.
//!
//! Consolidates configuration from tiers with field-by-field YAML merging:
//! 1. **Defaults** - Built into the binary
//! 2. **Project** - `$CWD/scene-compose/config.yaml`
//! 3. **User** - `~/.scene-compose/config.yaml`
//! 4. **Environment** - individual overrides
//!
//! ## Environment Variables
//! - `SCENE_COMPOSE_CONFIG_PATH` - Explicit config file (replaces project and user tiers)
//! - `SCENE_COMPOSE_PROJECT_DIR` - Project config dir (default: `./scene-compose`)
//! - `SCENE_COMPOSE_USER_DIR` - User config dir (default: `~/.scene-compose`)
//! - `SCENE_COMPOSE_LIGHTING` - Initial lighting mode (`day` or `night`)
//! - `SCENE_COMPOSE_OUTPUT_FORMAT` - Output format (`json` or `yaml`)

mod loader;
mod types;

pub use loader::{CONFIG_FILE, ConfigLoader, ConfigPaths, ConfigTier, read_layer};
pub use types::*;

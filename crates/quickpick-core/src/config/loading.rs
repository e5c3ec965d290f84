//! Settings loading and merging logic.
//!
//! Settings are loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.quickpick/config.toml`
//! 3. **Project config** - `./.quickpick/config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{DateTimeSettings, ListSettings, PickerSettings, SurfaceSettings};
use crate::config::validation::validate_settings;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".quickpick";
const CONFIG_FILE: &str = "config.toml";

/// Load settings from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed, or if the
/// merged settings fail validation. Missing config files are not errors.
pub fn load_hierarchy() -> Result<PickerSettings, ConfigError> {
    let mut sources = Vec::new();
    if let Some(home) = dirs::home_dir() {
        sources.push(home.join(CONFIG_DIR).join(CONFIG_FILE));
    }
    sources.push(std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE));

    load_layers(&sources)
}

/// Load and merge the given files in order, skipping missing ones.
pub fn load_layers(paths: &[PathBuf]) -> Result<PickerSettings, ConfigError> {
    let mut settings = PickerSettings::default();

    for path in paths {
        match load_from(path) {
            Ok(layer) => settings = merge_settings(settings, layer),
            Err(ConfigError::ConfigNotFound { path }) => {
                debug!(event = "core.config.layer_missing", path = %path);
            }
            Err(e) => return Err(e),
        }
    }

    validate_settings(&settings)?;
    Ok(settings)
}

/// Load a single settings file without validation.
pub fn load_from(path: &Path) -> Result<PickerSettings, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let settings = toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    debug!(event = "core.config.layer_loaded", path = %path.display());
    Ok(settings)
}

/// Merge two settings values, with `override_settings` taking precedence
/// wherever it sets a value.
pub fn merge_settings(base: PickerSettings, override_settings: PickerSettings) -> PickerSettings {
    PickerSettings {
        surface: SurfaceSettings {
            screen_route: override_settings
                .surface
                .screen_route
                .or(base.surface.screen_route),
            platform: override_settings.surface.platform.or(base.surface.platform),
            native_types: override_settings
                .surface
                .native_types
                .or(base.surface.native_types),
        },
        datetime: DateTimeSettings {
            settle_delay_ms: override_settings
                .datetime
                .settle_delay_ms
                .or(base.datetime.settle_delay_ms),
        },
        list: ListSettings {
            search_placeholder: override_settings
                .list
                .search_placeholder
                .or(base.list.search_placeholder),
        },
    }
}

//! # Configuration System
//!
//! Hierarchical TOML settings for quickpick surfaces.
//!
//! ## Configuration Hierarchy
//!
//! Settings are loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.quickpick/config.toml`
//! 3. **Project config** - `./.quickpick/config.toml`
//!
//! ## Loading Settings
//!
//! ```rust,no_run
//! use quickpick_core::config::PickerSettings;
//!
//! fn example() -> Result<(), quickpick_core::errors::ConfigError> {
//!     let settings = PickerSettings::load_hierarchy()?;
//!     let route = settings.surface.screen_route();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

use std::path::Path;

use crate::errors::ConfigError;

pub use types::{DateTimeSettings, ListSettings, Platform, PickerSettings, SurfaceSettings};
pub use validation::validate_settings;

impl PickerSettings {
    /// See [`loading::load_hierarchy`].
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Load and validate a single settings file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = loading::load_from(path)?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_settings(self)
    }
}

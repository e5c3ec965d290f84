//! Settings type definitions.
//!
//! # Example Configuration
//!
//! ```toml
//! [surface]
//! screen_route = "PickerScreen"
//! platform = "android"
//! native_types = ["time", "date"]
//!
//! [datetime]
//! settle_delay_ms = 100
//!
//! [list]
//! search_placeholder = "Type to search"
//! ```

use serde::{Deserialize, Serialize};

use crate::picker::PickerType;

/// Platform the host runs on. Decides which picker types get a native overlay
/// unless `surface.native_types` overrides it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    /// No native overlays; every picker uses the in-app screen.
    #[default]
    Headless,
}

/// Main settings loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.quickpick/config.toml`
/// 2. Project config: `./.quickpick/config.toml`
///
/// Project values override user values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PickerSettings {
    #[serde(default)]
    pub surface: SurfaceSettings,

    #[serde(default)]
    pub datetime: DateTimeSettings,

    #[serde(default)]
    pub list: ListSettings,
}

/// How pickers are presented.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSettings {
    /// Route registered for the in-app picker screen.
    /// Default: "PickerScreen".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_route: Option<String>,

    /// Default: headless.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    /// Picker types to try on a native overlay first.
    /// Default: the platform's native set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_types: Option<Vec<PickerType>>,
}

/// Two-stage date/time flow settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateTimeSettings {
    /// Wait between closing the date overlay and opening the time overlay
    /// when the overlay reports no close completion.
    /// Default: 100ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_delay_ms: Option<u64>,
}

/// List screen settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListSettings {
    /// Default: "Type to search".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_placeholder: Option<String>,
}

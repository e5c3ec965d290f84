//! Default values and derived accessors for settings.

use std::time::Duration;

use crate::config::types::{DateTimeSettings, ListSettings, Platform, SurfaceSettings};
use crate::picker::PickerType;
use crate::surface::navigation::PICKER_SCREEN_ROUTE_NAME;

pub const DEFAULT_SETTLE_DELAY_MS: u64 = 100;
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Type to search";

impl Platform {
    /// Picker types the platform presents natively.
    pub fn native_types(&self) -> Vec<PickerType> {
        match self {
            Platform::Ios => vec![
                PickerType::Time,
                PickerType::Date,
                PickerType::DateTime,
                PickerType::Color,
            ],
            Platform::Android => vec![PickerType::Time, PickerType::Date, PickerType::DateTime],
            Platform::Headless => Vec::new(),
        }
    }
}

impl SurfaceSettings {
    pub fn screen_route(&self) -> &str {
        self.screen_route
            .as_deref()
            .unwrap_or(PICKER_SCREEN_ROUTE_NAME)
    }

    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_default()
    }

    /// Explicit override, or the platform's native set.
    pub fn native_types(&self) -> Vec<PickerType> {
        match &self.native_types {
            Some(types) => types.clone(),
            None => self.platform().native_types(),
        }
    }
}

impl DateTimeSettings {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms.unwrap_or(DEFAULT_SETTLE_DELAY_MS))
    }
}

impl ListSettings {
    pub fn search_placeholder(&self) -> &str {
        self.search_placeholder
            .as_deref()
            .unwrap_or(DEFAULT_SEARCH_PLACEHOLDER)
    }
}

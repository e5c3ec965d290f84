use crate::config::types::PickerSettings;
use crate::errors::ConfigError;

/// Upper bound for the date/time settle delay.
pub const MAX_SETTLE_DELAY_MS: u64 = 5000;

pub fn validate_settings(settings: &PickerSettings) -> Result<(), ConfigError> {
    if let Some(route) = &settings.surface.screen_route
        && route.trim().is_empty()
    {
        return Err(ConfigError::InvalidConfiguration {
            message: "surface.screen_route cannot be empty".to_string(),
        });
    }

    if let Some(delay) = settings.datetime.settle_delay_ms
        && delay > MAX_SETTLE_DELAY_MS
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "datetime.settle_delay_ms must be at most {}ms, got {}ms",
                MAX_SETTLE_DELAY_MS, delay
            ),
        });
    }

    Ok(())
}

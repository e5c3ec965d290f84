use tracing::warn;

use quickpick_core::config::PickerSettings;
use quickpick_core::errors::QuickpickError;

/// Load settings, falling back to defaults with a visible warning when a
/// config file is broken.
pub fn load_settings_with_warning() -> PickerSettings {
    match PickerSettings::load_hierarchy() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Warning: Could not load config: {}. Using defaults.", e);
            eprintln!(
                "Tip: Check ~/.quickpick/config.toml and ./.quickpick/config.toml for errors."
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                error_code = e.error_code()
            );
            PickerSettings::default()
        }
    }
}

use clap::ArgMatches;
use serde::Serialize;
use tracing::info;

use quickpick_core::PickerType;
use quickpick_core::config::{PickerSettings, Platform};
use quickpick_core::surface::{RouteConfig, route_config};

use super::helpers::load_settings_with_warning;

/// Settings with every default resolved.
#[derive(Debug, Serialize)]
struct EffectiveSettings {
    screen_route: String,
    platform: Platform,
    native_types: Vec<PickerType>,
    settle_delay_ms: u64,
    search_placeholder: String,
    routes: Vec<RouteConfig>,
}

impl EffectiveSettings {
    fn resolve(settings: &PickerSettings) -> Self {
        Self {
            screen_route: settings.surface.screen_route().to_string(),
            platform: settings.surface.platform(),
            native_types: settings.surface.native_types(),
            settle_delay_ms: settings.datetime.settle_delay().as_millis() as u64,
            search_placeholder: settings.list.search_placeholder().to_string(),
            routes: route_config(&settings.surface),
        }
    }
}

pub(crate) fn handle_config_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.config_started", json_output = json_output);

    let settings = load_settings_with_warning();
    let effective = EffectiveSettings::resolve(&settings);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&effective)?);
    } else {
        let native: Vec<&str> = effective.native_types.iter().map(PickerType::as_str).collect();
        println!("screen_route:       {}", effective.screen_route);
        println!("platform:           {:?}", effective.platform);
        println!(
            "native_types:       {}",
            if native.is_empty() {
                "(none)".to_string()
            } else {
                native.join(", ")
            }
        );
        println!("settle_delay_ms:    {}", effective.settle_delay_ms);
        println!("search_placeholder: {}", effective.search_placeholder);
        for route in &effective.routes {
            println!("route:              {} ({:?})", route.name, route.presentation);
        }
    }

    info!(event = "cli.config_completed");
    Ok(())
}

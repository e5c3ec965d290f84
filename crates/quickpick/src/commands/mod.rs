use clap::ArgMatches;
use tracing::error;

use quickpick_core::events;

mod actions;
mod config;
mod helpers;
mod overlay;
mod simulate;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let result = match matches.subcommand() {
        Some(("simulate", sub_matches)) => simulate::handle_simulate_command(sub_matches),
        Some(("config", sub_matches)) => config::handle_config_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown();
    result
}

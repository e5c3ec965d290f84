use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("quickpick")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Drive headless picker sessions from TOML definitions")
        .long_about("quickpick opens a picker described in a TOML file against a recording navigator, replays user actions (presses, filters, confirms, cancels) and reports which values were committed and which navigation the dispatcher performed.")
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("simulate")
                .about("Open a picker from a definition file and replay actions against it")
                .arg(
                    Arg::new("definition")
                        .help("Path to the picker definition (TOML)")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("action")
                        .long("action")
                        .short('a')
                        .help("Action to replay, in order: press:N, toggle-all, filter:TEXT, confirm, cancel, back, blur, focus, hue:DEG, sv:S,V, date:YYYY-MM-DD, time:HH:MM")
                        .action(ArgAction::Append)
                        .allow_hyphen_values(true)
                )
                .arg(
                    Arg::new("veto")
                        .long("veto")
                        .help("Install a close gate that rejects every close request")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("platform")
                        .long("platform")
                        .help("Platform whose native overlays are available (overrides config)")
                        .value_parser(["ios", "android", "headless"])
                )
                .arg(
                    Arg::new("decline-overlay")
                        .long("decline-overlay")
                        .help("Make the native overlay refuse to open, forcing the in-app screen")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("config")
                .about("Show the effective settings")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "quickpick");
    }

    #[test]
    fn test_simulate_collects_actions_in_order() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec![
                "quickpick",
                "simulate",
                "picker.toml",
                "--action",
                "press:1",
                "-a",
                "confirm",
            ])
            .unwrap();

        let sub = matches.subcommand_matches("simulate").unwrap();
        let actions: Vec<&String> = sub.get_many::<String>("action").unwrap().collect();
        assert_eq!(actions, vec!["press:1", "confirm"]);
        assert_eq!(
            sub.get_one::<String>("definition").map(String::as_str),
            Some("picker.toml")
        );
        assert!(!sub.get_flag("veto"));
    }

    #[test]
    fn test_simulate_requires_definition() {
        let app = build_cli();
        assert!(app.try_get_matches_from(vec!["quickpick", "simulate"]).is_err());
    }

    #[test]
    fn test_simulate_rejects_unknown_platform() {
        let app = build_cli();
        let result = app.try_get_matches_from(vec![
            "quickpick",
            "simulate",
            "picker.toml",
            "--platform",
            "windows",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_flag_is_global() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["quickpick", "config", "--quiet", "--json"])
            .unwrap();
        assert!(matches.get_flag("quiet"));
        let sub = matches.subcommand_matches("config").unwrap();
        assert!(sub.get_flag("json"));
    }
}

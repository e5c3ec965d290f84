use std::path::Path;
use std::sync::{Arc, Mutex};

use clap::ArgMatches;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, info, warn};

use quickpick_core::color::ColorSession;
use quickpick_core::config::{PickerSettings, Platform};
use quickpick_core::datetime::{DateTimeSession, SessionStep};
use quickpick_core::errors::QuickpickError;
use quickpick_core::events;
use quickpick_core::list::{ListLayout, ListScreen};
use quickpick_core::store::{CloseGate, PickerPhase, PickerStore};
use quickpick_core::surface::{
    NativeOverlay, NavigationCall, NavigationHandle, RecordingNavigator, SurfaceAction,
    SurfaceDispatcher, SurfaceError,
};
use quickpick_core::{PickerConfig, PickerDefinition, PickerType, PickerValue};

use super::actions::Action;
use super::helpers::load_settings_with_warning;
use super::overlay::{OverlayCall, ScriptedOverlay};

/// A value delivered to the picker's callbacks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Commit {
    Value { value: PickerValue },
    Values { values: Vec<PickerValue> },
}

#[derive(Debug, Serialize)]
struct StepReport {
    action: String,
    outcome: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    surface_actions: Vec<SurfaceAction>,
}

#[derive(Debug, Serialize)]
struct FinalState {
    phase: PickerPhase,
    should_open: bool,
    should_close: bool,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    picker_type: PickerType,
    opened: Vec<SurfaceAction>,
    steps: Vec<StepReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<String>,
    committed: Vec<Commit>,
    navigation: Vec<NavigationCall>,
    overlay: Vec<OverlayCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    layout: Option<ListLayout>,
    final_state: FinalState,
}

/// The mounted picker surface actions are replayed against.
enum Surface {
    List(ListScreen),
    DateTime(DateTimeSession),
    Color(ColorSession),
}

impl Surface {
    /// `native` is the overlay already presenting the picker, if any.
    fn mount(
        store: &PickerStore,
        settings: &PickerSettings,
        native: Option<Arc<dyn NativeOverlay>>,
    ) -> Result<Self, SurfaceError> {
        let picker_type = store
            .picker_config()
            .map(|config| config.picker_type)
            .ok_or(SurfaceError::NoActivePicker)?;

        match picker_type {
            PickerType::List => Ok(Surface::List(ListScreen::mount(store.clone(), &settings.list)?)),
            PickerType::Time | PickerType::Date | PickerType::DateTime => {
                let session = DateTimeSession::mount(store.clone(), &settings.datetime)?;
                Ok(Surface::DateTime(match native {
                    Some(overlay) => session.with_overlay(overlay),
                    None => session,
                }))
            }
            PickerType::Color => Ok(Surface::Color(ColorSession::mount(store.clone())?)),
        }
    }

    fn accepts(&self, action: &Action) -> bool {
        match self {
            Surface::List(_) => matches!(
                action,
                Action::Press(_)
                    | Action::ToggleAll
                    | Action::Filter(_)
                    | Action::Confirm
                    | Action::Cancel
                    | Action::Back
                    | Action::Blur
                    | Action::Focus
            ),
            Surface::DateTime(_) => matches!(
                action,
                Action::Date(_) | Action::Time(_, _) | Action::Cancel | Action::Back
            ),
            Surface::Color(_) => matches!(
                action,
                Action::Hue(_)
                    | Action::SaturationValue(_, _)
                    | Action::Confirm
                    | Action::Cancel
                    | Action::Back
            ),
        }
    }

    async fn apply(&mut self, action: &Action) -> Result<Value, SurfaceError> {
        let outcome = match (self, action) {
            (Surface::List(screen), Action::Press(index)) => {
                let outcome = screen.press_item(*index).await?;
                json!(outcome)
            }
            (Surface::List(screen), Action::ToggleAll) => {
                json!({ "applied": screen.toggle_select_all() })
            }
            (Surface::List(screen), Action::Filter(query)) => {
                screen.set_query(query.clone());
                json!({ "visible_rows": screen.layout().rows.len() })
            }
            (Surface::List(screen), Action::Confirm) => {
                let close = screen.confirm().await?;
                json!({ "close": close })
            }
            (Surface::List(screen), Action::Cancel) => {
                let close = screen.cancel().await?;
                json!({ "close": close })
            }
            (Surface::List(screen), Action::Back) => {
                let consumed = screen.handle_back().await?;
                json!({ "consumed": consumed })
            }
            (Surface::List(screen), Action::Blur) => {
                screen.set_focused(false);
                json!({ "focused": false })
            }
            (Surface::List(screen), Action::Focus) => {
                screen.set_focused(true);
                json!({ "focused": true })
            }
            (Surface::DateTime(session), Action::Date(date)) => {
                let step = session.confirm_date(*date).await?;
                match step {
                    SessionStep::AwaitingTimeStage => {
                        let (hour, minute) = session.advance_native_time_stage().await?;
                        json!({ "step": "time_stage_opened", "hour": hour, "minute": minute })
                    }
                    step => json!(step),
                }
            }
            (Surface::DateTime(session), Action::Time(hour, minute)) => {
                let step = session.confirm_time(*hour, *minute).await?;
                json!(step)
            }
            (Surface::DateTime(session), Action::Cancel | Action::Back) => {
                let close = session.cancel().await?;
                json!({ "close": close })
            }
            (Surface::Color(session), Action::Hue(degrees)) => {
                session.set_hue(*degrees);
                json!({ "hex": session.draft().to_hex() })
            }
            (Surface::Color(session), Action::SaturationValue(saturation, value)) => {
                session.set_saturation_value(*saturation, *value);
                json!({ "hex": session.draft().to_hex() })
            }
            (Surface::Color(session), Action::Confirm) => {
                let (hex, close) = session.confirm().await?;
                json!({ "value": hex, "close": close })
            }
            (Surface::Color(session), Action::Cancel) => {
                let close = session.cancel().await?;
                json!({ "close": close })
            }
            (Surface::Color(session), Action::Back) => {
                let close = session.dismiss().await?;
                json!({ "close": close })
            }
            _ => json!({ "applied": false }),
        };
        Ok(outcome)
    }

    fn layout(&self) -> Option<ListLayout> {
        match self {
            Surface::List(screen) => Some(screen.layout()),
            Surface::DateTime(_) | Surface::Color(_) => None,
        }
    }
}

pub(crate) fn handle_simulate_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let veto = matches.get_flag("veto");
    let decline_overlay = matches.get_flag("decline-overlay");
    let definition_path = matches
        .get_one::<String>("definition")
        .ok_or("Definition path is required")?;

    let actions = matches
        .get_many::<String>("action")
        .into_iter()
        .flatten()
        .map(|raw| raw.parse::<Action>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            error!(event = "cli.simulate_failed", error = %e);
            e
        })?;

    let mut settings = load_settings_with_warning();
    if let Some(platform) = matches.get_one::<String>("platform") {
        settings.surface.platform = Some(match platform.as_str() {
            "ios" => Platform::Ios,
            "android" => Platform::Android,
            _ => Platform::Headless,
        });
    }

    let definition = match PickerDefinition::load(Path::new(definition_path)) {
        Ok(definition) => definition,
        Err(e) => {
            eprintln!("❌ Failed to load picker definition: {}", e);
            error!(
                event = "cli.simulate_failed",
                path = %definition_path,
                error = %e,
                error_code = e.error_code()
            );
            events::log_app_error(&e);
            return Err(Box::new(e));
        }
    };

    info!(
        event = "cli.simulate_started",
        path = %definition_path,
        picker_type = %definition.picker_type,
        action_count = actions.len(),
        veto = veto,
        json_output = json_output
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(simulate(definition, &actions, &settings, veto, decline_overlay))?;

    info!(
        event = "cli.simulate_completed",
        steps = report.steps.len(),
        commits = report.committed.len(),
        phase = ?report.final_state.phase
    );

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

async fn simulate(
    definition: PickerDefinition,
    actions: &[Action],
    settings: &PickerSettings,
    veto: bool,
    decline_overlay: bool,
) -> Result<SimulationReport, Box<dyn std::error::Error>> {
    let commits: Arc<Mutex<Vec<Commit>>> = Arc::new(Mutex::new(Vec::new()));
    let config = record_commits(definition.into_config(), &commits);
    let config = if veto {
        config.on_before_close(CloseGate::from_fn(|| false))
    } else {
        config
    };
    let picker_type = config.picker_type;

    let store = PickerStore::new();
    let navigator = Arc::new(RecordingNavigator::new());
    let handle: NavigationHandle = navigator.clone();
    store.init_navigation(handle);

    let overlay = Arc::new(ScriptedOverlay::new(
        settings.surface.native_types(),
        decline_overlay,
    ));
    let mut dispatcher =
        SurfaceDispatcher::new(store.clone(), &settings.surface).with_overlay(overlay.clone());

    store.open_picker(config);
    let opened: Vec<SurfaceAction> = dispatcher.observe()?.into_iter().collect();

    let native: Option<Arc<dyn NativeOverlay>> = opened
        .iter()
        .any(|action| matches!(action, SurfaceAction::OpenedOverlay { .. }))
        .then(|| overlay.clone() as Arc<dyn NativeOverlay>);
    let mut surface = Surface::mount(&store, settings, native)?;
    let mut steps = Vec::new();
    let mut skipped = Vec::new();
    let mut closed = false;

    for action in actions {
        if closed {
            skipped.push(action.to_string());
            continue;
        }
        if !surface.accepts(action) {
            let message = format!(
                "Action '{}' does not apply to a {} picker",
                action, picker_type
            );
            error!(event = "cli.simulate_failed", action = %action, picker_type = %picker_type);
            return Err(message.into());
        }

        let outcome = match surface.apply(action).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    event = "cli.simulate_failed",
                    action = %action,
                    error = %e,
                    error_code = e.error_code()
                );
                events::log_app_error(&e);
                return Err(Box::new(e));
            }
        };

        let mut surface_actions = Vec::new();
        if let Some(surface_action) = dispatcher.observe()? {
            closed = matches!(
                surface_action,
                SurfaceAction::NavigatedBack
                    | SurfaceAction::ClosedOverlay { .. }
                    | SurfaceAction::ReleasedState
            );
            if surface_action == SurfaceAction::NavigatedBack {
                // The screen is gone; acknowledge like an unmounting host would.
                store.picker_closed();
                dispatcher.observe()?;
            }
            surface_actions.push(surface_action);
        }

        steps.push(StepReport {
            action: action.to_string(),
            outcome,
            surface_actions,
        });
    }

    if !skipped.is_empty() {
        warn!(
            event = "cli.simulate_actions_skipped",
            count = skipped.len(),
            reason = "picker already closed"
        );
    }

    let state = store.snapshot();
    let committed = match commits.lock() {
        Ok(commits) => commits.clone(),
        Err(_) => {
            warn!(event = "cli.simulate_commits_lock_poisoned");
            Vec::new()
        }
    };

    Ok(SimulationReport {
        picker_type,
        opened,
        steps,
        skipped,
        committed,
        navigation: navigator.calls(),
        overlay: overlay.calls(),
        layout: surface.layout(),
        final_state: FinalState {
            phase: state.phase(),
            should_open: state.should_open,
            should_close: state.should_close,
        },
    })
}

fn record_commits(config: PickerConfig, commits: &Arc<Mutex<Vec<Commit>>>) -> PickerConfig {
    let value_sink = commits.clone();
    let values_sink = commits.clone();
    config
        .on_value_change(move |value| {
            if let Ok(mut commits) = value_sink.lock() {
                commits.push(Commit::Value { value });
            }
        })
        .on_values_change(move |values| {
            if let Ok(mut commits) = values_sink.lock() {
                commits.push(Commit::Values { values });
            }
        })
}

fn describe_surface_action(action: &SurfaceAction) -> String {
    match action {
        SurfaceAction::NavigatedToScreen { route } => format!("navigated to {}", route),
        SurfaceAction::OpenedOverlay { picker_type } => {
            format!("opened native {} overlay", picker_type)
        }
        SurfaceAction::FellBackToScreen { route, picker_type } => {
            format!("native {} overlay declined, navigated to {}", picker_type, route)
        }
        SurfaceAction::NavigatedBack => "navigated back".to_string(),
        SurfaceAction::ClosedOverlay { handled } => {
            format!("closed native overlay (handled: {})", handled)
        }
        SurfaceAction::ReleasedState => "released picker state".to_string(),
    }
}

fn describe_navigation(call: &NavigationCall) -> String {
    match call {
        NavigationCall::Navigate { route } => format!("navigate {}", route),
        NavigationCall::GoBack => "go back".to_string(),
    }
}

fn print_report(report: &SimulationReport) {
    println!("Picker: {}", report.picker_type);
    for action in &report.opened {
        println!("Opened: {}", describe_surface_action(action));
    }

    if !report.steps.is_empty() {
        println!();
        println!("Steps:");
        for step in &report.steps {
            println!("  {} -> {}", step.action, step.outcome);
            for action in &step.surface_actions {
                println!("    {}", describe_surface_action(action));
            }
        }
    }

    if !report.skipped.is_empty() {
        println!();
        println!("Skipped (picker closed): {}", report.skipped.join(", "));
    }

    println!();
    if report.committed.is_empty() {
        println!("Committed: (nothing)");
    } else {
        println!("Committed:");
        for commit in &report.committed {
            match commit {
                Commit::Value { value } => println!("  value: {}", value),
                Commit::Values { values } => {
                    let labels: Vec<String> = values.iter().map(PickerValue::label).collect();
                    println!("  values: [{}]", labels.join(", "));
                }
            }
        }
    }

    if !report.navigation.is_empty() {
        println!();
        println!("Navigation:");
        for call in &report.navigation {
            println!("  {}", describe_navigation(call));
        }
    }

    println!();
    println!("Final state: {:?}", report.final_state.phase);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(toml: &str) -> PickerDefinition {
        PickerDefinition::from_toml_str(toml).unwrap()
    }

    fn actions(raw: &[&str]) -> Vec<Action> {
        raw.iter().map(|a| a.parse().unwrap()).collect()
    }

    #[tokio::test]
    async fn test_single_select_press_commits_and_navigates_back() {
        let report = simulate(
            definition(r#"items = ["a", "b", "c"]"#),
            &actions(&["press:1", "press:2"]),
            &PickerSettings::default(),
            false,
            false,
        )
        .await
        .unwrap();

        assert_eq!(
            report.committed,
            vec![Commit::Value {
                value: PickerValue::from("b")
            }]
        );
        assert_eq!(
            report.navigation,
            vec![
                NavigationCall::Navigate {
                    route: "PickerScreen".to_string()
                },
                NavigationCall::GoBack
            ]
        );
        assert_eq!(report.skipped, vec!["press:2".to_string()]);
        assert_eq!(report.final_state.phase, PickerPhase::Idle);
    }

    #[tokio::test]
    async fn test_veto_keeps_screen_open() {
        let report = simulate(
            definition(r#"items = ["a", "b"]"#),
            &actions(&["press:0"]),
            &PickerSettings::default(),
            true,
            false,
        )
        .await
        .unwrap();

        assert_eq!(report.committed.len(), 1);
        assert_eq!(report.navigation.len(), 1);
        assert_eq!(report.final_state.phase, PickerPhase::Opening);
    }

    #[tokio::test]
    async fn test_multi_select_cancel_commits_nothing() {
        let report = simulate(
            definition(
                r#"
items = ["1", "2", "3"]
is_multi_select = true
selected_values = ["1"]
"#,
            ),
            &actions(&["press:2", "toggle-all", "cancel"]),
            &PickerSettings::default(),
            false,
            false,
        )
        .await
        .unwrap();

        assert!(report.committed.is_empty());
        assert_eq!(report.navigation.last(), Some(&NavigationCall::GoBack));
    }

    #[tokio::test]
    async fn test_datetime_on_native_overlay() {
        let mut settings = PickerSettings::default();
        settings.surface.platform = Some(Platform::Android);
        settings.datetime.settle_delay_ms = Some(0);

        let report = simulate(
            definition(
                r#"
picker_type = "datetime"
selected_value = "2024-01-10T14:45:00"
"#,
            ),
            &actions(&["date:2024-02-29", "time:07:30"]),
            &settings,
            false,
            false,
        )
        .await
        .unwrap();

        assert_eq!(
            report.opened,
            vec![SurfaceAction::OpenedOverlay {
                picker_type: PickerType::DateTime
            }]
        );
        assert!(report.navigation.is_empty());
        assert_eq!(
            report.committed,
            vec![Commit::Value {
                value: PickerValue::from(
                    chrono::NaiveDate::from_ymd_opt(2024, 2, 29)
                        .unwrap()
                        .and_hms_opt(7, 30, 0)
                        .unwrap()
                )
            }]
        );
        assert_eq!(report.final_state.phase, PickerPhase::Idle);

        let kinds: Vec<&str> = report
            .overlay
            .iter()
            .map(|call| match call {
                OverlayCall::Open { .. } => "open",
                OverlayCall::CloseStage { .. } => "close_stage",
                OverlayCall::OpenTimeStage { .. } => "open_time_stage",
                OverlayCall::Close { .. } => "close",
            })
            .collect();
        assert_eq!(kinds, vec!["open", "close_stage", "open_time_stage", "close"]);
        assert!(report.overlay.contains(&OverlayCall::OpenTimeStage {
            picker_type: PickerType::DateTime,
            hour: 14,
            minute: 45
        }));
    }

    #[tokio::test]
    async fn test_declined_overlay_falls_back_to_screen() {
        let mut settings = PickerSettings::default();
        settings.surface.platform = Some(Platform::Ios);

        let report = simulate(
            definition(r#"picker_type = "color""#),
            &actions(&["hue:120", "sv:1,1", "confirm"]),
            &settings,
            false,
            true,
        )
        .await
        .unwrap();

        assert!(matches!(
            report.opened.first(),
            Some(SurfaceAction::FellBackToScreen { .. })
        ));
        assert_eq!(
            report.committed,
            vec![Commit::Value {
                value: PickerValue::from("#00FF00")
            }]
        );
    }

    #[tokio::test]
    async fn test_action_for_wrong_picker_type_fails() {
        let result = simulate(
            definition(r#"items = ["a"]"#),
            &actions(&["hue:10"]),
            &PickerSettings::default(),
            false,
            false,
        )
        .await;

        assert!(result.is_err());
    }
}

use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with optional quiet mode.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `quiet` is false, info-level and above events are emitted (default).
/// Events go to stderr as JSON so stdout stays free for command output.
///
/// Returns false when a global subscriber was already installed; that
/// subscriber stays in place and receives a debug event saying so.
pub fn init_logging(quiet: bool) -> bool {
    let directive = if quiet { "quickpick=error" } else { "quickpick=info" };

    let filter = match directive.parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };

    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .try_init();

    match installed {
        Ok(()) => true,
        Err(e) => {
            debug!(event = "core.logging.already_initialized", error = %e);
            false
        }
    }
}

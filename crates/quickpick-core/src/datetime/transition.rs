use std::time::Duration;

use tokio::sync::oneshot;
use tracing::debug;

/// Wait until a closing native overlay has finished its transition.
///
/// Prefers the overlay's own completion signal. Without one (or if the
/// overlay drops the signal) waits `fallback` instead.
pub async fn settle_transition(completion: Option<oneshot::Receiver<()>>, fallback: Duration) {
    match completion {
        Some(completion) => match completion.await {
            Ok(()) => debug!(event = "core.datetime.transition_completed"),
            Err(_) => {
                debug!(
                    event = "core.datetime.transition_signal_dropped",
                    fallback_ms = fallback.as_millis() as u64
                );
                tokio::time::sleep(fallback).await;
            }
        },
        None => {
            debug!(
                event = "core.datetime.transition_delay",
                fallback_ms = fallback.as_millis() as u64
            );
            tokio::time::sleep(fallback).await;
        }
    }
}

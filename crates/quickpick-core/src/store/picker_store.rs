use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::errors::CloseError;
use super::state::CoordinationState;
use crate::picker::{PickerConfig, PickerConfigPatch};
use crate::surface::navigation::NavigationHandle;

/// What a `close_picker` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseOutcome {
    /// The gate allowed the close and the close request was committed.
    Closed,
    /// A close request was already pending. Nothing changed.
    AlreadyClosing,
    /// The gate vetoed the close. Nothing changed.
    Vetoed,
    /// The picker the gate ran for was replaced while the gate was pending.
    /// Nothing changed.
    Superseded,
}

/// Picker coordination store.
///
/// A cheap, cloneable handle to one shared [`CoordinationState`]. The host
/// creates one store per app session and injects it into every caller and
/// surface. Every committed mutation notifies subscribers.
///
/// # Semantics
///
/// - **Open**: `open_picker` is a no-op while an open request is active.
/// - **Close**: `close_picker` is a no-op while a close request is active.
///   Otherwise it awaits the configuration's close gate and commits only if
///   the gate allows it. Gate vetoes and gate failures leave state untouched.
/// - **Suspension**: `close_picker` is the only action that awaits. Two
///   concurrent calls may both evaluate the gate.
#[derive(Clone)]
pub struct PickerStore {
    state: Arc<watch::Sender<CoordinationState>>,
}

impl Default for PickerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PickerStore {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(CoordinationState::default());
        Self {
            state: Arc::new(sender),
        }
    }

    /// Receiver notified after every committed mutation.
    pub fn subscribe(&self) -> watch::Receiver<CoordinationState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> CoordinationState {
        self.state.borrow().clone()
    }

    pub fn should_open(&self) -> bool {
        self.state.borrow().should_open
    }

    pub fn should_close(&self) -> bool {
        self.state.borrow().should_close
    }

    pub fn picker_config(&self) -> Option<PickerConfig> {
        self.state.borrow().picker_config.clone()
    }

    pub fn navigation(&self) -> Option<NavigationHandle> {
        self.state.borrow().navigation.clone()
    }

    /// Store the navigation handle. Last write wins.
    pub fn init_navigation(&self, navigation: NavigationHandle) {
        self.state.send_modify(|state| state.navigation = Some(navigation));
        info!(event = "core.store.navigation_initialized");
    }

    /// Request a picker to open. Returns whether a new lifecycle started.
    pub fn open_picker(&self, config: PickerConfig) -> bool {
        let picker_type = config.picker_type;
        let invocation_id = Uuid::new_v4();

        let accepted = self.state.send_if_modified(|state| {
            if state.should_open {
                return false;
            }
            state.should_open = true;
            state.should_close = false;
            state.picker_config = Some(config);
            state.invocation_id = Some(invocation_id);
            true
        });

        if accepted {
            info!(
                event = "core.store.open_requested",
                invocation_id = %invocation_id,
                picker_type = %picker_type
            );
        } else {
            debug!(
                event = "core.store.open_ignored",
                picker_type = %picker_type,
                reason = "open already requested"
            );
        }
        accepted
    }

    /// Shallow-merge `patch` into the current configuration.
    pub fn change_config(&self, patch: PickerConfigPatch) {
        self.state.send_modify(|state| match state.picker_config.as_mut() {
            Some(config) => config.merge(patch),
            None => {
                let mut config = PickerConfig::default();
                config.merge(patch);
                state.picker_config = Some(config);
            }
        });
        debug!(event = "core.store.config_changed");
    }

    /// Request the active picker to close, consulting its close gate first.
    pub async fn close_picker(&self) -> Result<CloseOutcome, CloseError> {
        let (gate, invocation_id) = {
            let state = self.state.borrow();
            if state.should_close {
                debug!(
                    event = "core.store.close_ignored",
                    reason = "close already requested"
                );
                return Ok(CloseOutcome::AlreadyClosing);
            }
            (
                state
                    .picker_config
                    .as_ref()
                    .and_then(|config| config.on_before_close.clone()),
                state.invocation_id,
            )
        };

        if let Some(gate) = gate {
            match gate.evaluate().await {
                Ok(true) => {}
                Ok(false) => {
                    warn!(
                        event = "core.store.close_vetoed",
                        invocation_id = ?invocation_id
                    );
                    return Ok(CloseOutcome::Vetoed);
                }
                Err(e) => {
                    warn!(
                        event = "core.store.close_gate_failed",
                        invocation_id = ?invocation_id,
                        error = %e
                    );
                    return Err(e.into());
                }
            }
        }

        // The gate may have suspended; only commit for the invocation it ran for.
        let mut outcome = CloseOutcome::Closed;
        self.state.send_if_modified(|state| {
            if state.invocation_id != invocation_id {
                outcome = CloseOutcome::Superseded;
                return false;
            }
            if state.should_close {
                outcome = CloseOutcome::AlreadyClosing;
                return false;
            }
            state.should_open = false;
            state.should_close = true;
            true
        });

        match outcome {
            CloseOutcome::Closed => info!(
                event = "core.store.close_requested",
                invocation_id = ?invocation_id
            ),
            _ => debug!(
                event = "core.store.close_ignored",
                invocation_id = ?invocation_id,
                outcome = ?outcome,
                reason = "state changed while the close gate was pending"
            ),
        }
        Ok(outcome)
    }

    /// Surface acknowledgement that the open transition was consumed.
    pub fn picker_opened(&self) {
        self.reset_flags();
        debug!(event = "core.store.open_acknowledged");
    }

    /// Surface acknowledgement that the close transition was consumed.
    pub fn picker_closed(&self) {
        self.reset_flags();
        debug!(event = "core.store.close_acknowledged");
    }

    fn reset_flags(&self) {
        self.state.send_if_modified(|state| {
            let changed = state.should_open || state.should_close;
            state.should_open = false;
            state.should_close = false;
            changed
        });
    }
}

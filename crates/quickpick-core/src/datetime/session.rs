use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::flow::{DateTimeFlow, DateTimeMode, FlowStage, FlowStep};
use super::transition::settle_transition;
use crate::config::DateTimeSettings;
use crate::picker::{PickerConfig, PickerValue};
use crate::store::{CloseOutcome, PickerStore};
use crate::surface::{NativeOverlay, OverlayRequest, SurfaceError};

/// Result of confirming a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SessionStep {
    /// The date stage closed; call `advance_to_time_stage` next.
    AwaitingTimeStage,
    /// The final value was delivered and a close was requested.
    Committed {
        value: NaiveDateTime,
        close: CloseOutcome,
    },
}

/// A date/time flow bound to the store's active picker.
pub struct DateTimeSession {
    store: PickerStore,
    config: PickerConfig,
    flow: DateTimeFlow,
    settle_delay: Duration,
    overlay: Option<(Arc<dyn NativeOverlay>, OverlayRequest)>,
}

impl DateTimeSession {
    /// Mount for the active time, date or datetime picker.
    ///
    /// Seeds from the configured timestamp, or the local clock when the
    /// picker has none.
    pub fn mount(store: PickerStore, settings: &DateTimeSettings) -> Result<Self, SurfaceError> {
        let config = store.picker_config().ok_or(SurfaceError::NoActivePicker)?;
        let mode = DateTimeMode::for_picker(config.picker_type).map_err(|_| {
            SurfaceError::WrongPickerType {
                expected: "date/time",
                actual: config.picker_type,
            }
        })?;

        let seed = config
            .selected_value
            .as_ref()
            .and_then(PickerValue::as_timestamp)
            .unwrap_or_else(|| Local::now().naive_local());

        info!(event = "core.datetime.mounted", mode = ?mode, seed = %seed);

        Ok(Self {
            store,
            config,
            flow: DateTimeFlow::new(mode, seed),
            settle_delay: settings.settle_delay(),
            overlay: None,
        })
    }

    /// Drive the stage swap through a native overlay that already shows the
    /// date stage.
    pub fn with_overlay(mut self, overlay: Arc<dyn NativeOverlay>) -> Self {
        let request = OverlayRequest::from_config(&self.config);
        self.overlay = Some((overlay, request));
        self
    }

    pub fn flow(&self) -> &DateTimeFlow {
        &self.flow
    }

    pub fn stage(&self) -> FlowStage {
        self.flow.stage()
    }

    pub async fn confirm_date(&mut self, date: NaiveDate) -> Result<SessionStep, SurfaceError> {
        match self.flow.confirm_date(date)? {
            FlowStep::AwaitTransition => {
                debug!(event = "core.datetime.date_stage_closed", date = %date);
                Ok(SessionStep::AwaitingTimeStage)
            }
            FlowStep::Completed { value } => self.commit(value).await,
            FlowStep::OpenTimeStage => Ok(SessionStep::AwaitingTimeStage),
        }
    }

    /// Swap the native date stage for the time stage.
    ///
    /// Closes the date stage, waits on its completion signal (or the settle
    /// delay when the platform gives none), then opens the time stage. Without
    /// an attached overlay this is `advance_to_time_stage(None)`.
    pub async fn advance_native_time_stage(&mut self) -> Result<(u32, u32), SurfaceError> {
        let Some((overlay, request)) = self.overlay.clone() else {
            return self.advance_to_time_stage(None).await;
        };
        if self.flow.stage() != FlowStage::AwaitingTimeStage {
            self.flow.time_stage_ready()?;
        }

        let completion = overlay.close_stage(&request);
        debug!(
            event = "core.datetime.date_stage_dismissed",
            signalled = completion.is_some()
        );
        let seed = self.advance_to_time_stage(completion).await?;
        if !overlay.open_time_stage(&request, seed) {
            warn!(
                event = "core.datetime.time_stage_unhandled",
                picker_type = %request.picker_type
            );
        }
        Ok(seed)
    }

    /// Wait for the date stage to settle, then enter the time stage.
    ///
    /// Returns the hour and minute to preselect in the time stage.
    pub async fn advance_to_time_stage(
        &mut self,
        completion: Option<oneshot::Receiver<()>>,
    ) -> Result<(u32, u32), SurfaceError> {
        if self.flow.stage() != FlowStage::AwaitingTimeStage {
            // Surface the stage error before waiting.
            self.flow.time_stage_ready()?;
        }
        settle_transition(completion, self.settle_delay).await;
        self.flow.time_stage_ready()?;

        let seed = self.flow.time_seed();
        debug!(
            event = "core.datetime.time_stage_opened",
            hour = seed.0,
            minute = seed.1
        );
        Ok(seed)
    }

    pub async fn confirm_time(&mut self, hour: u32, minute: u32) -> Result<SessionStep, SurfaceError> {
        match self.flow.confirm_time(hour, minute)? {
            FlowStep::Completed { value } => self.commit(value).await,
            FlowStep::AwaitTransition | FlowStep::OpenTimeStage => {
                Ok(SessionStep::AwaitingTimeStage)
            }
        }
    }

    /// Cancel or dismiss at any stage. No callback is invoked.
    pub async fn cancel(&mut self) -> Result<CloseOutcome, SurfaceError> {
        info!(event = "core.datetime.cancelled", stage = ?self.flow.stage());
        Ok(self.store.close_picker().await?)
    }

    async fn commit(&mut self, value: NaiveDateTime) -> Result<SessionStep, SurfaceError> {
        info!(event = "core.datetime.value_committed", value = %value);
        self.config.notify_value(PickerValue::Timestamp(value));
        let close = self.store.close_picker().await?;
        Ok(SessionStep::Committed { value, close })
    }
}

use tracing::{debug, info};

use super::draft::ColorDraft;
use crate::picker::{PickerConfig, PickerType, PickerValue};
use crate::store::{CloseOutcome, PickerStore};
use crate::surface::SurfaceError;

/// The HSV color dialog bound to the store's active color picker.
pub struct ColorSession {
    store: PickerStore,
    config: PickerConfig,
    draft: ColorDraft,
}

impl ColorSession {
    pub fn mount(store: PickerStore) -> Result<Self, SurfaceError> {
        let config = store.picker_config().ok_or(SurfaceError::NoActivePicker)?;
        if config.picker_type != PickerType::Color {
            return Err(SurfaceError::WrongPickerType {
                expected: "color",
                actual: config.picker_type,
            });
        }

        let draft = ColorDraft::seeded(config.selected_value.as_ref());
        info!(event = "core.color.mounted", seed = %draft.to_hex());

        Ok(Self {
            store,
            config,
            draft,
        })
    }

    pub fn draft(&self) -> &ColorDraft {
        &self.draft
    }

    pub fn set_hue(&mut self, hue: f64) {
        self.draft.set_hue(hue);
        debug!(event = "core.color.hue_changed", hue = self.draft.hue());
    }

    pub fn set_saturation_value(&mut self, saturation: f64, value: f64) {
        self.draft.set_saturation_value(saturation, value);
        debug!(
            event = "core.color.saturation_value_changed",
            saturation = self.draft.saturation(),
            value = self.draft.value()
        );
    }

    /// Deliver the hex color, then request close.
    pub async fn confirm(&mut self) -> Result<(String, CloseOutcome), SurfaceError> {
        let hex = self.draft.to_hex();
        info!(event = "core.color.value_committed", value = %hex);
        self.config.notify_value(PickerValue::Text(hex.clone()));
        let close = self.store.close_picker().await?;
        Ok((hex, close))
    }

    pub async fn cancel(&mut self) -> Result<CloseOutcome, SurfaceError> {
        info!(event = "core.color.cancelled");
        Ok(self.store.close_picker().await?)
    }

    /// Tap outside the dialog. Same as cancel.
    pub async fn dismiss(&mut self) -> Result<CloseOutcome, SurfaceError> {
        debug!(event = "core.color.dismissed");
        self.cancel().await
    }
}

use chrono::NaiveDateTime;
use serde::Serialize;
use tokio::sync::oneshot;

use crate::picker::{PickerConfig, PickerType, PickerValue};

/// One choice as a native list overlay expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayOption {
    pub label: String,
    pub value: PickerValue,
}

/// Platform-facing view of a picker configuration.
///
/// List-style pickers carry labelled options with the selected option
/// resolved; time-family pickers carry the seed timestamp instead; color
/// pickers carry the seed color text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayRequest {
    pub picker_type: PickerType,
    pub title: Option<String>,
    pub options: Vec<OverlayOption>,
    pub selected: Option<OverlayOption>,
    pub date: Option<NaiveDateTime>,
    pub color: Option<String>,
}

impl OverlayRequest {
    pub fn from_config(config: &PickerConfig) -> Self {
        let mut request = Self {
            picker_type: config.picker_type,
            title: config.title.clone(),
            options: Vec::new(),
            selected: None,
            date: None,
            color: None,
        };

        match config.picker_type {
            PickerType::List => {
                request.options = config
                    .items
                    .iter()
                    .map(|value| OverlayOption {
                        label: value.label(),
                        value: value.clone(),
                    })
                    .collect();
                request.selected = config.selected_value.as_ref().and_then(|selected| {
                    request
                        .options
                        .iter()
                        .find(|option| config.values_equal(&option.value, selected))
                        .cloned()
                });
            }
            PickerType::Time | PickerType::Date | PickerType::DateTime => {
                request.date = config
                    .selected_value
                    .as_ref()
                    .and_then(PickerValue::as_timestamp);
            }
            PickerType::Color => {
                request.color = config.selected_value.as_ref().map(PickerValue::label);
            }
        }

        request
    }
}

/// Platform-native modal picker adapter.
///
/// `open` and `close` return whether the platform handled the request. An
/// unhandled `open` makes the dispatcher fall back to the in-app screen.
///
/// A `datetime` request is presented in two stages on platforms without a
/// combined picker: the date stage is opened by `open`, then swapped for the
/// time stage with `close_stage` followed by `open_time_stage`.
pub trait NativeOverlay: Send + Sync {
    fn supports(&self, picker_type: PickerType) -> bool;

    fn open(&self, request: &OverlayRequest) -> bool;

    fn close(&self, request: &OverlayRequest) -> bool;

    /// Dismiss the date stage. The receiver, if any, fires once the dismiss
    /// transition has finished; `None` means the platform cannot report it.
    fn close_stage(&self, request: &OverlayRequest) -> Option<oneshot::Receiver<()>>;

    /// Present the time stage preselecting `(hour, minute)`.
    fn open_time_stage(&self, request: &OverlayRequest, time: (u32, u32)) -> bool;
}

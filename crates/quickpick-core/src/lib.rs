//! quickpick-core: Core library for app-wide picker coordination
//!
//! A single shared store holds "a picker should open" / "a picker should
//! close" requests. A dispatcher turns those requests into navigation or
//! native overlay presentation, and the surfaces (list screen, date/time
//! flow, color dialog) commit values back through the picker's callbacks.
//!
//! # Main Entry Points
//!
//! - [`store`] - Coordination store and close gate
//! - [`surface`] - Dispatcher, navigation and native overlay contracts
//! - [`list`] - Single/multi selection list screen
//! - [`datetime`] - Date, time and two-stage datetime flow
//! - [`color`] - HSV color dialog
//! - [`config`] - Settings management

pub mod color;
pub mod config;
pub mod datetime;
pub mod errors;
pub mod events;
pub mod list;
pub mod logging;
pub mod picker;
pub mod store;
pub mod surface;

// Re-export commonly used types at crate root for convenience
pub use color::{ColorDraft, ColorSession};
pub use config::PickerSettings;
pub use datetime::{DateTimeFlow, DateTimeSession};
pub use list::{ListLayout, ListScreen};
pub use picker::{PickerConfig, PickerConfigPatch, PickerDefinition, PickerType, PickerValue};
pub use store::{CloseGate, CloseOutcome, PickerStore};
pub use surface::{
    NativeOverlay, NavigationController, NavigationHandle, SurfaceAction, SurfaceDispatcher,
};

// Re-export logging initialization
pub use logging::init_logging;

//! Picker coordination store.
//!
//! One [`PickerStore`] per app session holds whether a picker is requested
//! open or closed, the active [`PickerConfig`](crate::picker::PickerConfig)
//! and the navigation handle. Surfaces subscribe to it and react to edges.

pub mod errors;
pub mod gate;
pub mod picker_store;
pub mod state;

pub use errors::CloseError;
pub use gate::{CloseGate, GateError};
pub use picker_store::{CloseOutcome, PickerStore};
pub use state::{CoordinationState, PickerPhase};

pub mod config;
pub mod definition;
pub mod types;

pub use config::{EqualityFn, PickerConfig, PickerConfigPatch, ValueCallback, ValuesCallback};
pub use definition::{DefinitionError, PickerDefinition};
pub use types::{PickerType, PickerValue};

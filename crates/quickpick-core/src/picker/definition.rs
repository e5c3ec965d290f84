//! Serializable picker descriptions.
//!
//! A [`PickerDefinition`] is everything in a [`PickerConfig`] except the
//! callbacks, so pickers can be described in TOML or JSON files and turned
//! into live configurations by attaching callbacks afterwards.
//!
//! ```toml
//! picker_type = "list"
//! title = "Fruit"
//! items = ["Apple", "Banana", "Cherry"]
//! is_multi_select = true
//! selected_values = ["Banana"]
//! can_filter = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::config::PickerConfig;
use super::types::{PickerType, PickerValue};
use crate::errors::QuickpickError;

#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("Failed to read picker definition '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse picker definition: {message}")]
    Parse { message: String },
}

impl QuickpickError for DefinitionError {
    fn error_code(&self) -> &'static str {
        match self {
            DefinitionError::Io { .. } => "DEFINITION_IO_ERROR",
            DefinitionError::Parse { .. } => "DEFINITION_PARSE_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, DefinitionError::Parse { .. })
    }
}

fn default_has_selector() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerDefinition {
    #[serde(default)]
    pub picker_type: PickerType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub items: Vec<PickerValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_value: Option<PickerValue>,

    #[serde(default)]
    pub selected_values: Vec<PickerValue>,

    #[serde(default)]
    pub is_multi_select: bool,

    #[serde(default)]
    pub can_filter: bool,

    #[serde(default = "default_has_selector")]
    pub has_selector: bool,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub surface_options: Map<String, Value>,
}

impl PickerDefinition {
    pub fn from_toml_str(content: &str) -> Result<Self, DefinitionError> {
        toml::from_str(content).map_err(|e| DefinitionError::Parse {
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Build a live configuration without callbacks.
    pub fn into_config(self) -> PickerConfig {
        PickerConfig {
            picker_type: self.picker_type,
            title: self.title,
            items: self.items,
            selected_value: self.selected_value,
            selected_values: self.selected_values,
            is_multi_select: self.is_multi_select,
            can_filter: self.can_filter,
            has_selector: self.has_selector,
            surface_options: self.surface_options,
            ..PickerConfig::default()
        }
    }
}

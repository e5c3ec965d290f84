use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Which kind of picker a configuration describes.
///
/// The type decides which surface presents the picker: `List` always uses
/// the in-app screen, the time family and `Color` may use a native overlay
/// when the platform provides one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerType {
    #[default]
    List,
    Time,
    Date,
    #[serde(rename = "datetime")]
    DateTime,
    Color,
}

impl PickerType {
    pub const ALL: [PickerType; 5] = [
        PickerType::List,
        PickerType::Time,
        PickerType::Date,
        PickerType::DateTime,
        PickerType::Color,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PickerType::List => "list",
            PickerType::Time => "time",
            PickerType::Date => "date",
            PickerType::DateTime => "datetime",
            PickerType::Color => "color",
        }
    }

    /// Time, date and datetime pickers share the date/time flow.
    pub fn is_time_family(&self) -> bool {
        matches!(
            self,
            PickerType::Time | PickerType::Date | PickerType::DateTime
        )
    }
}

impl fmt::Display for PickerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PickerType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PickerType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::InvalidPickerType {
                value: s.to_string(),
            })
    }
}

/// A selectable value.
///
/// Deserialization tries integer, then timestamp (`2024-05-01T10:30:00`),
/// then falls back to text, so plain TOML/JSON literals map naturally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PickerValue {
    Integer(i64),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl PickerValue {
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            PickerValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Label shown for this value in list surfaces.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PickerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerValue::Integer(n) => write!(f, "{}", n),
            PickerValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M")),
            PickerValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for PickerValue {
    fn from(value: &str) -> Self {
        PickerValue::Text(value.to_string())
    }
}

impl From<String> for PickerValue {
    fn from(value: String) -> Self {
        PickerValue::Text(value)
    }
}

impl From<i64> for PickerValue {
    fn from(value: i64) -> Self {
        PickerValue::Integer(value)
    }
}

impl From<NaiveDateTime> for PickerValue {
    fn from(value: NaiveDateTime) -> Self {
        PickerValue::Timestamp(value)
    }
}

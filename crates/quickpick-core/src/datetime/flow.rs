use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::errors::QuickpickError;
use crate::picker::PickerType;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    #[error("Cannot {action} while the flow is in the {stage:?} stage")]
    UnexpectedStage {
        action: &'static str,
        stage: FlowStage,
    },

    #[error("Invalid time of day {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },

    #[error("Picker type '{picker_type}' has no date/time flow")]
    NotTimeFamily { picker_type: PickerType },
}

impl QuickpickError for FlowError {
    fn error_code(&self) -> &'static str {
        match self {
            FlowError::UnexpectedStage { .. } => "FLOW_UNEXPECTED_STAGE",
            FlowError::InvalidTime { .. } => "FLOW_INVALID_TIME",
            FlowError::NotTimeFamily { .. } => "FLOW_NOT_TIME_FAMILY",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, FlowError::InvalidTime { .. })
    }
}

/// What the flow asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTimeMode {
    Date,
    Time,
    DateTime,
}

impl DateTimeMode {
    pub fn for_picker(picker_type: PickerType) -> Result<Self, FlowError> {
        match picker_type {
            PickerType::Date => Ok(DateTimeMode::Date),
            PickerType::Time => Ok(DateTimeMode::Time),
            PickerType::DateTime => Ok(DateTimeMode::DateTime),
            PickerType::List | PickerType::Color => Err(FlowError::NotTimeFamily { picker_type }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    Date,
    /// Date overlay is closing; the time overlay must not open yet.
    AwaitingTimeStage,
    Time,
    Done,
}

/// What the caller should do after a flow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum FlowStep {
    /// Wait for the date overlay to finish closing, then call `time_stage_ready`.
    AwaitTransition,
    /// Present the time overlay.
    OpenTimeStage,
    /// The flow produced its final value.
    Completed { value: NaiveDateTime },
}

/// Headless date/time picking state machine.
///
/// `DateTime` runs two stages. The date stage keeps the time of day of the
/// working value; the time stage keeps the date chosen in the first stage
/// and overwrites only hours and minutes (seconds are zeroed).
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeFlow {
    mode: DateTimeMode,
    stage: FlowStage,
    value: NaiveDateTime,
}

impl DateTimeFlow {
    pub fn new(mode: DateTimeMode, seed: NaiveDateTime) -> Self {
        let stage = match mode {
            DateTimeMode::Time => FlowStage::Time,
            DateTimeMode::Date | DateTimeMode::DateTime => FlowStage::Date,
        };
        Self {
            mode,
            stage,
            value: seed,
        }
    }

    pub fn mode(&self) -> DateTimeMode {
        self.mode
    }

    pub fn stage(&self) -> FlowStage {
        self.stage
    }

    /// Working value: the seed with any confirmed stages applied.
    pub fn value(&self) -> NaiveDateTime {
        self.value
    }

    pub fn confirm_date(&mut self, date: NaiveDate) -> Result<FlowStep, FlowError> {
        self.expect_stage(FlowStage::Date, "confirm a date")?;
        self.value = date.and_time(self.value.time());

        if self.mode == DateTimeMode::DateTime {
            self.stage = FlowStage::AwaitingTimeStage;
            return Ok(FlowStep::AwaitTransition);
        }

        self.stage = FlowStage::Done;
        Ok(FlowStep::Completed { value: self.value })
    }

    /// The date overlay finished closing.
    pub fn time_stage_ready(&mut self) -> Result<FlowStep, FlowError> {
        self.expect_stage(FlowStage::AwaitingTimeStage, "open the time stage")?;
        self.stage = FlowStage::Time;
        Ok(FlowStep::OpenTimeStage)
    }

    pub fn confirm_time(&mut self, hour: u32, minute: u32) -> Result<FlowStep, FlowError> {
        self.expect_stage(FlowStage::Time, "confirm a time")?;
        let time =
            NaiveTime::from_hms_opt(hour, minute, 0).ok_or(FlowError::InvalidTime { hour, minute })?;

        self.value = self.value.date().and_time(time);
        self.stage = FlowStage::Done;
        Ok(FlowStep::Completed { value: self.value })
    }

    /// Seed hours/minutes for presenting the time stage.
    pub fn time_seed(&self) -> (u32, u32) {
        (self.value.hour(), self.value.minute())
    }

    fn expect_stage(&self, expected: FlowStage, action: &'static str) -> Result<(), FlowError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(FlowError::UnexpectedStage {
                action,
                stage: self.stage,
            })
        }
    }
}

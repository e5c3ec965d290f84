use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// One replayed user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Press(usize),
    ToggleAll,
    Filter(String),
    Confirm,
    Cancel,
    Back,
    Blur,
    Focus,
    Hue(f64),
    SaturationValue(f64, f64),
    Date(NaiveDate),
    Time(u32, u32),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Press(index) => write!(f, "press:{}", index),
            Action::ToggleAll => write!(f, "toggle-all"),
            Action::Filter(text) => write!(f, "filter:{}", text),
            Action::Confirm => write!(f, "confirm"),
            Action::Cancel => write!(f, "cancel"),
            Action::Back => write!(f, "back"),
            Action::Blur => write!(f, "blur"),
            Action::Focus => write!(f, "focus"),
            Action::Hue(degrees) => write!(f, "hue:{}", degrees),
            Action::SaturationValue(s, v) => write!(f, "sv:{},{}", s, v),
            Action::Date(date) => write!(f, "date:{}", date.format("%Y-%m-%d")),
            Action::Time(hour, minute) => write!(f, "time:{:02}:{:02}", hour, minute),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };

        let action = match (name, arg) {
            ("press", Some(index)) => Action::Press(
                index
                    .parse()
                    .map_err(|_| format!("Invalid item index in '{}'", s))?,
            ),
            ("toggle-all", None) => Action::ToggleAll,
            ("filter", Some(text)) => Action::Filter(text.to_string()),
            ("confirm", None) => Action::Confirm,
            ("cancel", None) => Action::Cancel,
            ("back", None) => Action::Back,
            ("blur", None) => Action::Blur,
            ("focus", None) => Action::Focus,
            ("hue", Some(degrees)) => Action::Hue(
                degrees
                    .parse()
                    .map_err(|_| format!("Invalid hue in '{}'", s))?,
            ),
            ("sv", Some(pair)) => {
                let (saturation, value) = pair
                    .split_once(',')
                    .ok_or_else(|| format!("Expected sv:S,V, got '{}'", s))?;
                let parse = |raw: &str| {
                    raw.trim()
                        .parse::<f64>()
                        .map_err(|_| format!("Invalid saturation/value in '{}'", s))
                };
                Action::SaturationValue(parse(saturation)?, parse(value)?)
            }
            ("date", Some(date)) => Action::Date(
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map_err(|_| format!("Expected date:YYYY-MM-DD, got '{}'", s))?,
            ),
            ("time", Some(time)) => {
                let (hour, minute) = time
                    .split_once(':')
                    .and_then(|(h, m)| Some((h.parse::<u32>().ok()?, m.parse::<u32>().ok()?)))
                    .ok_or_else(|| format!("Expected time:HH:MM, got '{}'", s))?;
                Action::Time(hour, minute)
            }
            _ => return Err(format!("Unknown action '{}'", s)),
        };

        Ok(action)
    }
}

use serde::Serialize;
use tracing::warn;

use crate::errors::QuickpickError;
use crate::picker::PickerValue;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("Invalid color '{value}': expected #rgb, #rrggbb or a color name")]
    InvalidColor { value: String },
}

impl QuickpickError for ColorError {
    fn error_code(&self) -> &'static str {
        match self {
            ColorError::InvalidColor { .. } => "INVALID_COLOR",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("white", [0xFF, 0xFF, 0xFF]),
    ("red", [0xFF, 0x00, 0x00]),
    ("green", [0x00, 0x80, 0x00]),
    ("lime", [0x00, 0xFF, 0x00]),
    ("blue", [0x00, 0x00, 0xFF]),
    ("yellow", [0xFF, 0xFF, 0x00]),
    ("cyan", [0x00, 0xFF, 0xFF]),
    ("magenta", [0xFF, 0x00, 0xFF]),
    ("gray", [0x80, 0x80, 0x80]),
    ("grey", [0x80, 0x80, 0x80]),
    ("orange", [0xFF, 0xA5, 0x00]),
    ("purple", [0x80, 0x00, 0x80]),
];

/// Working color of the HSV dialog.
///
/// Hue is in degrees within `[0, 360)`; saturation and value are within
/// `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDraft {
    hue: f64,
    saturation: f64,
    value: f64,
}

impl Default for ColorDraft {
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 0.0,
            value: 0.0,
        }
    }
}

impl ColorDraft {
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let mut draft = Self::default();
        draft.set_hue(hue);
        draft.set_saturation_value(saturation, value);
        draft
    }

    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let rgb = match trimmed.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => NAMED_COLORS
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
                .map(|(_, rgb)| *rgb),
        };

        rgb.map(Self::from_rgb).ok_or_else(|| ColorError::InvalidColor {
            value: input.to_string(),
        })
    }

    /// Seed from a configured value. Missing seeds start at black;
    /// unparsable ones log a warning and do the same.
    pub fn seeded(seed: Option<&PickerValue>) -> Self {
        let Some(seed) = seed else {
            return Self::default();
        };

        let text = seed.label();
        match Self::parse(&text) {
            Ok(draft) => draft,
            Err(e) => {
                warn!(event = "core.color.seed_invalid", value = %text, error = %e);
                Self::default()
            }
        }
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_hue(&mut self, hue: f64) {
        self.hue = if hue.is_finite() {
            hue.rem_euclid(360.0)
        } else {
            0.0
        };
    }

    pub fn set_saturation_value(&mut self, saturation: f64, value: f64) {
        self.saturation = clamp_unit(saturation);
        self.value = clamp_unit(value);
    }

    pub fn to_rgb(&self) -> [u8; 3] {
        let chroma = self.value * self.saturation;
        let sector = self.hue / 60.0;
        let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = self.value - chroma;
        [to_channel(r + m), to_channel(g + m), to_channel(b + m)]
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    fn from_rgb([r, g, b]: [u8; 3]) -> Self {
        let r = f64::from(r) / 255.0;
        let g = f64::from(g) / 255.0;
        let b = f64::from(b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let saturation = if max == 0.0 { 0.0 } else { delta / max };

        Self::from_hsv(hue, saturation, max)
    }
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, digit) in rgb.iter_mut().zip(hex.chars()) {
                let nibble = digit.to_digit(16)? as u8;
                *slot = nibble * 17;
            }
            Some(rgb)
        }
        6 => Some([
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        ]),
        _ => None,
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

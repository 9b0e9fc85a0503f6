//! Display color for catalog cards.
//!
//! Colors arrive either as a named system color (`"teal"`) or a hex string in
//! `RGB`, `RRGGBB` or `AARRGGBB` form, with an optional leading `#`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#?([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").expect("valid hex color regex")
});

/// 8-bit sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Input is neither a known color name nor valid hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl Display for ColorParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported color value `{}`", self.0)
    }
}

impl Error for ColorParseError {}

impl DisplayColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses a named color or hex literal.
    pub fn parse(value: &str) -> Result<Self, ColorParseError> {
        let trimmed = value.trim();
        if let Some(named) = named_color(&trimmed.to_ascii_lowercase()) {
            return Ok(named);
        }

        let Some(captures) = HEX_COLOR_RE.captures(trimmed) else {
            return Err(ColorParseError(value.to_string()));
        };
        let digits = &captures[1];
        let packed = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError(value.to_string()))?;

        let color = match digits.len() {
            3 => Self::rgb(
                (((packed >> 8) & 0xF) * 17) as u8,
                (((packed >> 4) & 0xF) * 17) as u8,
                ((packed & 0xF) * 17) as u8,
            ),
            6 => Self::rgb(
                ((packed >> 16) & 0xFF) as u8,
                ((packed >> 8) & 0xFF) as u8,
                (packed & 0xFF) as u8,
            ),
            _ => Self {
                a: ((packed >> 24) & 0xFF) as u8,
                r: ((packed >> 16) & 0xFF) as u8,
                g: ((packed >> 8) & 0xFF) as u8,
                b: (packed & 0xFF) as u8,
            },
        };
        Ok(color)
    }

    /// Hex form: `#RRGGBB` when opaque, `#AARRGGBB` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

fn named_color(name: &str) -> Option<DisplayColor> {
    let color = match name {
        "black" => DisplayColor::rgb(0, 0, 0),
        "white" => DisplayColor::rgb(255, 255, 255),
        "gray" | "grey" => DisplayColor::rgb(142, 142, 147),
        "red" => DisplayColor::rgb(255, 59, 48),
        "orange" => DisplayColor::rgb(255, 149, 0),
        "yellow" => DisplayColor::rgb(255, 204, 0),
        "green" => DisplayColor::rgb(52, 199, 89),
        "mint" => DisplayColor::rgb(0, 199, 190),
        "teal" => DisplayColor::rgb(48, 176, 199),
        "cyan" => DisplayColor::rgb(50, 173, 230),
        "blue" => DisplayColor::rgb(0, 122, 255),
        "indigo" => DisplayColor::rgb(88, 86, 214),
        "purple" => DisplayColor::rgb(175, 82, 222),
        "pink" => DisplayColor::rgb(255, 45, 85),
        "brown" => DisplayColor::rgb(162, 132, 94),
        _ => return None,
    };
    Some(color)
}

impl TryFrom<String> for DisplayColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DisplayColor> for String {
    fn from(value: DisplayColor) -> Self {
        value.to_hex()
    }
}

//! Reader-screen display settings.
//!
//! These live next to the reader rather than in [`Preferences`](super::preferences::Preferences):
//! they are session-scoped and reset from the reader's own settings sheet.
//!
//! # Invariants
//! - Numeric fields always sit inside their range and on their step grid.
//! - `font_name` is always one of [`READER_FONTS`].

use crate::model::preferences::TextAlignment;
use serde::{Deserialize, Serialize};

/// Fonts offered by the reader.
pub const READER_FONTS: &[&str] = &["Helvetica", "Times New Roman", "Cochin", "Georgia"];

const FONT_SIZE_MIN: f64 = 14.0;
const FONT_SIZE_MAX: f64 = 28.0;
const FONT_SIZE_STEP: f64 = 2.0;
const LINE_SPACING_MIN: f64 = 4.0;
const LINE_SPACING_MAX: f64 = 14.0;
const LINE_SPACING_STEP: f64 = 2.0;
const SPEECH_RATE_MIN: f32 = 0.1;
const SPEECH_RATE_MAX: f32 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Regular,
    Semibold,
}

/// Reader page theme, separate from the app color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderTheme {
    #[default]
    Normal,
    Dark,
    Sepia,
    /// Accent comes from a user-picked color.
    Custom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingDirection {
    LeftToRight,
    #[default]
    RightToLeft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawReaderSettings")]
pub struct ReaderSettings {
    font_size: f64,
    font_name: String,
    pub font_weight: FontWeight,
    line_spacing: f64,
    pub text_alignment: TextAlignment,
    pub theme: ReaderTheme,
    pub reading_direction: ReadingDirection,
    pub show_hadith_details: bool,
    pub haptic_feedback: bool,
    pub keep_screen_awake: bool,
    speech_rate: f32,
    pub show_hadith_number: bool,
    pub show_narrator_and_source: bool,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            font_name: READER_FONTS[0].to_string(),
            font_weight: FontWeight::Regular,
            line_spacing: 8.0,
            text_alignment: TextAlignment::Trailing,
            theme: ReaderTheme::Normal,
            reading_direction: ReadingDirection::RightToLeft,
            show_hadith_details: true,
            haptic_feedback: true,
            keep_screen_awake: true,
            speech_rate: 0.5,
            show_hadith_number: true,
            show_narrator_and_source: true,
        }
    }
}

impl ReaderSettings {
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Clamps to 14..=28 and snaps to the nearest even size.
    pub fn set_font_size(&mut self, value: f64) {
        self.font_size = snap(value, FONT_SIZE_MIN, FONT_SIZE_MAX, FONT_SIZE_STEP);
    }

    pub fn line_spacing(&self) -> f64 {
        self.line_spacing
    }

    /// Clamps to 4..=14 and snaps to steps of 2.
    pub fn set_line_spacing(&mut self, value: f64) {
        self.line_spacing = snap(value, LINE_SPACING_MIN, LINE_SPACING_MAX, LINE_SPACING_STEP);
    }

    pub fn speech_rate(&self) -> f32 {
        self.speech_rate
    }

    pub fn set_speech_rate(&mut self, value: f32) {
        self.speech_rate = if value.is_nan() {
            SPEECH_RATE_MIN
        } else {
            value.clamp(SPEECH_RATE_MIN, SPEECH_RATE_MAX)
        };
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// Returns `false` and keeps the current font when `name` is not offered.
    pub fn set_font_name(&mut self, name: &str) -> bool {
        match READER_FONTS.iter().find(|font| **font == name) {
            Some(font) => {
                self.font_name = (*font).to_string();
                true
            }
            None => false,
        }
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

/// Wire shape for [`ReaderSettings`]. Decoded values go through the setters,
/// so stored JSON cannot bypass the ranges or the font list.
#[derive(Deserialize)]
#[serde(default)]
struct RawReaderSettings {
    font_size: f64,
    font_name: String,
    font_weight: FontWeight,
    line_spacing: f64,
    text_alignment: TextAlignment,
    theme: ReaderTheme,
    reading_direction: ReadingDirection,
    show_hadith_details: bool,
    haptic_feedback: bool,
    keep_screen_awake: bool,
    speech_rate: f32,
    show_hadith_number: bool,
    show_narrator_and_source: bool,
}

impl Default for RawReaderSettings {
    fn default() -> Self {
        let settings = ReaderSettings::default();
        Self {
            font_size: settings.font_size,
            font_name: settings.font_name,
            font_weight: settings.font_weight,
            line_spacing: settings.line_spacing,
            text_alignment: settings.text_alignment,
            theme: settings.theme,
            reading_direction: settings.reading_direction,
            show_hadith_details: settings.show_hadith_details,
            haptic_feedback: settings.haptic_feedback,
            keep_screen_awake: settings.keep_screen_awake,
            speech_rate: settings.speech_rate,
            show_hadith_number: settings.show_hadith_number,
            show_narrator_and_source: settings.show_narrator_and_source,
        }
    }
}

impl From<RawReaderSettings> for ReaderSettings {
    fn from(raw: RawReaderSettings) -> Self {
        let mut settings = ReaderSettings {
            font_weight: raw.font_weight,
            text_alignment: raw.text_alignment,
            theme: raw.theme,
            reading_direction: raw.reading_direction,
            show_hadith_details: raw.show_hadith_details,
            haptic_feedback: raw.haptic_feedback,
            keep_screen_awake: raw.keep_screen_awake,
            show_hadith_number: raw.show_hadith_number,
            show_narrator_and_source: raw.show_narrator_and_source,
            ..ReaderSettings::default()
        };
        settings.set_font_size(raw.font_size);
        settings.set_line_spacing(raw.line_spacing);
        settings.set_speech_rate(raw.speech_rate);
        // Unknown fonts keep the default.
        settings.set_font_name(&raw.font_name);
        settings
    }
}

fn snap(value: f64, min: f64, max: f64, step: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    let clamped = value.clamp(min, max);
    let steps = ((clamped - min) / step).round();
    (min + steps * step).min(max)
}

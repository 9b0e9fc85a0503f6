//! User preferences record.
//!
//! # Responsibility
//! - Hold every user-configurable app option with its documented default.
//! - Map options to and from the flat key-value form used by persistence.
//!
//! # Invariants
//! - `Preferences::default()` is the single source of default values.
//! - Decoding a stored value never fails the whole record; a bad value falls
//!   back to that key's default.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const KEY_THEME: &str = "themeMode";
pub const KEY_FONT_SIZE: &str = "fontSize";
pub const KEY_LINE_SPACING: &str = "lineSpacing";
pub const KEY_TEXT_ALIGNMENT: &str = "textAlignment";
pub const KEY_NOTIFICATIONS_ENABLED: &str = "notificationsEnabled";
pub const KEY_HAPTIC_FEEDBACK: &str = "hapticFeedback";
pub const KEY_SOUND_EFFECTS: &str = "soundEffects";
pub const KEY_AUTO_SAVE_PROGRESS: &str = "autoSaveProgress";
pub const KEY_OFFLINE_MODE: &str = "offlineMode";
pub const KEY_CLOUD_SYNC: &str = "cloudSync";
pub const KEY_DUA_OF_THE_DAY: &str = "duaOfTheDay";
pub const KEY_APP_LANGUAGE: &str = "appLanguage";
pub const KEY_READING_GOAL: &str = "readingGoal";
pub const KEY_USERNAME: &str = "username";
pub const KEY_HAS_SEEN_INTRO: &str = "hasSeenIntro";

/// Every persisted preference key, in storage order.
pub const PREFERENCE_KEYS: &[&str] = &[
    KEY_THEME,
    KEY_FONT_SIZE,
    KEY_LINE_SPACING,
    KEY_TEXT_ALIGNMENT,
    KEY_NOTIFICATIONS_ENABLED,
    KEY_HAPTIC_FEEDBACK,
    KEY_SOUND_EFFECTS,
    KEY_AUTO_SAVE_PROGRESS,
    KEY_OFFLINE_MODE,
    KEY_CLOUD_SYNC,
    KEY_DUA_OF_THE_DAY,
    KEY_APP_LANGUAGE,
    KEY_READING_GOAL,
    KEY_USERNAME,
    KEY_HAS_SEEN_INTRO,
];

/// App color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Follow the OS setting.
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Self::System, Self::Light, Self::Dark];

    /// Stored raw value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }

    /// Unknown values map to `System`.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "Light" => Self::Light,
            "Dark" => Self::Dark,
            _ => Self::System,
        }
    }
}

/// Reader text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    Leading,
    Center,
    #[default]
    Trailing,
}

impl TextAlignment {
    /// Stored raw value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Leading => "Leading",
            Self::Center => "Center",
            Self::Trailing => "Trailing",
        }
    }

    /// `Justified` renders as leading; anything unknown is trailing.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "Leading" | "Justified" => Self::Leading,
            "Center" => Self::Center,
            _ => Self::Trailing,
        }
    }
}

/// Flat record of app-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub font_size: f64,
    pub line_spacing: f64,
    pub text_alignment: TextAlignment,
    pub notifications_enabled: bool,
    pub haptic_feedback: bool,
    pub sound_effects: bool,
    pub auto_save_progress: bool,
    pub offline_mode: bool,
    pub cloud_sync: bool,
    pub dua_of_the_day: bool,
    pub app_language: String,
    /// Daily reading target in minutes.
    pub reading_goal: u32,
    pub username: String,
    pub has_seen_intro: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            font_size: 17.0,
            line_spacing: 1.4,
            text_alignment: TextAlignment::Trailing,
            notifications_enabled: true,
            haptic_feedback: true,
            sound_effects: true,
            auto_save_progress: true,
            offline_mode: false,
            cloud_sync: true,
            dua_of_the_day: false,
            app_language: "AZ".to_string(),
            reading_goal: 10,
            username: String::new(),
            has_seen_intro: false,
        }
    }
}

/// A stored value could not be decoded for its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceValueError {
    UnknownKey(String),
    InvalidValue { key: &'static str, value: String },
}

impl Display for PreferenceValueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKey(key) => write!(f, "unknown preference key `{key}`"),
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for preference `{key}`")
            }
        }
    }
}

impl Error for PreferenceValueError {}

impl Preferences {
    /// Flattens the record into `(key, value)` pairs for storage.
    pub fn to_entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (KEY_THEME, self.theme.as_str().to_string()),
            (KEY_FONT_SIZE, self.font_size.to_string()),
            (KEY_LINE_SPACING, self.line_spacing.to_string()),
            (KEY_TEXT_ALIGNMENT, self.text_alignment.as_str().to_string()),
            (KEY_NOTIFICATIONS_ENABLED, self.notifications_enabled.to_string()),
            (KEY_HAPTIC_FEEDBACK, self.haptic_feedback.to_string()),
            (KEY_SOUND_EFFECTS, self.sound_effects.to_string()),
            (KEY_AUTO_SAVE_PROGRESS, self.auto_save_progress.to_string()),
            (KEY_OFFLINE_MODE, self.offline_mode.to_string()),
            (KEY_CLOUD_SYNC, self.cloud_sync.to_string()),
            (KEY_DUA_OF_THE_DAY, self.dua_of_the_day.to_string()),
            (KEY_APP_LANGUAGE, self.app_language.clone()),
            (KEY_READING_GOAL, self.reading_goal.to_string()),
            (KEY_USERNAME, self.username.clone()),
            (KEY_HAS_SEEN_INTRO, self.has_seen_intro.to_string()),
        ]
    }

    /// Applies one stored `(key, value)` pair.
    ///
    /// On error the record is left unchanged for that key.
    pub fn apply_entry(&mut self, key: &str, value: &str) -> Result<(), PreferenceValueError> {
        match key {
            KEY_THEME => self.theme = Theme::from_stored(value),
            KEY_TEXT_ALIGNMENT => self.text_alignment = TextAlignment::from_stored(value),
            KEY_FONT_SIZE => self.font_size = parse_number(KEY_FONT_SIZE, value)?,
            KEY_LINE_SPACING => self.line_spacing = parse_number(KEY_LINE_SPACING, value)?,
            KEY_NOTIFICATIONS_ENABLED => {
                self.notifications_enabled = parse_flag(KEY_NOTIFICATIONS_ENABLED, value)?
            }
            KEY_HAPTIC_FEEDBACK => self.haptic_feedback = parse_flag(KEY_HAPTIC_FEEDBACK, value)?,
            KEY_SOUND_EFFECTS => self.sound_effects = parse_flag(KEY_SOUND_EFFECTS, value)?,
            KEY_AUTO_SAVE_PROGRESS => {
                self.auto_save_progress = parse_flag(KEY_AUTO_SAVE_PROGRESS, value)?
            }
            KEY_OFFLINE_MODE => self.offline_mode = parse_flag(KEY_OFFLINE_MODE, value)?,
            KEY_CLOUD_SYNC => self.cloud_sync = parse_flag(KEY_CLOUD_SYNC, value)?,
            KEY_DUA_OF_THE_DAY => self.dua_of_the_day = parse_flag(KEY_DUA_OF_THE_DAY, value)?,
            KEY_APP_LANGUAGE => self.app_language = value.to_string(),
            KEY_READING_GOAL => {
                self.reading_goal =
                    value
                        .trim()
                        .parse::<u32>()
                        .map_err(|_| PreferenceValueError::InvalidValue {
                            key: KEY_READING_GOAL,
                            value: value.to_string(),
                        })?
            }
            KEY_USERNAME => self.username = value.to_string(),
            KEY_HAS_SEEN_INTRO => self.has_seen_intro = parse_flag(KEY_HAS_SEEN_INTRO, value)?,
            other => return Err(PreferenceValueError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<f64, PreferenceValueError> {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(PreferenceValueError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, PreferenceValueError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(PreferenceValueError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        PreferenceValueError, Preferences, TextAlignment, Theme, KEY_FONT_SIZE, PREFERENCE_KEYS,
    };

    #[test]
    fn defaults_match_documented_values() {
        let prefs = Preferences::default();
        assert_eq!(prefs.theme, Theme::System);
        assert_eq!(prefs.font_size, 17.0);
        assert_eq!(prefs.line_spacing, 1.4);
        assert_eq!(prefs.text_alignment, TextAlignment::Trailing);
        assert!(prefs.notifications_enabled);
        assert!(prefs.haptic_feedback);
        assert!(prefs.sound_effects);
        assert!(prefs.auto_save_progress);
        assert!(!prefs.offline_mode);
        assert!(prefs.cloud_sync);
        assert!(!prefs.dua_of_the_day);
        assert_eq!(prefs.app_language, "AZ");
        assert_eq!(prefs.reading_goal, 10);
        assert_eq!(prefs.username, "");
        assert!(!prefs.has_seen_intro);
    }

    #[test]
    fn entries_cover_every_key_and_decode_back() {
        let mut source = Preferences::default();
        source.theme = Theme::Dark;
        source.font_size = 22.5;
        source.text_alignment = TextAlignment::Center;
        source.reading_goal = 25;
        source.username = "Aişə".to_string();
        source.has_seen_intro = true;

        let entries = source.to_entries();
        let keys = entries.iter().map(|(key, _)| *key).collect::<Vec<_>>();
        assert_eq!(keys, PREFERENCE_KEYS);

        let mut decoded = Preferences::default();
        for (key, value) in &entries {
            decoded.apply_entry(key, value).expect("stored entry decodes");
        }
        assert_eq!(decoded, source);
    }

    #[test]
    fn stored_enum_values_fall_back() {
        assert_eq!(Theme::from_stored("Sepia"), Theme::System);
        assert_eq!(TextAlignment::from_stored("Justified"), TextAlignment::Leading);
        assert_eq!(TextAlignment::from_stored("whatever"), TextAlignment::Trailing);
    }

    #[test]
    fn malformed_value_leaves_field_untouched() {
        let mut prefs = Preferences::default();
        let err = prefs
            .apply_entry(KEY_FONT_SIZE, "large")
            .expect_err("non-numeric font size must fail");
        assert!(matches!(err, PreferenceValueError::InvalidValue { .. }));
        assert_eq!(prefs.font_size, 17.0);

        let err = prefs
            .apply_entry("fontFamily", "Georgia")
            .expect_err("unknown key must fail");
        assert_eq!(err, PreferenceValueError::UnknownKey("fontFamily".to_string()));
    }
}

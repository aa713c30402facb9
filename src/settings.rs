//! Game settings and preferences
//!
//! Read from LocalStorage on the web and from a JSON file natively. Settings
//! are only ever read; scores and game state are never stored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::driver::TimestepMode;

/// Highest fixed simulation rate accepted
pub const MAX_FIXED_HZ: u32 = 1000;

/// Colors and font used by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// CSS color for the cleared background
    pub background: String,
    /// CSS color for paddles, ball and text
    pub foreground: String,
    /// CSS font family for all text
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#000".to_string(),
            foreground: "#FFF".to_string(),
            font_family: "Arial".to_string(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How simulation updates are scheduled against animation frames
    pub timestep: TimestepMode,
    /// Ignore host auto-repeat key-downs for menu transitions
    pub debounce_key_repeat: bool,
    /// Show FPS counter in the HUD
    pub show_fps: bool,
    /// Visual theme
    pub theme: Theme,
    /// Fixed RNG seed for serves (host picks one when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timestep: TimestepMode::PerFrame,
            debounce_key_repeat: true,
            show_fps: false,
            theme: Theme::default(),
            seed: None,
        }
    }
}

/// Reasons settings could not be used
#[derive(Debug)]
pub enum SettingsError {
    /// Input was not valid settings JSON
    Parse(serde_json::Error),
    /// A field parsed but holds an unusable value
    OutOfRange { field: &'static str, value: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid settings json: {err}"),
            Self::OutOfRange { field, value } => {
                write!(f, "settings field {field} out of range: {value}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "arcade_pong_settings";

    /// Parse and validate settings JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like [`Settings::from_json`], but falls back to defaults with a warning
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Ignoring settings: {}", err);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if let TimestepMode::Fixed { hz } = self.timestep {
            if hz == 0 || hz > MAX_FIXED_HZ {
                return Err(SettingsError::OutOfRange {
                    field: "timestep.hz",
                    value: hz.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.timestep, TimestepMode::PerFrame);
        assert!(settings.debounce_key_repeat);
        assert!(!settings.show_fps);
        assert_eq!(settings.theme.background, "#000");
        assert_eq!(settings.theme.foreground, "#FFF");
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"show_fps": true, "theme": {"font_family": "Courier"}}"#)
            .unwrap();
        assert!(settings.show_fps);
        assert_eq!(settings.theme.font_family, "Courier");
        assert_eq!(settings.theme.background, "#000");
        assert_eq!(settings.timestep, TimestepMode::PerFrame);
    }

    #[test]
    fn test_fixed_timestep_json() {
        let settings = Settings::from_json(r#"{"timestep": {"Fixed": {"hz": 120}}, "seed": 7}"#)
            .unwrap();
        assert_eq!(settings.timestep, TimestepMode::Fixed { hz: 120 });
        assert_eq!(settings.seed, Some(7));
    }

    #[test]
    fn test_out_of_range_hz_rejected() {
        let err = Settings::from_json(r#"{"timestep": {"Fixed": {"hz": 0}}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::OutOfRange { field: "timestep.hz", .. }));
        assert!(err.to_string().contains("timestep.hz"));
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
        assert_eq!(Settings::from_json_or_default("{not json"), Settings::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            timestep: TimestepMode::Fixed { hz: 60 },
            show_fps: true,
            ..Default::default()
        };
        assert_eq!(Settings::from_json(&settings.to_json()).unwrap(), settings);
    }
}

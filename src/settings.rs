//! Game settings
//!
//! Read once at startup from an optional JSON file. Missing fields fall back
//! to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::StartupError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    /// Window size in pixels, used to map the cursor into the field
    pub window_width: u32,
    pub window_height: u32,

    // === Gameplay ===
    /// Lives used when the prompt is skipped and no override is given
    pub starting_lives: i32,
    /// Seed for the brick lanes
    pub seed: u64,
    /// Brick speed at the start, in [1, 10]
    pub initial_speed: f32,
    /// Simulated seconds per frame
    pub frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 800,
            starting_lives: DEFAULT_LIVES,
            seed: 1,
            initial_speed: MIN_SPEED,
            frame_dt: FRAME_DT,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, StartupError> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };

        let display = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|source| StartupError::ConfigRead {
            path: display.clone(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| StartupError::ConfigParse {
            path: display.clone(),
            source,
        })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", display);
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Starting lives without asking: the override if given, else `starting_lives`
    pub fn resolve_lives(&self, lives: Option<i32>) -> Result<i32, StartupError> {
        let lives = lives.unwrap_or(self.starting_lives);
        if lives <= 0 {
            return Err(StartupError::NonPositiveLives(lives));
        }
        Ok(lives)
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(StartupError::InvalidConfig(format!(
                "window size {}x{} must be non-zero",
                self.window_width, self.window_height
            )));
        }
        if self.starting_lives <= 0 {
            return Err(StartupError::NonPositiveLives(self.starting_lives));
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.initial_speed) {
            return Err(StartupError::InvalidConfig(format!(
                "initial_speed {} outside [{MIN_SPEED}, {MAX_SPEED}]",
                self.initial_speed
            )));
        }
        if !(self.frame_dt > 0.0 && self.frame_dt.is_finite()) {
            return Err(StartupError::InvalidConfig(format!(
                "frame_dt {} must be positive",
                self.frame_dt
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.starting_lives, 5);
        assert_eq!(settings.window_width, 800);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 77, "initial_speed": 3.0 }"#).unwrap();
        assert_eq!(settings.seed, 77);
        assert_eq!(settings.initial_speed, 3.0);
        assert_eq!(settings.window_height, 800);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 9,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_speed = Settings {
            initial_speed: 11.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_speed.validate(),
            Err(StartupError::InvalidConfig(_))
        ));

        let bad_lives = Settings {
            starting_lives: 0,
            ..Default::default()
        };
        assert!(matches!(
            bad_lives.validate(),
            Err(StartupError::NonPositiveLives(0))
        ));
    }

    #[test]
    fn test_resolve_lives_prefers_override() {
        let settings = Settings::from_json(r#"{ "starting_lives": 7 }"#).unwrap();
        assert_eq!(settings.resolve_lives(None).unwrap(), 7);
        assert_eq!(settings.resolve_lives(Some(2)).unwrap(), 2);
        assert!(matches!(
            settings.resolve_lives(Some(-1)),
            Err(StartupError::NonPositiveLives(-1))
        ));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = Settings::load(Some(Path::new("/nonexistent/brick-breaker.json"))).unwrap_err();
        assert!(matches!(err, StartupError::ConfigRead { .. }));
    }
}

//! Game settings and preferences
//!
//! Stored as JSON by the binary. The library only converts to and from strings.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SENSITIVITY, MIN_SENSITIVITY};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Controls ===
    /// Mouse look sensitivity (degrees per pixel), clamped to [0.01, 1.0]
    pub mouse_sensitivity: f64,

    // === Gameplay ===
    /// Player health at spawn
    pub max_health: f64,
    /// Seconds between death and respawn
    pub respawn_delay: f64,
    /// Fixed run seed; a fresh one is picked when absent
    pub seed: Option<u64>,

    // === Display ===
    pub screen_width: u32,
    pub screen_height: u32,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.2,

            max_health: 100.0,
            respawn_delay: 10.0,
            seed: None,

            screen_width: 800,
            screen_height: 600,
            show_fps: true,
        }
    }
}

impl Settings {
    pub fn set_mouse_sensitivity(&mut self, sensitivity: f64) {
        self.mouse_sensitivity = sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY);
    }

    /// Nudge sensitivity by `delta`, keeping it in range
    pub fn adjust_mouse_sensitivity(&mut self, delta: f64) {
        self.set_mouse_sensitivity(self.mouse_sensitivity + delta);
    }

    /// Copy with out-of-range values pulled back into range
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut settings = self.clone();

        settings.set_mouse_sensitivity(if self.mouse_sensitivity.is_finite() {
            self.mouse_sensitivity
        } else {
            defaults.mouse_sensitivity
        });
        if !(self.max_health.is_finite() && self.max_health > 0.0) {
            settings.max_health = defaults.max_health;
        }
        settings.respawn_delay = if self.respawn_delay.is_finite() {
            self.respawn_delay.max(0.0)
        } else {
            defaults.respawn_delay
        };
        if self.screen_width == 0 || self.screen_height == 0 {
            settings.screen_width = defaults.screen_width;
            settings.screen_height = defaults.screen_height;
        }
        settings
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(|s| s.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse settings, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mouse_sensitivity, 0.2);
        assert_eq!(settings.max_health, 100.0);
        assert_eq!(settings.respawn_delay, 10.0);
        assert_eq!((settings.screen_width, settings.screen_height), (800, 600));
        assert!(settings.show_fps);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_sensitivity_clamped() {
        let mut settings = Settings::default();
        settings.set_mouse_sensitivity(3.0);
        assert_eq!(settings.mouse_sensitivity, 1.0);
        settings.set_mouse_sensitivity(0.0);
        assert_eq!(settings.mouse_sensitivity, 0.01);

        settings.set_mouse_sensitivity(0.2);
        settings.adjust_mouse_sensitivity(0.05);
        assert!((settings.mouse_sensitivity - 0.25).abs() < 1e-12);
        for _ in 0..10 {
            settings.adjust_mouse_sensitivity(-0.05);
        }
        assert_eq!(settings.mouse_sensitivity, 0.01);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "mouse_sensitivity": 0.5, "seed": 7 }"#).unwrap();
        assert_eq!(settings.mouse_sensitivity, 0.5);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.max_health, 100.0);
    }

    #[test]
    fn test_out_of_range_values_sanitized() {
        let settings = Settings::from_json(
            r#"{ "mouse_sensitivity": 9.0, "max_health": -5.0, "respawn_delay": -1.0 }"#,
        )
        .unwrap();
        assert_eq!(settings.mouse_sensitivity, 1.0);
        assert_eq!(settings.max_health, 100.0);
        assert_eq!(settings.respawn_delay, 0.0);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert!(Settings::from_json("{ not json").is_err());
        assert_eq!(Settings::from_json_or_default("{ not json"), Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.set_mouse_sensitivity(0.35);
        settings.seed = Some(1234);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}

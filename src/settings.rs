//! Game settings and preferences
//!
//! Persisted as JSON: a file on native builds, LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Grid;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 120,
            QualityPreset::Medium => 500,
            QualityPreset::High => 4000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Snake speed in cells per second (clamped to 3..=24 on use)
    pub speed: u32,
    /// Grid width in cells
    pub columns: i32,
    /// Grid height in cells
    pub rows: i32,
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle bursts on food consumption
    pub particles: bool,
    /// Fixed session seed (random per session when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            columns: GRID_COLUMNS,
            rows: GRID_ROWS,
            quality: QualityPreset::Medium,
            particles: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Smallest grid side that fits the starting snake with room to turn
    pub const MIN_GRID: i32 = 6;
    pub const MAX_GRID: i32 = 128;

    /// Speed clamped to the supported range
    pub fn effective_speed(&self) -> u32 {
        crate::clamp_speed(self.speed)
    }

    /// Milliseconds per simulation tick
    pub fn tick_interval_ms(&self) -> f32 {
        crate::tick_interval_ms(self.speed)
    }

    /// Grid with dimensions clamped to the supported range
    pub fn grid(&self) -> Grid {
        Grid::new(
            self.columns.clamp(Self::MIN_GRID, Self::MAX_GRID),
            self.rows.clamp(Self::MIN_GRID, Self::MAX_GRID),
        )
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Parse settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snake.settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}, using defaults: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), crate::StoreError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.effective_speed(), DEFAULT_SPEED);
        assert_eq!(settings.grid(), Grid::new(24, 24));
        assert_eq!(settings.max_particles(), 500);
    }

    #[test]
    fn test_speed_clamped() {
        let mut settings = Settings::default();
        settings.speed = 1;
        assert_eq!(settings.effective_speed(), MIN_SPEED);
        settings.speed = 99;
        assert_eq!(settings.effective_speed(), MAX_SPEED);
        assert!((settings.tick_interval_ms() - 1000.0 / 24.0).abs() < 1e-3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "speed": 15, "quality": "High" }"#).unwrap();
        assert_eq!(settings.speed, 15);
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.columns, GRID_COLUMNS);
        assert!(settings.particles);
    }

    #[test]
    fn test_particles_disabled() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_grid_clamped() {
        let settings = Settings {
            columns: 2,
            rows: 1000,
            ..Default::default()
        };
        assert_eq!(settings.grid(), Grid::new(Settings::MIN_GRID, Settings::MAX_GRID));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("snake_settings_{}.json", std::process::id()));
        let settings = Settings {
            speed: 7,
            seed: Some(42),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
        let _ = std::fs::remove_file(&path);
    }
}

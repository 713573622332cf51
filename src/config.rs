//! Simulation tunables, loadable from RON.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a [`SimConfig`] file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Every tunable of a session. Values not present in a config file keep
/// their defaults.
#[derive(Resource, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    // Field
    pub field_width: f32,
    pub field_height: f32,
    pub road_top: f32,
    pub road_bottom: f32,
    /// X coordinate where zombies and civilians enter.
    pub spawn_x: f32,

    // Spawning (per-frame probabilities)
    pub zombie_spawn_chance: f32,
    pub zombie_spawn_chance_per_wave: f32,
    pub civilian_spawn_chance: f32,

    // Economy
    pub starting_money: f64,
    pub wave_bonus: f64,
    pub passive_income_per_wave: f64,
    pub rescue_reward: f64,
    pub civilians_per_wave: u32,

    // City gate
    pub city_health: f64,
    /// Distance from the right edge where zombies stop and besiege the gate.
    pub siege_margin: f32,
    pub siege_damage_per_sec: f64,

    /// Head start before the first tick of simulation.
    pub prep_time: f32,

    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field_width: 1000.0,
            field_height: 600.0,
            road_top: 120.0,
            road_bottom: 480.0,
            spawn_x: -30.0,
            zombie_spawn_chance: 0.025,
            zombie_spawn_chance_per_wave: 0.002,
            civilian_spawn_chance: 0.01,
            starting_money: 500.0,
            wave_bonus: 250.0,
            passive_income_per_wave: 2.5,
            rescue_reward: 40.0,
            civilians_per_wave: 5,
            city_health: 100.0,
            siege_margin: 50.0,
            siege_damage_per_sec: 2.0,
            prep_time: 15.0,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parse a RON document. Missing fields fall back to defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Read and parse a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&contents)
    }

    /// X coordinate past which a zombie is held at the gate.
    #[must_use]
    pub fn siege_line(&self) -> f32 {
        self.field_width - self.siege_margin
    }

    /// Vertical range where zombies and civilians enter the field.
    /// The lower bound is the road top; the upper bound runs past the road.
    #[must_use]
    pub fn spawn_band(&self) -> (f32, f32) {
        (self.road_top, self.field_height - 60.0)
    }

    /// Clamp a y coordinate into the road.
    #[must_use]
    pub fn clamp_to_road(&self, y: f32) -> f32 {
        y.clamp(self.road_top, self.road_bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_yields_defaults() {
        let config = SimConfig::from_ron_str("()").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn partial_document_overrides_named_fields() {
        let config = SimConfig::from_ron_str("(prep_time: 0.0, seed: Some(7))").unwrap();
        assert_eq!(config.prep_time, 0.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.starting_money, 500.0);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = SimConfig::from_ron_str("(prep_time: \"soon\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SimConfig::load("does/not/exist.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn siege_line_is_margin_from_right_edge() {
        assert_eq!(SimConfig::default().siege_line(), 950.0);
    }

    #[test]
    fn road_clamp_respects_band() {
        let config = SimConfig::default();
        assert_eq!(config.clamp_to_road(50.0), 120.0);
        assert_eq!(config.clamp_to_road(300.0), 300.0);
        assert_eq!(config.clamp_to_road(590.0), 480.0);
    }
}

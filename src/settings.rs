//! Game settings and preferences
//!
//! Persisted as JSON next to the ranking. Unknown or missing fields fall back
//! to their defaults so older files keep loading.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_PARTICLES;
use crate::persistence::{self, PersistError};
use crate::sim::GameState;

/// Pacing presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Base enemy spawn interval in frames
    pub fn base_spawn_interval(&self) -> u32 {
        match self {
            Difficulty::Easy => 55,
            Difficulty::Normal => 45,
            Difficulty::Hard => 35,
        }
    }
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
pub enum QualityPreset {
    Low,
    #[default]
    #[value(alias = "med")]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => MAX_PARTICLES,
            QualityPreset::High => 1000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Feedback ===
    /// Screen shake on explosions/impacts
    pub screen_shake: bool,
    /// Particle effects (explosions, sparks, etc.)
    pub particles: bool,

    // === Audio ===
    /// Background music loop
    pub music_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            quality: QualityPreset::Medium,

            screen_shake: true,
            particles: true,

            music_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Start a run configured by these settings
    pub fn new_game(&self, seed: u64) -> GameState {
        let mut state = GameState::with_spawn_interval(seed, self.difficulty.base_spawn_interval());
        self.apply(&mut state);
        state
    }

    /// Push the cosmetic preferences into an existing run
    pub fn apply(&self, state: &mut GameState) {
        state.particles.set_cap(self.max_particles());
        state.camera.enabled = self.effective_screen_shake();
    }

    /// Load settings from `path`, defaulting when missing or corrupt
    pub fn load(path: &Path) -> Self {
        persistence::load_or_default(path, "settings")
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_paces_spawner() {
        let mut settings = Settings::default();
        settings.difficulty = Difficulty::Hard;
        let state = settings.new_game(1);
        assert_eq!(state.wave.base_spawn_interval, 35);
        assert_eq!(Difficulty::Easy.base_spawn_interval(), 55);
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
        let state = settings.new_game(1);
        assert!(!state.camera.enabled);
    }

    #[test]
    fn test_particles_off_means_zero_cap() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        assert_eq!(settings.max_particles(), 0);
        assert_eq!(settings.new_game(1).particles.cap(), 0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"difficulty":"Easy"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.music_enabled);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Difficulty::from_str("HARD", true), Ok(Difficulty::Hard));
        assert_eq!(QualityPreset::from_str("med", false), Ok(QualityPreset::Medium));
        assert!(Difficulty::from_str("nightmare", true).is_err());
    }
}

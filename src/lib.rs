//! Dodge & Shoot - a frame-stepped arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, combat, waves, boss state machine)
//! - `audio`: Named sound cue sinks fed from per-frame events
//! - `highscores`: Persisted top-N score ranking
//! - `settings`: Player preferences and difficulty
//! - `persistence`: JSON files and their error type

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use persistence::PersistError;
pub use settings::{Difficulty, QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulation frames per second (all velocities are px/frame)
    pub const FRAME_RATE: u32 = 60;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;
    /// Distance outside the playfield before an entity counts as off-bounds
    pub const OFFSCREEN_MARGIN: f32 = 60.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 36.0;
    pub const PLAYER_SPEED: f32 = 5.4;
    pub const PLAYER_MAX_HP: i32 = 5;
    pub const PLAYER_LIVES: u32 = 3;
    /// Frames between shots at weapon tier 1
    pub const PLAYER_FIRE_RATE: u32 = 10;
    pub const MAX_WEAPON_TIER: u8 = 3;
    pub const BOMB_COOLDOWN_TICKS: u32 = FRAME_RATE * 6;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 4.0;

    /// Bomb defaults
    pub const BOMB_FUSE_TICKS: u32 = FRAME_RATE * 2;
    pub const BOMB_MAX_RADIUS: f32 = 140.0;
    pub const BOMB_GROWTH_PER_TICK: f32 = 10.0;
    pub const BOMB_BOSS_DAMAGE: i32 = 10;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 36.0;
    pub const ENEMY_KILL_SCORE: u64 = 12;
    pub const TANK_KILL_SCORE: u64 = 30;
    pub const BOMB_KILL_SCORE: u64 = 8;
    pub const ENEMY_ESCAPE_SCORE: u64 = 2;
    pub const POWERUP_DROP_CHANCE: f64 = 0.28;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 18.0;
    pub const POWERUP_TTL_TICKS: u32 = FRAME_RATE * 8;
    pub const POWERUP_SCORE_BONUS: u64 = 50;

    /// Wave director
    pub const BOSS_SCORE_PER_WAVE: u64 = 2000;
    pub const BOSS_BONUS_PER_WAVE: u64 = 800;
    pub const MINI_BOSS_CHANCE: f64 = 0.35;
    pub const MIN_SPAWN_INTERVAL: u32 = 14;
    pub const MIN_BASE_SPAWN_INTERVAL: u32 = 20;
    /// Score needed to shave one frame off the spawn interval
    pub const SCORE_PER_SPAWN_STEP: u64 = 220;
    pub const BOSS_POWERUP_DROPS: usize = 4;

    /// Missile defaults
    pub const MISSILE_TRAIL_LENGTH: usize = 10;

    /// Feedback
    pub const MAX_PARTICLES: usize = 400;
    pub const STAR_COUNT: usize = 140;
}


//! Wave progression and enemy spawn cadence

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::entities::{Enemy, EnemyKind};
use crate::consts::*;

/// Spawn weights for basic / fast / tank / zigzag
const EARLY_WEIGHTS: [f32; 4] = [0.50, 0.25, 0.15, 0.10];
const LATE_WEIGHTS: [f32; 4] = [0.35, 0.30, 0.20, 0.15];
/// First wave that uses the tougher mix
const LATE_WAVE: u32 = 3;

/// Director state carried across waves
#[derive(Debug, Clone, Serialize)]
pub struct WaveState {
    /// Current wave, starting at 1
    pub wave: u32,
    /// Spawn interval before score scaling; tightens after each boss
    pub base_spawn_interval: u32,
    /// Frames since the last enemy spawn
    pub spawn_timer: u32,
    /// A mini-boss already ran this wave
    pub mini_boss_spawned: bool,
}

impl WaveState {
    pub fn new(base_spawn_interval: u32) -> Self {
        Self {
            wave: 1,
            base_spawn_interval,
            spawn_timer: 0,
            mini_boss_spawned: false,
        }
    }

    /// Current spawn interval: `base - score / 220` truncated, floored at
    /// MIN_SPAWN_INTERVAL. Any partial step already shaves off a frame.
    pub fn spawn_interval(&self, score: u64) -> u32 {
        let step = score
            .div_ceil(SCORE_PER_SPAWN_STEP)
            .min(u32::MAX as u64) as u32;
        self.base_spawn_interval
            .saturating_sub(step)
            .max(MIN_SPAWN_INTERVAL)
    }

    /// Score at which this wave's boss fight starts
    pub fn boss_threshold(&self) -> u64 {
        BOSS_SCORE_PER_WAVE * self.wave as u64
    }

    /// Advance the spawn timer; returns a new enemy when the interval elapses
    pub fn tick_spawner<R: Rng>(&mut self, score: u64, rng: &mut R) -> Option<Enemy> {
        self.spawn_timer += 1;
        if self.spawn_timer < self.spawn_interval(score) {
            return None;
        }
        self.spawn_timer = 0;
        let kind = self.roll_kind(rng);
        let x = rng.random_range(20.0..=SCREEN_WIDTH - 60.0);
        Some(Enemy::new(Vec2::new(x, -40.0), kind))
    }

    /// Weighted enemy kind draw; weights shift toward tougher kinds later on
    pub fn roll_kind<R: Rng>(&self, rng: &mut R) -> EnemyKind {
        let weights = self.kind_weights();
        let total: f32 = weights.iter().sum();
        let mut roll = rng.random::<f32>() * total;
        for (kind, w) in EnemyKind::ALL.iter().zip(weights) {
            if roll < w {
                return *kind;
            }
            roll -= w;
        }
        EnemyKind::Basic
    }

    pub fn kind_weights(&self) -> [f32; 4] {
        if self.wave < LATE_WAVE {
            EARLY_WEIGHTS
        } else {
            LATE_WEIGHTS
        }
    }

    /// Roll whether this boss gate opens with a mini-boss. At most one per wave.
    pub fn roll_mini_boss<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.mini_boss_spawned {
            return false;
        }
        if rng.random_bool(MINI_BOSS_CHANCE) {
            self.mini_boss_spawned = true;
            return true;
        }
        false
    }

    /// Move to the next wave after the main boss falls
    pub fn advance(&mut self) {
        self.wave += 1;
        self.mini_boss_spawned = false;
        self.spawn_timer = 0;
        self.base_spawn_interval = self
            .base_spawn_interval
            .saturating_sub(3)
            .max(MIN_BASE_SPAWN_INTERVAL);
    }
}

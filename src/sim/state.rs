//! Game state and lifecycle
//!
//! `GameState` owns every entity collection plus the cosmetic feedback state.
//! It is the authoritative snapshot handed to renderers after each tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::boss::{Boss, BossKind};
use super::effects::{Camera, ParticleColor, ParticlePool, Starfield};
use super::entities::{Bomb, Enemy, Player, PowerUp, PowerUpKind};
use super::events::{FrameEvents, SoundCue};
use super::wave::WaveState;
use crate::consts::*;

/// Base spawn interval on Normal difficulty
pub const DEFAULT_SPAWN_INTERVAL: u32 = 45;

/// Stream offset for the cosmetic RNG
const FX_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen by the menu layer
    Paused,
    /// Out of lives; nothing advances until reset
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed; reset re-seeds from it
    pub seed: u64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub powerups: Vec<PowerUp>,
    /// At most one boss at a time
    pub boss: Option<Boss>,
    pub wave: WaveState,
    /// Enemies destroyed this run
    pub kills: u64,
    /// Base spawn interval restored on reset
    base_spawn_interval: u32,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticlePool,
    pub camera: Camera,
    pub stars: Starfield,
    /// Gameplay RNG
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    /// Cosmetic RNG, kept apart so effects never perturb gameplay draws
    #[serde(skip)]
    pub(crate) fx_rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed on Normal pacing
    pub fn new(seed: u64) -> Self {
        Self::with_spawn_interval(seed, DEFAULT_SPAWN_INTERVAL)
    }

    /// Create a new game state with a custom base enemy spawn interval
    pub fn with_spawn_interval(seed: u64, base_spawn_interval: u32) -> Self {
        let rng = Pcg32::seed_from_u64(seed);
        let mut fx_rng = Pcg32::seed_from_u64(seed ^ FX_STREAM);
        let stars = Starfield::new(&mut fx_rng);
        Self {
            seed,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player: Player::new(Player::spawn_position()),
            enemies: Vec::new(),
            bombs: Vec::new(),
            powerups: Vec::new(),
            boss: None,
            wave: WaveState::new(base_spawn_interval),
            kills: 0,
            base_spawn_interval,
            particles: ParticlePool::default(),
            camera: Camera::default(),
            stars,
            rng,
            fx_rng,
        }
    }

    /// Start a fresh run: new player, empty collections, wave 1, no boss,
    /// unpaused. Particle cap and camera preference survive.
    pub fn reset(&mut self) {
        let particle_cap = self.particles.cap();
        let camera_enabled = self.camera.enabled;
        *self = Self::with_spawn_interval(self.seed, self.base_spawn_interval);
        self.particles.set_cap(particle_cap);
        self.camera.enabled = camera_enabled;
        log::info!("Run reset (seed {})", self.seed);
    }

    /// Menu layer hook; has no effect once the run is over
    pub fn set_paused(&mut self, paused: bool) {
        self.phase = match (self.phase, paused) {
            (GamePhase::GameOver, _) => GamePhase::GameOver,
            (_, true) => GamePhase::Paused,
            (_, false) => GamePhase::Playing,
        };
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_boss_fight(&self) -> bool {
        self.boss.is_some()
    }

    /// Begin a boss fight, clearing every regular entity
    pub fn start_boss_fight(&mut self, kind: BossKind, events: &mut FrameEvents) {
        self.enemies.clear();
        self.player.projectiles.clear();
        self.bombs.clear();
        self.powerups.clear();
        let boss = Boss::new(self.wave.wave, kind);
        log::info!(
            "Wave {}: {:?} boss incoming ({} hp)",
            self.wave.wave,
            kind,
            boss.max_hp
        );
        self.boss = Some(boss);
        events.boss_spawned = Some(kind);
    }

    /// Drop a power-up of a random kind at `pos`
    pub fn spawn_powerup(&mut self, pos: Vec2) {
        let kind = PowerUpKind::roll(&mut self.rng);
        self.powerups.push(PowerUp::new(pos, kind));
    }

    /// Drop `count` power-ups at random positions inside the playfield
    pub fn scatter_powerups(&mut self, count: usize) {
        for _ in 0..count {
            let pos = Vec2::new(
                self.rng.random_range(80.0..=SCREEN_WIDTH - 80.0),
                self.rng.random_range(120.0..=SCREEN_HEIGHT - 120.0),
            );
            self.spawn_powerup(pos);
        }
    }

    /// Add to the score and report it
    pub fn award(&mut self, points: u64, events: &mut FrameEvents) {
        self.player.score += points;
        events.score_delta += points;
    }

    /// Take `amount` hp from the player and run the lives cascade.
    ///
    /// Reaching zero hp costs a life and refills hp in place; losing the last
    /// life ends the run. Damage after game over is ignored.
    pub fn damage_player(&mut self, amount: i32, events: &mut FrameEvents) {
        if self.is_game_over() {
            return;
        }
        let player = &mut self.player;
        player.hp = (player.hp - amount).max(0);
        if player.hp > 0 {
            return;
        }
        player.lives = player.lives.saturating_sub(1);
        events.life_lost = true;
        if player.lives > 0 {
            player.hp = player.max_hp;
            log::debug!("Life lost, {} remaining", player.lives);
        } else {
            self.phase = GamePhase::GameOver;
            events.game_over = true;
            log::info!(
                "Game over on wave {} with {} points",
                self.wave.wave,
                player.score
            );
        }
    }

    /// Burst of particles at `pos`
    pub fn burst(&mut self, pos: Vec2, count: usize, color: ParticleColor) {
        self.particles
            .emit_explosion(&mut self.fx_rng, pos, count, color);
    }

    /// Shake the camera and report the request
    pub fn shake(&mut self, duration: u32, magnitude: f32, events: &mut FrameEvents) {
        self.camera.shake(duration, magnitude);
        events.request_shake(duration, magnitude);
    }

    /// Handle a boss that reached zero hp this tick. Runs exactly once per boss
    /// because the boss is taken out of the state here.
    ///
    /// Mini and main bosses pay out the same way: wave bonus, next wave, a batch
    /// of power-ups and a ranking entry.
    pub fn resolve_boss_defeat(&mut self, events: &mut FrameEvents) {
        let Some(boss) = self.boss.take_if(|b| !b.is_alive()) else {
            return;
        };
        let wave = self.wave.wave as u64;
        self.award(BOSS_BONUS_PER_WAVE * wave, events);
        self.wave.advance();
        self.scatter_powerups(BOSS_POWERUP_DROPS);
        events.boss_defeated = true;
        events.mini_boss_defeated = boss.is_mini();
        events.wave_advanced = Some(self.wave.wave);
        events.record_score = Some(self.player.score);
        log::info!(
            "{:?} boss down! Advancing to wave {} ({} points)",
            boss.kind,
            self.wave.wave,
            self.player.score
        );
    }

    /// Emit the standard "player got hit" feedback
    pub(crate) fn player_hit_feedback(
        &mut self,
        duration: u32,
        magnitude: f32,
        events: &mut FrameEvents,
    ) {
        self.shake(duration, magnitude, events);
        events.cue(SoundCue::Hit);
    }
}

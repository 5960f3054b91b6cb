//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Seeded RNG only
//! - Stable iteration order (insertion order, removal by compaction)
//! - No rendering, audio or file I/O; side effects leave as `FrameEvents`

pub mod boss;
pub mod collision;
pub mod effects;
pub mod entities;
pub mod events;
pub mod state;
pub mod tick;
pub mod wave;

pub use boss::{Boss, BossKind, BossStage, DamageOutcome, Missile, phase_for};
pub use collision::{Aabb, is_off_bounds};
pub use effects::{Camera, Particle, ParticleColor, ParticlePool, Star, Starfield};
pub use entities::{Bomb, Enemy, EnemyKind, Player, PowerUp, PowerUpKind, Projectile};
pub use events::{FrameEvents, ShakeRequest, SoundCue};
pub use state::{DEFAULT_SPAWN_INTERVAL, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use wave::WaveState;

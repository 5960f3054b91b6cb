//! Player, projectiles, bombs, enemies and power-ups
//!
//! Positions are top-left corners for box-shaped entities (player, enemy,
//! power-up) and centers for round ones (projectile, bomb). Velocities are
//! pixels per frame.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::collision::{Aabb, is_off_bounds};
use crate::consts::*;

/// The player's ship
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub lives: u32,
    pub score: u64,
    /// Weapon tier in [1, MAX_WEAPON_TIER]
    pub weapon_tier: u8,
    /// Frames between tier-1 shots
    pub fire_rate: u32,
    /// Frames until the next shot is allowed
    pub fire_cooldown: u32,
    /// Frames until the next bomb is allowed
    pub bomb_cooldown: u32,
    pub projectiles: Vec<Projectile>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_SPEED,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            lives: PLAYER_LIVES,
            score: 0,
            weapon_tier: 1,
            fire_rate: PLAYER_FIRE_RATE,
            fire_cooldown: 0,
            bomb_cooldown: 0,
            projectiles: Vec::new(),
        }
    }

    /// Spawn point: horizontally centered, near the bottom
    pub fn spawn_position() -> Vec2 {
        Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 150.0)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(self.pos, self.size)
    }

    /// Move by a movement intent; diagonals are normalized and the ship stays
    /// inside the playfield
    pub fn apply_movement(&mut self, intent: Vec2) {
        let intent = if intent.length_squared() > 1.0 {
            intent.normalize()
        } else {
            intent
        };
        self.pos += intent * self.speed;
        self.pos.x = self.pos.x.clamp(0.0, SCREEN_WIDTH - self.size.x);
        self.pos.y = self.pos.y.clamp(0.0, SCREEN_HEIGHT - self.size.y);
    }

    /// Fire toward `target` if the cooldown allows. Returns true if shots were fired.
    pub fn shoot<R: Rng>(&mut self, target: Vec2, rng: &mut R) -> bool {
        if self.fire_cooldown > 0 {
            return false;
        }
        let origin = self.center();
        let to_target = target - origin;
        let aim = to_target.y.atan2(to_target.x);

        match self.weapon_tier {
            1 => {
                self.projectiles.push(Projectile::new(origin, aim, 10.0, 1));
                self.fire_cooldown = self.fire_rate;
            }
            2 => {
                for offset_deg in [-6.0f32, 0.0, 6.0] {
                    let angle = aim + offset_deg.to_radians();
                    self.projectiles.push(Projectile::new(origin, angle, 11.0, 1));
                }
                self.fire_cooldown = self.fire_rate.saturating_sub(2).max(6);
            }
            _ => {
                for _ in 0..5 {
                    let spread = rng.random_range(-10.0f32..=10.0).to_radians();
                    self.projectiles
                        .push(Projectile::new(origin, aim + spread, 12.0, 1));
                }
                self.fire_cooldown = self.fire_rate.saturating_sub(4).max(4);
            }
        }
        true
    }

    /// Arm a bomb at the ship's center if the bomb cooldown allows
    pub fn drop_bomb(&mut self) -> Option<Bomb> {
        if self.bomb_cooldown > 0 {
            return None;
        }
        self.bomb_cooldown = BOMB_COOLDOWN_TICKS;
        Some(Bomb::new(self.center()))
    }

    /// Raise the weapon tier by one, capped. Returns true if the tier changed.
    pub fn upgrade_weapon(&mut self) -> bool {
        if self.weapon_tier >= MAX_WEAPON_TIER {
            return false;
        }
        self.weapon_tier += 1;
        true
    }

    /// Tick cooldowns and move projectiles, dropping those that left the field
    pub fn advance(&mut self) {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.bomb_cooldown = self.bomb_cooldown.saturating_sub(1);
        for p in self.projectiles.iter_mut() {
            p.advance();
        }
        self.projectiles.retain(|p| !p.is_off());
    }
}

/// Player bullet
#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: i32,
}

impl Projectile {
    pub fn new(pos: Vec2, angle: f32, speed: f32, damage: i32) -> Self {
        Self {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            radius: PROJECTILE_RADIUS,
            damage,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.radius))
    }

    pub fn is_off(&self) -> bool {
        is_off_bounds(self.pos)
    }
}

/// What a bomb's [`Bomb::advance`] call did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombStep {
    /// Still counting down or still growing
    Idle,
    /// Fuse ran out this frame
    Detonated,
}

/// Timed area bomb
#[derive(Debug, Clone, Serialize)]
pub struct Bomb {
    /// Center
    pub pos: Vec2,
    /// Frames until detonation
    pub fuse: u32,
    pub exploded: bool,
    pub radius: f32,
    pub max_radius: f32,
    /// The blast already hurt the player
    pub hit_player: bool,
    /// The blast already hurt the boss
    pub hit_boss: bool,
}

impl Bomb {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            fuse: BOMB_FUSE_TICKS,
            exploded: false,
            radius: 0.0,
            max_radius: BOMB_MAX_RADIUS,
            hit_player: false,
            hit_boss: false,
        }
    }

    /// The fuse counts down to zero and detonates on the following frame, so a
    /// bomb created on frame T goes off on frame T + fuse.
    pub fn advance(&mut self) -> BombStep {
        if !self.exploded {
            if self.fuse == 0 {
                self.exploded = true;
                return BombStep::Detonated;
            }
            self.fuse -= 1;
        } else if self.radius < self.max_radius {
            self.radius = (self.radius + BOMB_GROWTH_PER_TICK).min(self.max_radius);
        }
        BombStep::Idle
    }

    /// Blast region; `None` while armed
    pub fn blast(&self) -> Option<Aabb> {
        self.exploded
            .then(|| Aabb::from_center(self.pos, Vec2::splat(self.radius)))
    }

    pub fn is_finished(&self) -> bool {
        self.exploded && self.radius >= self.max_radius
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    Zigzag,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Zigzag,
    ];

    pub fn hp(&self) -> i32 {
        match self {
            EnemyKind::Basic => 2,
            EnemyKind::Fast => 1,
            EnemyKind::Tank => 5,
            EnemyKind::Zigzag => 3,
        }
    }

    pub fn speed(&self) -> f32 {
        match self {
            EnemyKind::Basic => 2.2,
            EnemyKind::Fast => 3.6,
            EnemyKind::Tank => 1.0,
            EnemyKind::Zigzag => 2.0,
        }
    }

    /// Score for shooting one down
    pub fn bounty(&self) -> u64 {
        match self {
            EnemyKind::Tank => TANK_KILL_SCORE,
            _ => ENEMY_KILL_SCORE,
        }
    }
}

/// A descending enemy
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EnemyKind,
    pub hp: i32,
    /// Frame counter driving zigzag drift
    pub drift_phase: u32,
}

impl Enemy {
    pub fn new(pos: Vec2, kind: EnemyKind) -> Self {
        Self {
            pos,
            size: Vec2::splat(ENEMY_SIZE),
            kind,
            hp: kind.hp(),
            drift_phase: 0,
        }
    }

    pub fn advance(&mut self) {
        if self.kind == EnemyKind::Zigzag {
            self.pos.x += (self.drift_phase as f32 / 6.0).sin() * 2.6;
            self.drift_phase += 1;
        }
        self.pos.y += self.kind.speed();
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(self.pos, self.size)
    }

    /// Slipped past the bottom of the playfield
    pub fn escaped(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT + OFFSCREEN_MARGIN
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PowerUpKind {
    Score,
    Life,
    Weapon,
}

impl PowerUpKind {
    /// Weighted draw: score 60%, life 15%, weapon 25%
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        let roll = rng.random::<f32>();
        if roll < 0.60 {
            PowerUpKind::Score
        } else if roll < 0.75 {
            PowerUpKind::Life
        } else {
            PowerUpKind::Weapon
        }
    }
}

/// A pickup waiting to be collected
#[derive(Debug, Clone, Serialize)]
pub struct PowerUp {
    /// Top-left corner
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub ttl_ticks: u32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            ttl_ticks: POWERUP_TTL_TICKS,
        }
    }

    pub fn advance(&mut self) {
        self.ttl_ticks = self.ttl_ticks.saturating_sub(1);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(self.pos, Vec2::splat(POWERUP_SIZE))
    }

    pub fn expired(&self) -> bool {
        self.ttl_ticks == 0
    }
}

//! Boss entity and its phase-based attack state machine
//!
//! A boss descends into view (`Entering`), then fights (`Active`) with one of
//! three attack patterns picked from its remaining health. Mini-bosses use a
//! single pattern. Once health reaches zero the boss is `Defeated` and never
//! fires again.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::collision::{Aabb, is_off_bounds};
use crate::consts::{FRAME_RATE, MISSILE_TRAIL_LENGTH, SCREEN_WIDTH};

/// Attack cadence per phase, in active ticks
pub const PHASE0_INTERVAL: u32 = 80;
pub const PHASE1_INTERVAL: u32 = 52;
pub const PHASE2_INTERVAL: u32 = 10;
pub const MINI_INTERVAL: u32 = 36;

/// Fan offsets for the phase-1 volley (degrees)
const FAN_ANGLES_DEG: [f32; 5] = [-25.0, -10.0, 0.0, 10.0, 25.0];

/// Horizontal sway speed (px/frame at full amplitude)
const SWAY_AMPLITUDE: f32 = 0.9;

/// Main boss or the cheaper mini variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BossKind {
    Main,
    Mini,
}

/// Lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BossStage {
    Entering,
    Active,
    Defeated,
}

/// Attack phase from remaining health: >66% is 0, >33% is 1, otherwise 2
pub fn phase_for(hp: i32, max_hp: i32) -> u8 {
    if max_hp <= 0 {
        return 2;
    }
    let pct = hp as f32 / max_hp as f32;
    if pct > 0.66 {
        0
    } else if pct > 0.33 {
        1
    } else {
        2
    }
}

/// Result of [`Boss::take_damage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Boss was already down; nothing happened
    Ignored,
    Hurt,
    Killed,
}

/// A homing-at-launch missile fired by the boss
#[derive(Debug, Clone, Serialize)]
pub struct Missile {
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    /// Previous positions, newest first
    pub trail: VecDeque<Vec2>,
}

impl Missile {
    /// Launch from `origin` toward `target` at `speed` px/frame
    pub fn new(origin: Vec2, target: Vec2, speed: f32) -> Self {
        let dir = target - origin;
        let dir = if dir.length_squared() > 0.0 {
            dir.normalize()
        } else {
            // Degenerate aim falls straight down
            Vec2::Y
        };
        Self {
            pos: origin,
            vel: dir * speed,
            trail: VecDeque::with_capacity(MISSILE_TRAIL_LENGTH),
        }
    }

    pub fn advance(&mut self) {
        self.trail.push_front(self.pos);
        self.trail.truncate(MISSILE_TRAIL_LENGTH);
        self.pos += self.vel;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::new(6.0, 8.0))
    }

    pub fn is_off(&self) -> bool {
        is_off_bounds(self.pos)
    }
}

/// The boss
#[derive(Debug, Clone, Serialize)]
pub struct Boss {
    pub kind: BossKind,
    /// Wave level the boss was spawned for
    pub level: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub target_y: f32,
    pub entry_speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub stage: BossStage,
    /// Active ticks since the fight started
    pub attack_timer: u32,
    pub missiles: Vec<Missile>,
}

impl Boss {
    pub fn new(level: u32, kind: BossKind) -> Self {
        let level = level.max(1);
        let (size, target_y, entry_speed, max_hp) = match kind {
            BossKind::Main => (
                Vec2::new(200.0, 110.0),
                60.0,
                2.4,
                180 + (level as i32 - 1) * 70,
            ),
            BossKind::Mini => (
                Vec2::new(120.0, 70.0),
                140.0,
                2.0,
                80 + (level as i32 - 1) * 30,
            ),
        };
        Self {
            kind,
            level,
            pos: Vec2::new(SCREEN_WIDTH / 2.0 - size.x / 2.0, -size.y - 20.0),
            size,
            target_y,
            entry_speed,
            hp: max_hp,
            max_hp,
            stage: BossStage::Entering,
            attack_timer: 0,
            missiles: Vec::new(),
        }
    }

    pub fn is_mini(&self) -> bool {
        self.kind == BossKind::Mini
    }

    pub fn is_alive(&self) -> bool {
        self.stage != BossStage::Defeated
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Current attack phase (mini-bosses report phase 0)
    pub fn phase(&self) -> u8 {
        if self.is_mini() {
            0
        } else {
            phase_for(self.hp, self.max_hp)
        }
    }

    /// Ticks between volleys in the current phase
    pub fn fire_interval(&self) -> u32 {
        if self.is_mini() {
            return MINI_INTERVAL;
        }
        match self.phase() {
            0 => PHASE0_INTERVAL,
            1 => PHASE1_INTERVAL,
            _ => PHASE2_INTERVAL,
        }
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp.max(0) as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }

    /// Apply damage; health never goes below zero
    pub fn take_damage(&mut self, dmg: i32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }
        self.hp = (self.hp - dmg).max(0);
        if self.hp == 0 {
            self.stage = BossStage::Defeated;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt
        }
    }

    /// Move missiles and drop the ones that left the field
    pub fn advance_missiles(&mut self) {
        for m in self.missiles.iter_mut() {
            m.advance();
        }
        self.missiles.retain(|m| !m.is_off());
    }

    /// One state machine step: descend, or sway and fire.
    ///
    /// `player_center` is the aim point, `time_ticks` the simulation clock used
    /// to seed the sway. Returns the number of missiles launched.
    pub fn step<R: Rng>(&mut self, player_center: Vec2, time_ticks: u64, rng: &mut R) -> usize {
        match self.stage {
            BossStage::Entering => {
                self.pos.y += self.entry_speed;
                if self.pos.y >= self.target_y {
                    self.stage = BossStage::Active;
                    self.attack_timer = 0;
                }
                0
            }
            BossStage::Active => {
                self.attack_timer += 1;

                let t = time_ticks as f32 / FRAME_RATE as f32;
                self.pos.x += (t + self.level as f32).sin() * SWAY_AMPLITUDE;
                self.pos.x = self.pos.x.clamp(0.0, SCREEN_WIDTH - self.size.x);

                if self.attack_timer % self.fire_interval() != 0 {
                    return 0;
                }
                let before = self.missiles.len();
                self.fire(player_center, rng);
                self.missiles.len() - before
            }
            BossStage::Defeated => 0,
        }
    }

    fn fire<R: Rng>(&mut self, player_center: Vec2, rng: &mut R) {
        let muzzle = Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y);

        if self.is_mini() {
            self.missiles.push(Missile::new(muzzle, player_center, 5.0));
            return;
        }

        match self.phase() {
            0 => {
                self.missiles.push(Missile::new(muzzle, player_center, 4.0));
            }
            1 => {
                for deg in FAN_ANGLES_DEG {
                    let a = deg.to_radians();
                    let target = player_center + Vec2::new(a.sin(), a.cos()) * 200.0;
                    self.missiles.push(Missile::new(muzzle, target, 5.0));
                }
            }
            _ => {
                let jitter = rng.random_range(-0.5f32..=0.5);
                let target = player_center + Vec2::new(jitter.sin(), jitter.cos()) * 120.0;
                let inset = rng.random_range(20.0..=(self.size.x - 20.0).max(20.0));
                let origin = Vec2::new(self.pos.x + inset, self.pos.y + self.size.y);
                self.missiles.push(Missile::new(origin, target, 6.0));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn active_boss(kind: BossKind) -> Boss {
        let mut boss = Boss::new(1, kind);
        boss.pos.y = boss.target_y;
        boss.stage = BossStage::Active;
        boss
    }

    #[test]
    fn test_phase_thresholds() {
        assert_eq!(phase_for(100, 100), 0);
        assert_eq!(phase_for(67, 100), 0);
        assert_eq!(phase_for(66, 100), 1);
        assert_eq!(phase_for(34, 100), 1);
        assert_eq!(phase_for(33, 100), 2);
        assert_eq!(phase_for(32, 100), 2);
        assert_eq!(phase_for(0, 100), 2);
    }

    #[test]
    fn test_stats_scale_with_level() {
        assert_eq!(Boss::new(1, BossKind::Main).max_hp, 180);
        assert_eq!(Boss::new(3, BossKind::Main).max_hp, 320);
        assert_eq!(Boss::new(1, BossKind::Mini).max_hp, 80);
        assert_eq!(Boss::new(2, BossKind::Mini).max_hp, 110);
    }

    #[test]
    fn test_entering_then_active() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut boss = Boss::new(1, BossKind::Main);
        assert_eq!(boss.stage, BossStage::Entering);
        let mut ticks = 0;
        while boss.stage == BossStage::Entering {
            boss.step(Vec2::new(500.0, 600.0), ticks, &mut rng);
            ticks += 1;
            assert!(ticks < 200, "boss never arrived");
        }
        assert!(boss.pos.y >= boss.target_y);
        assert_eq!(boss.attack_timer, 0);
        assert!(boss.missiles.is_empty());
    }

    #[test]
    fn test_phase0_cadence() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut boss = active_boss(BossKind::Main);
        let mut fired_at = Vec::new();
        for t in 0..PHASE0_INTERVAL * 2 {
            if boss.step(Vec2::new(500.0, 600.0), t as u64, &mut rng) > 0 {
                fired_at.push(boss.attack_timer);
            }
        }
        assert_eq!(fired_at, vec![PHASE0_INTERVAL, PHASE0_INTERVAL * 2]);
        assert_eq!(boss.missiles.len(), 2);
    }

    #[test]
    fn test_phase1_fires_fan_of_five() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut boss = active_boss(BossKind::Main);
        boss.hp = boss.max_hp / 2;
        boss.attack_timer = PHASE1_INTERVAL - 1;
        assert_eq!(boss.step(Vec2::new(500.0, 600.0), 0, &mut rng), 5);
    }

    #[test]
    fn test_phase2_rapid_fire() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut boss = active_boss(BossKind::Main);
        boss.hp = 10;
        let mut launched = 0;
        for t in 0..PHASE2_INTERVAL * 5 {
            if boss.step(Vec2::new(500.0, 600.0), t as u64, &mut rng) > 0 {
                launched += 1;
                // Spawned along the underside, inset from the edges
                let origin = boss.missiles.last().unwrap().pos;
                assert!(origin.x >= boss.pos.x + 20.0 && origin.x <= boss.pos.x + boss.size.x - 20.0);
                assert_eq!(origin.y, boss.pos.y + boss.size.y);
            }
        }
        assert_eq!(launched, 5);
    }

    #[test]
    fn test_mini_ignores_health() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut boss = active_boss(BossKind::Mini);
        boss.hp = 1;
        assert_eq!(boss.fire_interval(), MINI_INTERVAL);
        boss.attack_timer = MINI_INTERVAL - 1;
        assert_eq!(boss.step(Vec2::new(500.0, 600.0), 0, &mut rng), 1);
    }

    #[test]
    fn test_defeat_is_terminal() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut boss = active_boss(BossKind::Main);
        assert_eq!(boss.take_damage(1), DamageOutcome::Hurt);
        assert_eq!(boss.take_damage(1000), DamageOutcome::Killed);
        assert_eq!(boss.hp, 0);
        assert_eq!(boss.take_damage(1), DamageOutcome::Ignored);
        for t in 0..500 {
            assert_eq!(boss.step(Vec2::new(500.0, 600.0), t, &mut rng), 0);
        }
        assert!(boss.missiles.is_empty());
    }

    #[test]
    fn test_sway_stays_in_playfield() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut boss = active_boss(BossKind::Main);
        boss.pos.x = 0.0;
        for t in 0..5000 {
            boss.step(Vec2::new(500.0, 600.0), t, &mut rng);
            assert!(boss.pos.x >= 0.0 && boss.pos.x <= SCREEN_WIDTH - boss.size.x);
        }
    }

    #[test]
    fn test_missile_trail_bounded_newest_first() {
        let mut m = Missile::new(Vec2::ZERO, Vec2::new(0.0, 100.0), 4.0);
        for _ in 0..25 {
            m.advance();
        }
        assert_eq!(m.trail.len(), MISSILE_TRAIL_LENGTH);
        assert!(m.trail[0].y > m.trail[1].y);
        assert!((m.trail[0].y - (m.pos.y - 4.0)).abs() < 1e-4);
    }

    #[test]
    fn test_missiles_pruned_past_margin() {
        use crate::consts::{OFFSCREEN_MARGIN, SCREEN_HEIGHT};

        let mut boss = active_boss(BossKind::Main);
        let edge = SCREEN_HEIGHT + OFFSCREEN_MARGIN;
        let leaving = Vec2::new(500.0, edge - 5.0);
        boss.missiles.push(Missile::new(leaving, leaving + Vec2::Y, 4.0));
        let staying = Vec2::new(500.0, 300.0);
        boss.missiles.push(Missile::new(staying, staying + Vec2::Y, 4.0));

        // One step lands at edge - 1, still inside the margin
        boss.advance_missiles();
        assert_eq!(boss.missiles.len(), 2);

        boss.advance_missiles();
        assert_eq!(boss.missiles.len(), 1);
        assert!(boss.missiles[0].pos.y < SCREEN_HEIGHT);
    }
}

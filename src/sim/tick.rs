//! Fixed-step simulation tick
//!
//! Per frame: input → player → kinematics → combat → wave director → boss
//! state machine → pruning → cosmetic decay. Each combat pass finishes (and
//! compacts its lists) before the next one starts, so an entity removed in one
//! pass is never seen by a later one and nothing is visited twice.

use glam::Vec2;
use rand::Rng;

use super::boss::{BossKind, DamageOutcome};
use super::collision::Aabb;
use super::effects::ParticleColor;
use super::entities::{BombStep, EnemyKind, PowerUpKind};
use super::events::{FrameEvents, SoundCue};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Star scroll speeds
const STAR_SPEED_BOSS: f32 = 1.6;
const STAR_SPEED_NORMAL: f32 = 0.9;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent on two signed axes (normalized if longer than 1)
    pub movement: Vec2,
    /// Aim point in playfield coordinates
    pub aim: Vec2,
    /// Fire trigger (edge)
    pub fire: bool,
    /// Bomb trigger (edge)
    pub bomb: bool,
    /// Pause toggle from the menu layer
    pub pause: bool,
    /// Demo mode - the ship flies itself
    pub autopilot: bool,
}

impl GameState {
    /// Advance one frame; see [`tick`]
    pub fn update(&mut self, input: &TickInput) -> FrameEvents {
        tick(self, input)
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> FrameEvents {
    let mut events = FrameEvents::default();

    if input.pause {
        match state.phase {
            GamePhase::Playing => state.phase = GamePhase::Paused,
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    let input = if input.autopilot {
        autopilot_input(state)
    } else {
        input.clone()
    };

    apply_input(state, &input, &mut events);
    advance_entities(state, &mut events);

    resolve_combat(state, &mut events);
    if state.is_game_over() {
        return events;
    }

    direct_waves(state, &mut events);
    step_boss(state);
    prune(state);
    update_feedback(state);

    events
}

fn apply_input(state: &mut GameState, input: &TickInput, events: &mut FrameEvents) {
    state.player.apply_movement(input.movement);

    if input.fire && state.player.shoot(input.aim, &mut state.rng) {
        events.cue(SoundCue::Shoot);
    }

    if input.bomb {
        if let Some(bomb) = state.player.drop_bomb() {
            log::debug!("Bomb armed at ({:.0}, {:.0})", bomb.pos.x, bomb.pos.y);
            state.bombs.push(bomb);
        }
    }
}

fn advance_entities(state: &mut GameState, events: &mut FrameEvents) {
    state.player.advance();

    for enemy in state.enemies.iter_mut() {
        enemy.advance();
    }
    let before = state.enemies.len();
    state.enemies.retain(|e| !e.escaped());
    let escaped = (before - state.enemies.len()) as u64;
    if escaped > 0 {
        state.award(escaped * ENEMY_ESCAPE_SCORE, events);
    }

    let mut detonations = Vec::new();
    for bomb in state.bombs.iter_mut() {
        if bomb.advance() == BombStep::Detonated {
            detonations.push(bomb.pos);
        }
    }
    for pos in detonations {
        state.burst(pos, 32, ParticleColor::Orange);
        state.shake(18, 8.0, events);
        events.cue(SoundCue::Explode);
    }

    if let Some(boss) = state.boss.as_mut() {
        boss.advance_missiles();
    }

    for powerup in state.powerups.iter_mut() {
        powerup.advance();
    }
}

/// All six combat passes, stopping as soon as the run ends
fn resolve_combat(state: &mut GameState, events: &mut FrameEvents) {
    projectiles_vs_enemies(state, events);
    projectiles_vs_boss(state, events);
    bombs_vs_everything(state, events);
    if state.is_game_over() {
        return;
    }
    missiles_vs_player(state, events);
    if state.is_game_over() {
        return;
    }
    enemies_vs_player(state, events);
    if state.is_game_over() {
        return;
    }
    powerups_vs_player(state, events);
}

/// Each projectile hits at most the first live enemy it overlaps
fn projectiles_vs_enemies(state: &mut GameState, events: &mut FrameEvents) {
    let mut hits: Vec<Vec2> = Vec::new();
    let mut kills: Vec<(EnemyKind, Vec2)> = Vec::new();

    let enemies = &mut state.enemies;
    state.player.projectiles.retain(|proj| {
        let pb = proj.bounds();
        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.hp > 0 && e.bounds().intersects(&pb))
        else {
            return true;
        };
        enemy.hp -= proj.damage;
        hits.push(proj.pos);
        if enemy.hp <= 0 {
            kills.push((enemy.kind, enemy.center()));
        }
        false
    });
    state.enemies.retain(|e| e.hp > 0);

    for pos in hits {
        state.burst(pos, 6, ParticleColor::Yellow);
    }
    for (kind, center) in kills {
        state.award(kind.bounty(), events);
        state.kills += 1;
        events.enemies_destroyed += 1;
        events.cue(SoundCue::Hit);
        if state.rng.random_bool(POWERUP_DROP_CHANCE) {
            state.spawn_powerup(center);
        }
    }
}

/// Surviving projectiles against the boss
fn projectiles_vs_boss(state: &mut GameState, events: &mut FrameEvents) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    if !boss.is_alive() {
        return;
    }
    let bb = boss.bounds();
    let mut outcomes = Vec::new();
    state.player.projectiles.retain(|proj| {
        if !boss.is_alive() || !proj.bounds().intersects(&bb) {
            return true;
        }
        outcomes.push(boss.take_damage(proj.damage));
        false
    });
    for outcome in outcomes {
        boss_damage_feedback(state, outcome, bb, events);
    }
}

/// Exploding bombs: enemies fully inside die, the boss and the player are
/// each hurt at most once per bomb
fn bombs_vs_everything(state: &mut GameState, events: &mut FrameEvents) {
    for bi in 0..state.bombs.len() {
        let Some(blast) = state.bombs[bi].blast() else {
            continue;
        };

        let before = state.enemies.len();
        state.enemies.retain(|e| !blast.contains(&e.bounds()));
        let destroyed = before - state.enemies.len();
        if destroyed > 0 {
            state.award(destroyed as u64 * BOMB_KILL_SCORE, events);
            state.kills += destroyed as u64;
            events.enemies_destroyed += destroyed as u32;
        }

        if !state.bombs[bi].hit_boss {
            let hit = state
                .boss
                .as_mut()
                .filter(|boss| boss.is_alive() && blast.intersects(&boss.bounds()))
                .map(|boss| (boss.take_damage(BOMB_BOSS_DAMAGE), boss.bounds()));
            if let Some((outcome, bb)) = hit {
                state.bombs[bi].hit_boss = true;
                boss_damage_feedback(state, outcome, bb, events);
            }
        }

        if !state.bombs[bi].hit_player && blast.intersects(&state.player.bounds()) {
            state.bombs[bi].hit_player = true;
            state.damage_player(1, events);
            state.player_hit_feedback(12, 6.0, events);
            if state.is_game_over() {
                return;
            }
        }
    }
}

fn missiles_vs_player(state: &mut GameState, events: &mut FrameEvents) {
    let pb = state.player.bounds();
    let mut hits = 0;
    if let Some(boss) = state.boss.as_mut() {
        boss.missiles.retain(|m| {
            if m.bounds().intersects(&pb) {
                hits += 1;
                false
            } else {
                true
            }
        });
    }
    for _ in 0..hits {
        state.damage_player(1, events);
        state.player_hit_feedback(10, 5.0, events);
        let center = state.player.center();
        state.burst(center, 12, ParticleColor::Red);
        if state.is_game_over() {
            return;
        }
    }
}

/// Ramming an enemy destroys it without a bounty
fn enemies_vs_player(state: &mut GameState, events: &mut FrameEvents) {
    let pb = state.player.bounds();
    let before = state.enemies.len();
    state.enemies.retain(|e| !e.bounds().intersects(&pb));
    let rammed = before - state.enemies.len();
    state.kills += rammed as u64;
    events.enemies_destroyed += rammed as u32;
    for _ in 0..rammed {
        state.damage_player(1, events);
        state.player_hit_feedback(14, 6.0, events);
        if state.is_game_over() {
            return;
        }
    }
}

fn powerups_vs_player(state: &mut GameState, events: &mut FrameEvents) {
    let pb = state.player.bounds();
    let mut collected = Vec::new();
    state.powerups.retain(|p| {
        if p.bounds().intersects(&pb) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        match kind {
            PowerUpKind::Score => state.award(POWERUP_SCORE_BONUS, events),
            PowerUpKind::Life => state.player.lives += 1,
            PowerUpKind::Weapon => {
                state.player.upgrade_weapon();
            }
        }
        events.cue(SoundCue::PowerUp);
    }
}

fn boss_damage_feedback(
    state: &mut GameState,
    outcome: DamageOutcome,
    bb: Aabb,
    events: &mut FrameEvents,
) {
    if outcome == DamageOutcome::Ignored {
        return;
    }
    let spark = Vec2::new(
        state.fx_rng.random_range(bb.min.x..=bb.max.x),
        state.fx_rng.random_range(bb.min.y..=bb.max.y),
    );
    state.burst(spark, 6, ParticleColor::Purple);
    state.shake(6, 4.0, events);
    events.cue(SoundCue::BossHit);
    if outcome == DamageOutcome::Killed {
        state.burst(bb.center(), 60, ParticleColor::Yellow);
        events.cue(SoundCue::Explode);
    }
}

/// Boss defeat payout, boss gate and regular spawning
fn direct_waves(state: &mut GameState, events: &mut FrameEvents) {
    state.resolve_boss_defeat(events);

    // Let the payout settle for a frame before the gate is checked again
    if state.is_boss_fight() || events.boss_defeated {
        return;
    }

    if state.player.score >= state.wave.boss_threshold() {
        let kind = if state.wave.roll_mini_boss(&mut state.rng) {
            BossKind::Mini
        } else {
            BossKind::Main
        };
        state.start_boss_fight(kind, events);
        return;
    }

    if let Some(enemy) = state.wave.tick_spawner(state.player.score, &mut state.rng) {
        log::trace!("Spawned {:?} at x={:.0}", enemy.kind, enemy.pos.x);
        state.enemies.push(enemy);
    }
}

fn step_boss(state: &mut GameState) {
    let aim = state.player.center();
    if let Some(boss) = state.boss.as_mut() {
        boss.step(aim, state.time_ticks, &mut state.rng);
    }
}

fn prune(state: &mut GameState) {
    state.bombs.retain(|b| !b.is_finished());
    state.powerups.retain(|p| !p.expired());
}

fn update_feedback(state: &mut GameState) {
    state.particles.update();
    state.camera.update(&mut state.fx_rng);
    let speed = if state.is_boss_fight() {
        STAR_SPEED_BOSS
    } else {
        STAR_SPEED_NORMAL
    };
    state.stars.update(&mut state.fx_rng, speed);
}

/// Demo pilot: shoot the most urgent target, sidestep nearby threats, bomb crowds
fn autopilot_input(state: &GameState) -> TickInput {
    let me = state.player.center();

    let target = match state.boss.as_ref().filter(|b| b.is_alive()) {
        Some(boss) => Some(boss.center()),
        None => state
            .enemies
            .iter()
            .max_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.center()),
    };

    // Closest threat within dodge range
    let missiles = state.boss.iter().flat_map(|b| b.missiles.iter().map(|m| m.pos));
    let threat = state
        .enemies
        .iter()
        .map(|e| e.center())
        .chain(missiles)
        .filter(|p| p.distance(me) < 150.0)
        .min_by(|a, b| {
            a.distance(me)
                .partial_cmp(&b.distance(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let home_y = SCREEN_HEIGHT - 150.0;
    let movement = if let Some(danger) = threat {
        let away = (me - danger).normalize_or_zero();
        // Prefer sidestepping over retreating into the bottom edge
        Vec2::new(if away.x.abs() < 0.2 { 1.0 } else { away.x.signum() }, away.y)
    } else {
        let desired_x = target.map(|t| t.x).unwrap_or(SCREEN_WIDTH / 2.0);
        let dx = desired_x - me.x;
        let dy = home_y - me.y;
        Vec2::new(
            if dx.abs() > 8.0 { dx.signum() } else { 0.0 },
            if dy.abs() > 8.0 { dy.signum() } else { 0.0 },
        )
    };

    TickInput {
        movement,
        aim: target.unwrap_or(Vec2::new(me.x, 0.0)),
        fire: target.is_some(),
        bomb: state.boss.is_none() && state.enemies.len() >= 5,
        pause: false,
        autopilot: true,
    }
}

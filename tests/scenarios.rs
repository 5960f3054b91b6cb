//! End-to-end gameplay scenarios driven through the public tick API

use dodge_shoot::consts::*;
use dodge_shoot::sim::{
    Boss, BossKind, BossStage, Enemy, EnemyKind, GamePhase, GameState, Projectile, SoundCue,
    TickInput, tick,
};
use glam::Vec2;

fn idle() -> TickInput {
    TickInput::default()
}

/// No natural spawns so every entity on the field is placed by the test
fn quiet_state(seed: u64) -> GameState {
    GameState::with_spawn_interval(seed, u32::MAX)
}

fn still_bullet(center: Vec2, damage: i32) -> Projectile {
    let mut p = Projectile::new(center, 0.0, 0.0, damage);
    p.vel = Vec2::ZERO;
    p
}

fn park_player_in_corner(state: &mut GameState) {
    state.player.pos = Vec2::new(0.0, SCREEN_HEIGHT - PLAYER_SIZE);
}

#[test]
fn tank_dies_on_fifth_hit_and_pays_once() {
    let mut state = quiet_state(11);
    state
        .enemies
        .push(Enemy::new(Vec2::new(400.0, 100.0), EnemyKind::Tank));

    let mut total_bounty = 0;
    for _ in 0..5 {
        // The tank descends 1 px before collisions are resolved
        let aim = state.enemies[0].center() + Vec2::new(0.0, EnemyKind::Tank.speed());
        state.player.projectiles.push(still_bullet(aim, 1));
        total_bounty += tick(&mut state, &idle()).score_delta;
    }
    assert!(state.enemies.is_empty());
    assert_eq!(total_bounty, TANK_KILL_SCORE);
    assert_eq!(state.kills, 1);
}

#[test]
fn reaching_threshold_starts_boss_next_tick() {
    let mut state = quiet_state(12);
    state
        .enemies
        .push(Enemy::new(Vec2::new(100.0, 50.0), EnemyKind::Zigzag));
    state.player.score = BOSS_SCORE_PER_WAVE;

    let events = tick(&mut state, &idle());
    assert!(events.boss_spawned.is_some());
    assert!(state.is_boss_fight());
    assert!(state.enemies.is_empty());
    assert!(state.powerups.is_empty());
    assert!(state.bombs.is_empty());
}

#[test]
fn bomb_detonates_after_fuse_then_expires() {
    let mut state = quiet_state(13);
    state.player.pos = Vec2::new(500.0, 300.0);
    tick(
        &mut state,
        &TickInput {
            bomb: true,
            ..idle()
        },
    );
    let dropped = state.time_ticks;
    park_player_in_corner(&mut state);

    let mut detonated = None;
    let mut gone = None;
    for _ in 0..200 {
        let events = tick(&mut state, &idle());
        if events.cues.contains(&SoundCue::Explode) {
            detonated.get_or_insert(state.time_ticks);
        }
        if state.bombs.is_empty() {
            gone = Some(state.time_ticks);
            break;
        }
    }
    assert_eq!(detonated, Some(dropped + BOMB_FUSE_TICKS as u64));
    let growth = (BOMB_MAX_RADIUS / BOMB_GROWTH_PER_TICK) as u64;
    assert_eq!(gone, Some(dropped + BOMB_FUSE_TICKS as u64 + growth));
}

#[test]
fn bomb_cooldown_blocks_second_drop() {
    let mut state = quiet_state(14);
    let bomb = TickInput {
        bomb: true,
        ..idle()
    };
    tick(&mut state, &bomb);
    tick(&mut state, &bomb);
    assert_eq!(state.bombs.len(), 1);
}

#[test]
fn phase_drop_switches_to_rapid_fire() {
    let mut state = quiet_state(15);
    park_player_in_corner(&mut state);
    let mut boss = Boss::new(1, BossKind::Main);
    boss.pos.y = boss.target_y;
    boss.stage = BossStage::Active;
    boss.max_hp = 100;
    boss.hp = 34;
    let center = boss.center();
    state.boss = Some(boss);

    state.player.projectiles.push(still_bullet(center, 2));
    tick(&mut state, &idle());
    let boss = state.boss.as_ref().unwrap();
    assert_eq!(boss.phase(), 2);

    // Phase 2 fires every 10 frames
    let mut launches = Vec::new();
    for _ in 0..40 {
        let before = state.boss.as_ref().unwrap().missiles.len();
        tick(&mut state, &idle());
        let boss = state.boss.as_ref().unwrap();
        if boss.missiles.len() > before {
            launches.push(boss.attack_timer);
        }
    }
    assert_eq!(launches, vec![10, 20, 30, 40]);
}

#[test]
fn full_boss_cycle_advances_wave() {
    let mut state = quiet_state(16);
    park_player_in_corner(&mut state);
    state.player.score = BOSS_SCORE_PER_WAVE;
    // Force the main boss
    state.wave.mini_boss_spawned = true;
    tick(&mut state, &idle());
    assert_eq!(state.boss.as_ref().map(|b| b.kind), Some(BossKind::Main));

    // Let it finish its entrance
    while state.boss.as_ref().unwrap().stage == BossStage::Entering {
        tick(&mut state, &idle());
    }

    let mut defeated = None;
    for _ in 0..400 {
        let boss = state.boss.as_ref().unwrap();
        let center = boss.center();
        state.player.projectiles.push(still_bullet(center, 5));
        let events = tick(&mut state, &idle());
        if events.boss_defeated {
            defeated = Some(events);
            break;
        }
        // Keep the player topped up so the cycle can finish
        state.player.hp = state.player.max_hp;
    }
    let events = defeated.expect("boss should fall");
    assert_eq!(events.wave_advanced, Some(2));
    assert_eq!(state.wave.wave, 2);
    assert!(!state.wave.mini_boss_spawned);
    assert_eq!(state.powerups.len(), BOSS_POWERUP_DROPS);
    assert_eq!(
        events.record_score,
        Some(BOSS_SCORE_PER_WAVE + BOSS_BONUS_PER_WAVE)
    );
    assert!(state.boss.is_none());
}

#[test]
fn game_over_freezes_until_reset() {
    let mut state = quiet_state(17);
    state.player.lives = 1;
    state.player.hp = 1;
    let above = state.player.pos - Vec2::new(0.0, EnemyKind::Fast.speed());
    state.enemies.push(Enemy::new(above, EnemyKind::Fast));

    let events = tick(&mut state, &idle());
    assert!(events.game_over);
    assert_eq!(state.phase, GamePhase::GameOver);

    let frozen = state.time_ticks;
    for _ in 0..30 {
        assert!(tick(&mut state, &TickInput { fire: true, bomb: true, ..idle() }).is_empty());
    }
    assert_eq!(state.time_ticks, frozen);
    assert!(state.bombs.is_empty());

    // Pause requests are ignored once the run is over
    tick(&mut state, &TickInput { pause: true, ..idle() });
    assert_eq!(state.phase, GamePhase::GameOver);

    state.reset();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.player.hp, PLAYER_MAX_HP);
    assert_eq!(state.time_ticks, 0);
}

#[test]
fn natural_spawns_arrive_above_playfield() {
    let mut state = GameState::new(18);
    for _ in 0..45 {
        tick(&mut state, &idle());
    }
    assert_eq!(state.enemies.len(), 1);
    let enemy = &state.enemies[0];
    assert!(enemy.pos.y < 0.0);
    assert!(enemy.pos.x >= 20.0 && enemy.pos.x <= SCREEN_WIDTH - 60.0);
}

#[test]
fn snapshot_serializes() {
    let mut state = GameState::new(19);
    let input = TickInput {
        autopilot: true,
        ..idle()
    };
    for _ in 0..300 {
        tick(&mut state, &input);
    }
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["wave"]["wave"], 1);
    assert!(json["player"]["score"].is_u64());
    assert!(json.get("rng").is_none());
}

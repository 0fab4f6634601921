//! Whole-run behaviour through the public API

use glam::Vec2;

use arcade_sim::sim::ids::IdAllocator;
use arcade_sim::sim::space::spawn::create_boss;
use arcade_sim::sim::space::state::BASE_BULLET_SIZE;
use arcade_sim::sim::space::{Bullet, SpaceInput, SpaceSnapshot, SpaceState};
use arcade_sim::sim::tank::{Pursuer, TankInput, TankSnapshot, TankState};
use arcade_sim::sim::{FixedStepDriver, RunPhase, Simulation};
use arcade_sim::{Loadout, QualityPreset, Settings};

fn space(seed: u64, loadout: Loadout) -> SpaceState {
    SpaceState::new(seed, loadout, &Settings::default())
}

fn enemy_shot_at_player(state: &mut SpaceState) {
    let id = state.next_entity_id();
    let at = state.player.center();
    state.enemy_bullets.push(Bullet::plain(id, at, Vec2::ZERO, 4.0));
}

#[test]
fn boss_phase_escalates_at_thresholds() {
    let mut boss = create_boss(5, &mut IdAllocator::new());
    let phases: Vec<u8> = [1.0, 0.65, 0.59, 0.31, 0.29]
        .iter()
        .map(|f| {
            boss.health = boss.max_health * f;
            boss.update_phase();
            boss.phase
        })
        .collect();
    assert_eq!(phases, vec![1, 1, 2, 2, 3]);

    // Healing never lowers the phase
    boss.health = boss.max_health;
    boss.update_phase();
    assert_eq!(boss.phase, 3);
}

#[test]
fn killing_wave_five_boss_starts_wave_six() {
    let mut state = space(11, Loadout::default());
    state.enemies.clear();
    state.wave = 5;
    let mut boss = create_boss(5, &mut IdAllocator::new());
    boss.pos.y = 100.0;
    boss.health = 1.0;
    let center = boss.center();
    state.boss = Some(boss);

    let id = state.next_entity_id();
    state.player_bullets.push(Bullet::plain(
        id,
        center,
        Vec2::new(0.0, -10.0),
        BASE_BULLET_SIZE,
    ));

    let results = state.tick(&SpaceInput::default());
    assert!(results.is_none());
    assert!(state.boss.is_none());
    assert_eq!(state.bosses_killed, 1);
    assert_eq!(state.wave, 6);
    assert!(!state.enemies.is_empty());
    assert_eq!(state.phase, RunPhase::Active);
}

#[test]
fn clearing_final_wave_is_victory() {
    let loadout = Loadout {
        coin_bonus_level: 5,
        ..Loadout::default()
    };
    let mut state = space(3, loadout);
    state.enemies.clear();
    state.wave = 50;
    state.coins_collected = 100;
    state.score = 9000;

    let results = state.tick(&SpaceInput::default());
    assert_eq!(state.phase, RunPhase::Victory);
    let results = results.expect("victory reports results");
    assert_eq!(results.wave_reached, 50);
    // (100 + floor(5 + 0.5 * 51)) * 1.5
    assert_eq!(results.coins_earned, 195);
    assert_eq!(results.final_score, 9000);
    assert!(state.tick(&SpaceInput::default()).is_none());
}

#[test]
fn shield_absorbs_then_lives_drop() {
    let loadout = Loadout {
        start_shield_charges: 1,
        ..Loadout::default()
    };
    let mut state = space(5, loadout);
    assert!(state.player.has_shield);

    enemy_shot_at_player(&mut state);
    state.tick(&SpaceInput::default());
    assert_eq!(state.player.lives, 3);
    assert!(!state.player.has_shield);

    enemy_shot_at_player(&mut state);
    state.tick(&SpaceInput::default());
    assert_eq!(state.player.lives, 2);
}

#[test]
fn auto_revive_saves_exactly_once() {
    let loadout = Loadout {
        auto_revive: true,
        ..Loadout::default()
    };
    let mut state = space(5, loadout);
    state.player.lives = 1;

    enemy_shot_at_player(&mut state);
    assert!(state.tick(&SpaceInput::default()).is_none());
    assert_eq!(state.player.lives, 1);
    assert!(state.player.used_revive);

    enemy_shot_at_player(&mut state);
    let results = state.tick(&SpaceInput::default());
    assert_eq!(state.phase, RunPhase::Defeat);
    assert_eq!(results.map(|r| r.wave_reached), Some(1));
}

fn scripted(tick: u64) -> SpaceInput {
    SpaceInput {
        move_x: if (tick / 90) % 2 == 0 { 1.0 } else { -1.0 },
        firing: true,
        ..Default::default()
    }
}

#[test]
fn same_seed_same_run() {
    let mut a = space(1234, Loadout::default());
    let mut b = space(1234, Loadout::default());
    for t in 0..900 {
        a.tick(&scripted(t));
        b.tick(&scripted(t));
    }
    let snap = |s: &SpaceState| serde_json::to_string(&SpaceSnapshot::from(s)).unwrap();
    assert_eq!(snap(&a), snap(&b));
    assert_eq!(a.score, b.score);
}

#[test]
fn live_enemies_always_have_health() {
    let mut state = space(77, Loadout::default());
    for t in 0..3000 {
        state.tick(&scripted(t));
        assert!(state.enemies.iter().all(|e| e.health > 0.0));
        if let Some(boss) = &state.boss {
            assert!(boss.health > 0.0);
            assert!((1..=3).contains(&boss.phase));
        }
        if state.phase.is_over() {
            break;
        }
    }
}

#[test]
fn tank_results_reported_once_through_driver() {
    let mut tank = TankState::new(8, &Settings::default());
    tank.player.lives = 1;
    tank.score = 50;
    let at = tank.player.pos;
    tank.enemies.push(Pursuer {
        id: 999,
        pos: at,
        health: 3,
        max_health: 3,
        boss: false,
    });

    let mut driver = FixedStepDriver::new(tank);
    let input = TankInput::default();
    let results = driver.step(&input).expect("defeat reports results");
    assert_eq!(results.final_score, 50);
    assert_eq!(results.wave_reached, 1);
    assert_eq!(results.coins_earned, 0);
    assert!(driver.step(&input).is_none());
    assert_eq!(driver.sim().phase(), RunPhase::Defeat);
}

#[test]
fn tank_weapon_climbs_with_kills() {
    let mut tank = TankState::new(8, &Settings::default());
    let fire = TankInput {
        aim: Vec2::new(800.0, 300.0),
        fire: true,
        ..Default::default()
    };
    for i in 0..5 {
        tank.enemies.push(Pursuer {
            id: 1000 + i,
            pos: Vec2::new(700.0, 300.0),
            health: 1,
            max_health: 3,
            boss: false,
        });
    }
    for _ in 0..200 {
        tank.tick(&fire);
        if tank.kills >= 5 {
            break;
        }
    }
    assert!(tank.kills >= 5);
    assert_eq!(tank.snapshot().weapon_tier, 2);
    assert_eq!(tank.snapshot().weapon_name, "Dual Shot");
}

fn no_particles() -> Settings {
    Settings {
        particles: false,
        ..Settings::default()
    }
}

/// Gameplay view of a space run: the snapshot minus its particle data
fn space_gameplay(state: &SpaceState) -> String {
    let mut snap = SpaceSnapshot::from(state);
    snap.particles.clear();
    serde_json::to_string(&snap).unwrap()
}

fn tank_gameplay(state: &TankState) -> String {
    let mut snap = TankSnapshot::from(state);
    snap.particles.clear();
    serde_json::to_string(&snap).unwrap()
}

#[test]
fn particle_settings_never_change_space_outcome() {
    let low = Settings {
        quality: QualityPreset::Low,
        ..Settings::default()
    };
    let mut runs: Vec<SpaceState> = [Settings::default(), no_particles(), low]
        .iter()
        .map(|settings| SpaceState::new(1234, Loadout::default(), settings))
        .collect();
    let mut sparks = 0;
    for t in 0..1800 {
        for run in &mut runs {
            run.tick(&scripted(t));
        }
        sparks += runs[0].particles.len();
        assert!(runs[1].particles.is_empty());
    }
    assert!(sparks > 0);
    let reference = space_gameplay(&runs[0]);
    for run in &runs[1..] {
        assert_eq!(run.score, runs[0].score);
        assert_eq!(run.wave, runs[0].wave);
        assert_eq!(run.coins_collected, runs[0].coins_collected);
        assert_eq!(space_gameplay(run), reference);
    }
}

fn tank_scripted(state: &TankState, tick: u64) -> TankInput {
    let aim = state
        .enemies
        .first()
        .map_or(state.player.pos + Vec2::X, |e| e.pos);
    TankInput {
        move_x: if (tick / 120) % 2 == 0 { 0.5 } else { -0.5 },
        move_y: 0.0,
        aim,
        fire: tick % 3 == 0,
        quit: false,
    }
}

#[test]
fn particle_settings_never_change_tank_outcome() {
    let mut with = TankState::new(42, &Settings::default());
    let mut without = TankState::new(42, &no_particles());
    let mut sparks = 0;
    for t in 0..3000 {
        let a = tank_scripted(&with, t);
        let b = tank_scripted(&without, t);
        with.tick(&a);
        without.tick(&b);
        sparks += with.particles.len();
        assert!(without.particles.is_empty());
    }
    assert!(sparks > 0);
    assert_eq!(with.score, without.score);
    assert_eq!(with.kills, without.kills);
    assert_eq!(with.stage, without.stage);
    assert_eq!(with.player.lives, without.player.lives);
    assert_eq!(tank_gameplay(&with), tank_gameplay(&without));
}

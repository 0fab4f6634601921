//! Power-up effects, buff timers and the player's weapon loadout
//!
//! Timed buffs set a capability flag and track `{kind, remaining}`; expiry
//! reverts the flag to whatever the permanent upgrades grant.

use glam::Vec2;
use rand::Rng;

use super::combat::{defeat_boss, kill_enemy_plain};
use super::state::{
    ActiveBuff, BASE_BULLET_SIZE, BERSERK_TICKS, BULLET_SPEED, BlackHole, Bullet, FREEZE_TICKS,
    FireTrail, GAME_WIDTH, GHOST_TICKS, GIANT_BULLET_SIZE, Orbital, PLAYER_HEIGHT, PLAYER_WIDTH,
    PowerUpKind, SHIELD_CHARGES, Side, SpaceInput, SpaceState, Wingman,
};
use crate::consts::TICK_MS;

const BASE_FIRE_INTERVAL_MS: f32 = 180.0;
const MINIGUN_INTERVAL_MS: f32 = 40.0;
const MISSILE_EVERY_TICKS: u64 = 15;
const ORBITAL_FIRE_EVERY_TICKS: u64 = 20;
const ORBITAL_RADIUS: f32 = 40.0;
const ORBITAL_COUNT: usize = 4;
const FIRE_TRAIL_EVERY_TICKS: u64 = 3;
const FIRE_TRAIL_LIFE: u32 = 60;
const BLACK_HOLE_LIFE: u32 = 300;
const NUKE_BOSS_DAMAGE: f32 = 50.0;

/// Milliseconds between volleys for the current loadout
pub fn fire_interval_ms(state: &SpaceState) -> f32 {
    let caps = &state.buffs.caps;
    let mut rate = BASE_FIRE_INTERVAL_MS - 15.0 * state.loadout.fire_rate_bonus as f32;
    if caps.rapid_fire {
        rate *= 0.55;
    }
    if caps.minigun {
        rate = MINIGUN_INTERVAL_MS;
    }
    if state.buffs.is_berserk() {
        rate *= 0.6;
    }
    rate
}

fn bullet_size(state: &SpaceState) -> f32 {
    let base = if state.buffs.caps.giant {
        GIANT_BULLET_SIZE
    } else {
        BASE_BULLET_SIZE
    };
    base + state.loadout.bullet_size_bonus()
}

/// Player bullet carrying the current modifiers
fn player_bullet(state: &mut SpaceState, pos: Vec2, vel: Vec2) -> Bullet {
    let caps = state.buffs.caps;
    let size = bullet_size(state);
    Bullet {
        id: state.next_entity_id(),
        pos,
        vel,
        piercing: caps.laser,
        homing: caps.homing,
        bounces: if caps.ricochet { 3 } else { 0 },
        chain: if caps.lightning { 3 } else { 0 },
        size,
    }
}

/// Main gun, wingmen and missiles (gated by the fire interval)
pub fn fire_player_weapons(state: &mut SpaceState, input: &SpaceInput) {
    state.ms_since_shot += TICK_MS;
    if !input.firing || state.ms_since_shot <= fire_interval_ms(state) {
        return;
    }
    state.ms_since_shot = 0.0;

    let caps = state.buffs.caps;
    let origin = state.player.pos + Vec2::new(PLAYER_WIDTH / 2.0 - 2.0, 0.0);
    let up = Vec2::new(0.0, -BULLET_SPEED);

    if caps.spread_shot {
        for step in -2..=2 {
            let angle = step as f32 * 0.2;
            let b = player_bullet(state, origin, Vec2::new(angle.sin() * 5.0, -BULLET_SPEED));
            state.player_bullets.push(b);
        }
    } else if caps.minigun {
        let spread = (state.rng.random::<f32>() - 0.5) * 2.0;
        let pos = origin + Vec2::new(spread * 5.0, 0.0);
        let b = player_bullet(state, pos, Vec2::new(spread, -BULLET_SPEED * 1.2));
        state.player_bullets.push(b);
    } else {
        let b = player_bullet(state, origin, up);
        state.player_bullets.push(b);
    }

    let escorts: Vec<Vec2> = state.wingmen.iter().map(|w| w.pos).collect();
    for pos in escorts {
        let b = player_bullet(state, pos + Vec2::new(10.0, 0.0), up);
        state.player_bullets.push(b);
    }

    if caps.missile && state.time_ticks % MISSILE_EVERY_TICKS == 0 {
        for dx in [-15.0, 15.0] {
            let mut b = player_bullet(state, origin + Vec2::new(dx, 0.0), up);
            b.homing = true;
            b.size = 6.0;
            state.player_bullets.push(b);
        }
    }
}

/// Satellites fire on their own cadence, regardless of the trigger
pub fn fire_orbitals(state: &mut SpaceState) {
    if !state.buffs.caps.orbital || state.time_ticks % ORBITAL_FIRE_EVERY_TICKS != 0 {
        return;
    }
    let center = state.player.center();
    let angles: Vec<f32> = state.orbitals.iter().map(|o| o.angle).collect();
    for angle in angles {
        let pos = center + Vec2::new(angle.cos(), angle.sin()) * ORBITAL_RADIUS;
        let id = state.next_entity_id();
        state
            .player_bullets
            .push(Bullet::plain(id, pos, Vec2::new(0.0, -8.0), 3.0));
    }
}

/// Drop a puddle under the ship every few ticks
pub fn drop_fire_trail(state: &mut SpaceState) {
    if !state.buffs.caps.fire_trail || state.time_ticks % FIRE_TRAIL_EVERY_TICKS != 0 {
        return;
    }
    let pos = state.player.pos + Vec2::new(PLAYER_WIDTH / 2.0, PLAYER_HEIGHT);
    let id = state.next_entity_id();
    state.fire_trails.push(FireTrail {
        id,
        pos,
        life: FIRE_TRAIL_LIFE,
    });
}

/// Start or refresh a timed buff
fn start_buff(state: &mut SpaceState, kind: PowerUpKind) {
    let Some(duration) = kind.timed_duration() else {
        return;
    };
    if let Some(existing) = state.buffs.active.iter_mut().find(|b| b.kind == kind) {
        existing.remaining = duration;
        existing.duration = duration;
    } else {
        state.buffs.active.push(ActiveBuff {
            kind,
            remaining: duration,
            duration,
        });
    }
}

/// Apply a collected (non-coin) pickup
pub fn apply_power_up(state: &mut SpaceState, kind: PowerUpKind) {
    log::debug!("picked up {}", kind.info().name);
    let caps = &mut state.buffs.caps;

    match kind {
        PowerUpKind::Rapid => caps.rapid_fire = true,
        PowerUpKind::Spread => {
            caps.spread_shot = true;
            caps.laser = false;
            caps.minigun = false;
        }
        PowerUpKind::Laser => {
            caps.laser = true;
            caps.spread_shot = false;
            caps.minigun = false;
        }
        PowerUpKind::Minigun => {
            caps.minigun = true;
            caps.spread_shot = false;
            caps.laser = false;
        }
        PowerUpKind::Missile => caps.missile = true,
        PowerUpKind::Slowmo => caps.slow_mo = true,
        PowerUpKind::Magnet => caps.magnet = true,
        PowerUpKind::Doublepoints => caps.double_points = true,
        PowerUpKind::Ricochet => caps.ricochet = true,
        PowerUpKind::Homing => caps.homing = true,
        PowerUpKind::Giant => caps.giant = true,
        PowerUpKind::Vampire => caps.vampire = true,
        PowerUpKind::Lightning => caps.lightning = true,
        PowerUpKind::Firetrail => caps.fire_trail = true,
        PowerUpKind::Explosive => caps.explosive = true,
        PowerUpKind::Orbital => {
            caps.orbital = true;
            if state.orbitals.len() < ORBITAL_COUNT {
                state.orbitals.clear();
                for i in 0..ORBITAL_COUNT {
                    let id = state.ids.next_id();
                    state.orbitals.push(Orbital {
                        id,
                        angle: std::f32::consts::TAU * i as f32 / ORBITAL_COUNT as f32,
                    });
                }
            }
        }
        PowerUpKind::Shield => {
            state.player.has_shield = true;
            state.player.shield_hits = SHIELD_CHARGES;
        }
        PowerUpKind::Ghost => state.buffs.ghost_timer = GHOST_TICKS,
        PowerUpKind::Berserk => state.buffs.berserk_timer = BERSERK_TICKS,
        PowerUpKind::Freeze => {
            state.buffs.freeze_timer = FREEZE_TICKS;
            for e in &mut state.enemies {
                e.frozen = FREEZE_TICKS;
            }
            if let Some(boss) = state.boss.as_mut() {
                boss.frozen = FREEZE_TICKS;
            }
        }
        PowerUpKind::Wingmen => {
            if state.wingmen.len() < 2 {
                let player = state.player.pos;
                state.wingmen.clear();
                for (side, dx) in [(Side::Left, -30.0), (Side::Right, PLAYER_WIDTH + 10.0)] {
                    let id = state.ids.next_id();
                    state.wingmen.push(Wingman {
                        id,
                        side,
                        pos: player + Vec2::new(dx, 10.0),
                    });
                }
            }
        }
        PowerUpKind::Blackhole => {
            let id = state.next_entity_id();
            state.black_holes.push(BlackHole {
                id,
                pos: Vec2::new(GAME_WIDTH / 2.0, 200.0),
                life: BLACK_HOLE_LIFE,
            });
        }
        PowerUpKind::Nuke => nuke(state),
        PowerUpKind::Extralife => state.player.heal(1),
        // Coins are credited by the collector
        PowerUpKind::Coin => {}
    }

    start_buff(state, kind);
}

/// Clear the field: every enemy dies, the boss takes a heavy hit
fn nuke(state: &mut SpaceState) {
    let enemies = std::mem::take(&mut state.enemies);
    for e in &enemies {
        kill_enemy_plain(state, e.kind, e.pos, 0xffd93d);
    }

    if let Some(mut boss) = state.boss.take() {
        boss.health -= NUKE_BOSS_DAMAGE;
        boss.shields = 0;
        if boss.health <= 0.0 {
            defeat_boss(state, boss);
        } else {
            boss.update_phase();
            state.boss = Some(boss);
        }
    }

    state.enemy_bullets.clear();
    state.shake(25.0);
}

/// Count down every buff; expired ones revert to the owned baseline
pub fn tick_buffs(state: &mut SpaceState) {
    let mut expired = Vec::new();
    state.buffs.active.retain_mut(|b| {
        b.remaining = b.remaining.saturating_sub(1);
        if b.remaining == 0 {
            expired.push(b.kind);
            false
        } else {
            true
        }
    });
    for kind in expired {
        expire_buff(state, kind);
    }

    let buffs = &mut state.buffs;
    buffs.ghost_timer = buffs.ghost_timer.saturating_sub(1);
    buffs.freeze_timer = buffs.freeze_timer.saturating_sub(1);
    buffs.berserk_timer = buffs.berserk_timer.saturating_sub(1);

    for e in &mut state.enemies {
        e.frozen = e.frozen.saturating_sub(1);
        e.burning = e.burning.saturating_sub(1);
    }
    if let Some(boss) = state.boss.as_mut() {
        boss.frozen = boss.frozen.saturating_sub(1);
    }
}

fn expire_buff(state: &mut SpaceState, kind: PowerUpKind) {
    let loadout = state.loadout;
    let caps = &mut state.buffs.caps;
    match kind {
        PowerUpKind::Rapid => caps.rapid_fire = loadout.start_rapid,
        PowerUpKind::Spread => caps.spread_shot = loadout.start_spread,
        PowerUpKind::Magnet => caps.magnet = loadout.has_magnet(),
        PowerUpKind::Giant => caps.giant = loadout.has_giant(),
        PowerUpKind::Laser => caps.laser = false,
        PowerUpKind::Missile => caps.missile = false,
        PowerUpKind::Slowmo => caps.slow_mo = false,
        PowerUpKind::Doublepoints => caps.double_points = false,
        PowerUpKind::Ricochet => caps.ricochet = false,
        PowerUpKind::Homing => caps.homing = false,
        PowerUpKind::Vampire => caps.vampire = false,
        PowerUpKind::Lightning => caps.lightning = false,
        PowerUpKind::Firetrail => caps.fire_trail = false,
        PowerUpKind::Minigun => caps.minigun = false,
        PowerUpKind::Explosive => caps.explosive = false,
        PowerUpKind::Orbital => {
            caps.orbital = false;
            state.orbitals.clear();
        }
        PowerUpKind::Shield
        | PowerUpKind::Nuke
        | PowerUpKind::Extralife
        | PowerUpKind::Ghost
        | PowerUpKind::Freeze
        | PowerUpKind::Berserk
        | PowerUpKind::Wingmen
        | PowerUpKind::Blackhole
        | PowerUpKind::Coin => {}
    }
}

//! Space shooter movement, steering and enemy/boss AI
//!
//! Every delta here is scaled by the slow factor; the tick rate never changes.

use glam::Vec2;
use rand::Rng;

use super::spawn::create_enemy;
use super::state::{
    BOSS_ENGAGE_Y, BULLET_SPEED, Boss, Bullet, ENEMY_WIDTH, EnemyKind, GAME_HEIGHT, GAME_WIDTH,
    PLAYER_HEIGHT, PLAYER_MAX_Y, PLAYER_MIN_Y, PLAYER_SPEED, PLAYER_WIDTH, Side, SpaceInput,
    SpaceState,
};
use crate::sim::collision::{direction_to, nearest};

/// Pointer seek stops this close to the target
const SEEK_DEADZONE: f32 = 5.0;
const HOMING_BLEND: f32 = 0.5;
const ORBITAL_SPIN: f32 = 0.08;
const PICKUP_FALL_SPEED: f32 = 1.5;
const MAGNET_PULL: f32 = 0.1;
/// Bombers dive while the player is this close horizontally
const BOMBER_DIVE_RANGE: f32 = 30.0;
const ENEMY_BULLET_AIMED_SPEED: f32 = 5.0;
const MAX_MINION_HEADROOM: usize = 6;

/// Player speed after berserk and the speed upgrade
pub fn player_speed(state: &SpaceState) -> f32 {
    let berserk = if state.buffs.is_berserk() { 1.5 } else { 1.0 };
    PLAYER_SPEED * berserk * state.loadout.speed_multiplier()
}

/// Axis input plus optional pointer seek, clamped to the player's band
pub fn move_player(state: &mut SpaceState, input: &SpaceInput, slow: f32) {
    let speed = player_speed(state) * slow;
    let mut pos = state.player.pos;

    pos.x += input.move_x.clamp(-1.0, 1.0) * speed;
    pos.y += input.move_y.clamp(-1.0, 1.0) * speed * 0.6;

    if let Some(pointer) = input.pointer {
        let touch = Vec2::new(
            pointer.x.clamp(PLAYER_WIDTH / 2.0, GAME_WIDTH - PLAYER_WIDTH / 2.0),
            pointer.y.clamp(PLAYER_MIN_Y, PLAYER_MAX_Y),
        );
        let target = touch - Vec2::new(PLAYER_WIDTH / 2.0, PLAYER_HEIGHT / 2.0);
        let dist = pos.distance(target);
        if dist > SEEK_DEADZONE {
            if let Some(dir) = direction_to(pos, target) {
                pos += dir * (speed * 1.2).min(dist);
            }
        }
    }

    state.player.pos = Vec2::new(
        pos.x.clamp(0.0, GAME_WIDTH - PLAYER_WIDTH),
        pos.y.clamp(PLAYER_MIN_Y, PLAYER_MAX_Y),
    );
}

pub fn spin_orbitals(state: &mut SpaceState) {
    for o in &mut state.orbitals {
        o.angle += ORBITAL_SPIN;
    }
}

/// Wingmen hold station beside the player
pub fn follow_player(state: &mut SpaceState) {
    let player = state.player.pos;
    for w in &mut state.wingmen {
        let dx = match w.side {
            Side::Left => -30.0,
            Side::Right => PLAYER_WIDTH + 10.0,
        };
        w.pos = player + Vec2::new(dx, 10.0);
    }
}

/// What homing bullets steer toward this tick
fn homing_target(state: &SpaceState, from: Vec2) -> Option<Vec2> {
    if let Some(boss) = state.boss.as_ref().filter(|b| b.is_engaged()) {
        return Some(boss.center());
    }
    let positions: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();
    nearest(from, positions.iter()).map(|i| positions[i])
}

/// Steer, move, reflect and cull player bullets
pub fn move_player_bullets(state: &mut SpaceState, slow: f32) {
    let targets: Vec<Option<Vec2>> = state
        .player_bullets
        .iter()
        .map(|b| if b.homing { homing_target(state, b.pos) } else { None })
        .collect();

    for (bullet, target) in state.player_bullets.iter_mut().zip(targets) {
        if let Some(target) = target {
            steer_homing(bullet, target);
        }
        bullet.pos += bullet.vel * slow;

        if bullet.bounces > 0 {
            if bullet.pos.x < 0.0 || bullet.pos.x > GAME_WIDTH {
                bullet.vel.x = -bullet.vel.x;
                bullet.bounces -= 1;
            }
            if bullet.bounces > 0 && bullet.pos.y < 0.0 {
                bullet.vel.y = -bullet.vel.y;
                bullet.bounces -= 1;
            }
        }
    }

    state.player_bullets.retain(|b| !b.out_of_bounds());
}

/// Blend toward `target` and renormalize to bullet speed
pub fn steer_homing(bullet: &mut Bullet, target: Vec2) {
    let Some(dir) = direction_to(bullet.pos, target) else {
        return;
    };
    let blended = bullet.vel + dir * HOMING_BLEND;
    if let Some(unit) = blended.try_normalize() {
        bullet.vel = unit * BULLET_SPEED;
    }
}

/// Per-kind motion, cooldowns and the group march
pub fn move_enemies(state: &mut SpaceState, slow: f32) {
    if state.buffs.is_frozen() || state.boss.is_some() {
        return;
    }

    let player_x = state.player.pos.x;
    for e in state.enemies.iter_mut().filter(|e| e.frozen == 0) {
        e.behavior += 0.02 * slow;
        match e.kind {
            EnemyKind::Zigzag => e.pos.x += (e.behavior * 3.0).sin() * 3.0 * slow,
            EnemyKind::Speeder => e.pos.y += 0.3 * slow,
            EnemyKind::Bomber if (player_x - e.pos.x).abs() < BOMBER_DIVE_RANGE => {
                e.pos.y += slow
            }
            _ => {}
        }
        e.shoot_cooldown -= slow;
    }

    let wave = state.wave as f32;
    let interval = (25.0 - (state.wave / 3) as f32).max(5.0);
    state.march.timer += slow;
    if state.march.timer < interval {
        return;
    }
    state.march.timer = 0.0;

    let left_most = state.enemies.iter().map(|e| e.pos.x).fold(GAME_WIDTH, f32::min);
    let right_most = state.enemies.iter().map(|e| e.pos.x).fold(0.0, f32::max);

    let mut drop_down = false;
    if right_most > GAME_WIDTH - 40.0 && state.march.direction > 0.0 {
        state.march.direction = -1.0;
        drop_down = true;
    } else if left_most < 20.0 && state.march.direction < 0.0 {
        state.march.direction = 1.0;
        drop_down = true;
    }

    let step = state.march.direction * (6.0 + wave * 0.3);
    for e in &mut state.enemies {
        e.pos.x += step;
        if drop_down {
            e.pos.y += 12.0 + wave * 0.5;
        }
    }
}

/// Enemies whose cooldown ran out open fire
pub fn enemy_fire(state: &mut SpaceState) {
    if state.buffs.is_frozen() || state.boss.is_some() {
        return;
    }

    let wave = state.wave as f32;
    let player = state.player.pos;
    let mut shots: Vec<(Vec2, Vec2)> = Vec::new();

    for i in 0..state.enemies.len() {
        let (kind, pos, ready) = {
            let e = &state.enemies[i];
            (e.kind, e.pos, e.frozen == 0 && e.shoot_cooldown <= 0.0)
        };
        if !ready {
            continue;
        }

        let mut cooldown = (150.0 - wave * 2.0).max(40.0) + state.rng.random::<f32>() * 60.0;
        let muzzle = pos + Vec2::new(ENEMY_WIDTH / 2.0, 25.0);
        let aim = direction_to(pos, player).unwrap_or(Vec2::Y) * ENEMY_BULLET_AIMED_SPEED;

        match kind {
            EnemyKind::Sniper => shots.push((muzzle, aim)),
            EnemyKind::Bomber => {
                for k in -1..=1 {
                    let k = k as f32;
                    shots.push((muzzle + Vec2::new(10.0 * k, 0.0), Vec2::new(0.5 * k, 3.0)));
                }
            }
            EnemyKind::Splitter => {
                let center = pos + Vec2::new(ENEMY_WIDTH / 2.0, 15.0);
                for k in 0..8 {
                    let angle = std::f32::consts::TAU * k as f32 / 8.0;
                    shots.push((center, Vec2::new(angle.cos(), angle.sin()) * 3.0));
                }
                cooldown *= 2.0;
            }
            EnemyKind::Elite => {
                for k in -1..=1 {
                    shots.push((muzzle, aim + Vec2::new(k as f32, 0.0)));
                }
            }
            EnemyKind::Grunt | EnemyKind::Speeder | EnemyKind::Tank | EnemyKind::Zigzag => {
                shots.push((muzzle, Vec2::new(0.0, 3.0 + wave * 0.15)));
            }
        }
        state.enemies[i].shoot_cooldown = cooldown;
    }

    for (pos, vel) in shots {
        let id = state.next_entity_id();
        state.enemy_bullets.push(Bullet::plain(id, pos, vel, 4.0));
    }
}

/// Boss descent, sweep and attack cycle
pub fn boss_ai(state: &mut SpaceState, slow: f32) {
    if state.buffs.is_frozen() {
        return;
    }
    let Some(mut boss) = state.boss.take() else {
        return;
    };
    if boss.frozen == 0 {
        drive_boss(state, &mut boss, slow);
    }
    state.boss = Some(boss);
}

fn drive_boss(state: &mut SpaceState, boss: &mut Boss, slow: f32) {
    let wave = state.wave as f32;
    let phase = boss.phase as f32;
    let size = boss.size();

    if boss.pos.y < BOSS_ENGAGE_Y {
        boss.pos.y += 1.5;
        return;
    }

    let move_speed = (1.5 + phase * 0.3) * (1.0 + wave * 0.01);
    boss.attack_timer += slow;
    boss.pos.x += boss.move_direction * move_speed * slow;
    if boss.pos.x < 20.0 {
        boss.move_direction = 1.0;
    }
    if boss.pos.x > GAME_WIDTH - size.x - 20.0 {
        boss.move_direction = -1.0;
    }

    let attack_cooldown = (80.0 - wave * 0.6).max(50.0) - phase * 5.0;
    if boss.attack_timer > attack_cooldown {
        boss.attack_timer = 0.0;
        boss_attack(state, boss);
        boss.attack_pattern = (boss.attack_pattern + 1) % Boss::ATTACK_PATTERNS;
    }

    if boss.update_phase() {
        log::info!("{} enters phase {}", boss.kind.stats().name, boss.phase);
    }
}

fn boss_attack(state: &mut SpaceState, boss: &Boss) {
    let wave = state.wave;
    let bullet_speed = 3.0 + wave as f32 * 0.05;
    let size = boss.size();
    let center_x = boss.pos.x + size.x / 2.0;
    let muzzle = Vec2::new(center_x, boss.pos.y + size.y);
    let mut shots: Vec<(Vec2, Vec2)> = Vec::new();

    match boss.attack_pattern {
        0 => {
            // Spread
            let half = ((5 + wave / 10).min(8) / 2) as i32;
            for k in -half..=half {
                shots.push((muzzle, Vec2::new(k as f32 * 0.8, bullet_speed)));
            }
        }
        1 => {
            // Aimed burst
            let aim = direction_to(Vec2::new(center_x, boss.pos.y), state.player.pos)
                .unwrap_or(Vec2::Y)
                * (bullet_speed + 1.0);
            let count = 3 + wave / 15;
            for k in 0..count {
                let offset = (k as f32 - (count - 1) as f32 / 2.0) * 15.0;
                shots.push((muzzle + Vec2::new(offset, 0.0), aim));
            }
        }
        2 => {
            // Spiral
            let count = 6 + wave / 10;
            let origin = Vec2::new(center_x, boss.pos.y + size.y / 2.0);
            let spin = state.time_ticks as f32 * 0.05;
            for k in 0..count {
                let angle = std::f32::consts::TAU * k as f32 / count as f32 + spin;
                shots.push((
                    origin,
                    Vec2::new(angle.cos() * (bullet_speed - 0.5), angle.sin() * 2.0 + 2.0),
                ));
            }
        }
        _ => {
            // Minions, only while the field is thin
            if state.enemies.len() < MAX_MINION_HEADROOM {
                for k in 0..2 + wave / 20 {
                    let pos = boss.pos + Vec2::new(20.0 + k as f32 * 35.0, size.y + 10.0);
                    let minion = create_enemy(pos, wave, false, &mut state.ids, &mut state.rng);
                    state.enemies.push(minion);
                }
            }
        }
    }

    for (pos, vel) in shots {
        let id = state.next_entity_id();
        state.enemy_bullets.push(Bullet::plain(id, pos, vel, 4.0));
    }
}

pub fn move_enemy_bullets(state: &mut SpaceState, slow: f32) {
    for b in &mut state.enemy_bullets {
        b.pos += b.vel * slow;
    }
    state.enemy_bullets.retain(|b| !b.out_of_bounds());
}

/// Pickups fall; the magnet drags nearby ones toward the player
pub fn move_pickups(state: &mut SpaceState, slow: f32) {
    let magnet = state.buffs.caps.magnet || state.loadout.has_magnet();
    let range = state.loadout.magnet_range();
    let center = state.player.center();

    for p in &mut state.power_ups {
        p.pos.y += PICKUP_FALL_SPEED * slow;
        if magnet {
            let delta = center - p.pos;
            if delta.length() < range {
                p.pos += delta * MAGNET_PULL * slow;
            }
        }
    }
    state.power_ups.retain(|p| p.pos.y < GAME_HEIGHT + 20.0);
}

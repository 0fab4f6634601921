//! Space shooter spawner and difficulty curve
//!
//! Formations cycle with `wave % 4`; every fifth wave is boss-only.

use glam::Vec2;
use rand::Rng;

use super::state::{
    BOSS_WAVE_INTERVAL, Boss, BossKind, ENEMY_WIDTH, Enemy, EnemyKind, GAME_WIDTH, PowerUpKind,
    Tentacle,
};
use crate::sim::ids::IdAllocator;

const V_SPACING: f32 = 25.0;
/// Horizontal margin the V formation is kept inside
const V_MARGIN: f32 = 20.0;

/// Build the formation for `wave` (empty on boss waves)
pub fn create_enemy_wave<R: Rng>(wave: u32, ids: &mut IdAllocator, rng: &mut R) -> Vec<Enemy> {
    if wave % BOSS_WAVE_INTERVAL == 0 {
        return Vec::new();
    }

    let base_count = 8 + wave / 2;
    let mut enemies = Vec::new();

    match wave % 4 {
        0 => {
            let rows = (2 + wave / 8).min(6);
            let cols = (4 + wave / 6).min(10);
            for row in 0..rows {
                for col in 0..cols {
                    let pos = Vec2::new(50.0 + col as f32 * 48.0, 40.0 + row as f32 * 38.0);
                    enemies.push(create_enemy(pos, wave, row == 0, ids, rng));
                }
            }
        }
        1 => {
            let start = GAME_WIDTH / 2.0 - 120.0;
            let span = GAME_WIDTH - V_MARGIN - ENEMY_WIDTH;
            let (start, spacing) = if base_count > 1
                && start + V_SPACING * (base_count - 1) as f32 > span
            {
                (V_MARGIN, (span - V_MARGIN) / (base_count - 1) as f32)
            } else {
                (start, V_SPACING)
            };
            let middle = base_count as f32 / 2.0;
            for i in 0..base_count {
                let depth = (i as f32 - middle).abs();
                let pos = Vec2::new(start + i as f32 * spacing, 30.0 + depth * 20.0);
                enemies.push(create_enemy(pos, wave, false, ids, rng));
            }
        }
        2 => {
            let count = 6 + wave / 3;
            let radius = Vec2::new(60.0 + wave as f32 * 2.0, 40.0 + wave as f32);
            for i in 0..count {
                let angle = std::f32::consts::TAU * i as f32 / count as f32;
                let pos = Vec2::new(
                    GAME_WIDTH / 2.0 + angle.cos() * radius.x,
                    140.0 + angle.sin() * radius.y,
                );
                enemies.push(create_enemy(pos, wave, false, ids, rng));
            }
        }
        _ => {
            for _ in 0..base_count {
                let pos = Vec2::new(
                    40.0 + rng.random::<f32>() * (GAME_WIDTH - 80.0),
                    30.0 + rng.random::<f32>() * 140.0,
                );
                enemies.push(create_enemy(pos, wave, false, ids, rng));
            }
        }
    }

    enemies
}

/// Roll an enemy kind; thresholds unlock with wave
pub fn roll_enemy_kind(roll: f32, wave: u32, front_row: bool) -> EnemyKind {
    let difficulty = wave.min(50) as f32;
    if wave >= 40 && roll < 0.10 {
        EnemyKind::Elite
    } else if wave >= 25 && roll < 0.12 {
        EnemyKind::Splitter
    } else if wave >= 20 && roll < 0.15 {
        EnemyKind::Sniper
    } else if wave >= 15 && roll < 0.18 {
        EnemyKind::Bomber
    } else if wave >= 10 && roll < 0.20 {
        EnemyKind::Zigzag
    } else if front_row || roll < 0.12 + difficulty * 0.01 {
        EnemyKind::Tank
    } else if roll < 0.3 {
        EnemyKind::Speeder
    } else {
        EnemyKind::Grunt
    }
}

/// Health after wave scaling (+50% every ten waves)
pub fn scaled_enemy_health(kind: EnemyKind, wave: u32) -> f32 {
    let multiplier = 1.0 + (wave / 10) as f32 * 0.5;
    (kind.stats().health * multiplier).ceil()
}

/// One formation member at `pos` with a rolled kind
pub fn create_enemy<R: Rng>(
    pos: Vec2,
    wave: u32,
    front_row: bool,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> Enemy {
    let kind = roll_enemy_kind(rng.random::<f32>(), wave, front_row);
    let health = scaled_enemy_health(kind, wave);
    Enemy {
        id: ids.next_id(),
        kind,
        pos,
        health,
        max_health: health,
        shoot_cooldown: rng.random::<f32>() * 60.0,
        behavior: rng.random::<f32>() * std::f32::consts::TAU,
        frozen: 0,
        burning: 0,
    }
}

/// Spawn a plain enemy of a fixed kind (minions, splitter children)
pub fn spawn_enemy(kind: EnemyKind, pos: Vec2, health: f32, ids: &mut IdAllocator) -> Enemy {
    Enemy {
        id: ids.next_id(),
        kind,
        pos,
        health,
        max_health: health,
        shoot_cooldown: 0.0,
        behavior: 0.0,
        frozen: 0,
        burning: 0,
    }
}

/// Which boss guards `wave`
pub fn boss_for_wave(wave: u32) -> BossKind {
    let index = (wave / BOSS_WAVE_INTERVAL).saturating_sub(1) as usize % BossKind::ROTATION.len();
    BossKind::ROTATION[index]
}

/// Build the boss for `wave`, parked above the screen
pub fn create_boss(wave: u32, ids: &mut IdAllocator) -> Boss {
    let kind = boss_for_wave(wave);
    let stats = kind.stats();

    // Each 25-wave cycle multiplies health by 1.5, ramping 40% within a cycle
    let since_first = wave.saturating_sub(BOSS_WAVE_INTERVAL);
    let cycle = since_first / 25;
    let progress = (since_first % 25) as f32 / 25.0;
    let scale = 1.5f32.powi(cycle as i32) * (1.0 + progress * 0.4);
    let health = (stats.base_health * scale).ceil();

    let tentacles = if kind == BossKind::Kraken {
        let count = 6 + cycle * 2;
        (0..count)
            .map(|i| Tentacle {
                angle: std::f32::consts::TAU * i as f32 / count as f32,
                length: 60.0 + wave as f32 * 0.5,
            })
            .collect()
    } else {
        Vec::new()
    };

    Boss {
        id: ids.next_id(),
        kind,
        pos: Vec2::new(GAME_WIDTH / 2.0 - stats.width / 2.0, -stats.height - 20.0),
        phase: 1,
        health,
        max_health: health,
        attack_pattern: 0,
        attack_timer: 0.0,
        move_direction: 1.0,
        frozen: 0,
        shields: if kind == BossKind::Deathstar { 3 + cycle * 2 } else { 0 },
        tentacles,
        heads: if kind == BossKind::Hydra { 3 + cycle } else { 0 },
    }
}

/// Drop weight for one pickup kind; luck lifts rare kinds more than common ones
pub fn drop_weight(kind: PowerUpKind, luck: u32) -> f32 {
    let rarity = kind.info().rarity;
    (1.0 / rarity) * (1.0 + 0.1 * luck as f32 * (rarity - 1.0))
}

/// Weighted roll over every droppable kind (never a coin)
pub fn random_power_up<R: Rng>(rng: &mut R, luck: u32) -> PowerUpKind {
    let total: f32 = PowerUpKind::DROPPABLE
        .iter()
        .map(|k| drop_weight(*k, luck))
        .sum();
    let mut roll = rng.random::<f32>() * total;
    for kind in PowerUpKind::DROPPABLE {
        roll -= drop_weight(kind, luck);
        if roll <= 0.0 {
            return kind;
        }
    }
    PowerUpKind::Rapid
}

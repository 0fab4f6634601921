//! Tank spawner: a timer that shortens with stage, enemies entering from a
//! random edge

use glam::Vec2;
use rand::Rng;

use super::state::{
    ARENA_HEIGHT, ARENA_WIDTH, BOSS_HEALTH, ENEMY_HEALTH, ENEMY_RADIUS, Pursuer, TankState,
};

/// Boss pursuers enter this far outside the arena
const BOSS_EDGE_OFFSET: f32 = 50.0;

/// Ticks between spawns at `stage`
pub fn spawn_interval(stage: u32) -> u32 {
    120u32
        .saturating_sub(10 * stage.saturating_sub(1).min(12))
        .max(40)
}

/// A point just outside a uniformly chosen edge
pub fn edge_point<R: Rng>(rng: &mut R, offset: f32) -> Vec2 {
    match rng.random_range(0..4) {
        0 => Vec2::new(rng.random::<f32>() * ARENA_WIDTH, -offset),
        1 => Vec2::new(ARENA_WIDTH + offset, rng.random::<f32>() * ARENA_HEIGHT),
        2 => Vec2::new(rng.random::<f32>() * ARENA_WIDTH, ARENA_HEIGHT + offset),
        _ => Vec2::new(-offset, rng.random::<f32>() * ARENA_HEIGHT),
    }
}

/// Advance the spawn timer; spawn one pursuer when it runs out
pub fn tick_spawner(state: &mut TankState) {
    state.spawn_timer += 1;
    if state.spawn_timer <= spawn_interval(state.stage) {
        return;
    }
    state.spawn_timer = 0;
    let pos = edge_point(&mut state.rng, ENEMY_RADIUS);
    let id = state.next_entity_id();
    state.enemies.push(Pursuer {
        id,
        pos,
        health: ENEMY_HEALTH,
        max_health: ENEMY_HEALTH,
        boss: false,
    });
}

/// Boss-tier pursuer for every third stage
pub fn spawn_boss(state: &mut TankState) {
    let pos = edge_point(&mut state.rng, BOSS_EDGE_OFFSET);
    let id = state.next_entity_id();
    state.enemies.push(Pursuer {
        id,
        pos,
        health: BOSS_HEALTH,
        max_health: BOSS_HEALTH,
        boss: true,
    });
    log::info!("stage {}: boss incoming", state.stage);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_spawn_interval_floor() {
        assert_eq!(spawn_interval(1), 120);
        assert_eq!(spawn_interval(2), 110);
        assert_eq!(spawn_interval(9), 40);
        assert_eq!(spawn_interval(50), 40);
    }

    #[test]
    fn test_spawner_fires_after_interval() {
        let mut state = TankState::new(3, &Settings::default());
        for _ in 0..120 {
            tick_spawner(&mut state);
        }
        assert!(state.enemies.is_empty());
        tick_spawner(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_timer, 0);

        let e = &state.enemies[0];
        let outside =
            e.pos.x < 0.0 || e.pos.x > ARENA_WIDTH || e.pos.y < 0.0 || e.pos.y > ARENA_HEIGHT;
        assert!(outside);
        assert_eq!(e.health, 3);
    }
}

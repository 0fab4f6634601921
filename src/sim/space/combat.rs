//! Space shooter combat resolution
//!
//! Phases run in a fixed order each tick: hazards (black holes, fire
//! trails), player bullets vs boss, player bullets vs enemies, enemy bullets
//! vs player, pickups vs player. Removals are deferred to the end of a phase.

use glam::Vec2;
use rand::Rng;

use super::powerups::apply_power_up;
use super::spawn::{random_power_up, spawn_enemy};
use super::state::{
    Boss, COMBO_WINDOW_TICKS, ENEMY_HEIGHT, ENEMY_WIDTH, EXPLOSIVE_SPLASH_RADIUS, EnemyKind,
    LOSE_LINE_Y, MERCY_RADIUS, PLAYER_WIDTH, PowerUp, PowerUpKind, SpaceState,
};
use crate::sim::collision::{Rect, within};

const BLACK_HOLE_REACH: f32 = 150.0;
const BLACK_HOLE_CORE: f32 = 20.0;
const BLACK_HOLE_BULLET_EATER: f32 = 30.0;
const BLACK_HOLE_PULL: f32 = 300.0;
const FIRE_TRAIL_DAMAGE: f32 = 0.05;
const FIRE_TRAIL_BURN_TICKS: u32 = 30;
/// Lifesteal banks this many hundredths of a life per kill
const LIFESTEAL_PER_KILL: u32 = 5;
const COIN_DROP_CHANCE: f32 = 0.15;
const BOSS_DROP_COUNT: u32 = 6;
const SHIELD_COLOR: u32 = 0x3b82f6;

/// Score, combo, drops and side effects of one enemy death
pub fn award_kill(state: &mut SpaceState, kind: EnemyKind, pos: Vec2) {
    let stats = kind.stats();

    state.combo += 1;
    state.combo_timer = COMBO_WINDOW_TICKS;
    let multiplier = state.combo_multiplier();
    state.score += stats.points * multiplier as u64 * state.buffs.score_multiplier();

    if state.buffs.caps.vampire && state.player.lives < state.player.max_lives {
        state.player.life_bank += LIFESTEAL_PER_KILL;
        if state.player.life_bank >= 100 {
            state.player.life_bank -= 100;
            state.player.heal(1);
        }
    }

    let center = pos + Vec2::new(ENEMY_WIDTH / 2.0, ENEMY_HEIGHT / 2.0);
    state.particles.burst(center, stats.color, 8);
    if state.combo > 1 {
        state.particles.text(
            Vec2::new(center.x, pos.y),
            format!("x{multiplier}"),
            0xffd700,
        );
    }

    if kind == EnemyKind::Splitter {
        for dx in [-20.0, 20.0] {
            let at = pos + Vec2::new(dx, 0.0);
            let child = spawn_enemy(EnemyKind::Speeder, at, 1.0, &mut state.ids);
            state.enemies.push(child);
        }
    }

    let luck = state.loadout.luck;
    if state.rng.random::<f32>() < 0.12 + 0.02 * luck as f32 {
        let kind = random_power_up(&mut state.rng, luck);
        drop_pickup(state, kind, pos + Vec2::new(5.0, 0.0));
    }
    if state.rng.random::<f32>() < COIN_DROP_CHANCE {
        drop_pickup(state, PowerUpKind::Coin, pos + Vec2::new(15.0, 0.0));
    }
}

/// Base points and an explosion, nothing else (nuke)
pub fn kill_enemy_plain(state: &mut SpaceState, kind: EnemyKind, pos: Vec2, color: u32) {
    state.score += kind.stats().points;
    let center = pos + Vec2::new(ENEMY_WIDTH / 2.0, ENEMY_HEIGHT / 2.0);
    state.particles.burst(center, color, 6);
}

pub fn drop_pickup(state: &mut SpaceState, kind: PowerUpKind, pos: Vec2) {
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp { id, kind, pos });
}

/// Boss death: rewards, drops and removal in one step
pub fn defeat_boss(state: &mut SpaceState, boss: Boss) {
    let stats = boss.kind.stats();
    let size = boss.size();
    let wave = state.wave;

    for _ in 0..25 {
        let offset = Vec2::new(state.rng.random::<f32>(), state.rng.random::<f32>()) * size;
        let at = boss.pos + offset;
        state.particles.burst(at, stats.color, 8);
    }

    let bonus = (500 + 50 * wave as u64) * state.buffs.score_multiplier();
    state.score += bonus;
    state.coins_collected += 2 * wave as u64;
    let center = boss.center();
    state.particles.text(center, format!("+{bonus}"), 0xffd700);
    state.screen_shake = 25.0;

    let luck = state.loadout.luck;
    for i in 0..BOSS_DROP_COUNT {
        let kind = random_power_up(&mut state.rng, luck);
        let pos = Vec2::new(boss.pos.x + 15.0 + i as f32 * 18.0, center.y);
        drop_pickup(state, kind, pos);
    }
    drop_pickup(state, PowerUpKind::Coin, center + Vec2::new(-15.0, 20.0));
    drop_pickup(state, PowerUpKind::Coin, center + Vec2::new(15.0, 20.0));
    drop_pickup(state, PowerUpKind::Extralife, center + Vec2::new(0.0, 40.0));

    state.player.heal(1);
    state.bosses_killed += 1;
    state.boss = None;
    log::info!("wave {wave}: {} defeated (+{bonus})", stats.name);
}

/// Gravity wells pull, swallow enemies and eat enemy bullets
pub fn resolve_black_holes(state: &mut SpaceState) {
    for hole in &mut state.black_holes {
        hole.life = hole.life.saturating_sub(1);
    }
    state.black_holes.retain(|h| h.life > 0);
    if state.black_holes.is_empty() {
        return;
    }

    let holes: Vec<Vec2> = state.black_holes.iter().map(|h| h.pos).collect();
    let mut swallowed = Vec::new();
    for hole in &holes {
        for e in state.enemies.iter_mut().filter(|e| e.is_alive()) {
            let delta = *hole - e.pos;
            let dist = delta.length();
            if dist < BLACK_HOLE_CORE {
                e.health = 0.0;
                swallowed.push((e.kind, e.pos));
            } else if dist < BLACK_HOLE_REACH {
                e.pos += delta * (BLACK_HOLE_PULL / (dist * dist));
            }
        }
        state
            .enemy_bullets
            .retain(|b| !within(b.pos, *hole, BLACK_HOLE_BULLET_EATER));
    }

    state.enemies.retain(|e| e.is_alive());
    for (kind, pos) in swallowed {
        award_kill(state, kind, pos);
    }
}

/// Fire puddles age, scorch overlapping enemies, and can finish them
pub fn burn_enemies(state: &mut SpaceState) {
    for trail in &mut state.fire_trails {
        trail.life = trail.life.saturating_sub(1);
    }
    state.fire_trails.retain(|t| t.life > 0);
    if state.fire_trails.is_empty() {
        return;
    }

    let mut burned = Vec::new();
    for trail in &state.fire_trails {
        let area = Rect::centered(trail.pos, 16.0, 16.0);
        for e in state.enemies.iter_mut().filter(|e| e.is_alive()) {
            if area.overlaps(&e.hitbox()) {
                e.health -= FIRE_TRAIL_DAMAGE;
                e.burning = FIRE_TRAIL_BURN_TICKS;
                if !e.is_alive() {
                    burned.push((e.kind, e.pos));
                }
            }
        }
    }

    state.enemies.retain(|e| e.is_alive());
    for (kind, pos) in burned {
        award_kill(state, kind, pos);
    }
}

/// Player bullets against the boss. Returns which bullets were consumed.
pub fn player_bullets_vs_boss(state: &mut SpaceState) -> Vec<bool> {
    let mut consumed = vec![false; state.player_bullets.len()];
    let Some(mut boss) = state.boss.take() else {
        return consumed;
    };
    if !boss.is_engaged() {
        state.boss = Some(boss);
        return consumed;
    }

    let caps = state.buffs.caps;
    let damage = (2 + state.loadout.damage_bonus) as f32 * if caps.explosive { 3.0 } else { 1.0 };
    let color = boss.kind.stats().color;

    for i in 0..state.player_bullets.len() {
        let (hitbox, piercing, pos) = {
            let b = &state.player_bullets[i];
            (b.hitbox(), b.piercing, b.pos)
        };
        if !hitbox.overlaps(&boss.hitbox()) {
            continue;
        }
        if !piercing {
            consumed[i] = true;
        }

        if boss.absorbs_hits() {
            boss.shields -= 1;
            state.particles.burst(pos, SHIELD_COLOR, 6);
            continue;
        }

        boss.health -= damage;
        let sparks = if caps.explosive { 10 } else { 4 };
        state.particles.burst(pos, color, sparks);
        state.shake(2.0);
        if boss.update_phase() {
            log::info!("{} enters phase {}", boss.kind.stats().name, boss.phase);
        }

        if boss.health <= 0.0 {
            defeat_boss(state, boss);
            return consumed;
        }
    }

    state.boss = Some(boss);
    consumed
}

/// Player bullets against enemies. Direct damage lands in bullet order;
/// explosive splash is summed during the pass and applied afterwards.
pub fn player_bullets_vs_enemies(state: &mut SpaceState, consumed: &mut [bool]) {
    let caps = state.buffs.caps;
    let damage = (1 + state.loadout.damage_bonus) as f32 * if caps.explosive { 2.0 } else { 1.0 };
    let mut splash = vec![0.0f32; state.enemies.len()];
    let mut killed: Vec<usize> = Vec::new();

    for bi in 0..state.player_bullets.len() {
        if consumed[bi] {
            continue;
        }
        let (hitbox, piercing, pos) = {
            let b = &state.player_bullets[bi];
            (b.hitbox(), b.piercing, b.pos)
        };

        for ei in 0..state.enemies.len() {
            if !state.enemies[ei].is_alive() || !hitbox.overlaps(&state.enemies[ei].hitbox()) {
                continue;
            }

            state.enemies[ei].health -= damage;
            let target = state.enemies[ei].pos;

            if caps.explosive {
                let center = target + Vec2::new(ENEMY_WIDTH / 2.0, ENEMY_HEIGHT / 2.0);
                state.particles.burst(center, 0xff6b00, 8);
                for (oi, other) in state.enemies.iter().enumerate() {
                    if oi != ei && within(other.pos, target, EXPLOSIVE_SPLASH_RADIUS) {
                        splash[oi] += 1.0;
                    }
                }
            }

            if state.enemies[ei].is_alive() {
                state.particles.burst(pos, 0xffffff, 2);
            } else {
                killed.push(ei);
            }

            if !piercing {
                consumed[bi] = true;
                break;
            }
        }
    }

    for (e, extra) in state.enemies.iter_mut().zip(&splash) {
        if *extra > 0.0 && e.is_alive() {
            e.health -= extra;
        }
    }
    for (ei, e) in state.enemies.iter().enumerate() {
        if !e.is_alive() && !killed.contains(&ei) {
            killed.push(ei);
        }
    }

    let deaths: Vec<(EnemyKind, Vec2)> = killed
        .iter()
        .map(|&i| (state.enemies[i].kind, state.enemies[i].pos))
        .collect();
    state.enemies.retain(|e| e.is_alive());
    for (kind, pos) in deaths {
        award_kill(state, kind, pos);
    }

    let mut flags = consumed.iter();
    state
        .player_bullets
        .retain(|_| !flags.next().copied().unwrap_or(false));
}

/// The combo window closes once per tick after the bullet phases
pub fn tick_combo(state: &mut SpaceState) {
    if state.combo_timer > 0 {
        state.combo_timer -= 1;
        if state.combo_timer == 0 {
            state.combo = 0;
        }
    }
}

/// At most one enemy bullet connects per tick
pub fn enemy_bullets_vs_player(state: &mut SpaceState) {
    if state.buffs.is_ghost() {
        return;
    }
    let hurtbox = state.player.hurtbox();
    let Some(index) = state
        .enemy_bullets
        .iter()
        .position(|b| b.enemy_hitbox().overlaps(&hurtbox))
    else {
        return;
    };
    let bullet = state.enemy_bullets.remove(index);

    if state.player.has_shield && state.player.shield_hits > 0 {
        state.player.shield_hits -= 1;
        if state.player.shield_hits == 0 {
            state.player.has_shield = false;
        }
        state.particles.burst(bullet.pos, SHIELD_COLOR, 6);
        return;
    }

    state.player.lives = state.player.lives.saturating_sub(1);
    state.combo = 0;
    state.combo_timer = 0;
    state.screen_shake = 10.0;
    let center = state.player.center();
    state.particles.burst(center, 0xef4444, 12);
    let player = state.player.pos;
    state
        .enemy_bullets
        .retain(|b| !within(b.pos, player, MERCY_RADIUS));

    if state.player.lives == 0 && state.player.has_auto_revive && !state.player.used_revive {
        state.player.lives = 1;
        state.player.used_revive = true;
        let at = state.player.pos + Vec2::new(PLAYER_WIDTH / 2.0, -20.0);
        state.particles.text(at, "REVIVED!", 0x4ade80);
        state.screen_shake = 15.0;
        log::info!("auto revive used");
    }
}

/// Pickups touching the (inflated) player box are collected in order
pub fn collect_pickups(state: &mut SpaceState) {
    let reach = state.player.pickup_box();
    let (taken, kept): (Vec<PowerUp>, Vec<PowerUp>) = std::mem::take(&mut state.power_ups)
        .into_iter()
        .partition(|p| p.hitbox().overlaps(&reach));
    state.power_ups = kept;

    for pickup in taken {
        if pickup.kind == PowerUpKind::Coin {
            let base = 1.0 + 0.1 * state.wave as f32;
            let value = (base * state.loadout.coin_bonus()).ceil() as u64;
            state.coins_collected += value;
            state.particles.text(
                pickup.pos - Vec2::new(0.0, 10.0),
                format!("+{value}"),
                0xfbbf24,
            );
        } else {
            let color = pickup.kind.info().color;
            let center = pickup.pos + Vec2::new(12.0, 12.0);
            state.particles.burst(center, color, 6);
            apply_power_up(state, pickup.kind);
        }
    }
}

/// Any formation member past the lose line ends the run
pub fn enemies_overran(state: &SpaceState) -> bool {
    state.enemies.iter().any(|e| e.pos.y > LOSE_LINE_Y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Loadout;
    use crate::settings::Settings;
    use crate::sim::space::spawn::create_boss;
    use crate::sim::space::state::{BlackHole, BossKind, Bullet, FireTrail};

    fn empty_state(loadout: Loadout) -> SpaceState {
        let mut state = SpaceState::new(21, loadout, &Settings::default());
        state.enemies.clear();
        state
    }

    fn add_enemy(state: &mut SpaceState, kind: EnemyKind, pos: Vec2, health: f32) {
        let e = spawn_enemy(kind, pos, health, &mut state.ids);
        state.enemies.push(e);
    }

    fn add_bullet(state: &mut SpaceState, pos: Vec2, piercing: bool) {
        let id = state.next_entity_id();
        let mut b = Bullet::plain(id, pos, Vec2::new(0.0, -10.0), 4.0);
        b.piercing = piercing;
        state.player_bullets.push(b);
    }

    fn run_bullet_phases(state: &mut SpaceState) {
        let mut consumed = player_bullets_vs_boss(state);
        player_bullets_vs_enemies(state, &mut consumed);
        tick_combo(state);
    }

    #[test]
    fn test_non_piercing_bullet_consumed_on_first_hit() {
        let mut state = empty_state(Loadout::default());
        add_enemy(&mut state, EnemyKind::Tank, Vec2::new(100.0, 100.0), 4.0);
        add_enemy(&mut state, EnemyKind::Tank, Vec2::new(100.0, 100.0), 4.0);
        add_bullet(&mut state, Vec2::new(110.0, 105.0), false);
        run_bullet_phases(&mut state);
        assert!(state.player_bullets.is_empty());
        assert_eq!(state.enemies[0].health, 3.0);
        assert_eq!(state.enemies[1].health, 4.0);
    }

    #[test]
    fn test_piercing_hits_each_overlapping_enemy_once() {
        let mut state = empty_state(Loadout::default());
        for _ in 0..3 {
            add_enemy(&mut state, EnemyKind::Tank, Vec2::new(100.0, 100.0), 4.0);
        }
        add_bullet(&mut state, Vec2::new(110.0, 105.0), true);
        run_bullet_phases(&mut state);
        assert_eq!(state.player_bullets.len(), 1);
        assert!(state.enemies.iter().all(|e| e.health == 3.0));
    }

    #[test]
    fn test_kill_scores_with_combo() {
        let mut state = empty_state(Loadout::default());
        add_enemy(&mut state, EnemyKind::Grunt, Vec2::new(100.0, 100.0), 1.0);
        add_enemy(&mut state, EnemyKind::Grunt, Vec2::new(300.0, 100.0), 1.0);
        add_bullet(&mut state, Vec2::new(110.0, 105.0), false);
        add_bullet(&mut state, Vec2::new(310.0, 105.0), false);
        run_bullet_phases(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.combo, 2);
        assert_eq!(state.combo_timer, COMBO_WINDOW_TICKS - 1);
        assert_eq!(state.score, 10 + 20);
    }

    #[test]
    fn test_combo_resets_when_window_closes() {
        let mut state = empty_state(Loadout::default());
        award_kill(&mut state, EnemyKind::Grunt, Vec2::new(100.0, 100.0));
        for _ in 0..COMBO_WINDOW_TICKS - 1 {
            tick_combo(&mut state);
            assert_eq!(state.combo, 1);
        }
        tick_combo(&mut state);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn test_combo_multiplier_caps_at_ten() {
        let mut state = empty_state(Loadout::default());
        state.combo = 15;
        award_kill(&mut state, EnemyKind::Grunt, Vec2::new(100.0, 100.0));
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_explosive_splash_applied_after_pass() {
        let mut state = empty_state(Loadout::default());
        state.buffs.caps.explosive = true;
        add_enemy(&mut state, EnemyKind::Tank, Vec2::new(100.0, 100.0), 4.0);
        add_enemy(&mut state, EnemyKind::Grunt, Vec2::new(140.0, 100.0), 1.0);
        add_bullet(&mut state, Vec2::new(110.0, 105.0), false);
        run_bullet_phases(&mut state);
        // Direct hit deals 2, splash kills the neighbour
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 2.0);
        assert_eq!(state.combo, 1);
        assert!(state.enemies.iter().all(|e| e.health > 0.0));
    }

    #[test]
    fn test_splitter_spawns_two_speeders() {
        let mut state = empty_state(Loadout::default());
        award_kill(&mut state, EnemyKind::Splitter, Vec2::new(200.0, 100.0));
        let speeders: Vec<_> = state
            .enemies
            .iter()
            .filter(|e| e.kind == EnemyKind::Speeder)
            .collect();
        assert_eq!(speeders.len(), 2);
        assert_eq!(speeders[0].pos.x, 180.0);
        assert_eq!(speeders[1].pos.x, 220.0);
    }

    #[test]
    fn test_deathstar_shields_absorb() {
        let mut state = empty_state(Loadout::default());
        let mut boss = create_boss(25, &mut state.ids);
        assert_eq!(boss.kind, BossKind::Deathstar);
        boss.pos = Vec2::new(100.0, 80.0);
        let health = boss.health;
        state.boss = Some(boss);
        add_bullet(&mut state, Vec2::new(150.0, 100.0), false);
        run_bullet_phases(&mut state);
        let boss = state.boss.as_ref().map(|b| (b.health, b.shields));
        assert_eq!(boss, Some((health, 2)));
        assert!(state.player_bullets.is_empty());
    }

    #[test]
    fn test_boss_not_hittable_during_entry() {
        let mut state = empty_state(Loadout::default());
        let mut boss = create_boss(5, &mut state.ids);
        boss.pos = Vec2::new(100.0, 30.0);
        state.boss = Some(boss);
        add_bullet(&mut state, Vec2::new(150.0, 40.0), false);
        run_bullet_phases(&mut state);
        assert_eq!(state.player_bullets.len(), 1);
    }

    #[test]
    fn test_boss_death_rewards() {
        let mut state = empty_state(Loadout::default());
        state.wave = 5;
        state.player.lives = 1;
        let mut boss = create_boss(5, &mut state.ids);
        boss.pos = Vec2::new(100.0, 80.0);
        boss.health = 1.0;
        state.boss = Some(boss);
        add_bullet(&mut state, Vec2::new(150.0, 100.0), false);
        add_bullet(&mut state, Vec2::new(160.0, 100.0), false);
        run_bullet_phases(&mut state);
        assert!(state.boss.is_none());
        assert_eq!(state.bosses_killed, 1);
        assert_eq!(state.score, 750);
        assert_eq!(state.coins_collected, 10);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.power_ups.len(), 9);
        // The second bullet stopped processing against the dead boss
        assert_eq!(state.player_bullets.len(), 1);
    }

    #[test]
    fn test_shield_absorbs_then_breaks() {
        let mut state = empty_state(Loadout::default());
        state.player.has_shield = true;
        state.player.shield_hits = 3;
        let lives = state.player.lives;
        for _ in 0..3 {
            let at = state.player.center();
            state.enemy_bullets.push(Bullet::plain(1, at, Vec2::Y, 4.0));
            enemy_bullets_vs_player(&mut state);
        }
        assert_eq!(state.player.lives, lives);
        assert!(!state.player.has_shield);
        assert_eq!(state.player.shield_hits, 0);

        let at = state.player.center();
        state.enemy_bullets.push(Bullet::plain(2, at, Vec2::Y, 4.0));
        enemy_bullets_vs_player(&mut state);
        assert_eq!(state.player.lives, lives - 1);
    }

    #[test]
    fn test_one_hit_per_tick_and_mercy_clear() {
        let mut state = empty_state(Loadout::default());
        state.combo = 4;
        let at = state.player.center();
        for i in 0..3 {
            state.enemy_bullets.push(Bullet::plain(i, at, Vec2::Y, 4.0));
        }
        state
            .enemy_bullets
            .push(Bullet::plain(10, Vec2::new(20.0, 20.0), Vec2::Y, 4.0));
        enemy_bullets_vs_player(&mut state);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.combo, 0);
        assert_eq!(state.enemy_bullets.len(), 1);
    }

    #[test]
    fn test_auto_revive_once() {
        let loadout = Loadout {
            auto_revive: true,
            ..Default::default()
        };
        let mut state = empty_state(loadout);
        state.player.lives = 1;
        let at = state.player.center();
        state.enemy_bullets.push(Bullet::plain(1, at, Vec2::Y, 4.0));
        enemy_bullets_vs_player(&mut state);
        assert_eq!(state.player.lives, 1);
        assert!(state.player.used_revive);

        state.enemy_bullets.push(Bullet::plain(2, at, Vec2::Y, 4.0));
        enemy_bullets_vs_player(&mut state);
        assert_eq!(state.player.lives, 0);
    }

    #[test]
    fn test_ghost_ignores_bullets() {
        let mut state = empty_state(Loadout::default());
        state.buffs.ghost_timer = 10;
        let at = state.player.center();
        state.enemy_bullets.push(Bullet::plain(1, at, Vec2::Y, 4.0));
        enemy_bullets_vs_player(&mut state);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.enemy_bullets.len(), 1);
    }

    #[test]
    fn test_coin_value_scales_with_wave_and_bonus() {
        let loadout = Loadout {
            coin_bonus_level: 5,
            ..Default::default()
        };
        let mut state = empty_state(loadout);
        state.wave = 10;
        let at = state.player.pos;
        drop_pickup(&mut state, PowerUpKind::Coin, at);
        collect_pickups(&mut state);
        // ceil(2.0 * 1.5)
        assert_eq!(state.coins_collected, 3);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_black_hole_swallows_and_scores() {
        let mut state = empty_state(Loadout::default());
        let id = state.next_entity_id();
        state.black_holes.push(BlackHole {
            id,
            pos: Vec2::new(260.0, 200.0),
            life: 300,
        });
        add_enemy(&mut state, EnemyKind::Grunt, Vec2::new(255.0, 195.0), 1.0);
        add_enemy(&mut state, EnemyKind::Grunt, Vec2::new(160.0, 200.0), 1.0);
        resolve_black_holes(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 10);
        assert!(state.enemies[0].pos.x > 160.0);
        assert_eq!(state.black_holes[0].life, 299);
    }

    #[test]
    fn test_fire_trail_burns() {
        let mut state = empty_state(Loadout::default());
        let id = state.next_entity_id();
        state.fire_trails.push(FireTrail {
            id,
            pos: Vec2::new(115.0, 113.0),
            life: 60,
        });
        add_enemy(&mut state, EnemyKind::Grunt, Vec2::new(100.0, 100.0), 1.0);
        burn_enemies(&mut state);
        assert!((state.enemies[0].health - 0.95).abs() < 1e-6);
        assert_eq!(state.enemies[0].burning, 30);
    }

    #[test]
    fn test_vampire_banks_life() {
        let mut state = empty_state(Loadout::default());
        state.buffs.caps.vampire = true;
        state.player.lives = 1;
        for _ in 0..20 {
            award_kill(&mut state, EnemyKind::Grunt, Vec2::new(100.0, 100.0));
        }
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.player.life_bank, 0);
    }
}

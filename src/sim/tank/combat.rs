//! Tank combat: shells against pursuers, pursuers against the hull

use super::spawn::spawn_boss;
use super::state::{INVINCIBLE_TICKS, PLAYER_RADIUS, Pursuer, TankState};
use super::weapon::{WeaponTier, stage_for_kills};
use crate::ms_to_ticks;
use crate::sim::collision::within;

const BEST_GUN_NOTICE_MS: u32 = 2000;
const STAGE_UP_NOTICE_MS: u32 = 1500;
const BOSS_NOTICE_MS: u32 = 2000;
const BOSS_STAGE_INTERVAL: u32 = 3;
/// Contact distance is trimmed by this much in the player's favour
const CONTACT_GRACE: f32 = 5.0;

/// Each shell is spent on the first pursuer it touches
pub fn shells_vs_enemies(state: &mut TankState) {
    let mut spent = vec![false; state.shells.len()];
    let mut dead: Vec<usize> = Vec::new();

    for (si, shell) in state.shells.iter().enumerate() {
        let target = state
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, e)| {
                e.health > 0 && !dead.contains(ei) && within(shell.pos, e.pos, e.radius())
            })
            .map(|(ei, _)| ei);
        let Some(ei) = target else {
            continue;
        };
        spent[si] = true;
        let enemy = &mut state.enemies[ei];
        enemy.health = enemy.health.saturating_sub(1);
        if enemy.health == 0 {
            dead.push(ei);
        }
    }

    let mut flags = spent.iter();
    state
        .shells
        .retain(|_| !flags.next().copied().unwrap_or(false));

    let fallen: Vec<Pursuer> = dead.iter().map(|&i| state.enemies[i].clone()).collect();
    state.enemies.retain(|e| e.health > 0);
    for enemy in fallen {
        record_kill(state, &enemy);
    }
}

/// Score the kill and run weapon/stage progression
fn record_kill(state: &mut TankState, enemy: &Pursuer) {
    state.score += enemy.points();
    state.kills += 1;
    if enemy.boss {
        state.bosses_killed += 1;
    }
    let color = if enemy.boss { 0xdc2626 } else { 0x65a30d };
    let count = if enemy.boss { 24 } else { 10 };
    state.particles.burst(enemy.pos, color, count);

    let tier = WeaponTier::from_kills(state.kills);
    if tier > state.tier {
        state.tier = tier;
        log::info!("gun upgraded to {}", tier.name());
        if tier == WeaponTier::MAX {
            state.notices.best_gun = ms_to_ticks(BEST_GUN_NOTICE_MS);
        }
    }

    let stage = stage_for_kills(state.kills);
    if stage > state.stage {
        state.stage = stage;
        state.notices.stage_up = ms_to_ticks(STAGE_UP_NOTICE_MS);
        log::info!("stage {stage} reached");
        if stage % BOSS_STAGE_INTERVAL == 0 {
            state.notices.boss_incoming = ms_to_ticks(BOSS_NOTICE_MS);
            spawn_boss(state);
        }
    }
}

/// Contact damage; at most one hit per tick, then a grace period
pub fn enemies_vs_player(state: &mut TankState) {
    if state.player.invincible > 0 {
        state.player.invincible -= 1;
        return;
    }

    let player = state.player.pos;
    let Some(index) = state
        .enemies
        .iter()
        .rposition(|e| within(player, e.pos, PLAYER_RADIUS + e.radius() - CONTACT_GRACE))
    else {
        return;
    };

    state.player.lives = state.player.lives.saturating_sub(1);
    state.player.invincible = INVINCIBLE_TICKS;
    if !state.enemies[index].boss {
        state.enemies.remove(index);
    }
    state.particles.burst(player, 0xef4444, 12);
}

//! Space shooter tick
//!
//! One call advances the run by one fixed step. Phase order: intro gate,
//! movement and weapons, AI, combat, buff timers, wave transition, terminal
//! check.

use super::combat;
use super::movement;
use super::powerups;
use super::spawn::{create_boss, create_enemy_wave};
use super::state::{
    BOSS_INTRO_STOP_Y, BOSS_INTRO_TICKS, SpaceInput, SpaceSnapshot, SpaceState, TOTAL_WAVES,
};
use crate::sim::runner::{RunPhase, RunResults, Simulation};

const SHAKE_DECAY: f32 = 0.5;
const INTRO_DESCENT: f32 = 2.0;

/// Advance the space shooter by one tick
pub fn tick(state: &mut SpaceState, input: &SpaceInput) -> Option<RunResults> {
    if state.phase.is_over() {
        return None;
    }
    if input.quit {
        abort(state);
        return None;
    }

    state.time_ticks += 1;
    state.boss_incoming = false;

    if state.phase == RunPhase::Intro {
        step_intro(state);
        return None;
    }

    let slow = state.buffs.slow_factor();

    movement::move_player(state, input, slow);
    powerups::drop_fire_trail(state);
    movement::spin_orbitals(state);
    powerups::fire_player_weapons(state, input);
    powerups::fire_orbitals(state);
    movement::move_player_bullets(state, slow);

    combat::resolve_black_holes(state);
    combat::burn_enemies(state);

    movement::move_enemies(state, slow);
    movement::enemy_fire(state);
    movement::boss_ai(state, slow);
    movement::move_enemy_bullets(state, slow);

    let mut consumed = combat::player_bullets_vs_boss(state);
    combat::player_bullets_vs_enemies(state, &mut consumed);
    combat::tick_combo(state);
    combat::enemy_bullets_vs_player(state);

    movement::follow_player(state);
    movement::move_pickups(state, slow);
    combat::collect_pickups(state);

    powerups::tick_buffs(state);
    state.screen_shake = (state.screen_shake - SHAKE_DECAY).max(0.0);
    state.particles.step(slow);

    if let Some(results) = advance_wave(state) {
        return Some(results);
    }

    if state.player.lives == 0 || combat::enemies_overran(state) {
        return Some(finish(state, RunPhase::Defeat));
    }

    None
}

/// Boss entry: only the boss moves; input is ignored
fn step_intro(state: &mut SpaceState) {
    state.intro_timer = state.intro_timer.saturating_sub(1);
    if let Some(boss) = state.boss.as_mut() {
        if boss.pos.y < BOSS_INTRO_STOP_Y {
            boss.pos.y += INTRO_DESCENT;
        }
    }
    if state.intro_timer == 0 {
        state.phase = RunPhase::Active;
    }
}

/// Wave cleared: bank the clear bonus, then spawn the next wave or win
fn advance_wave(state: &mut SpaceState) -> Option<RunResults> {
    if !state.enemies.is_empty() || state.boss.is_some() {
        return None;
    }

    state.wave += 1;
    state.coins_collected += (5.0 + 0.5 * state.wave as f32).floor() as u64;

    if state.wave > TOTAL_WAVES {
        return Some(finish(state, RunPhase::Victory));
    }

    state.enemy_bullets.clear();
    if SpaceState::is_boss_wave(state.wave) {
        let boss = create_boss(state.wave, &mut state.ids);
        log::info!(
            "wave {}: {} incoming ({} hp)",
            state.wave,
            boss.kind.stats().name,
            boss.max_health
        );
        state.boss = Some(boss);
        state.phase = RunPhase::Intro;
        state.intro_timer = BOSS_INTRO_TICKS;
        state.boss_incoming = true;
    } else {
        state.enemies = create_enemy_wave(state.wave, &mut state.ids, &mut state.rng);
        state.march.direction = 1.0;
        log::info!("wave {}: {} enemies", state.wave, state.enemies.len());
    }
    None
}

/// Enter a terminal phase and build the one-time results
fn finish(state: &mut SpaceState, phase: RunPhase) -> RunResults {
    state.phase = phase;
    let wave_reached = if phase == RunPhase::Victory {
        state.wave - 1
    } else {
        state.wave
    };
    let coins_earned = (state.coins_collected as f32 * state.loadout.coin_bonus()).floor() as u64;
    let results = RunResults {
        final_score: state.score,
        wave_reached,
        coins_earned,
        bosses_defeated: state.bosses_killed,
    };
    log::info!(
        "run over ({phase:?}): score {} wave {} coins {}",
        results.final_score,
        results.wave_reached,
        results.coins_earned
    );
    results
}

/// Quit to menu: drop every collection, no results
pub fn abort(state: &mut SpaceState) {
    state.phase = RunPhase::Aborted;
    state.player_bullets.clear();
    state.enemy_bullets.clear();
    state.enemies.clear();
    state.boss = None;
    state.power_ups.clear();
    state.wingmen.clear();
    state.orbitals.clear();
    state.black_holes.clear();
    state.fire_trails.clear();
    state.particles.clear();
    state.buffs.active.clear();
    log::info!("run aborted at wave {}", state.wave);
}

impl Simulation for SpaceState {
    type Input = SpaceInput;
    type Snapshot = SpaceSnapshot;

    fn tick(&mut self, input: &SpaceInput) -> Option<RunResults> {
        tick(self, input)
    }

    fn snapshot(&self) -> SpaceSnapshot {
        SpaceSnapshot::from(self)
    }

    fn phase(&self) -> RunPhase {
        self.phase
    }

    fn abort(&mut self) {
        abort(self);
    }
}

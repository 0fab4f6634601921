//! Tank survival tick

use glam::Vec2;

use super::combat;
use super::spawn::tick_spawner;
use super::state::{
    ARENA_HEIGHT, ARENA_WIDTH, PLAYER_RADIUS, PLAYER_SPEED, TankInput, TankSnapshot, TankState,
};
use super::weapon;
use crate::sim::collision::direction_to;
use crate::sim::runner::{RunPhase, RunResults, Simulation};

const BOSS_SPEED: f32 = 1.0;

/// Pursuit speed at `stage`
pub fn pursuer_speed(stage: u32) -> f32 {
    2.0 + 0.3 * stage.saturating_sub(1) as f32
}

/// Advance the tank game by one tick
pub fn tick(state: &mut TankState, input: &TankInput) -> Option<RunResults> {
    if state.phase.is_over() {
        return None;
    }
    if input.quit {
        abort(state);
        return None;
    }
    state.time_ticks += 1;

    move_player(state, input);
    weapon::aim(state, input);
    weapon::fire(state, input);
    move_shells(state);
    tick_spawner(state);
    pursue(state);

    combat::shells_vs_enemies(state);
    combat::enemies_vs_player(state);

    state.notices.tick();
    state.particles.step(1.0);

    if state.player.lives == 0 {
        return Some(finish(state));
    }
    None
}

fn move_player(state: &mut TankState, input: &TankInput) {
    let dir = Vec2::new(input.move_x.clamp(-1.0, 1.0), input.move_y.clamp(-1.0, 1.0));
    let pos = state.player.pos + dir * PLAYER_SPEED;
    state.player.pos = pos.clamp(
        Vec2::splat(PLAYER_RADIUS),
        Vec2::new(ARENA_WIDTH - PLAYER_RADIUS, ARENA_HEIGHT - PLAYER_RADIUS),
    );
}

fn move_shells(state: &mut TankState) {
    for shell in &mut state.shells {
        shell.pos += shell.vel;
    }
    state.shells.retain(|s| {
        s.pos.x > 0.0 && s.pos.x < ARENA_WIDTH && s.pos.y > 0.0 && s.pos.y < ARENA_HEIGHT
    });
}

fn pursue(state: &mut TankState) {
    let target = state.player.pos;
    let speed = pursuer_speed(state.stage);
    for enemy in &mut state.enemies {
        let step = if enemy.boss { BOSS_SPEED } else { speed };
        if let Some(dir) = direction_to(enemy.pos, target) {
            enemy.pos += dir * step;
        }
    }
}

fn finish(state: &mut TankState) -> RunResults {
    state.phase = RunPhase::Defeat;
    let results = RunResults {
        final_score: state.score,
        wave_reached: state.stage,
        coins_earned: 0,
        bosses_defeated: state.bosses_killed,
    };
    log::info!(
        "tank destroyed: score {} stage {} kills {}",
        state.score,
        state.stage,
        state.kills
    );
    results
}

/// Quit to menu: no results
pub fn abort(state: &mut TankState) {
    state.phase = RunPhase::Aborted;
    state.shells.clear();
    state.enemies.clear();
    state.particles.clear();
    log::info!("tank run aborted at stage {}", state.stage);
}

impl Simulation for TankState {
    type Input = TankInput;
    type Snapshot = TankSnapshot;

    fn tick(&mut self, input: &TankInput) -> Option<RunResults> {
        tick(self, input)
    }

    fn snapshot(&self) -> TankSnapshot {
        TankSnapshot::from(self)
    }

    fn phase(&self) -> RunPhase {
        self.phase
    }

    fn abort(&mut self) {
        abort(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::sim::runner::FixedStepDriver;
    use crate::sim::tank::state::{Pursuer, Shell};

    fn new_state() -> TankState {
        TankState::new(9, &Settings::default())
    }

    #[test]
    fn test_player_clamped_to_arena() {
        let mut state = new_state();
        state.player.pos = Vec2::new(22.0, 22.0);
        let input = TankInput {
            move_x: -3.0,
            move_y: -1.0,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_shells_leave_arena() {
        let mut state = new_state();
        state.shells.push(Shell {
            id: 1,
            pos: Vec2::new(795.0, 300.0),
            vel: Vec2::new(10.0, 0.0),
        });
        tick(&mut state, &TankInput::default());
        assert!(state.shells.is_empty());
    }

    #[test]
    fn test_pursuers_close_in() {
        let mut state = new_state();
        state.enemies.push(Pursuer {
            id: 1,
            pos: Vec2::new(100.0, 300.0),
            health: 3,
            max_health: 3,
            boss: false,
        });
        tick(&mut state, &TankInput::default());
        assert!((state.enemies[0].pos.x - 102.0).abs() < 1e-4);
        assert!((pursuer_speed(4) - 2.9).abs() < 1e-5);
    }

    #[test]
    fn test_last_life_ends_run_once() {
        let mut state = new_state();
        state.player.lives = 1;
        state.stage = 2;
        state.bosses_killed = 1;
        state.score = 420;
        let at = state.player.pos;
        state.enemies.push(Pursuer {
            id: 1,
            pos: at,
            health: 3,
            max_health: 3,
            boss: false,
        });
        let results = tick(&mut state, &TankInput::default());
        assert_eq!(state.phase, RunPhase::Defeat);
        assert_eq!(
            results,
            Some(RunResults {
                final_score: 420,
                wave_reached: 2,
                coins_earned: 0,
                bosses_defeated: 1,
            })
        );
        assert!(tick(&mut state, &TankInput::default()).is_none());
    }

    #[test]
    fn test_quit_aborts() {
        let mut state = new_state();
        let quit = TankInput {
            quit: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &quit).is_none());
        assert_eq!(state.phase, RunPhase::Aborted);
    }

    #[test]
    fn test_barrel_follows_aim_without_firing() {
        let mut state = new_state();
        let below = TankInput {
            aim: state.player.pos + Vec2::new(0.0, 120.0),
            ..Default::default()
        };
        tick(&mut state, &below);
        let snap = state.snapshot();
        assert!((snap.aim_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(snap.player.aim_angle, snap.aim_angle);
        assert!(state.shells.is_empty());

        // Aim point on the hull keeps the last heading
        let on_hull = TankInput {
            aim: state.player.pos,
            ..Default::default()
        };
        tick(&mut state, &on_hull);
        assert!((state.player.aim_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_one_trigger_pull_fires_one_volley() {
        let mut driver = FixedStepDriver::new(new_state());
        let mut input = TankInput {
            aim: Vec2::new(800.0, 300.0),
            fire: true,
            ..Default::default()
        };
        // Several frames of substeps, long enough to cycle the gun twice
        for _ in 0..4 {
            driver.advance(SIM_DT * 5.0, &mut input);
            assert!(!input.fire);
        }
        assert!(driver.ticks() >= 19);
        assert_eq!(driver.sim().shells.len(), 1);
    }

    #[test]
    fn test_trigger_pull_while_cycling_is_dropped() {
        let mut state = new_state();
        let pull = TankInput {
            aim: Vec2::new(800.0, 300.0),
            fire: true,
            ..Default::default()
        };
        let idle = TankInput {
            aim: pull.aim,
            ..Default::default()
        };
        tick(&mut state, &pull);
        tick(&mut state, &pull);
        for _ in 0..30 {
            tick(&mut state, &idle);
        }
        assert_eq!(state.shells.len(), 1);
    }
}

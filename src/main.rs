//! Arcade Sim headless driver
//!
//! Runs one game to completion (or a tick limit) with a simple autopilot,
//! folds the results into the profile and prints them as JSON.
//!
//! # Usage
//!
//! ```bash
//! arcade-sim --game space --seed 7
//! arcade-sim --game tank --ticks 20000 --profile profile.json
//! RUST_LOG=info arcade-sim --game space --settings settings.json
//! ```

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};
use glam::Vec2;
use serde::Serialize;

use arcade_sim::consts::SIM_DT;
use arcade_sim::sim::collision::nearest;
use arcade_sim::sim::{
    FixedStepDriver, RunPhase, RunResults, Simulation, SpaceInput, SpaceState, TankInput,
    TankState,
};
use arcade_sim::{PlayerProfile, QualityPreset, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Game {
    Space,
    Tank,
}

#[derive(Parser)]
#[command(name = "arcade-sim")]
#[command(author, version, about = "Headless runner for the arcade simulations")]
struct Args {
    /// Which game to run
    #[arg(long, short = 'g', value_enum, default_value = "space")]
    game: Game,

    /// RNG seed for the run (falls back to the settings file, then the clock)
    #[arg(long, short = 's')]
    seed: Option<u64>,

    /// Quality preset override: low, medium or high
    #[arg(long, short = 'q', value_parser = parse_quality)]
    quality: Option<QualityPreset>,

    /// Stop after this many ticks if the run has not ended
    #[arg(long, short = 't', default_value = "36000")]
    ticks: u64,

    /// Settings file (JSON); defaults when absent
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Profile file (JSON); created when missing, updated with the results
    #[arg(long)]
    profile: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    game: Game,
    seed: u64,
    ticks: u64,
    phase: RunPhase,
    results: Option<RunResults>,
}

fn main() -> arcade_sim::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }
    let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);
    let mut profile = match &args.profile {
        Some(path) => PlayerProfile::load(path)?,
        None => PlayerProfile::default(),
    };

    log::info!(
        "Starting {:?} run with seed {} ({} quality)",
        args.game,
        seed,
        settings.quality.as_str()
    );
    let report = match args.game {
        Game::Space => {
            let state = SpaceState::new(seed, profile.loadout(), &settings);
            run(&args, seed, state, space_autopilot)
        }
        Game::Tank => run(&args, seed, TankState::new(seed, &settings), tank_autopilot),
    };

    if let Some(results) = &report.results {
        profile.apply_results(results);
        if let Some(path) = &args.profile {
            profile.save(path)?;
            log::info!("Profile saved to {}", path.display());
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality preset: {s}"))
}

/// Seed from the wall clock when none was given
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Drive a simulation tick by tick until it ends or the tick limit passes
fn run<S, F>(args: &Args, seed: u64, sim: S, mut autopilot: F) -> Report
where
    S: Simulation,
    F: FnMut(&S) -> S::Input,
{
    let mut driver = FixedStepDriver::new(sim);
    while driver.ticks() < args.ticks && !driver.sim().phase().is_over() {
        let mut input = autopilot(driver.sim());
        driver.advance(SIM_DT, &mut input);
    }
    Report {
        game: args.game,
        seed,
        ticks: driver.ticks(),
        phase: driver.sim().phase(),
        results: driver.results(),
    }
}

/// Slide under the nearest target and hold the trigger
fn space_autopilot(state: &SpaceState) -> SpaceInput {
    let me = state.player.center();
    let target = match &state.boss {
        Some(boss) => Some(boss.center()),
        None => {
            let centers: Vec<Vec2> = state.enemies.iter().map(|e| e.center()).collect();
            nearest(me, &centers).map(|i| centers[i])
        }
    };
    let move_x = target.map_or(0.0, |t| ((t.x - me.x) / 20.0).clamp(-1.0, 1.0));
    SpaceInput {
        move_x,
        firing: true,
        ..Default::default()
    }
}

/// Aim at the closest pursuer and back away from it, pulling the trigger
/// every frame
fn tank_autopilot(state: &TankState) -> TankInput {
    let me = state.player.pos;
    let Some(i) = nearest(me, state.enemies.iter().map(|e| &e.pos)) else {
        return TankInput {
            aim: me + Vec2::X,
            ..Default::default()
        };
    };
    let threat = state.enemies[i].pos;
    let away = (me - threat).normalize_or_zero();
    TankInput {
        move_x: away.x,
        move_y: away.y,
        aim: threat,
        fire: true,
        quit: false,
    }
}

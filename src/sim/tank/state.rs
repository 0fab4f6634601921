//! Tank survival state

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::weapon::WeaponTier;
use crate::settings::Settings;
use crate::sim::ids::{EntityId, IdAllocator};
use crate::sim::particles::{Particle, ParticleField};
use crate::sim::runner::{FrameInput, RunPhase};

pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;
pub const PLAYER_RADIUS: f32 = 20.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const START_LIVES: u32 = 4;
pub const SHELL_SPEED: f32 = 10.0;
pub const ENEMY_RADIUS: f32 = 18.0;
pub const BOSS_RADIUS: f32 = 40.0;
pub const ENEMY_HEALTH: u32 = 3;
pub const BOSS_HEALTH: u32 = 10;
pub const INVINCIBLE_TICKS: u32 = 90;

/// A shell fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shell {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Something chasing the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub id: EntityId,
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub boss: bool,
}

impl Pursuer {
    pub fn radius(&self) -> f32 {
        if self.boss { BOSS_RADIUS } else { ENEMY_RADIUS }
    }

    pub fn points(&self) -> u64 {
        if self.boss { 100 } else { 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    /// Centre of the hull
    pub pos: Vec2,
    pub lives: u32,
    /// Ticks of invulnerability left
    pub invincible: u32,
    /// Barrel heading in radians, toward the last aim point
    pub aim_angle: f32,
}

/// Banner countdowns, in ticks
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Notices {
    pub best_gun: u32,
    pub stage_up: u32,
    pub boss_incoming: u32,
}

impl Notices {
    pub fn tick(&mut self) {
        self.best_gun = self.best_gun.saturating_sub(1);
        self.stage_up = self.stage_up.saturating_sub(1);
        self.boss_incoming = self.boss_incoming.saturating_sub(1);
    }
}

/// Per-tick input from the host
#[derive(Debug, Clone, Default)]
pub struct TankInput {
    pub move_x: f32,
    pub move_y: f32,
    /// World-space aim point
    pub aim: Vec2,
    /// Trigger pulled this frame (click or key press). Consumed by one tick;
    /// dropped when the gun is still cycling.
    pub fire: bool,
    pub quit: bool,
}

impl FrameInput for TankInput {
    fn clear_one_shots(&mut self) {
        self.fire = false;
        self.quit = false;
    }
}

/// Complete tank survival run state
#[derive(Debug, Clone)]
pub struct TankState {
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) ids: IdAllocator,
    pub phase: RunPhase,
    pub time_ticks: u64,
    pub player: Tank,
    pub shells: Vec<Shell>,
    pub enemies: Vec<Pursuer>,
    pub particles: ParticleField,
    pub score: u64,
    pub kills: u32,
    pub bosses_killed: u32,
    pub tier: WeaponTier,
    pub stage: u32,
    pub spawn_timer: u32,
    pub ms_since_shot: f32,
    pub notices: Notices,
}

impl TankState {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ids: IdAllocator::new(),
            phase: RunPhase::Active,
            time_ticks: 0,
            player: Tank {
                pos: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
                lives: START_LIVES,
                invincible: 0,
                aim_angle: 0.0,
            },
            shells: Vec::new(),
            enemies: Vec::new(),
            particles: ParticleField::new(settings.max_particles(), seed),
            score: 0,
            kills: 0,
            bosses_killed: 0,
            tier: WeaponTier::BASE,
            stage: 1,
            spawn_timer: 0,
            ms_since_shot: f32::MAX,
            notices: Notices::default(),
        }
    }

    pub fn next_entity_id(&mut self) -> EntityId {
        self.ids.next_id()
    }
}

/// Immutable per-tick view for the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankSnapshot {
    pub phase: RunPhase,
    pub tick: u64,
    pub player: Tank,
    pub shells: Vec<Shell>,
    pub enemies: Vec<Pursuer>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub lives: u32,
    pub aim_angle: f32,
    pub stage: u32,
    pub kills: u32,
    pub weapon_tier: u8,
    pub weapon_name: String,
    pub best_gun: bool,
    pub stage_up: bool,
    pub boss_incoming: bool,
}

impl From<&TankState> for TankSnapshot {
    fn from(state: &TankState) -> Self {
        Self {
            phase: state.phase,
            tick: state.time_ticks,
            player: state.player.clone(),
            shells: state.shells.clone(),
            enemies: state.enemies.clone(),
            particles: state.particles.to_vec(),
            score: state.score,
            lives: state.player.lives,
            aim_angle: state.player.aim_angle,
            stage: state.stage,
            kills: state.kills,
            weapon_tier: state.tier.level(),
            weapon_name: state.tier.name().to_string(),
            best_gun: state.notices.best_gun > 0,
            stage_up: state.notices.stage_up > 0,
            boss_incoming: state.notices.boss_incoming > 0,
        }
    }
}

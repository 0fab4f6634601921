//! Tank weapon progression
//!
//! Kills drive everything: the gun tier rises every 5 kills (capped at 10)
//! and the stage every 15 kills. Each tier has a fire interval and a volley
//! pattern.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{SHELL_SPEED, Shell, TankInput, TankState};
use crate::consts::TICK_MS;

const KILLS_PER_TIER: u32 = 5;
const KILLS_PER_STAGE: u32 = 15;

const FIRE_INTERVALS_MS: [f32; 10] = [
    150.0, 130.0, 120.0, 100.0, 80.0, 60.0, 50.0, 40.0, 35.0, 30.0,
];
const NAMES: [&str; 10] = [
    "Pistol",
    "Dual Shot",
    "Fast Dual",
    "Triple Shot",
    "AK-47",
    "Fast AK",
    "Shotgun",
    "Auto Shotgun",
    "Minigun",
    "DEATH CANNON",
];

/// Gun tier, 1..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeaponTier(u8);

/// Shells per volley, angular step between them, and speed multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolleyPattern {
    pub offsets: &'static [f32],
    pub spread: f32,
    pub speed: f32,
}

impl WeaponTier {
    pub const BASE: WeaponTier = WeaponTier(1);
    pub const MAX: WeaponTier = WeaponTier(10);

    pub fn from_kills(kills: u32) -> Self {
        let level = (1 + kills / KILLS_PER_TIER).min(Self::MAX.0 as u32);
        WeaponTier(level as u8)
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    pub fn fire_interval_ms(self) -> f32 {
        FIRE_INTERVALS_MS[self.index()]
    }

    pub fn pattern(self) -> VolleyPattern {
        let (offsets, spread, speed): (&'static [f32], f32, f32) = match self.0 {
            9.. => (&[-2.0, -1.0, 0.0, 1.0, 2.0], 0.15, 1.3),
            7..=8 => (&[-2.0, -1.0, 0.0, 1.0, 2.0], 0.25, 1.0),
            5..=6 => (&[-1.0, 0.0, 1.0], 0.1, 1.2),
            4 => (&[-1.0, 0.0, 1.0], 0.2, 1.0),
            2..=3 => (&[-1.0, 1.0], 0.15, 1.0),
            _ => (&[0.0], 0.0, 1.0),
        };
        VolleyPattern {
            offsets,
            spread,
            speed,
        }
    }

    fn index(self) -> usize {
        (self.0.clamp(1, 10) - 1) as usize
    }
}

/// Stage for a kill count (uncapped)
pub fn stage_for_kills(kills: u32) -> u32 {
    1 + kills / KILLS_PER_STAGE
}

/// Turn the barrel toward the aim point; keeps the last heading when the
/// aim point sits on the hull
pub fn aim(state: &mut TankState, input: &TankInput) {
    let delta = input.aim - state.player.pos;
    if delta.length_squared() > f32::EPSILON {
        state.player.aim_angle = delta.y.atan2(delta.x);
    }
}

/// Fire a volley along the barrel when the interval allows. A trigger pull
/// that arrives while the gun is cycling is dropped.
pub fn fire(state: &mut TankState, input: &TankInput) {
    state.ms_since_shot += TICK_MS;
    if !input.fire || state.ms_since_shot < state.tier.fire_interval_ms() {
        return;
    }
    state.ms_since_shot = 0.0;

    let origin = state.player.pos;
    let angle = state.player.aim_angle;
    let pattern = state.tier.pattern();
    let speed = SHELL_SPEED * pattern.speed;

    for offset in pattern.offsets {
        let heading = angle + offset * pattern.spread;
        let id = state.next_entity_id();
        state.shells.push(Shell {
            id,
            pos: origin,
            vel: Vec2::new(heading.cos(), heading.sin()) * speed,
        });
    }
}

//! Arcade Sim - simulation core for two arcade shoot-'em-ups
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, combat, power-ups)
//! - `profile`: Persistent player profile and upgrade catalogue
//! - `settings`: Data-driven run configuration
//! - `error`: Errors for the fallible edges (files, purchases)
//!
//! Rendering, menus and input collection are external: a driver feeds one
//! input per tick and reads back an immutable snapshot.

pub mod error;
pub mod profile;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use profile::{Loadout, PlayerProfile, UpgradeId};
pub use settings::{QualityPreset, Settings};

/// Simulation timing constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Milliseconds covered by one tick (fire-rate timers are specified in ms)
    pub const TICK_MS: f32 = 1000.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame time the driver will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Convert a duration in milliseconds to whole ticks (rounded up)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u32 {
    (ms * consts::TICKS_PER_SECOND).div_ceil(1000)
}

//! Top-down tank survival
//!
//! Endless pursuers from the arena edges; kills upgrade the gun and raise the
//! stage, with a boss every third stage.

pub mod combat;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use state::{Pursuer, Shell, TankInput, TankSnapshot, TankState};
pub use tick::tick;
pub use weapon::{WeaponTier, stage_for_kills};

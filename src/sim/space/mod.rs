//! Wave-based space shooter
//!
//! Fifty waves of formations with a boss every fifth wave, two dozen pickup
//! kinds and the permanent upgrades carried in through [`Loadout`].
//!
//! [`Loadout`]: crate::profile::Loadout

pub mod combat;
pub mod movement;
pub mod powerups;
pub mod spawn;
pub mod state;
pub mod tick;

pub use state::{
    Boss, BossKind, Bullet, Enemy, EnemyKind, PowerUp, PowerUpKind, SpaceInput, SpaceSnapshot,
    SpaceState,
};
pub use tick::tick;

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies
//!
//! Two engines share the same shape (aggregate state, phase functions, a
//! `tick` that returns results once): [`space`] and [`tank`].

pub mod collision;
pub mod ids;
pub mod particles;
pub mod runner;
pub mod space;
pub mod tank;

pub use collision::{Rect, direction_to, distance, rect_overlap, within};
pub use ids::{EntityId, IdAllocator};
pub use particles::{Particle, ParticleField};
pub use runner::{FixedStepDriver, FrameInput, RunPhase, RunResults, Simulation};
pub use space::{SpaceInput, SpaceSnapshot, SpaceState};
pub use tank::{TankInput, TankSnapshot, TankState};

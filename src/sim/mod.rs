//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod hazard;
pub mod road;
pub mod state;
pub mod tick;
pub mod vehicle;

pub use collision::{Rect, resolve_collisions};
pub use hazard::{Hazard, HazardKind, SpawnRule, Spawner};
pub use road::Road;
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, tick};
pub use vehicle::{Vehicle, VehicleKind};

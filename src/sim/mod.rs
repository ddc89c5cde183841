//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (creation order, compacted after each phase)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{circles_collide, fully_outside, outside_by_radius};
pub use spawner::{SpawnTimer, spawn_enemy, spawn_position};
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, Missile, Particle, Player, SessionStats,
};
pub use tick::{TickInput, tick};

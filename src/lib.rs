//! Circle Shooter - hold the center, shoot the homing circles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, score)
//! - `render`: Turns game state into an ordered list of circles to paint
//! - `config`: Data-driven game balance, loadable from JSON
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod render;
pub mod sim;

pub use config::GameConfig;
pub use error::ConfigError;

use glam::Vec2;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Nominal paint callback period. Integration is per frame, not per second;
    /// this only drives the virtual spawn clock of the headless runner.
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 700.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player sits at canvas center and never moves
    pub const PLAYER_RADIUS: f32 = 12.0;
    pub const PLAYER_COLOR: &str = "#FAEDF0";

    /// Missile speed in pixels per frame
    pub const MISSILE_SPEED: f32 = 5.0;
    pub const MISSILE_RADIUS: f32 = 3.5;

    /// Enemy speed range (pixels per frame, max exclusive)
    pub const ENEMY_MIN_SPEED: f32 = 1.0;
    pub const ENEMY_MAX_SPEED: f32 = 2.0;
    /// Enemy radius range (whole pixels, inclusive)
    pub const ENEMY_MIN_RADIUS: u32 = 10;
    pub const ENEMY_MAX_RADIUS: u32 = 25;
    pub const ENEMY_PALETTE: [&str; 5] = ["#CF0A0A", "#00ABB3", "#5C2E7E", "#1A4D2E", "#FF9F29"];

    /// One enemy per interval
    pub const SPAWN_INTERVAL_MS: u32 = 1000;

    /// Enemies larger than this shrink on a hit instead of dying
    pub const SPLIT_THRESHOLD: f32 = 17.0;
    pub const SHRINK_AMOUNT: f32 = 10.0;
    pub const SHRINK_SCORE: u64 = 100;
    pub const DESTROY_SCORE: u64 = 250;

    /// Explosion burst size (inclusive)
    pub const PARTICLE_MIN_COUNT: u32 = 10;
    pub const PARTICLE_MAX_COUNT: u32 = 20;
    /// Particle speed as a multiple of the enemy's speed
    pub const PARTICLE_SPEED_FACTOR: (f32, f32) = (0.75, 6.0);
    /// Particle radius as a fraction of the enemy's radius
    pub const PARTICLE_RADIUS_FACTOR: (f32, f32) = (0.03, 0.15);
    pub const PARTICLE_FRICTION: f32 = 0.95;
    /// Friction only applies above this speed
    pub const PARTICLE_MIN_SPEED: f32 = 0.05;
    pub const PARTICLE_RADIUS_DECAY: f32 = 0.99;
    pub const PARTICLE_OPACITY_DECAY: f32 = 0.01;
    /// Particles are removed once opacity drops below this
    pub const PARTICLE_OPACITY_FLOOR: f32 = 0.02;

    /// Translucent clear color, leaves motion trails
    pub const TRAIL_FILL: &str = "rgba(16, 24, 34, 0.425)";
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Unit vector pointing from `from` toward `to`.
///
/// Coincident points have no direction; the zero vector is returned so the
/// caller ends up with "no movement" instead of a NaN velocity.
#[inline]
pub fn unit_direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

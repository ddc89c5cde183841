//! Game balance and arena configuration
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! JSON document only needs the keys it wants to override. Read from
//! LocalStorage on the web, from a file path on native.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::render::Color;

/// Runtime-tunable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_color: String,

    // === Missiles ===
    /// Pixels per frame
    pub missile_speed: f32,
    pub missile_radius: f32,

    // === Enemies ===
    /// (min, max) pixels per frame, max exclusive
    pub enemy_speed: (f32, f32),
    /// (min, max) whole pixels, inclusive
    pub enemy_radius: (u32, u32),
    pub enemy_palette: Vec<String>,
    pub spawn_interval_ms: u32,

    // === Hits & score ===
    /// Enemies with a radius above this shrink instead of dying
    pub split_threshold: f32,
    pub shrink_amount: f32,
    pub shrink_score: u64,
    pub destroy_score: u64,

    // === Particles ===
    /// (min, max) particles per hit, inclusive
    pub particle_count: (u32, u32),
    pub particle_speed_factor: (f32, f32),
    pub particle_radius_factor: (f32, f32),
    pub particle_friction: f32,
    pub particle_min_speed: f32,
    pub particle_radius_decay: f32,
    pub particle_opacity_decay: f32,
    pub particle_opacity_floor: f32,

    // === Rendering ===
    pub trail_fill: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            player_radius: PLAYER_RADIUS,
            player_color: PLAYER_COLOR.to_string(),

            missile_speed: MISSILE_SPEED,
            missile_radius: MISSILE_RADIUS,

            enemy_speed: (ENEMY_MIN_SPEED, ENEMY_MAX_SPEED),
            enemy_radius: (ENEMY_MIN_RADIUS, ENEMY_MAX_RADIUS),
            enemy_palette: ENEMY_PALETTE.iter().map(|c| c.to_string()).collect(),
            spawn_interval_ms: SPAWN_INTERVAL_MS,

            split_threshold: SPLIT_THRESHOLD,
            shrink_amount: SHRINK_AMOUNT,
            shrink_score: SHRINK_SCORE,
            destroy_score: DESTROY_SCORE,

            particle_count: (PARTICLE_MIN_COUNT, PARTICLE_MAX_COUNT),
            particle_speed_factor: PARTICLE_SPEED_FACTOR,
            particle_radius_factor: PARTICLE_RADIUS_FACTOR,
            particle_friction: PARTICLE_FRICTION,
            particle_min_speed: PARTICLE_MIN_SPEED,
            particle_radius_decay: PARTICLE_RADIUS_DECAY,
            particle_opacity_decay: PARTICLE_OPACITY_DECAY,
            particle_opacity_floor: PARTICLE_OPACITY_FLOOR,

            trail_fill: TRAIL_FILL.to_string(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document (missing keys keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Canvas size as a vector
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    /// Player position (canvas center)
    pub fn canvas_center(&self) -> Vec2 {
        self.canvas_size() / 2.0
    }

    /// Check every field for values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives: [(&'static str, f32); 8] = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("player_radius", self.player_radius),
            ("missile_speed", self.missile_speed),
            ("missile_radius", self.missile_radius),
            ("shrink_amount", self.shrink_amount),
            ("particle_opacity_decay", self.particle_opacity_decay),
            ("particle_opacity_floor", self.particle_opacity_floor),
        ];
        for (field, value) in positives {
            // NaN fails this check too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive {
                    field,
                    value: value as f64,
                });
            }
        }
        for (field, value) in [
            ("particle_friction", self.particle_friction),
            ("particle_radius_decay", self.particle_radius_decay),
        ] {
            // Decay factors never grow a particle
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::NotAFraction {
                    field,
                    value: value as f64,
                });
            }
        }
        // A shrunk enemy keeps a radius above split_threshold - shrink_amount
        if !(self.split_threshold > self.shrink_amount) {
            return Err(ConfigError::ShrinkTooLarge {
                split_threshold: self.split_threshold as f64,
                shrink_amount: self.shrink_amount as f64,
            });
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "spawn_interval_ms",
                value: 0.0,
            });
        }

        check_open_range("enemy_speed", self.enemy_speed)?;
        check_open_range("particle_speed_factor", self.particle_speed_factor)?;
        check_open_range("particle_radius_factor", self.particle_radius_factor)?;
        if self.enemy_speed.0 <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "enemy_speed",
                value: self.enemy_speed.0 as f64,
            });
        }
        check_inclusive_range("enemy_radius", self.enemy_radius)?;
        check_inclusive_range("particle_count", self.particle_count)?;
        if self.enemy_radius.0 == 0 {
            return Err(ConfigError::NonPositive {
                field: "enemy_radius",
                value: 0.0,
            });
        }

        if self.enemy_palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        for color in self.enemy_palette.iter().chain(std::iter::once(&self.player_color)) {
            Color::from_hex(color)?;
        }

        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "circle_shooter_config";

    /// Load config from LocalStorage (WASM only), falling back to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(err) => log::warn!("Ignoring stored config: {}", err),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Read and validate a config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

fn check_open_range(field: &'static str, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    if min < max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            field,
            min: min as f64,
            max: max as f64,
        })
    }
}

fn check_inclusive_range(field: &'static str, (min, max): (u32, u32)) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            field,
            min: min as f64,
            max: max as f64,
        })
    }
}

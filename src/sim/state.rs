//! Game state and core simulation types
//!
//! Entities are plain records owned by [`GameState`]; nothing here draws or
//! talks to the platform.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::render::Color;
use crate::unit_direction;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frames are being simulated
    Playing,
    /// An enemy reached the player; the loop has halted for good
    GameOver,
}

/// The player: fixed at canvas center, never destroyed
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// A missile flying in a straight line from the player
#[derive(Debug, Clone, Serialize)]
pub struct Missile {
    pub id: u32,
    pub pos: Vec2,
    /// Fixed at creation; magnitude is the configured missile speed
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Missile {
    /// Missile leaving `origin` toward `target`. A zero-length aim gives a
    /// zero velocity; callers should not spawn those.
    pub fn new(id: u32, origin: Vec2, target: Vec2, speed: f32, radius: f32, color: Color) -> Self {
        Self {
            id,
            pos: origin,
            vel: unit_direction(origin, target) * speed,
            radius,
            color,
        }
    }
}

/// A homing enemy: aimed once at spawn, never re-aimed
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Scalar speed, drives the explosion particle speeds
    pub speed: f32,
    pub radius: f32,
    pub color: Color,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, target: Vec2, speed: f32, radius: f32, color: Color) -> Self {
        Self {
            id,
            pos,
            vel: unit_direction(pos, target) * speed,
            speed,
            radius,
            color,
        }
    }

    /// Whether a hit shrinks this enemy instead of destroying it
    pub fn is_splittable(&self, threshold: f32) -> bool {
        self.radius > threshold
    }
}

/// A particle for explosion effects
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// 1.0 at birth, decreases linearly
    pub opacity: f32,
}

impl Particle {
    /// Particle launched at `angle` (radians) with the given speed
    pub fn new(pos: Vec2, angle: f32, speed: f32, radius: f32, color: Color) -> Self {
        Self {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            radius,
            color,
            opacity: 1.0,
        }
    }

    /// Advance one frame. Returns false once the particle has faded out and
    /// must be removed; in that case nothing but opacity changed.
    pub fn update(&mut self, config: &GameConfig) -> bool {
        self.opacity -= config.particle_opacity_decay;
        if self.opacity < config.particle_opacity_floor {
            return false;
        }

        self.pos += self.vel;
        if self.vel.length() > config.particle_min_speed {
            self.vel *= config.particle_friction;
        }
        if self.radius > 0.0 {
            self.radius *= config.particle_radius_decay;
        }
        true
    }
}

/// Things that happened during a frame (or a fire/spawn call), drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    MissileFired { id: u32 },
    MissileLeftBounds { id: u32 },
    EnemySpawned { id: u32 },
    /// Non-fatal hit on a splittable enemy
    EnemyShrunk { id: u32, radius: f32, points: u64 },
    EnemyDestroyed { id: u32, points: u64 },
    PlayerHit { enemy_id: u32 },
}

impl GameEvent {
    /// Points awarded by this event
    pub fn points(&self) -> u64 {
        match *self {
            GameEvent::EnemyShrunk { points, .. } | GameEvent::EnemyDestroyed { points, .. } => {
                points
            }
            _ => 0,
        }
    }
}

/// Running totals for the session summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub missiles_fired: u32,
    pub enemies_spawned: u32,
    pub enemies_shrunk: u32,
    pub enemies_destroyed: u32,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance and arena settings this session runs with
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Parsed enemy palette
    pub(crate) palette: Vec<Color>,
    pub score: u64,
    /// Simulated frame counter
    pub frame: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Live entities, in creation order
    pub missiles: Vec<Missile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    /// Last tracked pointer position, None until the pointer first moves
    pub aim: Option<Vec2>,
    pub stats: SessionStats,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session. An invalid config is replaced by the defaults.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("Invalid config ({}), using defaults", err);
                GameConfig::default()
            }
        };

        let palette = config
            .enemy_palette
            .iter()
            .map(|hex| Color::from_hex_or_white(hex))
            .collect();
        let player = Player {
            pos: config.canvas_center(),
            radius: config.player_radius,
            color: Color::from_hex_or_white(&config.player_color),
        };

        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            palette,
            score: 0,
            frame: 0,
            phase: GamePhase::Playing,
            player,
            missiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            aim: None,
            stats: SessionStats::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Fire one missile from the player toward `target`.
    ///
    /// Returns the missile id, or None when the session is over or the target
    /// sits exactly on the player (no direction to fly in).
    pub fn fire(&mut self, target: Vec2) -> Option<u32> {
        if self.is_over() {
            return None;
        }
        if unit_direction(self.player.pos, target) == Vec2::ZERO {
            log::debug!("Ignoring fire at the player's own position");
            return None;
        }

        let id = self.next_entity_id();
        self.missiles.push(Missile::new(
            id,
            self.player.pos,
            target,
            self.config.missile_speed,
            self.config.missile_radius,
            self.player.color,
        ));
        self.stats.missiles_fired += 1;
        self.push_event(GameEvent::MissileFired { id });
        Some(id)
    }

    /// Fire toward the last tracked pointer position, if any
    pub fn fire_at_aim(&mut self) -> Option<u32> {
        match self.aim {
            Some(target) => self.fire(target),
            None => {
                log::debug!("Ignoring fire before the pointer has moved");
                None
            }
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(GameConfig::default(), 1);
        assert_eq!(state.player.pos, Vec2::new(350.0, 300.0));
        assert_eq!(state.player.radius, 12.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.palette.len(), 5);
        assert!(state.missiles.is_empty() && state.enemies.is_empty());
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let config = GameConfig {
            missile_speed: -1.0,
            ..GameConfig::default()
        };
        let state = GameState::new(config, 1);
        assert_eq!(state.config, GameConfig::default());
    }

    #[test]
    fn test_fire_velocity() {
        let mut state = GameState::new(GameConfig::default(), 1);
        let id = state.fire(Vec2::new(350.0, 0.0)).unwrap();
        let missile = &state.missiles[0];
        assert_eq!(missile.id, id);
        assert_eq!(missile.pos, state.player.pos);
        assert!((missile.vel - Vec2::new(0.0, -5.0)).length() < 1e-5);
        assert_eq!(missile.color, state.player.color);
        assert_eq!(state.take_events(), vec![GameEvent::MissileFired { id }]);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_fire_at_player_is_ignored() {
        let mut state = GameState::new(GameConfig::default(), 1);
        let center = state.player.pos;
        assert_eq!(state.fire(center), None);
        assert!(state.missiles.is_empty());
        assert_eq!(state.stats.missiles_fired, 0);
    }

    #[test]
    fn test_fire_needs_tracked_aim() {
        let mut state = GameState::new(GameConfig::default(), 1);
        assert_eq!(state.fire_at_aim(), None);
        state.aim = Some(Vec2::new(0.0, 0.0));
        assert!(state.fire_at_aim().is_some());
    }

    #[test]
    fn test_enemy_aims_once() {
        let enemy = Enemy::new(
            1,
            Vec2::new(-10.0, 300.0),
            Vec2::new(350.0, 300.0),
            1.5,
            10.0,
            Color::WHITE,
        );
        assert!((enemy.vel - Vec2::new(1.5, 0.0)).length() < 1e-6);
        assert!(!enemy.is_splittable(17.0));
    }

    #[test]
    fn test_particle_decay() {
        let config = GameConfig::default();
        let mut p = Particle::new(Vec2::ZERO, 0.0, 4.0, 2.0, Color::WHITE);
        assert!(p.update(&config));
        assert!((p.opacity - 0.99).abs() < 1e-6);
        assert!((p.pos - Vec2::new(4.0, 0.0)).length() < 1e-6);
        assert!((p.vel.length() - 3.8).abs() < 1e-5);
        assert!((p.radius - 1.98).abs() < 1e-6);
    }

    #[test]
    fn test_particle_friction_floor() {
        let config = GameConfig::default();
        let mut p = Particle::new(Vec2::ZERO, 0.0, 0.04, 2.0, Color::WHITE);
        let vel = p.vel;
        assert!(p.update(&config));
        assert_eq!(p.vel, vel);
    }
}

//! Enemy spawning
//!
//! One enemy per interval, placed just off a random canvas edge and aimed at
//! the player. The interval is driven by the host (a browser timer) or by a
//! [`SpawnTimer`] fed with frame time (headless runs).

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState};

/// Fixed-interval timer that reports how many spawns are due
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval_ms: f64,
    elapsed_ms: f64,
    stopped: bool,
}

impl SpawnTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1) as f64,
            elapsed_ms: 0.0,
            stopped: false,
        }
    }

    /// Advance by `dt_ms` and return the number of intervals that elapsed
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if self.stopped {
            return 0;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        let mut due = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            due += 1;
        }
        due
    }

    /// Cancel the timer for good (session over)
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// Pick a spawn point just outside one canvas edge.
///
/// Half the time a left/right edge with a random height, otherwise a
/// top/bottom edge with a random x. The point sits `radius` beyond the edge.
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, canvas: Vec2, radius: f32) -> Vec2 {
    if rng.random_bool(0.5) {
        let x = if rng.random_bool(0.5) {
            -radius
        } else {
            canvas.x + radius
        };
        Vec2::new(x, rng.random_range(0.0..canvas.y))
    } else {
        let y = if rng.random_bool(0.5) {
            -radius
        } else {
            canvas.y + radius
        };
        Vec2::new(rng.random_range(0.0..canvas.x), y)
    }
}

/// Spawn one enemy aimed at the player. Returns its id, or None once the
/// session is over.
pub fn spawn_enemy(state: &mut GameState) -> Option<u32> {
    if state.is_over() {
        return None;
    }

    let config = &state.config;
    let (min_r, max_r) = config.enemy_radius;
    let radius = state.rng.random_range(min_r..=max_r) as f32;
    let pos = spawn_position(&mut state.rng, config.canvas_size(), radius);
    let speed = state
        .rng
        .random_range(config.enemy_speed.0..config.enemy_speed.1);
    let color = state.palette[state.rng.random_range(0..state.palette.len())];
    let target = state.player.pos;

    let id = state.next_entity_id();
    state
        .enemies
        .push(Enemy::new(id, pos, target, speed, radius, color));
    state.stats.enemies_spawned += 1;
    state.push_event(GameEvent::EnemySpawned { id });
    log::debug!(
        "Spawned enemy {} at ({:.1}, {:.1}) r={} speed={:.2}",
        id,
        pos.x,
        pos.y,
        radius,
        speed
    );
    Some(id)
}

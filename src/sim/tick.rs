//! Per-frame simulation step
//!
//! One call advances every entity by one fixed step (velocities are in
//! pixels per frame). Phase order is fixed: player, particles, missiles
//! (with missile-enemy hits), enemies (with the player hit check).
//!
//! Entities are never removed while a container is being walked. Each phase
//! marks what died and compacts once at the end, so the element after a
//! removed one is never skipped.

use glam::Vec2;
use rand::Rng;

use super::collision::{circles_collide, fully_outside};
use super::state::{Enemy, GameEvent, GamePhase, GameState, Particle};
use crate::config::GameConfig;

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position (pointer moved)
    pub aim: Option<Vec2>,
    /// Fire one missile toward the tracked pointer (click/tap)
    pub fire: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    if let Some(aim) = input.aim {
        state.aim = Some(aim);
    }
    if input.fire {
        state.fire_at_aim();
    }

    state.frame += 1;

    // The player is static: nothing to integrate.

    update_particles(state);
    update_missiles(state);
    update_enemies(state);
}

fn update_particles(state: &mut GameState) {
    let config = &state.config;
    state.particles.retain_mut(|p| p.update(config));
}

fn update_missiles(state: &mut GameState) {
    let GameState {
        config,
        rng,
        score,
        missiles,
        enemies,
        particles,
        stats,
        ..
    } = state;

    let canvas = config.canvas_size();
    let mut events = Vec::new();
    let mut spent = vec![false; missiles.len()];
    let mut destroyed = vec![false; enemies.len()];

    for (m, missile) in missiles.iter_mut().enumerate() {
        missile.pos += missile.vel;

        if fully_outside(missile.pos, missile.radius, canvas) {
            spent[m] = true;
            events.push(GameEvent::MissileLeftBounds { id: missile.id });
            continue;
        }

        // A missile is consumed by the first live enemy it touches
        let hit = enemies.iter().enumerate().position(|(e, enemy)| {
            !destroyed[e] && circles_collide(missile.pos, missile.radius, enemy.pos, enemy.radius)
        });
        let Some(e) = hit else {
            continue;
        };

        spent[m] = true;
        let enemy = &mut enemies[e];
        spawn_explosion(particles, rng, config, missile.pos, enemy);

        if enemy.is_splittable(config.split_threshold) {
            enemy.radius -= config.shrink_amount;
            *score += config.shrink_score;
            stats.enemies_shrunk += 1;
            events.push(GameEvent::EnemyShrunk {
                id: enemy.id,
                radius: enemy.radius,
                points: config.shrink_score,
            });
            log::debug!("Missile {} shrank enemy {} to r={}", missile.id, enemy.id, enemy.radius);
        } else {
            destroyed[e] = true;
            *score += config.destroy_score;
            stats.enemies_destroyed += 1;
            events.push(GameEvent::EnemyDestroyed {
                id: enemy.id,
                points: config.destroy_score,
            });
            log::debug!("Missile {} destroyed enemy {}", missile.id, enemy.id);
        }
    }

    compact(missiles, &spent);
    compact(enemies, &destroyed);

    for event in events {
        state.push_event(event);
    }
}

fn update_enemies(state: &mut GameState) {
    let player = &state.player;
    let mut reached = None;

    for enemy in &mut state.enemies {
        enemy.pos += enemy.vel;
        if reached.is_none()
            && circles_collide(enemy.pos, enemy.radius, player.pos, player.radius)
        {
            reached = Some(enemy.id);
        }
    }

    if let Some(enemy_id) = reached {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::PlayerHit { enemy_id });
        log::info!(
            "Enemy {} reached the player on frame {}, final score {}",
            enemy_id,
            state.frame,
            state.score
        );
    }
}

/// Burst of particles at `at`, sized and colored after the enemy that was hit
fn spawn_explosion<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    config: &GameConfig,
    at: Vec2,
    enemy: &Enemy,
) {
    let (min_count, max_count) = config.particle_count;
    let (speed_lo, speed_hi) = config.particle_speed_factor;
    let (radius_lo, radius_hi) = config.particle_radius_factor;

    let count = rng.random_range(min_count..=max_count);
    particles.reserve(count as usize);
    for _ in 0..count {
        let speed = rng.random_range(speed_lo..speed_hi) * enemy.speed;
        let radius = rng.random_range(radius_lo..radius_hi) * enemy.radius;
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        particles.push(Particle::new(at, angle, speed, radius, enemy.color));
    }
}

/// Drop every element whose flag is set, preserving order
fn compact<T>(items: &mut Vec<T>, dead: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !dead[index];
        index += 1;
        keep
    });
}

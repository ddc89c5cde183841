//! Demo/idle input: aim at the closest enemy and fire on a fixed cadence
//!
//! Used by the headless runner so a session plays itself out.

use super::state::GameState;
use super::tick::TickInput;
use crate::distance;

/// Build the input for the next frame.
///
/// Targets the enemy nearest the player and leads it by the time a missile
/// needs to cover the current distance. Fires every `fire_every` frames.
pub fn autopilot_input(state: &GameState, fire_every: u64) -> TickInput {
    let player = state.player.pos;
    let target = state
        .enemies
        .iter()
        .min_by(|a, b| {
            distance(player, a.pos)
                .partial_cmp(&distance(player, b.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|enemy| {
            let frames_to_reach = distance(player, enemy.pos) / state.config.missile_speed;
            enemy.pos + enemy.vel * frames_to_reach
        });

    let Some(aim) = target else {
        return TickInput::default();
    };

    TickInput {
        aim: Some(aim),
        fire: fire_every > 0 && state.frame % fire_every == 0 && aim != player,
    }
}

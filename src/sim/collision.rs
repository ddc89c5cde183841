//! Collision predicates
//!
//! Everything is a circle, so a collision is two circles overlapping or
//! touching. The canvas is an axis-aligned rectangle anchored at the origin.

use glam::Vec2;

use crate::distance;

/// Circle-circle overlap, boundary inclusive (touching counts)
#[inline]
pub fn circles_collide(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    distance(a, b) <= radius_a + radius_b
}

/// True when a circle has left the canvas entirely on any side
#[inline]
pub fn fully_outside(pos: Vec2, radius: f32, canvas: Vec2) -> bool {
    pos.x + radius < 0.0
        || pos.x - radius > canvas.x
        || pos.y + radius < 0.0
        || pos.y - radius > canvas.y
}

/// True when a circle lies outside the canvas by at least its own radius
#[inline]
pub fn outside_by_radius(pos: Vec2, radius: f32, canvas: Vec2) -> bool {
    pos.x <= -radius
        || pos.x >= canvas.x + radius
        || pos.y <= -radius
        || pos.y >= canvas.y + radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CANVAS: Vec2 = Vec2::new(700.0, 600.0);

    #[test]
    fn test_touching_player_collides() {
        // Enemy sitting exactly on the combined-radius boundary below the player
        let player = Vec2::new(350.0, 300.0);
        let (r_player, r_enemy) = (12.0, 20.0);
        let enemy = Vec2::new(350.0, 300.0 + r_enemy + r_player);
        assert!(circles_collide(player, r_player, enemy, r_enemy));
        assert!(circles_collide(enemy, r_enemy, player, r_player));
    }

    #[test]
    fn test_separated_circles_miss() {
        let missile = Vec2::new(100.0, 100.0);
        let enemy = Vec2::new(130.0, 100.0);
        assert!(!circles_collide(missile, 3.5, enemy, 25.0));
        assert!(circles_collide(missile, 3.5, enemy, 26.5));
    }

    #[test]
    fn test_fully_outside() {
        assert!(!fully_outside(Vec2::new(350.0, 300.0), 3.5, CANVAS));
        // Still overlapping the left edge
        assert!(!fully_outside(Vec2::new(-3.0, 300.0), 3.5, CANVAS));
        assert!(fully_outside(Vec2::new(-4.0, 300.0), 3.5, CANVAS));
        assert!(fully_outside(Vec2::new(704.0, 300.0), 3.5, CANVAS));
        assert!(fully_outside(Vec2::new(350.0, -4.0), 3.5, CANVAS));
        assert!(fully_outside(Vec2::new(350.0, 604.0), 3.5, CANVAS));
    }

    #[test]
    fn test_outside_by_radius() {
        assert!(outside_by_radius(Vec2::new(-10.0, 50.0), 10.0, CANVAS));
        assert!(outside_by_radius(Vec2::new(300.0, 610.0), 10.0, CANVAS));
        assert!(!outside_by_radius(Vec2::new(-9.0, 50.0), 10.0, CANVAS));
    }

    proptest! {
        #[test]
        fn collide_is_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0, ar in 0.0f32..50.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0, br in 0.0f32..50.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circles_collide(a, ar, b, br), circles_collide(b, br, a, ar));
        }
    }
}

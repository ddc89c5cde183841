//! Render step: state -> ordered list of filled circles
//!
//! The host owns the raster surface. Each frame it clears with the
//! translucent trail fill, then paints [`draw_list`] front to back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::GameState;

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Parse `#RRGGBB` (case-insensitive)
    pub fn from_hex(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor {
            value: s.to_string(),
        };
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        // from_str_radix alone would also take a leading sign
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Like [`Color::from_hex`] but never fails; validated configs only.
    pub fn from_hex_or_white(s: &str) -> Self {
        Self::from_hex(s).unwrap_or(Self::WHITE)
    }

    /// CSS color string for canvas fill styles
    pub fn to_css(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// One filled circle to paint
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawCircle {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    /// 1.0 for everything except fading particles
    pub alpha: f32,
}

/// Build the frame's draw list in paint order: player, particles, missiles, enemies
pub fn draw_list(state: &GameState) -> Vec<DrawCircle> {
    let mut circles = Vec::with_capacity(
        1 + state.particles.len() + state.missiles.len() + state.enemies.len(),
    );

    circles.push(DrawCircle {
        center: state.player.pos,
        radius: state.player.radius,
        color: state.player.color,
        alpha: 1.0,
    });

    for particle in &state.particles {
        circles.push(DrawCircle {
            center: particle.pos,
            radius: particle.radius.max(0.0),
            color: particle.color,
            alpha: particle.opacity.clamp(0.0, 1.0),
        });
    }

    for missile in &state.missiles {
        circles.push(DrawCircle {
            center: missile.pos,
            radius: missile.radius,
            color: missile.color,
            alpha: 1.0,
        });
    }

    for enemy in &state.enemies {
        circles.push(DrawCircle {
            center: enemy.pos,
            radius: enemy.radius,
            color: enemy.color,
            alpha: 1.0,
        });
    }

    circles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::sim::{Enemy, Particle};

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FAEDF0").unwrap();
        assert_eq!((c.r, c.g, c.b), (0xFA, 0xED, 0xF0));
        assert_eq!(Color::from_hex("#cf0a0a").unwrap().to_css(), "#CF0A0A");

        assert!(Color::from_hex("FAEDF0").is_err());
        assert!(Color::from_hex("#FAED").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#ÿÿÿ").is_err());
        assert!(Color::from_hex("#+F+F+F").is_err());
        assert!(Color::from_hex("#-1-1-1").is_err());
    }

    #[test]
    fn test_draw_order() {
        let config = GameConfig::default();
        let mut state = GameState::new(config, 7);
        let red = Color::from_hex("#CF0A0A").unwrap();
        state.enemies.push(Enemy {
            id: 1,
            pos: Vec2::new(-20.0, 10.0),
            vel: Vec2::new(1.0, 0.0),
            speed: 1.0,
            radius: 20.0,
            color: red,
        });
        state.particles.push(Particle {
            pos: Vec2::new(5.0, 5.0),
            vel: Vec2::ZERO,
            radius: 2.0,
            color: red,
            opacity: 0.5,
        });
        state.fire(Vec2::new(400.0, 300.0));

        let list = draw_list(&state);
        assert_eq!(list.len(), 4);
        assert_eq!(list[0].center, state.player.pos);
        assert_eq!(list[1].alpha, 0.5);
        assert_eq!(list[2].radius, state.config.missile_radius);
        assert_eq!(list[3].radius, 20.0);
        assert_eq!(list[3].color, red);
    }
}

//! Background stars

use crate::constants::TWINKLE_RATE;
use glam::Vec2;

/// A purely cosmetic background point.
///
/// Depth `z` lies in (0.1, 0.9]; nearer stars (larger `z`) shift further
/// under parallax.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub depth: f32,
    pub size: f32,
    pub brightness: f32,
}

impl Star {
    /// Parallax-shifted position wrapped back into the viewport
    pub fn parallax_position(&self, parallax: Vec2, factor: f32, viewport: Vec2) -> Vec2 {
        let shifted = self.position + parallax * self.depth * factor;
        Vec2::new(
            wrap(shifted.x, viewport.x),
            wrap(shifted.y, viewport.y),
        )
    }

    /// Twinkle multiplier in [0.4, 1.0], driven by the frame counter
    pub fn flicker(&self, tick: u64) -> f32 {
        (tick as f32 * TWINKLE_RATE + self.position.x).sin() * 0.3 + 0.7
    }

    pub fn alpha(&self, tick: u64) -> f32 {
        (self.brightness * self.flicker(tick)).clamp(0.0, 1.0)
    }
}

fn wrap(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    value.rem_euclid(extent)
}

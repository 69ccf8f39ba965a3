//! Expanding rings spawned by pointer presses

use crate::constants::SHOCKWAVE_START_RADIUS;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shockwave {
    pub origin: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub growth: f32,
}

impl Shockwave {
    pub fn new(origin: Vec2, max_radius: f32, growth: f32) -> Self {
        Self {
            origin,
            radius: SHOCKWAVE_START_RADIUS,
            max_radius,
            growth,
        }
    }

    /// Grow by one frame
    pub fn age(&mut self) {
        self.radius += self.growth;
    }

    /// `1 - radius / max_radius`; drops below zero once the ring has faded
    pub fn opacity(&self) -> f32 {
        if self.max_radius <= 0.0 {
            return 0.0;
        }
        1.0 - self.radius / self.max_radius
    }

    pub fn is_expired(&self) -> bool {
        self.opacity() <= 0.0
    }
}

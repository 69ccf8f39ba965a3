//! Particle and comet entities

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A value that differs between ambient particles and comets
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerKind<T> {
    pub normal: T,
    pub comet: T,
}

impl<T: Copy> PerKind<T> {
    pub const fn new(normal: T, comet: T) -> Self {
        Self { normal, comet }
    }

    pub fn get(&self, kind: &ParticleKind) -> T {
        match kind {
            ParticleKind::Normal => self.normal,
            ParticleKind::Comet(_) => self.comet,
        }
    }
}

/// Transient state carried only by comets
#[derive(Clone, Debug, PartialEq)]
pub struct Comet {
    /// Frames left to live
    pub life: u32,
    /// Past positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Comet {
    pub fn new(life: u32) -> Self {
        Self {
            life,
            trail: VecDeque::new(),
        }
    }

    /// Append a position, evicting the oldest ones beyond `capacity`
    pub fn record(&mut self, position: Vec2, capacity: usize) {
        self.trail.push_back(position);
        while self.trail.len() > capacity {
            self.trail.pop_front();
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParticleKind {
    /// Ambient drifter, lives for the whole epoch
    Normal,
    Comet(Comet),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn new_normal(position: Vec2, velocity: Vec2, size: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            kind: ParticleKind::Normal,
        }
    }

    pub fn new_comet(position: Vec2, velocity: Vec2, size: f32, life: u32) -> Self {
        Self {
            position,
            velocity,
            size,
            kind: ParticleKind::Comet(Comet::new(life)),
        }
    }

    pub fn is_comet(&self) -> bool {
        matches!(self.kind, ParticleKind::Comet(_))
    }

    pub fn comet(&self) -> Option<&Comet> {
        match &self.kind {
            ParticleKind::Comet(comet) => Some(comet),
            ParticleKind::Normal => None,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Scale the velocity down to `max_speed` if it is faster
    pub fn clamp_speed(&mut self, max_speed: f32) {
        let speed = self.speed();
        if speed > max_speed && speed > 0.0 {
            self.velocity *= max_speed / speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_evicts_oldest_first() {
        let mut comet = Comet::new(100);
        for i in 0..25 {
            comet.record(Vec2::new(i as f32, 0.0), 20);
        }
        assert_eq!(comet.trail.len(), 20);
        assert_eq!(comet.trail.front().unwrap().x, 5.0);
        assert_eq!(comet.trail.back().unwrap().x, 24.0);
    }

    #[test]
    fn test_clamp_speed() {
        let mut p = Particle::new_normal(Vec2::ZERO, Vec2::new(30.0, 40.0), 1.0);
        p.clamp_speed(4.0);
        assert!((p.speed() - 4.0).abs() < 1e-5);
        assert!((p.velocity.x - 2.4).abs() < 1e-5);

        let mut slow = Particle::new_normal(Vec2::ZERO, Vec2::new(1.0, 0.0), 1.0);
        slow.clamp_speed(4.0);
        assert_eq!(slow.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_per_kind_lookup() {
        let factors = PerKind::new(0.5, 2.0);
        let normal = Particle::new_normal(Vec2::ZERO, Vec2::ZERO, 1.0);
        let comet = Particle::new_comet(Vec2::ZERO, Vec2::ZERO, 1.0, 10);
        assert_eq!(factors.get(&normal.kind), 0.5);
        assert_eq!(factors.get(&comet.kind), 2.0);
        assert!(comet.is_comet());
        assert!(normal.comet().is_none());
    }
}

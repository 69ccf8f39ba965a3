//! Population generation for a fresh epoch

use crate::params::{PopulationParams, SimulationParams};
use flux_physics::{Particle, Star};
use glam::Vec2;
use rand::Rng;

/// Pixel size of the drawing surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    pub fn area(&self) -> f32 {
        self.width as f32 * self.height as f32
    }
}

/// `min(floor(area / area_per_particle), max_particles)`
pub fn particle_count(viewport: Viewport, population: &PopulationParams) -> usize {
    capped(viewport.area() / population.area_per_particle, population.max_particles)
}

/// `min(floor(area / area_per_star), max_stars)`
pub fn star_count(viewport: Viewport, population: &PopulationParams) -> usize {
    capped(viewport.area() / population.area_per_star, population.max_stars)
}

fn capped(count: f32, max: usize) -> usize {
    if !count.is_finite() || count <= 0.0 {
        return 0;
    }
    (count.floor() as usize).min(max)
}

pub fn spawn_particles(rng: &mut impl Rng, viewport: Viewport, params: &SimulationParams) -> Vec<Particle> {
    let size = viewport.size();
    let speed = params.motion.initial_speed;

    (0..particle_count(viewport, &params.population))
        .map(|_| {
            let position = Vec2::new(rng.random::<f32>() * size.x, rng.random::<f32>() * size.y);
            let velocity = Vec2::new(
                (rng.random::<f32>() - 0.5) * speed,
                (rng.random::<f32>() - 0.5) * speed,
            );
            Particle::new_normal(position, velocity, rng.random::<f32>() * 2.0 + 1.0)
        })
        .collect()
}

pub fn spawn_stars(rng: &mut impl Rng, viewport: Viewport, params: &SimulationParams) -> Vec<Star> {
    let size = viewport.size();

    (0..star_count(viewport, &params.population))
        .map(|_| Star {
            position: Vec2::new(rng.random::<f32>() * size.x, rng.random::<f32>() * size.y),
            // (0.1, 0.9]: 0.1 is far, 0.9 is near
            depth: 0.9 - rng.random::<f32>() * 0.8,
            size: rng.random::<f32>() * 1.5,
            brightness: rng.random::<f32>(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_counts_scale_with_area_and_cap() {
        let population = PopulationParams::default();
        assert_eq!(particle_count(Viewport::new(300, 300), &population), 10);
        assert_eq!(particle_count(Viewport::new(800, 600), &population), 53);
        assert_eq!(particle_count(Viewport::new(1600, 1200), &population), 180);
        assert_eq!(star_count(Viewport::new(800, 600), &population), 120);
        assert_eq!(star_count(Viewport::new(1600, 1200), &population), 150);
        assert_eq!(particle_count(Viewport::new(0, 600), &population), 0);
    }

    #[test]
    fn test_spawned_entities_lie_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let viewport = Viewport::new(640, 480);
        let params = SimulationParams::default();

        let particles = spawn_particles(&mut rng, viewport, &params);
        assert_eq!(particles.len(), 34);
        for p in &particles {
            assert!(!p.is_comet());
            assert!((0.0..640.0).contains(&p.position.x));
            assert!((0.0..480.0).contains(&p.position.y));
            assert!(p.velocity.x.abs() <= 0.4 && p.velocity.y.abs() <= 0.4);
        }

        for star in spawn_stars(&mut rng, viewport, &params) {
            assert!(star.depth > 0.1 && star.depth <= 0.9);
            assert!((0.0..=1.0).contains(&star.brightness));
        }
    }
}

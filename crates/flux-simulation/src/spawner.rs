//! Comet spawning: ambient edge arrivals and pointer-press bursts

use crate::epoch::Viewport;
use crate::params::SimulationParams;
use flux_physics::Particle;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Screen edge a comet enters from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl ScreenEdge {
    const ALL: [ScreenEdge; 4] = [ScreenEdge::Top, ScreenEdge::Right, ScreenEdge::Bottom, ScreenEdge::Left];

    /// Unit vector pointing into the screen
    pub fn inward(self) -> Vec2 {
        match self {
            ScreenEdge::Top => Vec2::Y,
            ScreenEdge::Right => Vec2::NEG_X,
            ScreenEdge::Bottom => Vec2::NEG_Y,
            ScreenEdge::Left => Vec2::X,
        }
    }

    fn point(self, t: f32, size: Vec2) -> Vec2 {
        match self {
            ScreenEdge::Top => Vec2::new(t * size.x, 0.0),
            ScreenEdge::Right => Vec2::new(size.x, t * size.y),
            ScreenEdge::Bottom => Vec2::new(t * size.x, size.y),
            ScreenEdge::Left => Vec2::new(0.0, t * size.y),
        }
    }
}

/// Roll the per-frame dice for an ambient comet
pub fn roll_ambient(rng: &mut impl Rng, params: &SimulationParams) -> bool {
    rng.random_bool(params.spawner.ambient_probability.clamp(0.0, 1.0))
}

/// A comet entering from a random point on a random edge
pub fn edge_comet(rng: &mut impl Rng, viewport: Viewport, params: &SimulationParams) -> Particle {
    let spawner = &params.spawner;
    let edge = ScreenEdge::ALL[rng.random_range(0..ScreenEdge::ALL.len())];
    let position = edge.point(rng.random::<f32>(), viewport.size());

    let inward = edge.inward();
    let lateral = inward.perp() * rng.random_range(-spawner.lateral_jitter..=spawner.lateral_jitter);
    let speed = rng.random_range(spawner.edge_speed_min..=spawner.edge_speed_max);

    new_comet(rng, position, inward * speed + lateral, params)
}

/// A fan of comets launched from `origin`, one per sector of a full turn
pub fn burst(rng: &mut impl Rng, origin: Vec2, params: &SimulationParams) -> Vec<Particle> {
    let spawner = &params.spawner;
    let count = spawner.burst_count;

    (0..count)
        .map(|i| {
            let jitter = rng.random_range(-spawner.burst_angle_jitter..=spawner.burst_angle_jitter);
            let angle = i as f32 / count as f32 * TAU + jitter;
            let speed = rng.random_range(spawner.burst_speed_min..=spawner.burst_speed_max);
            new_comet(rng, origin, Vec2::from_angle(angle) * speed, params)
        })
        .collect()
}

fn new_comet(rng: &mut impl Rng, position: Vec2, velocity: Vec2, params: &SimulationParams) -> Particle {
    let comet = &params.comet;
    let life = rng.random_range(comet.life_min..=comet.life_max);
    let size = rng.random_range(comet.size_min..=comet.size_max);
    Particle::new_comet(position, velocity, size, life)
}

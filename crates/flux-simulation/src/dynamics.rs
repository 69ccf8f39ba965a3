//! Per-frame particle update
//!
//! Explicit Euler: position first, then a stack of additive impulses, then a
//! single speed clamp and drag. The clamp/drag pair keeps velocities bounded
//! however many forces fire in one frame.

use crate::commands::PointerState;
use crate::params::SimulationParams;
use flux_physics::{
    gravitational_pull, pointer_push, shockwave_impulse, Particle, ParticleKind, Shockwave,
};
use glam::Vec2;
use rand::Rng;

/// Screen-space black hole as seen by this frame's physics
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlackHoleView {
    /// Parallax-adjusted position
    pub position: Vec2,
    pub radius: f32,
}

/// Read-only inputs shared by every particle in one frame
pub struct StepContext<'a> {
    pub bounds: Vec2,
    pub black_hole: Option<BlackHoleView>,
    pub pointer: PointerState,
    pub shockwaves: &'a [Shockwave],
    pub params: &'a SimulationParams,
}

/// Advance one particle by one frame. Returns `false` when it died.
pub fn step(particle: &mut Particle, ctx: &StepContext<'_>, rng: &mut impl Rng) -> bool {
    let params = ctx.params;

    particle.position += particle.velocity;

    if particle.position.x < 0.0 || particle.position.x > ctx.bounds.x {
        particle.velocity.x = -particle.velocity.x;
    }
    if particle.position.y < 0.0 || particle.position.y > ctx.bounds.y {
        particle.velocity.y = -particle.velocity.y;
    }

    if let ParticleKind::Comet(comet) = &mut particle.kind {
        comet.life = comet.life.saturating_sub(1);
        if comet.life == 0 {
            return false;
        }
        comet.record(particle.position, params.comet.trail_len);
    }

    if let Some(hole) = ctx.black_hole {
        let distance = particle.position.distance(hole.position);
        if distance < hole.radius {
            if particle.is_comet() {
                return false;
            }
            particle.position = respawn_point(rng, ctx.bounds);
        } else if distance < params.black_hole.capture_radius {
            let strength = params.black_hole.strength * params.black_hole.pull.get(&particle.kind);
            particle.velocity += gravitational_pull(particle.position, hole.position, strength);
        }
    }

    if ctx.pointer.active {
        let strength = params.pointer.push.get(&particle.kind);
        particle.velocity += pointer_push(
            particle.position,
            ctx.pointer.position,
            params.pointer.radius,
            strength,
        );
    }

    let impulse = params.shockwave.impulse.get(&particle.kind);
    for wave in ctx.shockwaves {
        particle.velocity += shockwave_impulse(particle.position, wave, params.shockwave.band, impulse);
    }

    particle.clamp_speed(params.motion.max_speed.get(&particle.kind));
    particle.velocity *= params.motion.drag;

    true
}

/// Random point on the top or bottom edge
fn respawn_point(rng: &mut impl Rng, bounds: Vec2) -> Vec2 {
    let x = rng.random::<f32>() * bounds.x;
    let y = if rng.random_bool(0.5) { 0.0 } else { bounds.y };
    Vec2::new(x, y)
}

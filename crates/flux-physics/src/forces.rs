//! Force laws acting on particles, plus the lensing displacement.
//!
//! Every function here is a per-frame impulse: the caller adds the returned
//! vector to the particle velocity, then clamps speed and applies drag once.

use crate::shockwave::Shockwave;
use glam::Vec2;

/// Distances below this are treated as coincident
pub const SOFTENING: f32 = 1e-3;

/// Attraction towards `center` with magnitude `strength / distance`
pub fn gravitational_pull(position: Vec2, center: Vec2, strength: f32) -> Vec2 {
    let delta = center - position;
    let distance = delta.length();
    if distance <= SOFTENING {
        return Vec2::ZERO;
    }
    delta / distance * (strength / distance)
}

/// Push away from the pointer, linear in how deep inside `radius` we are
pub fn pointer_push(position: Vec2, pointer: Vec2, radius: f32, strength: f32) -> Vec2 {
    let delta = pointer - position;
    let distance = delta.length();
    if distance >= radius || distance <= SOFTENING {
        return Vec2::ZERO;
    }
    let falloff = (radius - distance) / radius;
    -(delta / distance) * falloff * strength
}

/// Outward kick for a particle riding the shockwave front (within `band`)
pub fn shockwave_impulse(position: Vec2, wave: &Shockwave, band: f32, strength: f32) -> Vec2 {
    let delta = position - wave.origin;
    let distance = delta.length();
    if (distance - wave.radius).abs() >= band {
        return Vec2::ZERO;
    }
    let direction = if distance > SOFTENING {
        delta / distance
    } else {
        Vec2::X
    };
    direction * strength
}

/// Apparent displacement of something drawn near a black hole.
///
/// Zero outside `hole_radius * radius_factor`; inside, points away from the
/// hole with length `hole_radius * (1 - d / lensing_radius)²`.
pub fn lensing_offset(position: Vec2, hole_center: Vec2, hole_radius: f32, radius_factor: f32) -> Vec2 {
    let lensing_radius = hole_radius * radius_factor;
    if lensing_radius <= 0.0 {
        return Vec2::ZERO;
    }

    let delta = position - hole_center;
    let distance = delta.length();
    if distance >= lensing_radius || distance <= SOFTENING {
        return Vec2::ZERO;
    }

    let falloff = (1.0 - distance / lensing_radius).powi(2);
    delta / distance * falloff * hole_radius
}

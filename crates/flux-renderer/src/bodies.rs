//! Celestial body drawing
//!
//! Both painters build their gradient through the fallible constructor and
//! drop to a flat fill when the radius is degenerate, so a body is never
//! skipped.

use crate::canvas::Canvas;
use crate::gradient::{GradientError, RadialGradient};
use flux_physics::{decode_hex, BodyKind, CelestialBody, Rgb, Rgba};
use glam::Vec2;

/// Accretion disk extent, in multiples of the horizon radius
const DISK_INNER: f32 = 0.8;
const DISK_OUTER: f32 = 3.5;
const HORIZON_GLOW: f32 = 20.0;
const RING_RADIUS: f32 = 1.2;
const RING_ALPHA: f32 = 0.3;

const SUN_GLOW: f32 = 80.0;
const PLANET_GLOW: f32 = 30.0;

const BLACK_HOLE_FALLBACK: Rgb = Rgb::new(8, 8, 12);

/// Flat fills still need something to cover when the radius is degenerate
fn fallback_radius(radius: f32) -> f32 {
    radius.abs().max(1.0)
}

/// Draw `body` at `position` (already parallax- and lens-adjusted)
pub fn draw_body(canvas: &mut Canvas, body: &CelestialBody, position: Vec2, secondary: Rgb) {
    match body.kind {
        BodyKind::BlackHole => draw_black_hole(canvas, position, body.radius, secondary),
        BodyKind::Sun => draw_sphere(canvas, position, body.radius, decode_hex(&body.color), SUN_GLOW),
        BodyKind::Planet => draw_sphere(canvas, position, body.radius, decode_hex(&body.color), PLANET_GLOW),
    }
}

pub fn accretion_disk(center: Vec2, radius: f32, secondary: Rgb) -> Result<RadialGradient, GradientError> {
    Ok(
        RadialGradient::concentric(center, radius * DISK_INNER, radius * DISK_OUTER)?
            .with_stop(0.0, Rgb::BLACK.opaque())
            .with_stop(0.3, secondary.opaque())
            .with_stop(0.6, secondary.with_alpha(0.2))
            .with_stop(1.0, Rgba::TRANSPARENT),
    )
}

/// Highlight up and to the left, body color, black at the rim
pub fn sphere_shading(center: Vec2, radius: f32, color: Rgb) -> Result<RadialGradient, GradientError> {
    let highlight = center - Vec2::splat(radius / 3.0);
    Ok(RadialGradient::new(highlight, radius * 0.1, center, radius)?
        .with_stop(0.0, Rgb::WHITE.opaque())
        .with_stop(0.3, color.opaque())
        .with_stop(1.0, Rgb::BLACK.opaque()))
}

fn draw_black_hole(canvas: &mut Canvas, center: Vec2, radius: f32, secondary: Rgb) {
    match accretion_disk(center, radius, secondary) {
        Ok(disk) => canvas.fill_gradient_circle(center, radius * DISK_OUTER, &disk),
        Err(err) => {
            log::trace!("Accretion disk fallback: {err}");
            canvas.fill_circle(center, fallback_radius(radius) * DISK_OUTER, BLACK_HOLE_FALLBACK.opaque());
        }
    }

    canvas.glow(center, radius, HORIZON_GLOW, secondary.opaque());
    canvas.fill_circle(center, radius, Rgb::BLACK.opaque());
    canvas.stroke_circle(center, radius * RING_RADIUS, 1.0, Rgb::WHITE.with_alpha(RING_ALPHA));
}

fn draw_sphere(canvas: &mut Canvas, center: Vec2, radius: f32, color: Rgb, glow: f32) {
    canvas.glow(center, radius, glow, color.opaque());
    match sphere_shading(center, radius, color) {
        Ok(shading) => canvas.fill_gradient_circle(center, radius, &shading),
        Err(err) => {
            log::trace!("Sphere shading fallback: {err}");
            canvas.fill_circle(center, fallback_radius(radius), color.opaque());
        }
    }
}

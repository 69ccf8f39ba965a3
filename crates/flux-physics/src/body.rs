//! Celestial bodies: planets, suns and the black hole

use crate::palette::Palette;
use glam::Vec2;
use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Planet,
    Sun,
    BlackHole,
}

/// A body on a circular orbit around the viewport center.
///
/// The orbit is a fixed-step integrator: `angle` advances by `orbit_speed`
/// every frame. Bodies with `orbit_radius == 0` stay where they were placed.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub kind: BodyKind,
    pub position: Vec2,
    pub radius: f32,
    pub color: String,
    pub orbit_speed: f32,
    pub angle: f32,
    pub orbit_radius: f32,
}

impl CelestialBody {
    pub fn black_hole(center: Vec2, radius: f32) -> Self {
        Self {
            kind: BodyKind::BlackHole,
            position: center,
            radius,
            color: "#000000".to_owned(),
            orbit_speed: 0.0,
            angle: 0.0,
            orbit_radius: 0.0,
        }
    }

    pub fn orbiting(
        kind: BodyKind,
        center: Vec2,
        radius: f32,
        color: impl Into<String>,
        orbit_radius: f32,
        orbit_speed: f32,
        angle: f32,
    ) -> Self {
        let mut body = Self {
            kind,
            position: center,
            radius,
            color: color.into(),
            orbit_speed,
            angle,
            orbit_radius,
        };
        body.place(center);
        body
    }

    /// Bodies a theme designates, centered on `center`.
    ///
    /// `DEEP_SPACE` gets a black hole, `CRIMSON_TIDE` a slowly wobbling red
    /// sun, everything else a planet with a moon in the palette colors.
    pub fn layout_for(palette: &Palette, center: Vec2) -> Vec<CelestialBody> {
        match palette.name.as_str() {
            "DEEP_SPACE" => vec![Self::black_hole(center, 60.0)],
            "CRIMSON_TIDE" => vec![Self::orbiting(
                BodyKind::Sun,
                center,
                120.0,
                "#ef4444",
                20.0,
                0.002,
                0.0,
            )],
            _ => vec![
                Self::orbiting(
                    BodyKind::Planet,
                    center,
                    80.0,
                    palette.primary.clone(),
                    100.0,
                    0.005,
                    0.0,
                ),
                // Moon
                Self::orbiting(
                    BodyKind::Planet,
                    center,
                    20.0,
                    palette.secondary.clone(),
                    220.0,
                    0.02,
                    PI,
                ),
            ],
        }
    }

    pub fn is_black_hole(&self) -> bool {
        self.kind == BodyKind::BlackHole
    }

    /// Advance one frame along the orbit
    pub fn update_orbit(&mut self, center: Vec2) {
        if self.orbit_radius > 0.0 {
            self.angle += self.orbit_speed;
            self.place(center);
        }
    }

    /// Where the body is drawn (and, for the black hole, where it pulls from)
    pub fn screen_position(&self, parallax: Vec2, factor: f32) -> Vec2 {
        self.position + parallax * factor
    }

    fn place(&mut self, center: Vec2) {
        if self.orbit_radius > 0.0 {
            self.position = center + self.orbit_radius * Vec2::new(self.angle.cos(), self.angle.sin());
        }
    }
}

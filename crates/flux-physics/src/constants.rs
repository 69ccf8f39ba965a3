//! Default tuning constants for the flux field
//!
//! These are the values the simulation ships with. Every one of them can be
//! overridden at runtime through `flux_simulation::SimulationParams`.

/// Maximum speed of an ambient particle (pixels per frame)
pub const NORMAL_MAX_SPEED: f32 = 4.0;

/// Maximum speed of a comet (pixels per frame)
pub const COMET_MAX_SPEED: f32 = 15.0;

/// Multiplicative velocity drag applied once per frame
pub const DRAG: f32 = 0.98;

/// Number of past positions a comet remembers for its trail
pub const MAX_TRAIL_LEN: usize = 20;

/// Screen area (px²) per ambient particle
pub const AREA_PER_PARTICLE: f32 = 9000.0;

/// Upper bound on the ambient population
pub const MAX_PARTICLES: usize = 180;

/// Screen area (px²) per background star
pub const AREA_PER_STAR: f32 = 4000.0;

/// Upper bound on the star population
pub const MAX_STARS: usize = 150;

/// Distance inside which the black hole pulls particles
pub const CAPTURE_RADIUS: f32 = 500.0;

/// Black hole pull numerator (force = strength / distance)
pub const BLACK_HOLE_STRENGTH: f32 = 50.0;

/// Lensing reaches out to this multiple of the black hole radius
pub const LENSING_RADIUS_FACTOR: f32 = 6.0;

/// Radius of the pointer's push field
pub const POINTER_RADIUS: f32 = 250.0;

/// Shockwaves start at this radius
pub const SHOCKWAVE_START_RADIUS: f32 = 1.0;

/// Radius at which a shockwave has fully faded
pub const SHOCKWAVE_MAX_RADIUS: f32 = 500.0;

/// Shockwave radius growth per frame
pub const SHOCKWAVE_GROWTH: f32 = 10.0;

/// Half-width of the band around a shockwave front that receives an impulse
pub const SHOCKWAVE_BAND: f32 = 40.0;

/// Per-frame probability of an ambient comet appearing at a screen edge
pub const COMET_SPAWN_PROBABILITY: f64 = 0.015;

/// Comets launched by a single pointer press
pub const BURST_COMETS: usize = 8;

/// Pairs closer than this (px) are joined in the proximity graph
pub const CONNECTION_DISTANCE: f32 = 150.0;

/// Stars move by `parallax * depth * STAR_PARALLAX`
pub const STAR_PARALLAX: f32 = 0.1;

/// Celestial bodies move by `parallax * BODY_PARALLAX`
pub const BODY_PARALLAX: f32 = 0.05;

/// The particle layer moves against the pointer by this factor
pub const HUD_PARALLAX: f32 = -0.02;

/// Twinkle phase advance per tick
pub const TWINKLE_RATE: f32 = 0.05;

//! Simulation parameters for runtime tuning
//!
//! Grouped the same way the update pass consumes them. Every group is
//! `#[serde(default)]`, so a config file only has to mention what it changes.

use crate::ConfigError;
use flux_physics::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
    pub population: PopulationParams,
    pub motion: MotionParams,
    pub comet: CometParams,
    pub black_hole: BlackHoleParams,
    pub pointer: PointerParams,
    pub shockwave: ShockwaveParams,
    pub spawner: SpawnerParams,
    pub graph: GraphParams,
    pub parallax: ParallaxParams,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationParams {
    pub area_per_particle: f32,
    pub max_particles: usize,
    pub area_per_star: f32,
    pub max_stars: usize,
}

impl Default for PopulationParams {
    fn default() -> Self {
        Self {
            area_per_particle: AREA_PER_PARTICLE,
            max_particles: MAX_PARTICLES,
            area_per_star: AREA_PER_STAR,
            max_stars: MAX_STARS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    pub max_speed: PerKind<f32>,
    /// Velocity multiplier applied after the speed clamp, in (0, 1]
    pub drag: f32,
    /// Ambient particles start with each velocity component in ±initial_speed/2
    pub initial_speed: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            max_speed: PerKind::new(NORMAL_MAX_SPEED, COMET_MAX_SPEED),
            drag: DRAG,
            initial_speed: 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CometParams {
    pub life_min: u32,
    pub life_max: u32,
    pub trail_len: usize,
    pub size_min: f32,
    pub size_max: f32,
}

impl Default for CometParams {
    fn default() -> Self {
        Self {
            life_min: 80,
            life_max: 160,
            trail_len: MAX_TRAIL_LEN,
            size_min: 1.5,
            size_max: 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackHoleParams {
    pub capture_radius: f32,
    pub strength: f32,
    /// Pull multiplier per kind (comets are dragged in harder)
    pub pull: PerKind<f32>,
    pub lensing_radius_factor: f32,
}

impl Default for BlackHoleParams {
    fn default() -> Self {
        Self {
            capture_radius: CAPTURE_RADIUS,
            strength: BLACK_HOLE_STRENGTH,
            pull: PerKind::new(0.5, 2.0),
            lensing_radius_factor: LENSING_RADIUS_FACTOR,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerParams {
    pub radius: f32,
    /// Push strength per kind; comets scatter harder
    pub push: PerKind<f32>,
}

impl Default for PointerParams {
    fn default() -> Self {
        Self {
            radius: POINTER_RADIUS,
            push: PerKind::new(0.5, 1.5),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShockwaveParams {
    pub max_radius: f32,
    pub growth: f32,
    pub band: f32,
    pub impulse: PerKind<f32>,
}

impl Default for ShockwaveParams {
    fn default() -> Self {
        Self {
            max_radius: SHOCKWAVE_MAX_RADIUS,
            growth: SHOCKWAVE_GROWTH,
            band: SHOCKWAVE_BAND,
            impulse: PerKind::new(2.0, 4.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerParams {
    pub ambient_probability: f64,
    pub edge_speed_min: f32,
    pub edge_speed_max: f32,
    pub lateral_jitter: f32,
    pub burst_count: usize,
    pub burst_angle_jitter: f32,
    pub burst_speed_min: f32,
    pub burst_speed_max: f32,
}

impl Default for SpawnerParams {
    fn default() -> Self {
        Self {
            ambient_probability: COMET_SPAWN_PROBABILITY,
            edge_speed_min: 3.0,
            edge_speed_max: 6.0,
            lateral_jitter: 1.0,
            burst_count: BURST_COMETS,
            burst_angle_jitter: 0.3,
            burst_speed_min: 4.0,
            burst_speed_max: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphParams {
    pub distance: f32,
    /// Only every n-th candidate is tested as a triangle's third vertex
    pub triangle_stride: usize,
    pub edge_alpha: f32,
    pub triangle_alpha: f32,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            distance: CONNECTION_DISTANCE,
            triangle_stride: 3,
            edge_alpha: 0.4,
            triangle_alpha: 0.08,
        }
    }
}

impl GraphParams {
    pub fn distance_sq(&self) -> f32 {
        self.distance * self.distance
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxParams {
    pub star: f32,
    pub body: f32,
    pub hud: f32,
}

impl Default for ParallaxParams {
    fn default() -> Self {
        Self {
            star: STAR_PARALLAX,
            body: BODY_PARALLAX,
            hud: HUD_PARALLAX,
        }
    }
}

impl SimulationParams {
    /// Reject values the update pass cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_owned(),
            })
        }

        if !(self.motion.drag > 0.0 && self.motion.drag <= 1.0) {
            return invalid("motion.drag", "must be in (0, 1]");
        }
        if self.motion.max_speed.normal <= 0.0 || self.motion.max_speed.comet <= 0.0 {
            return invalid("motion.max_speed", "must be positive");
        }
        if self.population.area_per_particle <= 0.0 || self.population.area_per_star <= 0.0 {
            return invalid("population", "area per entity must be positive");
        }
        if self.comet.trail_len == 0 {
            return invalid("comet.trail_len", "must be at least 1");
        }
        if self.comet.life_min == 0 || self.comet.life_min > self.comet.life_max {
            return invalid("comet.life_min", "must be positive and not above life_max");
        }
        if self.comet.size_min <= 0.0 || self.comet.size_min > self.comet.size_max {
            return invalid("comet.size_min", "must be positive and not above size_max");
        }
        if !(0.0..=1.0).contains(&self.spawner.ambient_probability) {
            return invalid("spawner.ambient_probability", "must be in [0, 1]");
        }
        let ordered = |min: f32, max: f32| min <= max;
        if !ordered(self.spawner.edge_speed_min, self.spawner.edge_speed_max)
            || !ordered(self.spawner.burst_speed_min, self.spawner.burst_speed_max)
        {
            return invalid("spawner", "speed minimum above maximum");
        }
        let jitter_ok = |j: f32| j.is_finite() && j >= 0.0;
        if !jitter_ok(self.spawner.lateral_jitter) {
            return invalid("spawner.lateral_jitter", "must be finite and non-negative");
        }
        if !jitter_ok(self.spawner.burst_angle_jitter) {
            return invalid("spawner.burst_angle_jitter", "must be finite and non-negative");
        }
        if self.shockwave.max_radius <= 0.0 || self.shockwave.growth <= 0.0 {
            return invalid("shockwave", "max_radius and growth must be positive");
        }
        if self.pointer.radius <= 0.0 {
            return invalid("pointer.radius", "must be positive");
        }
        if self.graph.distance <= 0.0 || self.graph.triangle_stride == 0 {
            return invalid("graph", "distance and triangle_stride must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SimulationParams::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let params: SimulationParams =
            serde_json::from_str(r#"{ "motion": { "drag": 0.99 }, "seed": 7 }"#).unwrap();
        assert_eq!(params.seed, Some(7));
        assert_eq!(params.motion.drag, 0.99);
        assert_eq!(params.motion.max_speed.comet, COMET_MAX_SPEED);
        assert_eq!(params.black_hole, BlackHoleParams::default());
    }

    #[test]
    fn test_validate_rejects_bad_drag() {
        let mut params = SimulationParams::default();
        params.motion.drag = 1.5;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::Invalid { field: "motion.drag", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_trail() {
        let mut params = SimulationParams::default();
        params.comet.trail_len = 0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_jitter() {
        let mut params = SimulationParams::default();
        params.spawner.lateral_jitter = -1.0;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::Invalid { field: "spawner.lateral_jitter", .. })
        ));

        let mut params = SimulationParams::default();
        params.spawner.burst_angle_jitter = f32::NAN;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::Invalid { field: "spawner.burst_angle_jitter", .. })
        ));

        let mut params = SimulationParams::default();
        params.spawner.lateral_jitter = 0.0;
        params.spawner.burst_angle_jitter = 0.0;
        assert!(params.validate().is_ok());
    }
}

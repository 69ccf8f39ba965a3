//! Two-circle radial gradients, the same model as a 2D canvas
//! `createRadialGradient(x0, y0, r0, x1, y1, r1)`.

use flux_physics::Rgba;
use glam::Vec2;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GradientError {
    #[error("gradient radius must be finite and non-negative, got {0}")]
    InvalidRadius(f32),
    #[error("gradient center must be finite")]
    InvalidCenter,
    #[error("start and end circles are identical, the gradient has no extent")]
    Degenerate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    start: Vec2,
    start_radius: f32,
    end: Vec2,
    end_radius: f32,
    stops: Vec<(f32, Rgba)>,
}

impl RadialGradient {
    pub fn new(start: Vec2, start_radius: f32, end: Vec2, end_radius: f32) -> Result<Self, GradientError> {
        for radius in [start_radius, end_radius] {
            if !radius.is_finite() || radius < 0.0 {
                return Err(GradientError::InvalidRadius(radius));
            }
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(GradientError::InvalidCenter);
        }
        if start == end && start_radius == end_radius {
            return Err(GradientError::Degenerate);
        }

        Ok(Self {
            start,
            start_radius,
            end,
            end_radius,
            stops: Vec::new(),
        })
    }

    /// Concentric gradient from `inner` to `outer` radius around `center`
    pub fn concentric(center: Vec2, inner: f32, outer: f32) -> Result<Self, GradientError> {
        Self::new(center, inner, center, outer)
    }

    /// Add a color stop. Offsets are clamped to [0, 1]; stops at the same
    /// offset keep insertion order.
    pub fn with_stop(mut self, offset: f32, color: Rgba) -> Self {
        let offset = if offset.is_nan() { 0.0 } else { offset.clamp(0.0, 1.0) };
        let index = self.stops.partition_point(|(o, _)| *o <= offset);
        self.stops.insert(index, (offset, color));
        self
    }

    pub fn stops(&self) -> &[(f32, Rgba)] {
        &self.stops
    }

    /// Color at `point`. Points the cone never reaches are transparent.
    pub fn sample(&self, point: Vec2) -> Rgba {
        match self.parameter(point) {
            Some(t) => self.color_at(t),
            None => Rgba::TRANSPARENT,
        }
    }

    /// Largest `w` with `r(w) >= 0` such that `point` lies on the circle
    /// interpolated between the start and end circles.
    fn parameter(&self, point: Vec2) -> Option<f32> {
        let cd = self.end - self.start;
        let pd = point - self.start;
        let dr = self.end_radius - self.start_radius;
        let r0 = self.start_radius;

        let a = cd.dot(cd) - dr * dr;
        let b = pd.dot(cd) + r0 * dr;
        let c = pd.dot(pd) - r0 * r0;
        let radius_at = |w: f32| r0 + w * dr;

        if a.abs() < 1e-6 {
            if b.abs() < 1e-6 {
                return None;
            }
            let w = c / (2.0 * b);
            return (radius_at(w) >= 0.0).then_some(w);
        }

        let disc = b * b - a * c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let (w1, w2) = ((b + root) / a, (b - root) / a);
        let (hi, lo) = if w1 >= w2 { (w1, w2) } else { (w2, w1) };

        if radius_at(hi) >= 0.0 {
            Some(hi)
        } else if radius_at(lo) >= 0.0 {
            Some(lo)
        } else {
            None
        }
    }

    fn color_at(&self, t: f32) -> Rgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::TRANSPARENT;
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }

        let upper = self.stops.partition_point(|(o, _)| *o <= t);
        let (o0, c0) = self.stops[upper - 1];
        let (o1, c1) = self.stops[upper];
        let span = o1 - o0;
        if span <= f32::EPSILON {
            return c1;
        }
        c0.lerp(c1, (t - o0) / span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flux_physics::Rgb;

    fn black_to_white() -> RadialGradient {
        RadialGradient::concentric(Vec2::ZERO, 10.0, 20.0)
            .unwrap()
            .with_stop(0.0, Rgb::BLACK.opaque())
            .with_stop(1.0, Rgb::WHITE.opaque())
    }

    #[test]
    fn test_rejects_degenerate_radii() {
        assert_eq!(
            RadialGradient::concentric(Vec2::ZERO, -1.0, 10.0),
            Err(GradientError::InvalidRadius(-1.0))
        );
        assert!(matches!(
            RadialGradient::concentric(Vec2::ZERO, 0.0, f32::NAN),
            Err(GradientError::InvalidRadius(_))
        ));
        assert_eq!(
            RadialGradient::concentric(Vec2::ZERO, 0.0, 0.0),
            Err(GradientError::Degenerate)
        );
        assert_eq!(
            RadialGradient::new(Vec2::new(f32::INFINITY, 0.0), 1.0, Vec2::ZERO, 2.0),
            Err(GradientError::InvalidCenter)
        );
    }

    #[test]
    fn test_concentric_pads_both_ends() {
        let gradient = black_to_white();
        assert_eq!(gradient.sample(Vec2::ZERO).rgb(), Rgb::BLACK);
        assert_eq!(gradient.sample(Vec2::new(5.0, 0.0)).rgb(), Rgb::BLACK);
        assert_eq!(gradient.sample(Vec2::new(0.0, 40.0)).rgb(), Rgb::WHITE);

        let mid = gradient.sample(Vec2::new(15.0, 0.0));
        assert!((127..=128).contains(&mid.r));
        assert_eq!(mid.a, 1.0);
    }

    #[test]
    fn test_stops_are_kept_sorted() {
        let gradient = RadialGradient::concentric(Vec2::ZERO, 0.0, 1.0)
            .unwrap()
            .with_stop(1.0, Rgba::TRANSPARENT)
            .with_stop(0.3, Rgb::WHITE.opaque())
            .with_stop(-2.0, Rgb::BLACK.opaque());
        let offsets: Vec<f32> = gradient.stops().iter().map(|(o, _)| *o).collect();
        assert_eq!(offsets, vec![0.0, 0.3, 1.0]);
    }

    #[test]
    fn test_offset_focus_highlight() {
        // Small bright circle up-left, large circle at the origin
        let gradient = RadialGradient::new(Vec2::new(-10.0, -10.0), 3.0, Vec2::ZERO, 30.0)
            .unwrap()
            .with_stop(0.0, Rgb::WHITE.opaque())
            .with_stop(1.0, Rgb::BLACK.opaque());

        assert_eq!(gradient.sample(Vec2::new(-10.0, -10.0)).rgb(), Rgb::WHITE);
        let near_rim = gradient.sample(Vec2::new(29.0, 0.0));
        assert!(near_rim.r < 40);
    }

    #[test]
    fn test_without_stops_is_transparent() {
        let gradient = RadialGradient::concentric(Vec2::ZERO, 0.0, 5.0).unwrap();
        assert_eq!(gradient.sample(Vec2::ZERO), Rgba::TRANSPARENT);
    }
}

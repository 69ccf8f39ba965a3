//! CPU raster target
//!
//! A tightly packed RGBA8 framebuffer with just the primitives the flux
//! compositor needs. Every primitive is anti-aliased by analytic coverage
//! against the pixel center and blended source-over, except [`Canvas::glow`]
//! which adds light.

use crate::gradient::RadialGradient;
use flux_physics::{Rgb, Rgba};
use glam::Vec2;

pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    /// Translation applied to every draw call
    offset: Vec2,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; width as usize * height as usize],
            offset: Vec2::ZERO,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Reallocate for a new size. Contents are reset to opaque black.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![[0, 0, 0, 255]; width as usize * height as usize];
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Raw RGBA8 rows, ready for a texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill([color.r, color.g, color.b, 255]);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.fill_circle_with(center, radius, |_| color);
    }

    /// Fill a circle with a radial gradient, both in untranslated space
    pub fn fill_gradient_circle(&mut self, center: Vec2, radius: f32, gradient: &RadialGradient) {
        self.fill_circle_with(center, radius, |p| gradient.sample(p));
    }

    fn fill_circle_with(&mut self, center: Vec2, radius: f32, shade: impl Fn(Vec2) -> Rgba) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let origin = self.offset;
        let center = center + origin;
        let reach = Vec2::splat(radius + 1.0);

        self.for_each_pixel(center - reach, center + reach, |canvas, x, y, p| {
            let coverage = (radius + 0.5 - p.distance(center)).clamp(0.0, 1.0);
            if coverage > 0.0 {
                canvas.blend(x, y, shade(p - origin), coverage);
            }
        });
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        if radius.is_nan() || radius <= 0.0 || width.is_nan() || width <= 0.0 {
            return;
        }
        let center = center + self.offset;
        let half = width * 0.5;
        let reach = Vec2::splat(radius + half + 1.0);

        self.for_each_pixel(center - reach, center + reach, |canvas, x, y, p| {
            let coverage = (half + 0.5 - (p.distance(center) - radius).abs()).clamp(0.0, 1.0);
            if coverage > 0.0 {
                canvas.blend(x, y, color, coverage);
            }
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        if width.is_nan() || width <= 0.0 {
            return;
        }
        let a = from + self.offset;
        let b = to + self.offset;
        let half = width * 0.5;
        let reach = Vec2::splat(half + 1.0);

        self.for_each_pixel(a.min(b) - reach, a.max(b) + reach, |canvas, x, y, p| {
            let coverage = (half + 0.5 - distance_to_segment(p, a, b)).clamp(0.0, 1.0);
            if coverage > 0.0 {
                canvas.blend(x, y, color, coverage);
            }
        });
    }

    /// Solid triangle, either winding. Pixel centers on an edge are inside.
    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgba) {
        let (a, b, c) = (a + self.offset, b + self.offset, c + self.offset);
        let area = edge(a, b, c);
        if area.abs() <= f32::EPSILON {
            return;
        }
        let sign = area.signum();

        self.for_each_pixel(a.min(b).min(c), a.max(b).max(c), |canvas, x, y, p| {
            let inside = edge(b, c, p) * sign >= 0.0
                && edge(c, a, p) * sign >= 0.0
                && edge(a, b, p) * sign >= 0.0;
            if inside {
                canvas.blend(x, y, color, 1.0);
            }
        });
    }

    /// Additive halo around a disk: full strength at `radius`, fading
    /// quadratically to nothing at `radius + blur`.
    pub fn glow(&mut self, center: Vec2, radius: f32, blur: f32, color: Rgba) {
        if blur.is_nan() || blur <= 0.0 || radius < 0.0 {
            return;
        }
        let center = center + self.offset;
        let reach = Vec2::splat(radius + blur + 1.0);

        self.for_each_pixel(center - reach, center + reach, |canvas, x, y, p| {
            let falloff = 1.0 - ((p.distance(center) - radius) / blur).clamp(0.0, 1.0);
            let strength = color.a * falloff * falloff;
            if strength > 0.0 {
                canvas.add(x, y, color, strength);
            }
        });
    }

    /// Visit every pixel whose center lies in the clipped box `[min, max]`
    fn for_each_pixel(&mut self, min: Vec2, max: Vec2, mut visit: impl FnMut(&mut Self, u32, u32, Vec2)) {
        if self.is_empty() || !min.is_finite() || !max.is_finite() {
            return;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                visit(self, x, y, p);
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba, coverage: f32) {
        let alpha = color.a * coverage;
        if alpha <= 0.0 {
            return;
        }
        let index = self.index(x, y);
        let dst = &mut self.pixels[index];
        let mix = |d: u8, s: u8| (s as f32 * alpha + d as f32 * (1.0 - alpha)).round() as u8;
        *dst = [mix(dst[0], color.r), mix(dst[1], color.g), mix(dst[2], color.b), 255];
    }

    fn add(&mut self, x: u32, y: u32, color: Rgba, strength: f32) {
        let index = self.index(x, y);
        let dst = &mut self.pixels[index];
        let add = |d: u8, s: u8| (d as f32 + s as f32 * strength).round().min(255.0) as u8;
        *dst = [add(dst[0], color.r), add(dst[1], color.g), add(dst[2], color.b), 255];
    }
}

/// Signed double area of `(a, b, p)`
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);

    #[test]
    fn test_clear_and_bytes() {
        let mut canvas = Canvas::new(4, 2);
        canvas.clear(Rgb::new(1, 2, 3));
        assert_eq!(canvas.as_bytes().len(), 4 * 2 * 4);
        assert_eq!(&canvas.as_bytes()[..4], &[1, 2, 3, 255]);
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_circle_covers_center_not_corners() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 4.0, RED.opaque());
        assert_eq!(canvas.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(10, 16), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_translucent_blend() {
        let mut canvas = Canvas::new(8, 8);
        canvas.clear(Rgb::WHITE);
        canvas.fill_circle(Vec2::new(4.0, 4.0), 3.0, Rgb::BLACK.with_alpha(0.5));
        let [r, g, b, a] = canvas.pixel(4, 4).unwrap();
        assert!((127..=128).contains(&r) && r == g && g == b);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_offset_translates_draws() {
        let mut canvas = Canvas::new(20, 20);
        canvas.set_offset(Vec2::new(5.0, 0.0));
        canvas.fill_circle(Vec2::new(5.0, 10.0), 2.0, RED.opaque());
        assert_eq!(canvas.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(5, 10), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_line_and_triangle() {
        let mut canvas = Canvas::new(20, 20);
        canvas.line(Vec2::new(2.0, 5.5), Vec2::new(18.0, 5.5), 1.0, RED.opaque());
        assert_eq!(canvas.pixel(10, 5), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(10, 8), Some([0, 0, 0, 255]));

        canvas.fill_triangle(
            Vec2::new(0.0, 10.0),
            Vec2::new(0.0, 20.0),
            Vec2::new(10.0, 20.0),
            Rgb::WHITE.opaque(),
        );
        assert_eq!(canvas.pixel(1, 18), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(9, 11), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_stroke_circle_leaves_inside_untouched() {
        let mut canvas = Canvas::new(40, 40);
        canvas.stroke_circle(Vec2::new(20.0, 20.0), 10.0, 2.0, RED.opaque());
        assert_eq!(canvas.pixel(20, 20), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(30, 20).map(|p| p[0] > 200), Some(true));
    }

    #[test]
    fn test_glow_is_additive_and_fades() {
        let mut canvas = Canvas::new(40, 40);
        canvas.clear(Rgb::new(100, 0, 0));
        canvas.glow(Vec2::new(20.0, 20.0), 2.0, 10.0, Rgb::new(0, 200, 0).opaque());
        let near = canvas.pixel(23, 20).unwrap();
        let far = canvas.pixel(30, 20).unwrap();
        assert_eq!(near[0], 100);
        assert!(near[1] > far[1]);
        assert_eq!(canvas.pixel(39, 39), Some([100, 0, 0, 255]));
    }

    #[test]
    fn test_draws_outside_are_clipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(Vec2::new(-50.0, -50.0), 5.0, RED.opaque());
        canvas.line(Vec2::new(-5.0, -5.0), Vec2::new(-1.0, -20.0), 3.0, RED.opaque());
        assert!(canvas.as_bytes().chunks(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut canvas = Canvas::new(2, 2);
        canvas.resize(3, 5);
        assert_eq!((canvas.width(), canvas.height()), (3, 5));
        assert_eq!(canvas.as_bytes().len(), 3 * 5 * 4);
    }
}

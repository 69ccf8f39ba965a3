//! Hex color codec and the 8-bit color types used for drawing

use std::fmt;

/// Opaque 8-bit sRGB color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same color at the given opacity (clamped to [0, 1])
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, alpha)
    }

    pub fn opaque(self) -> Rgba {
        self.with_alpha(1.0)
    }
}

/// 8-bit sRGB color with a floating point opacity, like a CSS `rgba()`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        let a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };
        Self { r, g, b, a }
    }

    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Interpolate in premultiplied space, so fading towards `TRANSPARENT`
    /// keeps the hue instead of darkening it.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let a = self.a + (other.a - self.a) * t;
        if a <= f32::EPSILON {
            return Rgba::TRANSPARENT;
        }

        let channel = |c0: u8, c1: u8| {
            let p0 = c0 as f32 * self.a;
            let p1 = c1 as f32 * other.a;
            ((p0 + (p1 - p0) * t) / a).round().clamp(0.0, 255.0) as u8
        };

        Rgba::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
            a,
        )
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        rgb.opaque()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Decode `#rrggbb`, `rrggbb`, `#rgb` or `rgb` (any case) into an [`Rgb`].
///
/// Surrounding whitespace is ignored. Anything else decodes to black, so
/// callers never have to handle a failure.
pub fn decode_hex(hex: &str) -> Rgb {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Rgb::BLACK;
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_owned(),
        _ => return Rgb::BLACK,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).unwrap_or(0);
    Rgb::new(channel(0), channel(2), channel(4))
}

//! Theme palettes

use crate::color::{decode_hex, Rgb};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PALETTE_NAME: &str = "CUSTOM";
pub const DEFAULT_PRIMARY: &str = "#06b6d4";
pub const DEFAULT_SECONDARY: &str = "#d946ef";
pub const DEFAULT_BACKGROUND: &str = "#000000";
pub const DEFAULT_ACCENT: &str = "#22d3ee";

/// A named set of four hex colors.
///
/// Fields missing from a deserialized palette fall back to the defaults
/// above, one field at a time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub name: String,
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub accent: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            DEFAULT_PALETTE_NAME,
            DEFAULT_PRIMARY,
            DEFAULT_SECONDARY,
            DEFAULT_BACKGROUND,
            DEFAULT_ACCENT,
        )
    }
}

impl Palette {
    pub fn new(
        name: impl Into<String>,
        primary: impl Into<String>,
        secondary: impl Into<String>,
        background: impl Into<String>,
        accent: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            primary: primary.into(),
            secondary: secondary.into(),
            background: background.into(),
            accent: accent.into(),
        }
    }

    /// Decode all four colors at once
    pub fn colors(&self) -> PaletteColors {
        PaletteColors {
            primary: decode_hex(&self.primary),
            secondary: decode_hex(&self.secondary),
            background: decode_hex(&self.background),
            accent: decode_hex(&self.accent),
        }
    }
}

/// Decoded form of a [`Palette`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteColors {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub background: Rgb,
    pub accent: Rgb,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let palette: Palette =
            serde_json::from_str(r##"{ "name": "HALF", "primary": "#ff0000" }"##).unwrap();
        assert_eq!(palette.name, "HALF");
        assert_eq!(palette.primary, "#ff0000");
        assert_eq!(palette.secondary, DEFAULT_SECONDARY);
        assert_eq!(palette.background, DEFAULT_BACKGROUND);
        assert_eq!(palette.accent, DEFAULT_ACCENT);
    }

    #[test]
    fn test_colors_decode_malformed_to_black() {
        let palette = Palette::new("BROKEN", "#nothex", "#fff", "", "#123456");
        let colors = palette.colors();
        assert_eq!(colors.primary, Rgb::BLACK);
        assert_eq!(colors.secondary, Rgb::WHITE);
        assert_eq!(colors.background, Rgb::BLACK);
        assert_eq!(colors.accent, Rgb::new(0x12, 0x34, 0x56));
    }
}

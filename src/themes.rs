//! Built-in color themes

use flux_physics::Palette;

/// The stock theme list, in cycling order
pub fn builtin() -> Vec<Palette> {
    vec![
        Palette::new("CYBER_PUNK", "#06b6d4", "#d946ef", "#000000", "#22d3ee"),
        Palette::new("THE_MATRIX", "#22c55e", "#15803d", "#020617", "#4ade80"),
        Palette::new("DEEP_SPACE", "#818cf8", "#6366f1", "#0f172a", "#a5b4fc"),
        Palette::new("GOLDEN_HOUR", "#f59e0b", "#ef4444", "#1c1917", "#fbbf24"),
        Palette::new("CRIMSON_TIDE", "#f43f5e", "#9f1239", "#0f0505", "#fb7185"),
        mocha(),
    ]
}

/// Catppuccin Mocha: mauve particles, blue links on crust
pub fn mocha() -> Palette {
    let colors = &catppuccin::PALETTE.mocha.colors;
    Palette::new(
        "MOCHA",
        hex(&colors.mauve),
        hex(&colors.blue),
        hex(&colors.crust),
        hex(&colors.lavender),
    )
}

/// Index of the theme called `name`, ignoring case
pub fn position(themes: &[Palette], name: &str) -> Option<usize> {
    themes
        .iter()
        .position(|theme| theme.name.eq_ignore_ascii_case(name.trim()))
}

fn hex(color: &catppuccin::Color) -> String {
    let rgb = color.rgb;
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

use crate::status::Tone;
use ratatui::style::Color;

// Catppuccin Mocha color palette
pub struct CatppuccinTheme;

impl CatppuccinTheme {
    // Base colors
    pub const MANTLE: Color = Color::Rgb(24, 24, 37);     // #181825
    pub const CRUST: Color = Color::Rgb(17, 17, 27);      // #11111b

    // Surface colors
    pub const SURFACE1: Color = Color::Rgb(69, 71, 90);   // #45475a

    // Text colors
    pub const TEXT: Color = Color::Rgb(205, 214, 244);    // #cdd6f4
    pub const SUBTEXT1: Color = Color::Rgb(186, 194, 222); // #bac2de
    pub const SUBTEXT0: Color = Color::Rgb(166, 173, 200); // #a6adc8
    pub const OVERLAY0: Color = Color::Rgb(108, 112, 134); // #6c7086

    // Accent colors
    pub const PINK: Color = Color::Rgb(245, 194, 231);      // #f5c2e7
    pub const MAUVE: Color = Color::Rgb(203, 166, 247);     // #cba6f7
    pub const RED: Color = Color::Rgb(243, 139, 168);       // #f38ba8
    pub const PEACH: Color = Color::Rgb(250, 179, 135);     // #fab387
    pub const YELLOW: Color = Color::Rgb(249, 226, 175);    // #f9e2af
    pub const GREEN: Color = Color::Rgb(166, 227, 161);     // #a6e3a1
    pub const TEAL: Color = Color::Rgb(148, 226, 213);      // #94e2d5
    pub const SKY: Color = Color::Rgb(137, 220, 235);       // #89dceb
    pub const BLUE: Color = Color::Rgb(137, 180, 250);      // #89b4fa
    pub const LAVENDER: Color = Color::Rgb(180, 190, 254);  // #b4befe

    // Status colors
    pub fn status_ok() -> Color { Self::GREEN }
    pub fn status_warning() -> Color { Self::YELLOW }
    pub fn status_critical() -> Color { Self::RED }

    pub fn tone_color(tone: Tone) -> Color {
        match tone {
            Tone::Alert => Self::status_critical(),
            Tone::Positive => Self::status_ok(),
            Tone::Warning => Self::status_warning(),
            Tone::Neutral => Self::OVERLAY0,
        }
    }

    pub fn cpu_color(usage: f64) -> Color {
        if usage > 80.0 { Self::RED }
        else if usage > 60.0 { Self::PEACH }
        else { Self::GREEN }
    }

    pub fn memory_color(usage: f64) -> Color {
        if usage > 90.0 { Self::RED }
        else if usage > 75.0 { Self::YELLOW }
        else { Self::TEAL }
    }

    // Chart series
    pub const CURRENT_SERIES: Color = Self::BLUE;
    pub const PREDICTED_SERIES: Color = Self::GREEN;
}

pub fn is_light(theme: &str) -> bool {
    theme.eq_ignore_ascii_case("light")
}

pub fn background(theme: &str) -> Color {
    if is_light(theme) { Color::Reset } else { CatppuccinTheme::MANTLE }
}

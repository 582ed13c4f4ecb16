//! System light/dark preference and the text color it implies.

use crate::color::Color;

/// The OS app/system color mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Maps the `SystemUsesLightTheme` registry value to a theme.
    /// Anything other than `1` (including a missing value) is dark.
    pub fn from_light_flag(value: u32) -> Self {
        if value == 1 { Self::Light } else { Self::Dark }
    }

    /// Clock text color: black on light taskbars, white on dark ones.
    pub fn text_color(self) -> Color {
        match self {
            Self::Light => Color::BLACK,
            Self::Dark => Color::WHITE,
        }
    }
}

//! Optional appearance and logging configuration.
//!
//! The tray-menu settings live in the fixed binary record (see
//! [`crate::settings`]); this file only carries values a user would
//! tweak by hand.

mod loader;

use serde::{Deserialize, Serialize};

pub use crate::log::LogConfig;
pub use loader::{config_dir, config_path, load, try_load};

/// Top-level configuration for CornerClock.
///
/// Loaded from `~/.config/cornerclock/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Clock widget appearance and timing.
    pub clock: ClockConfig,
    /// File logging settings.
    pub logging: LogConfig,
}

/// Clock widget appearance, in device-independent pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Widget width at 100% scale.
    pub width: f32,
    /// Widget height at 100% scale.
    pub height: f32,
    /// Padding on the anchored edge.
    pub padding: f32,
    /// Font face name.
    pub font: String,
    /// Text cell height.
    pub font_size: f32,
    /// Interval between reconciliation ticks in milliseconds.
    pub tick_ms: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            width: 205.0,
            height: 48.0,
            padding: 15.0,
            font: "Segoe UI".into(),
            font_size: 14.0,
            tick_ms: 1000,
        }
    }
}

impl Config {
    /// Clamps values to safe ranges.
    ///
    /// Prevents zero-sized widgets, text that cannot fit, and tick
    /// intervals that would either spin or make the clock visibly lag.
    pub fn validate(&mut self) {
        let defaults = ClockConfig::default();
        let clock = &mut self.clock;
        // TOML accepts `nan` and `inf`; clamp panics on NaN bounds.
        for (value, default) in [
            (&mut clock.width, defaults.width),
            (&mut clock.height, defaults.height),
            (&mut clock.padding, defaults.padding),
            (&mut clock.font_size, defaults.font_size),
        ] {
            if !value.is_finite() {
                *value = default;
            }
        }
        clock.width = clock.width.clamp(40.0, 1000.0);
        clock.height = clock.height.clamp(16.0, 400.0);
        clock.padding = clock.padding.clamp(0.0, clock.width / 2.0);
        clock.font_size = clock.font_size.clamp(6.0, clock.height / 2.0);
        clock.tick_ms = clock.tick_ms.clamp(100, 1000);
        if clock.font.trim().is_empty() {
            clock.font = defaults.font;
        }
    }
}

#[cfg(test)]
mod tests;

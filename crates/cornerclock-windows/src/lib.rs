//! Win32 implementation of the CornerClock platform traits.
//!
//! Everything here runs on the single UI thread that owns the message
//! pump started by [`app::run`].
#![cfg(windows)]

/// Startup, the notification window and the message pump.
pub mod app;

/// Per-monitor DPI awareness.
pub mod dpi;

/// Fullscreen window detection.
pub mod fullscreen;

/// Single-instance named mutex.
pub mod instance;

/// Locale patterns and date/time formatting.
pub mod locale;

/// Popup menu built from the core menu model.
pub mod menu;

/// Monitor enumeration.
pub mod monitor;

/// The `Platform` implementation handed to the reconciler.
pub mod platform;

/// Shell actions (region settings).
pub mod shell;

/// Layered per-monitor clock windows.
pub mod surface;

/// Light/dark preference from the registry.
pub mod theme;

/// Notification-area icon.
pub mod tray;

mod wide;

pub use app::run;
pub use platform::WinPlatform;

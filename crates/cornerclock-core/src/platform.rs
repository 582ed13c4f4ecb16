//! Seams between the reconciliation loop and the operating system.
//!
//! Each platform crate (e.g. `cornerclock-windows`) implements these
//! traits; tests implement them with in-memory fakes.

use crate::color::Color;
use crate::{DateTimeFormat, LocalTime, MonitorInfo, RenderedDateTime, SurfaceLayout, Theme};

/// A boxed error type for fallible platform operations.
pub type ClockResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Monitor enumeration and per-monitor facts.
pub trait DisplayTopology {
    /// Returns the active monitors in OS enumeration order.
    ///
    /// The order only needs to be stable within one reconciliation pass.
    fn enumerate_monitors(&mut self) -> Vec<MonitorInfo>;

    /// Returns whether some top-level window exactly covers the monitor.
    ///
    /// Implementations re-scan all top-level windows on every call.
    fn has_fullscreen_window(&mut self, monitor: &MonitorInfo) -> bool;
}

/// Locale-aware date/time formatting.
pub trait FormatService {
    /// Resolves the user's locale and its four patterns.
    fn refresh(&mut self) -> DateTimeFormat;

    /// Applies each pattern of `format` to `at`.
    fn render(&mut self, format: &DateTimeFormat, at: &LocalTime) -> RenderedDateTime;

    /// Current local wall-clock time.
    fn now(&mut self) -> LocalTime;
}

/// Miscellaneous OS queries and actions.
pub trait SystemServices {
    /// Reads the current light/dark preference.
    fn read_theme(&mut self) -> Theme;

    /// Opens the OS regional settings. Fire-and-forget.
    fn open_region_settings(&mut self);
}

/// Outcome of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Presented,
    /// The rendering resources are unusable and the surface must be
    /// rebuilt. The surface does not attempt to recover on its own.
    Lost,
}

/// What a surface draws on one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFrame<'a> {
    /// Two-line text, time above date.
    pub text: &'a str,
    pub color: Color,
}

/// One per-monitor clock widget.
pub trait Surface {
    /// Moves and realigns the widget in place.
    fn apply_layout(&mut self, layout: &SurfaceLayout);

    fn set_visible(&mut self, visible: bool);

    /// Draws `frame` and presents it.
    fn render(&mut self, frame: &ClockFrame<'_>) -> RenderStatus;

    /// Releases every resource held by the surface. Calling it again is
    /// a no-op.
    fn destroy(&mut self);
}

/// Creates clock surfaces.
pub trait SurfaceFactory {
    type Surface: Surface;

    fn create_surface(
        &mut self,
        monitor: &MonitorInfo,
        layout: &SurfaceLayout,
        visible: bool,
    ) -> ClockResult<Self::Surface>;
}

/// Everything the reconciliation loop needs from the OS.
pub trait Platform: DisplayTopology + FormatService + SystemServices + SurfaceFactory {}

impl<T> Platform for T where T: DisplayTopology + FormatService + SystemServices + SurfaceFactory {}

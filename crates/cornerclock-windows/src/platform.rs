use cornerclock_core::config::ClockConfig;
use cornerclock_core::{
    ClockResult, DateTimeFormat, DisplayTopology, FormatService, LocalTime, MonitorInfo,
    RenderedDateTime, SurfaceFactory, SurfaceLayout, SystemServices, Theme,
};

use crate::surface::ClockWindow;
use crate::{fullscreen, locale, monitor, shell, theme};

/// The Win32 side of the reconciler: every OS query and the factory for
/// clock windows.
pub struct WinPlatform {
    font: String,
}

impl WinPlatform {
    pub fn new(appearance: &ClockConfig) -> Self {
        Self {
            font: appearance.font.clone(),
        }
    }
}

impl DisplayTopology for WinPlatform {
    fn enumerate_monitors(&mut self) -> Vec<MonitorInfo> {
        monitor::enumerate_monitors()
    }

    fn has_fullscreen_window(&mut self, monitor: &MonitorInfo) -> bool {
        fullscreen::has_fullscreen_window(monitor.rect)
    }
}

impl FormatService for WinPlatform {
    fn refresh(&mut self) -> DateTimeFormat {
        locale::refresh()
    }

    fn render(&mut self, format: &DateTimeFormat, at: &LocalTime) -> RenderedDateTime {
        locale::render(format, at)
    }

    fn now(&mut self) -> LocalTime {
        locale::now()
    }
}

impl SystemServices for WinPlatform {
    fn read_theme(&mut self) -> Theme {
        theme::read_theme()
    }

    fn open_region_settings(&mut self) {
        shell::open_region_settings();
    }
}

impl SurfaceFactory for WinPlatform {
    type Surface = ClockWindow;

    fn create_surface(
        &mut self,
        _monitor: &MonitorInfo,
        layout: &SurfaceLayout,
        visible: bool,
    ) -> ClockResult<ClockWindow> {
        ClockWindow::create(layout, &self.font, visible)
    }
}

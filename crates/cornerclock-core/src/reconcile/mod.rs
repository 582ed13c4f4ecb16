//! The reconciliation loop: owns one clock surface per monitor and keeps
//! that set in step with settings, monitors, locale and theme.
//!
//! Nothing here reacts to OS notifications immediately. Notifications
//! only set [`PendingChanges`] flags, and [`Reconciler::tick`] consumes
//! them in a fixed order once per timer period:
//!
//! 1. save settings changed by the menu,
//! 2. re-read the theme,
//! 3. refresh locale patterns,
//! 4. render the date/time strings (every tick),
//! 5. rebuild the whole surface set if the topology changed,
//! 6. show/hide and repaint every surface.
//!
//! Surfaces are rebuilt wholesale rather than diffed against the new
//! monitor list. A corner change is the only in-place update.

use std::path::PathBuf;

use crate::config::ClockConfig;
use crate::menu::{self, MenuCommand, MenuItem};
use crate::{
    ClockFrame, DateTimeFormat, MonitorInfo, PendingChanges, Platform, RenderStatus,
    RenderedDateTime, Settings, Surface, SurfaceLayout, Theme,
};

/// Asynchronous OS notifications the loop cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Light/dark preference changed.
    ThemeChanged,
    /// Locale or regional format settings changed.
    LocaleChanged,
    /// The monitor set or its geometry changed.
    DisplayChanged,
    /// A monitor's DPI changed.
    DpiChanged,
}

/// What the caller should do after a menu command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    /// Tear down and leave the message loop.
    Quit,
}

/// A monitor paired with the surface drawn on it.
struct Slot<S> {
    monitor: MonitorInfo,
    surface: S,
    visible: bool,
}

/// Owns every clock surface and all state derived from the OS.
pub struct Reconciler<P: Platform> {
    platform: P,
    settings: Settings,
    settings_path: PathBuf,
    appearance: ClockConfig,
    format: DateTimeFormat,
    rendered: RenderedDateTime,
    theme: Theme,
    flags: PendingChanges,
    slots: Vec<Slot<P::Surface>>,
}

impl<P: Platform> Reconciler<P> {
    /// Builds the initial state: locale patterns, theme, and one surface
    /// per current monitor.
    ///
    /// `settings` are the values loaded from `settings_path`; they are
    /// written back there whenever a menu command changes them and on
    /// [`shutdown`](Self::shutdown).
    pub fn start(
        platform: P,
        settings: Settings,
        settings_path: PathBuf,
        appearance: ClockConfig,
    ) -> Self {
        let mut this = Self {
            platform,
            settings,
            settings_path,
            appearance,
            format: DateTimeFormat::default(),
            rendered: RenderedDateTime::default(),
            theme: Theme::default(),
            flags: PendingChanges::default(),
            slots: Vec::new(),
        };

        this.format = this.platform.refresh();
        crate::log_info!("Locale: {}", this.format.locale);
        this.render_strings();
        this.theme = this.platform.read_theme();
        this.rebuild_surfaces();
        this
    }

    /// Records a notification for the next tick. Repeats coalesce.
    pub fn notify(&mut self, notification: Notification) {
        crate::log_debug!("Notification: {notification:?}");
        match notification {
            Notification::ThemeChanged => self.flags.color_mode_changed = true,
            Notification::LocaleChanged => self.flags.locale_changed = true,
            Notification::DisplayChanged | Notification::DpiChanged => {
                self.flags.recreate_requested = true;
            }
        }
    }

    /// Runs one reconciliation pass.
    pub fn tick(&mut self) {
        if self.flags.take_settings() {
            self.settings.save(&self.settings_path);
        }

        if self.flags.take_color_mode() {
            self.theme = self.platform.read_theme();
            crate::log_info!("Theme changed to {:?}", self.theme);
        }

        if self.flags.take_locale() {
            self.format = self.platform.refresh();
            crate::log_info!("Locale changed to {}", self.format.locale);
        }

        self.render_strings();

        if self.flags.take_recreate() {
            self.rebuild_surfaces();
        }

        self.refresh_surfaces();
    }

    /// Applies a tray menu command.
    ///
    /// Settings that actually change are flagged for saving on the next
    /// tick. A corner change moves every surface in place.
    pub fn apply_command(&mut self, command: MenuCommand) -> CommandOutcome {
        match command {
            MenuCommand::Exit => return CommandOutcome::Quit,
            MenuCommand::OpenRegionSettings => {
                self.platform.open_region_settings();
                return CommandOutcome::Continue;
            }
            _ => {}
        }

        let next = self.settings.apply(command);
        if next == self.settings {
            return CommandOutcome::Continue;
        }

        let corner_changed = next.corner != self.settings.corner;
        self.settings = next;
        self.flags.settings_changed = true;
        crate::log_info!("Settings changed: {next:?}");

        if corner_changed {
            self.reposition_surfaces();
        }
        CommandOutcome::Continue
    }

    /// Builds the tray menu for the current state.
    pub fn menu(&self) -> Vec<MenuItem> {
        menu::build(&self.settings, &self.rendered)
    }

    /// Destroys every surface and persists settings.
    pub fn shutdown(&mut self) {
        self.destroy_surfaces();
        self.settings.save(&self.settings_path);
        crate::log_info!("Reconciler shut down");
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn flags(&self) -> &PendingChanges {
        &self.flags
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn rendered(&self) -> &RenderedDateTime {
        &self.rendered
    }

    pub fn appearance(&self) -> &ClockConfig {
        &self.appearance
    }

    /// Number of live surfaces.
    pub fn surface_count(&self) -> usize {
        self.slots.len()
    }

    /// Monitors that currently have a surface, in surface order.
    pub fn monitors(&self) -> impl Iterator<Item = &MonitorInfo> {
        self.slots.iter().map(|s| &s.monitor)
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    fn render_strings(&mut self) {
        let now = self.platform.now();
        self.rendered = self.platform.render(&self.format, &now);
    }

    /// Whether the primary-display setting alone hides a monitor.
    fn hidden_as_primary(&self, monitor: &MonitorInfo) -> bool {
        monitor.is_primary() && !self.settings.show_on_primary_display
    }

    fn layout_for(&self, monitor: &MonitorInfo) -> SurfaceLayout {
        SurfaceLayout::compute(monitor, self.settings.corner, &self.appearance)
    }

    /// Destroys every surface, re-enumerates monitors, and creates one
    /// fresh surface per monitor.
    fn rebuild_surfaces(&mut self) {
        self.destroy_surfaces();

        let monitors = self.platform.enumerate_monitors();
        crate::log_info!("Creating clocks for {} monitors", monitors.len());

        for monitor in monitors {
            let layout = self.layout_for(&monitor);
            let visible = !self.hidden_as_primary(&monitor);
            match self.platform.create_surface(&monitor, &layout, visible) {
                Ok(surface) => self.slots.push(Slot {
                    monitor,
                    surface,
                    visible,
                }),
                Err(e) => {
                    crate::log_error!("Failed to create clock for monitor {}: {e}", monitor.id);
                }
            }
        }
    }

    fn destroy_surfaces(&mut self) {
        for mut slot in self.slots.drain(..) {
            slot.surface.destroy();
        }
    }

    fn reposition_surfaces(&mut self) {
        let layouts: Vec<SurfaceLayout> =
            self.slots.iter().map(|s| self.layout_for(&s.monitor)).collect();
        for (slot, layout) in self.slots.iter_mut().zip(&layouts) {
            slot.surface.apply_layout(layout);
        }
    }

    /// Recomputes visibility for every surface and repaints visible ones.
    fn refresh_surfaces(&mut self) {
        let text = self.rendered.text(&self.settings);
        let frame = ClockFrame {
            text: &text,
            color: self.theme.text_color(),
        };

        for i in 0..self.slots.len() {
            let monitor = self.slots[i].monitor;
            let hide = self.hidden_as_primary(&monitor)
                || (self.settings.hide_on_fullscreen
                    && self.platform.has_fullscreen_window(&monitor));

            let slot = &mut self.slots[i];
            if slot.visible == hide {
                slot.surface.set_visible(!hide);
                slot.visible = !hide;
            }
            if hide {
                continue;
            }

            if slot.surface.render(&frame) == RenderStatus::Lost {
                crate::log_warn!("Clock on monitor {} lost its surface", monitor.id);
                self.flags.recreate_requested = true;
            }
        }
    }
}

#[cfg(test)]
mod tests;

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use super::*;
use crate::color::Color;
use crate::{ClockResult, Corner, DisplayTopology, DpiScale, FormatService, LocalTime, Rect};
use crate::{SurfaceFactory, SystemServices};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    ThemeRead(Theme),
    LocaleRefreshed,
    Created { monitor: isize, visible: bool },
    Destroyed(isize),
    Shown(isize, bool),
    Moved(isize, Rect),
    Rendered { monitor: isize, color: Color, text: String },
    RegionOpened,
}

type Log = Rc<RefCell<Vec<Event>>>;

struct FakeSurface {
    monitor: isize,
    log: Log,
    alive: bool,
    lose_device: Rc<Cell<bool>>,
}

impl Surface for FakeSurface {
    fn apply_layout(&mut self, layout: &SurfaceLayout) {
        self.log
            .borrow_mut()
            .push(Event::Moved(self.monitor, layout.rect));
    }

    fn set_visible(&mut self, visible: bool) {
        self.log
            .borrow_mut()
            .push(Event::Shown(self.monitor, visible));
    }

    fn render(&mut self, frame: &ClockFrame<'_>) -> RenderStatus {
        if self.lose_device.get() {
            return RenderStatus::Lost;
        }
        self.log.borrow_mut().push(Event::Rendered {
            monitor: self.monitor,
            color: frame.color,
            text: frame.text.to_string(),
        });
        RenderStatus::Presented
    }

    fn destroy(&mut self) {
        if std::mem::take(&mut self.alive) {
            self.log.borrow_mut().push(Event::Destroyed(self.monitor));
        }
    }
}

struct FakePlatform {
    log: Log,
    monitors: Vec<MonitorInfo>,
    fullscreen: HashSet<isize>,
    fullscreen_checks: usize,
    theme: Theme,
    locale: String,
    failing_monitors: HashSet<isize>,
    lose_device: Rc<Cell<bool>>,
    second: u16,
}

impl FakePlatform {
    fn new(monitors: Vec<MonitorInfo>) -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            monitors,
            fullscreen: HashSet::new(),
            fullscreen_checks: 0,
            theme: Theme::Dark,
            locale: "en-FI".into(),
            failing_monitors: HashSet::new(),
            lose_device: Rc::new(Cell::new(false)),
            second: 0,
        }
    }
}

impl DisplayTopology for FakePlatform {
    fn enumerate_monitors(&mut self) -> Vec<MonitorInfo> {
        self.monitors.clone()
    }

    fn has_fullscreen_window(&mut self, monitor: &MonitorInfo) -> bool {
        self.fullscreen_checks += 1;
        self.fullscreen.contains(&monitor.id)
    }
}

impl FormatService for FakePlatform {
    fn refresh(&mut self) -> DateTimeFormat {
        self.log.borrow_mut().push(Event::LocaleRefreshed);
        DateTimeFormat {
            locale: self.locale.clone(),
            short_date: "d".into(),
            long_date: "dddd".into(),
            short_time: "H".into(),
            long_time: "H:ss".into(),
        }
    }

    fn render(&mut self, format: &DateTimeFormat, at: &LocalTime) -> RenderedDateTime {
        RenderedDateTime {
            short_date: format!("{}/{}", format.locale, format.short_date),
            long_date: format!("{}/{}", format.locale, format.long_date),
            short_time: format!("{}@{}", format.short_time, at.second),
            long_time: format!("{}@{}", format.long_time, at.second),
        }
    }

    fn now(&mut self) -> LocalTime {
        self.second += 1;
        LocalTime {
            second: self.second,
            ..Default::default()
        }
    }
}

impl SystemServices for FakePlatform {
    fn read_theme(&mut self) -> Theme {
        self.log.borrow_mut().push(Event::ThemeRead(self.theme));
        self.theme
    }

    fn open_region_settings(&mut self) {
        self.log.borrow_mut().push(Event::RegionOpened);
    }
}

impl SurfaceFactory for FakePlatform {
    type Surface = FakeSurface;

    fn create_surface(
        &mut self,
        monitor: &MonitorInfo,
        _layout: &SurfaceLayout,
        visible: bool,
    ) -> ClockResult<FakeSurface> {
        if self.failing_monitors.contains(&monitor.id) {
            return Err("window creation failed".into());
        }
        self.log.borrow_mut().push(Event::Created {
            monitor: monitor.id,
            visible,
        });
        Ok(FakeSurface {
            monitor: monitor.id,
            log: self.log.clone(),
            alive: true,
            lose_device: self.lose_device.clone(),
        })
    }
}

fn monitor(id: isize, x: i32) -> MonitorInfo {
    MonitorInfo::new(id, Rect::new(x, 0, 1920, 1080), DpiScale::UNIT)
}

/// Primary monitor `1` at the origin, secondary `2` to its right.
fn two_monitors() -> Vec<MonitorInfo> {
    vec![monitor(1, 0), monitor(2, 1920)]
}

struct Harness {
    reconciler: Reconciler<FakePlatform>,
    log: Log,
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl Harness {
    fn new(platform: FakePlatform, settings: Settings) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.dat");
        let log = platform.log.clone();
        let config = ClockConfig::default();
        let reconciler = Reconciler::start(platform, settings, path.clone(), config);
        Self {
            reconciler,
            log,
            _dir: dir,
            path,
        }
    }

    fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn rendered_monitors(&self) -> Vec<isize> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                Event::Rendered { monitor, .. } => Some(*monitor),
                _ => None,
            })
            .collect()
    }
}

// Lifecycle and notifications

#[test]
fn start_creates_one_surface_per_monitor() {
    // Arrange / Act
    let h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());

    // Assert
    assert_eq!(h.reconciler.surface_count(), 2);
    assert_eq!(
        h.events(),
        vec![
            Event::LocaleRefreshed,
            Event::ThemeRead(Theme::Dark),
            Event::Created {
                monitor: 1,
                visible: false
            },
            Event::Created {
                monitor: 2,
                visible: true
            },
        ]
    );
}

#[test]
fn primary_surface_is_visible_at_creation_when_shown_on_primary() {
    let settings = Settings {
        show_on_primary_display: true,
        ..Default::default()
    };

    let h = Harness::new(FakePlatform::new(two_monitors()), settings);

    assert!(h.events().contains(&Event::Created {
        monitor: 1,
        visible: true
    }));
}

#[test]
fn tick_repaints_only_visible_surfaces() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.clear();

    // Act
    h.reconciler.tick();

    // Assert
    assert_eq!(h.rendered_monitors(), vec![2]);
}

#[test]
fn tick_advances_clock_text_every_time() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(vec![monitor(2, 1920)]), Settings::default());

    // Act
    h.reconciler.tick();
    h.reconciler.tick();

    // Assert
    let texts: Vec<String> = h
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::Rendered { text, .. } => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["H@2\nen-FI/d", "H@3\nen-FI/d"]);
}

#[test]
fn theme_and_recreate_are_handled_in_order_within_one_tick() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.reconciler.notify(Notification::ThemeChanged);
    h.reconciler.notify(Notification::DisplayChanged);
    {
        let platform = h.reconciler.platform_mut();
        platform.theme = Theme::Light;
        platform.monitors = vec![monitor(2, 1920), monitor(3, 3840), monitor(1, 0)];
    }
    h.clear();

    // Act
    h.reconciler.tick();

    // Assert
    let events = h.events();
    assert!(!h.reconciler.flags().color_mode_changed);
    assert!(!h.reconciler.flags().recreate_requested);
    assert_eq!(h.reconciler.surface_count(), 3);

    let theme_read = events
        .iter()
        .position(|e| *e == Event::ThemeRead(Theme::Light))
        .unwrap();
    let first_render = events
        .iter()
        .position(|e| matches!(e, Event::Rendered { .. }))
        .unwrap();
    assert!(theme_read < first_render);

    let destroyed: Vec<&Event> = events
        .iter()
        .filter(|e| matches!(e, Event::Destroyed(_)))
        .collect();
    assert_eq!(destroyed, vec![&Event::Destroyed(1), &Event::Destroyed(2)]);

    let created = events
        .iter()
        .filter(|e| matches!(e, Event::Created { .. }))
        .count();
    assert_eq!(created, 3);

    let last_destroy = events
        .iter()
        .rposition(|e| matches!(e, Event::Destroyed(_)))
        .unwrap();
    let first_create = events
        .iter()
        .position(|e| matches!(e, Event::Created { .. }))
        .unwrap();
    assert!(last_destroy < first_create);

    for event in &events {
        if let Event::Rendered { color, .. } = event {
            assert_eq!(*color, Color::BLACK);
        }
    }
}

#[test]
fn notifications_coalesce_into_one_rebuild() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.reconciler.notify(Notification::DisplayChanged);
    h.reconciler.notify(Notification::DpiChanged);
    h.reconciler.notify(Notification::DisplayChanged);
    h.clear();

    // Act
    h.reconciler.tick();
    h.reconciler.tick();

    // Assert
    let created = h
        .events()
        .iter()
        .filter(|e| matches!(e, Event::Created { .. }))
        .count();
    assert_eq!(created, 2);
}

#[test]
fn locale_change_refreshes_patterns_once_on_next_tick() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(vec![monitor(2, 1920)]), Settings::default());
    h.reconciler.notify(Notification::LocaleChanged);
    h.reconciler.notify(Notification::LocaleChanged);
    h.reconciler.platform_mut().locale = "fi-FI".into();
    h.clear();

    // Act
    h.reconciler.tick();
    h.reconciler.tick();

    // Assert
    let refreshes = h
        .events()
        .iter()
        .filter(|e| **e == Event::LocaleRefreshed)
        .count();
    assert_eq!(refreshes, 1);
    assert_eq!(h.reconciler.rendered().short_date, "fi-FI/d");
    assert!(!h.reconciler.flags().locale_changed);
}

#[test]
fn notification_alone_changes_nothing_until_tick() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.clear();

    // Act
    h.reconciler.notify(Notification::ThemeChanged);
    h.reconciler.notify(Notification::DisplayChanged);

    // Assert
    assert!(h.events().is_empty());
    assert!(h.reconciler.flags().color_mode_changed);
    assert!(h.reconciler.flags().recreate_requested);
}

#[test]
fn lost_surface_requests_rebuild_on_next_tick() {
    // Arrange
    let platform = FakePlatform::new(two_monitors());
    let lose = platform.lose_device.clone();
    let mut h = Harness::new(platform, Settings::default());

    // Act
    lose.set(true);
    h.reconciler.tick();

    // Assert
    assert!(h.reconciler.flags().recreate_requested);
    assert_eq!(h.reconciler.surface_count(), 2);

    // Act: device comes back, next tick rebuilds
    lose.set(false);
    h.clear();
    h.reconciler.tick();

    // Assert
    assert!(!h.reconciler.flags().recreate_requested);
    assert!(h.events().contains(&Event::Destroyed(2)));
    assert!(h.events().contains(&Event::Created {
        monitor: 2,
        visible: true
    }));
    assert_eq!(h.rendered_monitors(), vec![2]);
}

#[test]
fn failed_surface_creation_skips_that_monitor() {
    // Arrange
    let mut platform = FakePlatform::new(two_monitors());
    platform.failing_monitors.insert(2);

    // Act
    let h = Harness::new(platform, Settings::default());

    // Assert
    assert_eq!(h.reconciler.surface_count(), 1);
    assert_eq!(h.reconciler.monitors().next().map(|m| m.id), Some(1));
}

#[test]
fn monitors_removed_leave_no_surfaces_behind() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.reconciler.platform_mut().monitors = vec![monitor(1, 0)];
    h.reconciler.notify(Notification::DisplayChanged);

    // Act
    h.reconciler.tick();

    // Assert
    assert_eq!(h.reconciler.surface_count(), 1);
    let destroyed = h
        .events()
        .iter()
        .filter(|e| matches!(e, Event::Destroyed(_)))
        .count();
    assert_eq!(destroyed, 2);
}

#[test]
fn shutdown_destroys_every_surface_once_and_saves() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.clear();

    // Act
    h.reconciler.shutdown();
    h.reconciler.shutdown();

    // Assert
    assert_eq!(
        h.events(),
        vec![Event::Destroyed(1), Event::Destroyed(2)]
    );
    assert_eq!(h.reconciler.surface_count(), 0);
    assert_eq!(Settings::load(&h.path), Settings::default());
    assert!(h.path.exists());
}

#[test]
fn destroy_twice_is_a_no_op() {
    // Arrange
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut surface = FakeSurface {
        monitor: 9,
        log: log.clone(),
        alive: true,
        lose_device: Rc::new(Cell::new(false)),
    };

    // Act
    surface.destroy();
    surface.destroy();

    // Assert
    assert_eq!(*log.borrow(), vec![Event::Destroyed(9)]);
}

// Menu commands

#[test]
fn corner_change_moves_surfaces_without_recreating() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.clear();

    // Act
    let outcome = h.reconciler.apply_command(MenuCommand::SetCorner(Corner::TopLeft));

    // Assert
    assert_eq!(outcome, CommandOutcome::Continue);
    assert_eq!(h.reconciler.settings().corner, Corner::TopLeft);
    assert!(h.reconciler.flags().settings_changed);
    assert!(!h.reconciler.flags().recreate_requested);
    assert_eq!(
        h.events(),
        vec![
            Event::Moved(1, Rect::new(0, 0, 205, 48)),
            Event::Moved(2, Rect::new(1920, 0, 205, 48)),
        ]
    );
}

#[test]
fn changed_settings_are_saved_on_next_tick() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.reconciler.apply_command(MenuCommand::SetCorner(Corner::TopRight));
    assert!(!h.path.exists());

    // Act
    h.reconciler.tick();

    // Assert
    assert!(!h.reconciler.flags().settings_changed);
    assert_eq!(Settings::load(&h.path).corner, Corner::TopRight);
    let created = h
        .events()
        .iter()
        .filter(|e| matches!(e, Event::Created { .. }))
        .count();
    assert_eq!(created, 2);
}

#[test]
fn command_that_changes_nothing_is_not_flagged() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.clear();

    // Act
    h.reconciler.apply_command(MenuCommand::SetCorner(Corner::BottomRight));
    h.reconciler.apply_command(MenuCommand::SetLongDate(false));

    // Assert
    assert!(!h.reconciler.flags().settings_changed);
    assert!(h.events().is_empty());
}

#[test]
fn long_formats_change_the_painted_text() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(vec![monitor(2, 1920)]), Settings::default());
    h.reconciler.apply_command(MenuCommand::SetLongDate(true));
    h.reconciler.apply_command(MenuCommand::SetLongTime(true));
    h.clear();

    // Act
    h.reconciler.tick();

    // Assert
    assert_eq!(
        h.events().last(),
        Some(&Event::Rendered {
            monitor: 2,
            color: Color::WHITE,
            text: "H:ss@2\nen-FI/dddd".into(),
        })
    );
}

#[test]
fn enabling_hide_on_fullscreen_hides_only_covered_monitor() {
    // Arrange
    let settings = Settings {
        hide_on_fullscreen: false,
        ..Default::default()
    };
    let mut platform =
        FakePlatform::new(vec![monitor(1, 0), monitor(2, 1920), monitor(3, 3840)]);
    platform.fullscreen.insert(2);
    let mut h = Harness::new(platform, settings);
    h.reconciler.tick();
    assert_eq!(h.rendered_monitors(), vec![2, 3]);
    h.clear();

    // Act
    h.reconciler.apply_command(MenuCommand::ToggleHideOnFullscreen);
    h.reconciler.tick();

    // Assert
    let events = h.events();
    assert!(events.contains(&Event::Shown(2, false)));
    assert!(!events.iter().any(|e| matches!(e, Event::Shown(1, _) | Event::Shown(3, _))));
    assert_eq!(h.rendered_monitors(), vec![3]);
}

#[test]
fn fullscreen_window_leaving_shows_clock_again() {
    // Arrange
    let mut platform = FakePlatform::new(two_monitors());
    platform.fullscreen.insert(2);
    let mut h = Harness::new(platform, Settings::default());
    h.reconciler.tick();
    assert!(h.events().contains(&Event::Shown(2, false)));
    h.clear();

    // Act
    h.reconciler.platform_mut().fullscreen.clear();
    h.reconciler.tick();

    // Assert
    assert_eq!(h.events().first(), Some(&Event::Shown(2, true)));
    assert_eq!(h.rendered_monitors(), vec![2]);
}

#[test]
fn fullscreen_is_not_checked_when_hiding_is_disabled() {
    // Arrange
    let settings = Settings {
        hide_on_fullscreen: false,
        show_on_primary_display: true,
        ..Default::default()
    };
    let mut h = Harness::new(FakePlatform::new(two_monitors()), settings);

    // Act
    h.reconciler.tick();

    // Assert
    assert_eq!(h.reconciler.platform().fullscreen_checks, 0);
    assert_eq!(h.rendered_monitors(), vec![1, 2]);
}

#[test]
fn showing_on_primary_reveals_primary_clock() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.clear();

    // Act
    h.reconciler.apply_command(MenuCommand::ToggleShowOnPrimary);
    h.reconciler.tick();

    // Assert
    assert!(h.events().contains(&Event::Shown(1, true)));
    assert_eq!(h.rendered_monitors(), vec![1, 2]);
}

#[test]
fn visibility_is_only_set_when_it_changes() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.clear();

    // Act
    h.reconciler.tick();
    h.reconciler.tick();

    // Assert
    assert!(!h.events().iter().any(|e| matches!(e, Event::Shown(..))));
}

#[test]
fn exit_requests_quit() {
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());

    assert_eq!(
        h.reconciler.apply_command(MenuCommand::Exit),
        CommandOutcome::Quit
    );
    assert!(!h.reconciler.flags().any());
}

#[test]
fn region_options_are_opened_through_platform() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.clear();

    // Act
    let outcome = h.reconciler.apply_command(MenuCommand::OpenRegionSettings);

    // Assert
    assert_eq!(outcome, CommandOutcome::Continue);
    assert_eq!(h.events(), vec![Event::RegionOpened]);
    assert!(!h.reconciler.flags().settings_changed);
}

#[test]
fn menu_reflects_current_settings() {
    // Arrange
    let mut h = Harness::new(FakePlatform::new(two_monitors()), Settings::default());
    h.reconciler.apply_command(MenuCommand::SetCorner(Corner::TopLeft));

    // Act
    let items = h.reconciler.menu();

    // Assert
    let Some(MenuItem::Submenu { items: corners, .. }) = items.first() else {
        panic!("first item should be the position submenu");
    };
    let checked: Vec<&MenuCommand> = corners
        .iter()
        .filter_map(|item| match item {
            MenuItem::Action {
                command,
                checked: true,
                ..
            } => Some(command),
            _ => None,
        })
        .collect();
    assert_eq!(checked, vec![&MenuCommand::SetCorner(Corner::TopLeft)]);
}

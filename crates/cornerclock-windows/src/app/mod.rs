//! Process startup and the single UI thread.
//!
//! A hidden notification window receives the tick timer, broadcast
//! setting/display changes and tray input. The reconciler it drives is
//! reachable from the window procedure through a thread-local registry.

mod pump;
mod registry;
mod sink;

use cornerclock_core::{
    ClockResult, Reconciler, Settings, config, log, log_error, log_info, log_warn,
};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{KillTimer, SetTimer};

use crate::dpi;
use crate::instance::SingleInstance;
use crate::platform::WinPlatform;
use crate::surface;
use crate::tray::TrayIcon;

const TICK_TIMER_ID: usize = 0x434C;

/// Everything owned by one running clock.
struct App {
    reconciler: Reconciler<WinPlatform>,
    tray: Option<TrayIcon>,
}

impl App {
    /// Stops the timer, removes the tray icon, destroys every clock window
    /// and saves settings.
    fn shutdown(mut self, hwnd: HWND) {
        unsafe {
            let _ = KillTimer(Some(hwnd), TICK_TIMER_ID);
        }
        if let Some(tray) = self.tray.as_mut() {
            tray.remove();
        }
        self.reconciler.shutdown();
    }
}

/// Runs the clock until the user picks Exit.
///
/// Returns `Ok(())` immediately when another instance is already running.
/// Fails only if the notification window cannot be created.
pub fn run() -> ClockResult<()> {
    let Some(_instance) = SingleInstance::acquire() else {
        return Ok(());
    };

    dpi::enable_dpi_awareness();

    let (config, warning) = config::load();
    log::init(&config.logging);
    log_info!("CornerClock {} starting", env!("CARGO_PKG_VERSION"));
    if let Some(warning) = warning {
        log_warn!("{warning}");
    }

    let hwnd = sink::create_sink_window()?;
    surface::set_notify_window(Some(hwnd));

    let settings_path = cornerclock_core::settings::settings_path();
    let settings = Settings::load(&settings_path);
    log_info!("Settings: {settings:?}");

    let mut reconciler = Reconciler::start(
        WinPlatform::new(&config.clock),
        settings,
        settings_path,
        config.clock.clone(),
    );
    reconciler.tick();

    let tray = match TrayIcon::add(hwnd) {
        Ok(tray) => Some(tray),
        Err(e) => {
            log_error!("Tray icon unavailable: {e}");
            None
        }
    };

    if unsafe { SetTimer(Some(hwnd), TICK_TIMER_ID, config.clock.tick_ms, None) } == 0 {
        log_error!("Failed to start the tick timer");
    }

    registry::insert(hwnd, App { reconciler, tray });

    pump::run_message_pump();

    // WM_QUIT from elsewhere leaves the app registered.
    if let Some(app) = registry::take(hwnd) {
        app.shutdown(hwnd);
    }
    surface::set_notify_window(None);
    log_info!("CornerClock stopped");
    Ok(())
}

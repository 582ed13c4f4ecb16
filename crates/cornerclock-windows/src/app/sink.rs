use std::sync::OnceLock;

use cornerclock_core::{ClockResult, CommandOutcome, Notification, log_info, log_warn};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, PostQuitMessage, RegisterClassW,
    RegisterWindowMessageW, WM_CONTEXTMENU, WM_DESTROY, WM_DISPLAYCHANGE, WM_DPICHANGED,
    WM_RBUTTONUP, WM_SETTINGCHANGE, WM_TIMER, WNDCLASSW, WS_EX_TOOLWINDOW,
};
use windows::core::{PCWSTR, w};

use super::{TICK_TIMER_ID, registry};
use crate::menu;
use crate::surface::DPI_CHANGED_FORWARD;
use crate::tray::TRAY_CALLBACK;

/// Broadcast after Explorer restarts; tray icons must be added again.
static TASKBAR_CREATED: OnceLock<u32> = OnceLock::new();

/// Creates the hidden window that receives the tick timer, broadcasts
/// and tray input.
///
/// Must NOT be a message-only window (`HWND_MESSAGE` parent) because those
/// do not receive broadcast messages. Instead we create a regular hidden
/// window with `WS_EX_TOOLWINDOW` to keep it out of the taskbar.
pub(super) fn create_sink_window() -> ClockResult<HWND> {
    let class_name = w!("CornerClockNotify");

    unsafe {
        TASKBAR_CREATED.get_or_init(|| RegisterWindowMessageW(w!("TaskbarCreated")));

        let wc = WNDCLASSW {
            lpfnWndProc: Some(sink_proc),
            lpszClassName: class_name,
            ..Default::default()
        };
        if RegisterClassW(&wc) == 0 {
            return Err("Failed to register CornerClockNotify class".into());
        }

        let hwnd = CreateWindowExW(
            WS_EX_TOOLWINDOW,
            class_name,
            w!("CornerClockNotify"),
            Default::default(),
            0,
            0,
            0,
            0,
            None,
            None,
            None,
            None,
        )?;
        if hwnd.is_invalid() {
            return Err("Failed to create CornerClockNotify window".into());
        }
        Ok(hwnd)
    }
}

/// WNDPROC for the notification window.
unsafe extern "system" fn sink_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_TIMER if wparam.0 == TICK_TIMER_ID => {
            registry::with_app(hwnd, |app| app.reconciler.tick());
            return LRESULT(0);
        }
        WM_SETTINGCHANGE | WM_DISPLAYCHANGE | WM_DPICHANGED | DPI_CHANGED_FORWARD => {
            // SAFETY: the system passes a wide string (or null) with WM_SETTINGCHANGE.
            let area = unsafe { setting_area(msg, lparam) };
            if let Some(notification) = classify(msg, area.as_deref()) {
                notify(hwnd, notification);
            }
            if msg == DPI_CHANGED_FORWARD {
                return LRESULT(0);
            }
        }
        TRAY_CALLBACK => {
            let event = (lparam.0 as u32) & 0xFFFF;
            if event == WM_RBUTTONUP || event == WM_CONTEXTMENU {
                show_menu(hwnd);
            }
            return LRESULT(0);
        }
        WM_DESTROY => {
            if let Some(app) = registry::take(hwnd) {
                app.shutdown(hwnd);
            }
            unsafe { PostQuitMessage(0) };
            return LRESULT(0);
        }
        _ if Some(&msg) == TASKBAR_CREATED.get() => {
            registry::with_app(hwnd, |app| {
                if let Some(tray) = app.tray.as_mut()
                    && let Err(e) = tray.restore()
                {
                    log_warn!("Failed to restore tray icon: {e}");
                }
            });
        }
        _ => {}
    }
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

/// Reads the area name that accompanies `WM_SETTINGCHANGE`.
///
/// # Safety
/// For `WM_SETTINGCHANGE`, `lparam` must be zero or point at a
/// NUL-terminated wide string, as the system guarantees.
unsafe fn setting_area(msg: u32, lparam: LPARAM) -> Option<String> {
    if msg != WM_SETTINGCHANGE || lparam.0 == 0 {
        return None;
    }
    unsafe { PCWSTR(lparam.0 as *const u16).to_string() }.ok()
}

/// Maps a broadcast (and, for `WM_SETTINGCHANGE`, its area name) to the
/// notification the reconciler cares about.
fn classify(msg: u32, area: Option<&str>) -> Option<Notification> {
    match msg {
        WM_DISPLAYCHANGE => Some(Notification::DisplayChanged),
        WM_DPICHANGED | DPI_CHANGED_FORWARD => Some(Notification::DpiChanged),
        WM_SETTINGCHANGE => match area? {
            "intl" => Some(Notification::LocaleChanged),
            "ImmersiveColorSet" => Some(Notification::ThemeChanged),
            _ => None,
        },
        _ => None,
    }
}

fn notify(hwnd: HWND, notification: Notification) {
    registry::with_app(hwnd, |app| app.reconciler.notify(notification));
}

/// Shows the tray menu and applies the picked command.
///
/// The registry is not borrowed while the popup's modal loop runs or
/// while the window is being destroyed.
fn show_menu(hwnd: HWND) {
    let Some(items) = registry::with_app(hwnd, |app| app.reconciler.menu()) else {
        return;
    };
    let Some(command) = menu::show_popup(hwnd, &items) else {
        return;
    };

    let outcome = registry::with_app(hwnd, |app| app.reconciler.apply_command(command));
    if outcome == Some(CommandOutcome::Quit) {
        log_info!("Exit requested from tray menu");
        unsafe {
            let _ = DestroyWindow(hwnd);
        }
    }
}

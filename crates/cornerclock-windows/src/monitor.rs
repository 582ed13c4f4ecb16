use std::mem;

use cornerclock_core::{DpiScale, MonitorInfo, Rect};
use windows::Win32::Foundation::{LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
};
use windows::Win32::UI::HiDpi::{GetDpiForMonitor, MDT_EFFECTIVE_DPI};
use windows::core::BOOL;

/// Returns every active monitor in OS enumeration order.
///
/// Rectangles are full monitor bounds (not work areas) so the clock sits
/// over the taskbar like the system clock does.
pub fn enumerate_monitors() -> Vec<MonitorInfo> {
    let mut monitors: Vec<MonitorInfo> = Vec::new();

    // SAFETY: EnumDisplayMonitors runs synchronously and calls our callback
    // once per monitor. The Vec outlives the call.
    unsafe {
        let _ = EnumDisplayMonitors(
            None,
            None,
            Some(enum_monitor_callback),
            LPARAM(&mut monitors as *mut _ as isize),
        );
    }

    monitors
}

unsafe extern "system" fn enum_monitor_callback(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is the Vec pointer passed by enumerate_monitors().
    let monitors = unsafe { &mut *(lparam.0 as *mut Vec<MonitorInfo>) };

    if let Some(rect) = monitor_rect(hmonitor) {
        monitors.push(MonitorInfo::new(hmonitor.0 as isize, rect, monitor_dpi(hmonitor)));
    }

    BOOL(1)
}

fn monitor_rect(hmonitor: HMONITOR) -> Option<Rect> {
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: cbSize is set as the API requires.
    let ok = unsafe { GetMonitorInfoW(hmonitor, &mut info) };
    if !ok.as_bool() {
        return None;
    }

    let rc = info.rcMonitor;
    Some(Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom))
}

/// Effective DPI of a monitor as a scale factor; 1.0 if the query fails.
fn monitor_dpi(hmonitor: HMONITOR) -> DpiScale {
    let (mut x, mut y) = (0u32, 0u32);
    // SAFETY: both out-pointers are valid for the duration of the call.
    match unsafe { GetDpiForMonitor(hmonitor, MDT_EFFECTIVE_DPI, &mut x, &mut y) } {
        Ok(()) => DpiScale::from_dpi(x, y),
        Err(_) => DpiScale::UNIT,
    }
}

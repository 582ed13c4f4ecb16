//! Detects a window covering an entire monitor.
//!
//! A window counts as fullscreen when its visible frame (DWM extended
//! frame bounds, which exclude the invisible resize borders) equals the
//! monitor rectangle exactly.

use std::mem;

use cornerclock_core::Rect;
use windows::Win32::Foundation::{HWND, LPARAM, RECT};
use windows::Win32::Graphics::Dwm::{DWMWA_EXTENDED_FRAME_BOUNDS, DwmGetWindowAttribute};
use windows::Win32::System::Threading::GetCurrentProcessId;
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowThreadProcessId, IsWindowVisible,
};
use windows::core::BOOL;

struct Search {
    target: Rect,
    own_pid: u32,
    found: bool,
}

/// Scans every top-level window and reports whether one exactly covers
/// `monitor`. Invisible windows and this process's windows are skipped.
pub fn has_fullscreen_window(monitor: Rect) -> bool {
    let mut search = Search {
        target: monitor,
        // SAFETY: trivial query of the current process id.
        own_pid: unsafe { GetCurrentProcessId() },
        found: false,
    };

    // SAFETY: EnumWindows is synchronous; `search` outlives the call. The
    // callback stops enumeration early, which EnumWindows reports as an
    // error we ignore.
    unsafe {
        let _ = EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut search as *mut _ as isize),
        );
    }

    search.found
}

unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the Search pointer from has_fullscreen_window().
    let search = unsafe { &mut *(lparam.0 as *mut Search) };

    if is_candidate(hwnd, search.own_pid) && visible_rect(hwnd) == Some(search.target) {
        search.found = true;
        return BOOL(0);
    }

    BOOL(1)
}

fn is_candidate(hwnd: HWND, own_pid: u32) -> bool {
    // SAFETY: simple queries of window state.
    unsafe {
        if !IsWindowVisible(hwnd).as_bool() {
            return false;
        }
        let mut pid = 0u32;
        GetWindowThreadProcessId(hwnd, Some(&mut pid as *mut u32));
        pid != own_pid
    }
}

/// Visible bounds from DWM. A window whose frame bounds DWM cannot report
/// is never treated as fullscreen.
fn visible_rect(hwnd: HWND) -> Option<Rect> {
    let mut frame = RECT::default();
    // SAFETY: `frame` is a RECT and the size argument matches it.
    unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_EXTENDED_FRAME_BOUNDS,
            &mut frame as *mut RECT as *mut _,
            mem::size_of::<RECT>() as u32,
        )
    }
    .ok()?;

    Some(Rect::from_edges(frame.left, frame.top, frame.right, frame.bottom))
}

//! Clock overlay windows, one per monitor.
//!
//! Each clock is a layered, topmost, click-through popup. Its pixels are
//! supplied wholesale through `UpdateLayeredWindow` on every render, so
//! the window procedure never paints.
//!
//! Clock windows are the only windows on secondary monitors, so they are
//! the ones that receive `WM_DPICHANGED` for those monitors. They forward
//! it to the notification window registered with [`set_notify_window`].

mod render;
mod text;

use std::cell::Cell;
use std::sync::Once;

use cornerclock_core::{ClockFrame, ClockResult, RenderStatus, Surface, SurfaceLayout};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, HWND_TOPMOST, PostMessageW, RegisterClassW,
    SW_HIDE, SW_SHOWNOACTIVATE, SWP_NOACTIVATE, SetWindowPos, ShowWindow, WM_APP, WM_DPICHANGED,
    WNDCLASSW, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST,
    WS_EX_TRANSPARENT, WS_POPUP,
};
use windows::core::{PCWSTR, w};

use crate::wide::wide_z;

static REGISTER_CLASS: Once = Once::new();
const CLASS_NAME: PCWSTR = w!("CornerClockSurface");

/// Posted to the notification window when a clock window sees its
/// monitor's DPI change.
pub const DPI_CHANGED_FORWARD: u32 = WM_APP + 2;

thread_local! {
    static NOTIFY_WINDOW: Cell<Option<HWND>> = const { Cell::new(None) };
}

/// Sets the window that receives [`DPI_CHANGED_FORWARD`] from clock
/// windows created on this thread.
pub fn set_notify_window(hwnd: Option<HWND>) {
    NOTIFY_WINDOW.with(|cell| cell.set(hwnd));
}

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        let wc = WNDCLASSW {
            lpfnWndProc: Some(surface_wnd_proc),
            lpszClassName: CLASS_NAME,
            ..Default::default()
        };
        unsafe {
            RegisterClassW(&wc);
        }
    });
}

unsafe extern "system" fn surface_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_DPICHANGED {
        // The whole surface set is rebuilt at the new scale; no resize here.
        if let Some(target) = NOTIFY_WINDOW.with(Cell::get) {
            unsafe {
                let _ = PostMessageW(Some(target), DPI_CHANGED_FORWARD, WPARAM(0), LPARAM(0));
            }
        }
        return LRESULT(0);
    }
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

/// A clock overlay on a single monitor.
pub struct ClockWindow {
    /// `None` once destroyed.
    hwnd: Option<HWND>,
    layout: SurfaceLayout,
    font_face: Vec<u16>,
}

impl ClockWindow {
    /// Creates the overlay at `layout.rect`. It is shown immediately when
    /// `visible` is set, otherwise left hidden.
    pub fn create(layout: &SurfaceLayout, font: &str, visible: bool) -> ClockResult<Self> {
        ensure_class_registered();

        let ex = WS_EX_LAYERED
            | WS_EX_TRANSPARENT
            | WS_EX_TOOLWINDOW
            | WS_EX_TOPMOST
            | WS_EX_NOACTIVATE;
        let r = layout.rect;
        let hwnd = unsafe {
            CreateWindowExW(
                ex,
                CLASS_NAME,
                w!("CornerClock"),
                WS_POPUP,
                r.x,
                r.y,
                r.width,
                r.height,
                None,
                None,
                None,
                None,
            )?
        };

        if visible {
            unsafe {
                let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
            }
        }

        Ok(Self {
            hwnd: Some(hwnd),
            layout: *layout,
            font_face: wide_z(font),
        })
    }
}

impl Surface for ClockWindow {
    fn apply_layout(&mut self, layout: &SurfaceLayout) {
        self.layout = *layout;
        let Some(hwnd) = self.hwnd else {
            return;
        };
        let r = layout.rect;
        unsafe {
            let _ = SetWindowPos(
                hwnd,
                Some(HWND_TOPMOST),
                r.x,
                r.y,
                r.width,
                r.height,
                SWP_NOACTIVATE,
            );
        }
    }

    fn set_visible(&mut self, visible: bool) {
        let Some(hwnd) = self.hwnd else {
            return;
        };
        let cmd = if visible { SW_SHOWNOACTIVATE } else { SW_HIDE };
        unsafe {
            let _ = ShowWindow(hwnd, cmd);
        }
    }

    fn render(&mut self, frame: &ClockFrame<'_>) -> RenderStatus {
        match self.hwnd {
            Some(hwnd) => render::render_clock(hwnd, &self.layout, &self.font_face, frame),
            None => RenderStatus::Lost,
        }
    }

    fn destroy(&mut self) {
        if let Some(hwnd) = self.hwnd.take() {
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
        }
    }
}

impl Drop for ClockWindow {
    fn drop(&mut self) {
        self.destroy();
    }
}

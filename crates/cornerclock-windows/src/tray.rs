//! Notification-area icon that opens the configuration menu.

use std::mem;

use cornerclock_core::ClockResult;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Shell::{
    NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW, Shell_NotifyIconW,
};
use windows::Win32::UI::WindowsAndMessaging::{IDI_APPLICATION, LoadIconW, WM_APP};

/// Message the shell posts to the owner window for icon mouse input.
/// `lparam` carries the mouse message (`WM_RBUTTONUP`, `WM_CONTEXTMENU`, ...).
pub const TRAY_CALLBACK: u32 = WM_APP + 1;

const TRAY_ID: u32 = 1;
const TOOLTIP: &str = "CornerClock";

/// The registered icon. Removed on drop.
pub struct TrayIcon {
    hwnd: HWND,
    added: bool,
}

impl TrayIcon {
    /// Adds the icon, routing its input to `hwnd` as [`TRAY_CALLBACK`].
    pub fn add(hwnd: HWND) -> ClockResult<Self> {
        let mut icon = Self { hwnd, added: false };
        icon.register()?;
        Ok(icon)
    }

    /// Adds the icon again after Explorer restarts.
    pub fn restore(&mut self) -> ClockResult<()> {
        self.added = false;
        self.register()
    }

    /// Removes the icon. Safe to call more than once.
    pub fn remove(&mut self) {
        if !std::mem::take(&mut self.added) {
            return;
        }
        let nid = self.base_data();
        unsafe {
            let _ = Shell_NotifyIconW(NIM_DELETE, &nid);
        }
    }

    fn register(&mut self) -> ClockResult<()> {
        let mut nid = self.base_data();
        nid.uFlags = NIF_ICON | NIF_MESSAGE | NIF_TIP;
        nid.uCallbackMessage = TRAY_CALLBACK;
        nid.hIcon = unsafe { LoadIconW(None, IDI_APPLICATION)? };
        for (dst, src) in nid.szTip.iter_mut().zip(TOOLTIP.encode_utf16()) {
            *dst = src;
        }

        if !unsafe { Shell_NotifyIconW(NIM_ADD, &nid) }.as_bool() {
            return Err("Failed to add notification icon".into());
        }
        self.added = true;
        Ok(())
    }

    fn base_data(&self) -> NOTIFYICONDATAW {
        NOTIFYICONDATAW {
            cbSize: mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: self.hwnd,
            uID: TRAY_ID,
            ..Default::default()
        }
    }
}

impl Drop for TrayIcon {
    fn drop(&mut self) {
        self.remove();
    }
}

use cornerclock_core::log_warn;
use windows::Win32::UI::Shell::ShellExecuteW;
use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
use windows::core::{PCWSTR, w};

/// Opens the Region control panel page. Does not wait for it.
pub fn open_region_settings() {
    // SAFETY: all string arguments are static wide literals.
    let instance = unsafe {
        ShellExecuteW(
            None,
            w!("open"),
            w!("control.exe"),
            w!("/name Microsoft.RegionAndLanguage"),
            PCWSTR::null(),
            SW_SHOWNORMAL,
        )
    };

    // Values of 32 or below are errors.
    if instance.0 as isize <= 32 {
        log_warn!("Failed to open region settings (code {})", instance.0 as isize);
    }
}

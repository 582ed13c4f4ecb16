//! Reads the system light/dark preference from the registry.

use std::mem;

use cornerclock_core::Theme;
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, KEY_QUERY_VALUE, RegCloseKey, RegOpenKeyExW, RegQueryValueExW,
};
use windows::core::w;

/// Returns the current theme. A missing key or value reads as dark.
pub fn read_theme() -> Theme {
    Theme::from_light_flag(read_light_flag().unwrap_or(0))
}

fn read_light_flag() -> Option<u32> {
    let mut key = HKEY::default();
    // SAFETY: standard registry open; the key is closed below.
    let status = unsafe {
        RegOpenKeyExW(
            HKEY_CURRENT_USER,
            w!(r"Software\Microsoft\Windows\CurrentVersion\Themes\Personalize"),
            None,
            KEY_QUERY_VALUE,
            &mut key,
        )
    };
    if status.is_err() {
        return None;
    }

    let mut value = 0u32;
    let mut size = mem::size_of::<u32>() as u32;
    // SAFETY: `value` is a DWORD buffer of `size` bytes.
    let status = unsafe {
        RegQueryValueExW(
            key,
            w!("SystemUsesLightTheme"),
            None,
            None,
            Some(&mut value as *mut u32 as *mut u8),
            Some(&mut size as *mut u32),
        )
    };
    // SAFETY: `key` was opened above.
    let _ = unsafe { RegCloseKey(key) };

    status.is_ok().then_some(value)
}

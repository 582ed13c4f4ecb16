//! Locale patterns and date/time formatting through the NLS API.
//!
//! Only the first registered pattern of each category is used. Patterns
//! are re-resolved when the reconciler sees a locale change.

use cornerclock_core::{DateTimeFormat, LocalTime, RenderedDateTime, log_debug};
use windows::Win32::Foundation::{
    ERROR_INSUFFICIENT_BUFFER, GetLastError, LPARAM, SYSTEMTIME, WIN32_ERROR,
};
use windows::Win32::Globalization::{
    DATE_LONGDATE, DATE_SHORTDATE, ENUM_DATE_FORMATS_FLAGS, EnumDateFormatsExEx,
    EnumTimeFormatsEx, GetDateFormatEx, GetTimeFormatEx, GetUserDefaultLocaleName,
    TIME_NOSECONDS,
};
use windows::Win32::System::SystemInformation::GetLocalTime;
use windows::core::{BOOL, PCWSTR, PWSTR};

use crate::wide::{from_wide, wide_z};

const LOCALE_NAME_MAX_LENGTH: usize = 85;
const STACK_BUFFER_LEN: usize = 128;

/// Resolves the user locale and its first pattern in each category.
pub fn refresh() -> DateTimeFormat {
    let mut name = [0u16; LOCALE_NAME_MAX_LENGTH];
    // SAFETY: the buffer length is passed through the slice.
    let len = unsafe { GetUserDefaultLocaleName(&mut name) };
    let locale = if len > 0 { from_wide(&name) } else { String::new() };
    let locale_w = wide_z(&locale);

    let format = DateTimeFormat {
        short_date: first_date_pattern(&locale_w, DATE_SHORTDATE),
        long_date: first_date_pattern(&locale_w, DATE_LONGDATE),
        short_time: first_time_pattern(&locale_w, TIME_NOSECONDS.0),
        long_time: first_time_pattern(&locale_w, 0),
        locale,
    };
    log_debug!("Date/time patterns: {format:?}");
    format
}

/// Formats `at` with each of the four patterns.
pub fn render(format: &DateTimeFormat, at: &LocalTime) -> RenderedDateTime {
    let locale = wide_z(&format.locale);
    let st = to_systemtime(at);
    RenderedDateTime {
        short_date: format_date(&locale, &format.short_date, &st),
        long_date: format_date(&locale, &format.long_date, &st),
        short_time: format_time(&locale, &format.short_time, &st),
        long_time: format_time(&locale, &format.long_time, &st),
    }
}

/// Current local wall-clock time.
pub fn now() -> LocalTime {
    // SAFETY: GetLocalTime has no preconditions.
    let st = unsafe { GetLocalTime() };
    LocalTime {
        year: st.wYear,
        month: st.wMonth,
        day_of_week: st.wDayOfWeek,
        day: st.wDay,
        hour: st.wHour,
        minute: st.wMinute,
        second: st.wSecond,
        millisecond: st.wMilliseconds,
    }
}

fn to_systemtime(at: &LocalTime) -> SYSTEMTIME {
    SYSTEMTIME {
        wYear: at.year,
        wMonth: at.month,
        wDayOfWeek: at.day_of_week,
        wDay: at.day,
        wHour: at.hour,
        wMinute: at.minute,
        wSecond: at.second,
        wMilliseconds: at.millisecond,
    }
}

fn first_date_pattern(locale: &[u16], flags: ENUM_DATE_FORMATS_FLAGS) -> String {
    let mut first: Option<String> = None;
    // SAFETY: the enumeration is synchronous and `first` outlives it.
    unsafe {
        let _ = EnumDateFormatsExEx(
            Some(date_pattern_callback),
            PCWSTR(locale.as_ptr()),
            flags,
            LPARAM(&mut first as *mut _ as isize),
        );
    }
    first.unwrap_or_default()
}

fn first_time_pattern(locale: &[u16], flags: u32) -> String {
    let mut first: Option<String> = None;
    // SAFETY: the enumeration is synchronous and `first` outlives it.
    unsafe {
        let _ = EnumTimeFormatsEx(
            Some(time_pattern_callback),
            PCWSTR(locale.as_ptr()),
            flags,
            LPARAM(&mut first as *mut _ as isize),
        );
    }
    first.unwrap_or_default()
}

unsafe extern "system" fn date_pattern_callback(
    pattern: PWSTR,
    _calendar: u32,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam points at the Option<String> owned by the caller.
    unsafe { take_first(pattern, lparam) }
}

unsafe extern "system" fn time_pattern_callback(pattern: PWSTR, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam points at the Option<String> owned by the caller.
    unsafe { take_first(pattern, lparam) }
}

/// Stores the first pattern and stops the enumeration.
unsafe fn take_first(pattern: PWSTR, lparam: LPARAM) -> BOOL {
    let slot = unsafe { &mut *(lparam.0 as *mut Option<String>) };
    *slot = unsafe { pattern.to_string() }.ok();
    BOOL(0)
}

fn format_date(locale: &[u16], pattern: &str, st: &SYSTEMTIME) -> String {
    if pattern.is_empty() {
        return String::new();
    }
    let pattern = wide_z(pattern);
    format_with(|buf| {
        // SAFETY: all pointers stay valid for the call; `buf` carries its length.
        checked(unsafe {
            GetDateFormatEx(
                PCWSTR(locale.as_ptr()),
                Default::default(),
                Some(st as *const SYSTEMTIME),
                PCWSTR(pattern.as_ptr()),
                buf,
                PCWSTR::null(),
            )
        })
    })
}

fn format_time(locale: &[u16], pattern: &str, st: &SYSTEMTIME) -> String {
    if pattern.is_empty() {
        return String::new();
    }
    let pattern = wide_z(pattern);
    format_with(|buf| {
        // SAFETY: all pointers stay valid for the call; `buf` carries its length.
        checked(unsafe {
            GetTimeFormatEx(
                PCWSTR(locale.as_ptr()),
                Default::default(),
                Some(st as *const SYSTEMTIME),
                PCWSTR(pattern.as_ptr()),
                buf,
            )
        })
    })
}

/// Turns an NLS return value into the written length, or the thread's
/// last error when nothing was written.
fn checked(written: i32) -> Result<usize, WIN32_ERROR> {
    if written > 0 {
        Ok(written as usize)
    } else {
        // SAFETY: read immediately after the failed call on the same thread.
        Err(unsafe { GetLastError() })
    }
}

/// Runs an NLS formatting call into a stack buffer, then retries into a
/// heap buffer of the measured size if the first attempt was too small.
///
/// `call` receives `None` to measure the required length in UTF-16 units,
/// terminator included.
fn format_with(mut call: impl FnMut(Option<&mut [u16]>) -> Result<usize, WIN32_ERROR>) -> String {
    let mut stack = [0u16; STACK_BUFFER_LEN];
    match call(Some(&mut stack)) {
        Ok(_) => return from_wide(&stack),
        Err(e) if e != ERROR_INSUFFICIENT_BUFFER => return String::new(),
        Err(_) => {}
    }

    let Ok(needed) = call(None) else {
        return String::new();
    };
    let mut heap = vec![0u16; needed];
    match call(Some(&mut heap)) {
        Ok(_) => from_wide(&heap),
        Err(_) => String::new(),
    }
}

//! Locale date/time patterns and the strings rendered from them.

use crate::Settings;

/// The user's locale and its first registered pattern per category.
///
/// A category with no registered pattern holds an empty string, which
/// formats to an empty field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateTimeFormat {
    pub locale: String,
    pub short_date: String,
    pub long_date: String,
    /// Time without seconds.
    pub short_time: String,
    /// Time with seconds.
    pub long_time: String,
}

/// A local wall-clock instant, field-compatible with Win32 `SYSTEMTIME`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalTime {
    pub year: u16,
    pub month: u16,
    /// 0 = Sunday.
    pub day_of_week: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
    pub millisecond: u16,
}

/// The four strings produced from one instant and one [`DateTimeFormat`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDateTime {
    pub short_date: String,
    pub long_date: String,
    pub short_time: String,
    pub long_time: String,
}

impl RenderedDateTime {
    /// Date string selected by the settings.
    pub fn date(&self, settings: &Settings) -> &str {
        if settings.long_date {
            &self.long_date
        } else {
            &self.short_date
        }
    }

    /// Time string selected by the settings.
    pub fn time(&self, settings: &Settings) -> &str {
        if settings.long_time {
            &self.long_time
        } else {
            &self.short_time
        }
    }

    /// The two-line widget text: time on top, date below.
    pub fn text(&self, settings: &Settings) -> String {
        format!("{}\n{}", self.time(settings), self.date(settings))
    }
}

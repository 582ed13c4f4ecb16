//! Deferred-work flags set by notifications and consumed by the tick.

/// Independent change flags.
///
/// Notification handlers only OR flags in, so repeated notifications
/// between two ticks coalesce. The tick reads and clears each flag with
/// the matching `take_*` method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingChanges {
    pub recreate_requested: bool,
    pub color_mode_changed: bool,
    pub locale_changed: bool,
    pub settings_changed: bool,
}

impl PendingChanges {
    /// Whether any flag is set.
    pub fn any(&self) -> bool {
        self.recreate_requested
            || self.color_mode_changed
            || self.locale_changed
            || self.settings_changed
    }

    pub fn take_recreate(&mut self) -> bool {
        std::mem::take(&mut self.recreate_requested)
    }

    pub fn take_color_mode(&mut self) -> bool {
        std::mem::take(&mut self.color_mode_changed)
    }

    pub fn take_locale(&mut self) -> bool {
        std::mem::take(&mut self.locale_changed)
    }

    pub fn take_settings(&mut self) -> bool {
        std::mem::take(&mut self.settings_changed)
    }
}

//! The persisted user settings record.
//!
//! Stored as a fixed 5-byte file with no header, version or checksum:
//!
//! | offset | field                     |
//! |--------|---------------------------|
//! | 0      | corner (0..=3)            |
//! | 1      | show on primary display   |
//! | 2      | long date                 |
//! | 3      | long time                 |
//! | 4      | hide on fullscreen        |
//!
//! A file of any other length is treated as missing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Corner, MenuCommand};

/// Size of the on-disk record in bytes.
pub const RECORD_LEN: usize = 5;

const DIR_NAME: &str = "CornerClock";
const FILE_NAME: &str = "settings.dat";

/// User-facing settings changed from the tray menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub corner: Corner,
    /// Draw a clock on the primary monitor too.
    pub show_on_primary_display: bool,
    pub long_date: bool,
    pub long_time: bool,
    /// Hide a monitor's clock while a fullscreen window covers it.
    pub hide_on_fullscreen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            corner: Corner::BottomRight,
            show_on_primary_display: false,
            long_date: false,
            long_time: false,
            hide_on_fullscreen: true,
        }
    }
}

impl Settings {
    /// Encodes the record.
    pub fn to_bytes(self) -> [u8; RECORD_LEN] {
        [
            self.corner.to_byte(),
            u8::from(self.show_on_primary_display),
            u8::from(self.long_date),
            u8::from(self.long_time),
            u8::from(self.hide_on_fullscreen),
        ]
    }

    /// Decodes a record. Every byte pattern is accepted.
    pub fn from_bytes(bytes: [u8; RECORD_LEN]) -> Self {
        Self {
            corner: Corner::from_byte(bytes[0]),
            show_on_primary_display: bytes[1] != 0,
            long_date: bytes[2] != 0,
            long_time: bytes[3] != 0,
            hide_on_fullscreen: bytes[4] != 0,
        }
    }

    /// Loads settings from `path`, falling back to defaults when the file
    /// is missing, unreadable, or not exactly [`RECORD_LEN`] bytes long.
    pub fn load(path: &Path) -> Self {
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(_) => return Self::default(),
        };
        match <[u8; RECORD_LEN]>::try_from(bytes.as_slice()) {
            Ok(record) => Self::from_bytes(record),
            Err(_) => {
                crate::log_warn!(
                    "{} has {} bytes, expected {RECORD_LEN}; using defaults",
                    path.display(),
                    bytes.len()
                );
                Self::default()
            }
        }
    }

    /// Writes the record to `path`, creating the parent directory.
    ///
    /// Returns `false` on failure. Callers ignore failures; a missing file
    /// just means defaults next time.
    pub fn save(&self, path: &Path) -> bool {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match fs::write(path, self.to_bytes()) {
            Ok(()) => true,
            Err(e) => {
                crate::log_warn!("Failed to save {}: {e}", path.display());
                false
            }
        }
    }

    /// Returns the settings that result from a menu command.
    ///
    /// Commands that do not touch settings return `self` unchanged.
    pub fn apply(self, command: MenuCommand) -> Self {
        let mut next = self;
        match command {
            MenuCommand::SetCorner(corner) => next.corner = corner,
            MenuCommand::SetLongDate(long) => next.long_date = long,
            MenuCommand::SetLongTime(long) => next.long_time = long,
            MenuCommand::ToggleShowOnPrimary => {
                next.show_on_primary_display = !next.show_on_primary_display;
            }
            MenuCommand::ToggleHideOnFullscreen => {
                next.hide_on_fullscreen = !next.hide_on_fullscreen;
            }
            MenuCommand::OpenRegionSettings | MenuCommand::Exit => {}
        }
        next
    }
}

/// Returns the settings directory: `%TEMP%\CornerClock\`.
pub fn settings_dir() -> PathBuf {
    std::env::temp_dir().join(DIR_NAME)
}

/// Returns the settings file path: `%TEMP%\CornerClock\settings.dat`.
pub fn settings_path() -> PathBuf {
    settings_dir().join(FILE_NAME)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

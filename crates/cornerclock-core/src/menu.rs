//! Tray context menu model.
//!
//! The menu is described as plain data so it can be built and tested
//! without a windowing system; the platform layer turns it into a native
//! popup and maps the chosen item id back with [`MenuCommand::from_id`].

use crate::{Corner, RenderedDateTime, Settings};

/// A command chosen from the tray menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    SetCorner(Corner),
    SetLongDate(bool),
    SetLongTime(bool),
    ToggleShowOnPrimary,
    ToggleHideOnFullscreen,
    /// Opens the OS regional settings. Does not change settings.
    OpenRegionSettings,
    Exit,
}

const ID_CORNER_BASE: u32 = 100;
const ID_SHORT_DATE: u32 = 110;
const ID_LONG_DATE: u32 = 111;
const ID_SHORT_TIME: u32 = 120;
const ID_LONG_TIME: u32 = 121;
const ID_SHOW_ON_PRIMARY: u32 = 130;
const ID_HIDE_ON_FULLSCREEN: u32 = 131;
const ID_REGION_SETTINGS: u32 = 140;
const ID_EXIT: u32 = 150;

impl MenuCommand {
    /// Native menu item id. Never zero, since `TrackPopupMenu` returns
    /// zero for a dismissed menu.
    pub fn id(self) -> u32 {
        match self {
            Self::SetCorner(corner) => ID_CORNER_BASE + u32::from(corner.to_byte()),
            Self::SetLongDate(false) => ID_SHORT_DATE,
            Self::SetLongDate(true) => ID_LONG_DATE,
            Self::SetLongTime(false) => ID_SHORT_TIME,
            Self::SetLongTime(true) => ID_LONG_TIME,
            Self::ToggleShowOnPrimary => ID_SHOW_ON_PRIMARY,
            Self::ToggleHideOnFullscreen => ID_HIDE_ON_FULLSCREEN,
            Self::OpenRegionSettings => ID_REGION_SETTINGS,
            Self::Exit => ID_EXIT,
        }
    }

    /// Maps a native menu item id back to its command.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            ID_CORNER_BASE..=103 => Some(Self::SetCorner(Corner::from_byte(
                (id - ID_CORNER_BASE) as u8,
            ))),
            ID_SHORT_DATE => Some(Self::SetLongDate(false)),
            ID_LONG_DATE => Some(Self::SetLongDate(true)),
            ID_SHORT_TIME => Some(Self::SetLongTime(false)),
            ID_LONG_TIME => Some(Self::SetLongTime(true)),
            ID_SHOW_ON_PRIMARY => Some(Self::ToggleShowOnPrimary),
            ID_HIDE_ON_FULLSCREEN => Some(Self::ToggleHideOnFullscreen),
            ID_REGION_SETTINGS => Some(Self::OpenRegionSettings),
            ID_EXIT => Some(Self::Exit),
            _ => None,
        }
    }
}

/// One entry of the tray menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    /// A selectable item. `checked` renders a check mark or radio dot.
    Action {
        label: String,
        command: MenuCommand,
        checked: bool,
    },
    Submenu {
        label: String,
        items: Vec<MenuItem>,
    },
    Separator,
}

impl MenuItem {
    fn action(label: impl Into<String>, command: MenuCommand, checked: bool) -> Self {
        Self::Action {
            label: label.into(),
            command,
            checked,
        }
    }
}

/// Builds the tray menu for the current settings.
///
/// The date and time format items are labeled with the live rendered
/// strings so the user sees what each choice looks like.
pub fn build(settings: &Settings, rendered: &RenderedDateTime) -> Vec<MenuItem> {
    let position = Corner::ALL
        .iter()
        .map(|&corner| {
            MenuItem::action(
                corner.label(),
                MenuCommand::SetCorner(corner),
                settings.corner == corner,
            )
        })
        .collect();

    let date = vec![
        MenuItem::action(
            example_label(&rendered.short_date, "Short"),
            MenuCommand::SetLongDate(false),
            !settings.long_date,
        ),
        MenuItem::action(
            example_label(&rendered.long_date, "Long"),
            MenuCommand::SetLongDate(true),
            settings.long_date,
        ),
    ];

    let time = vec![
        MenuItem::action(
            example_label(&rendered.short_time, "Short"),
            MenuCommand::SetLongTime(false),
            !settings.long_time,
        ),
        MenuItem::action(
            example_label(&rendered.long_time, "Long"),
            MenuCommand::SetLongTime(true),
            settings.long_time,
        ),
    ];

    vec![
        MenuItem::Submenu {
            label: "Position".into(),
            items: position,
        },
        MenuItem::Submenu {
            label: "Date Format".into(),
            items: date,
        },
        MenuItem::Submenu {
            label: "Time Format".into(),
            items: time,
        },
        MenuItem::action(
            "On Primary Display",
            MenuCommand::ToggleShowOnPrimary,
            settings.show_on_primary_display,
        ),
        MenuItem::action(
            "Hide on Fullscreen",
            MenuCommand::ToggleHideOnFullscreen,
            settings.hide_on_fullscreen,
        ),
        MenuItem::action("Open Region Options", MenuCommand::OpenRegionSettings, false),
        MenuItem::Separator,
        MenuItem::action("Exit", MenuCommand::Exit, false),
    ]
}

fn example_label(example: &str, fallback: &str) -> String {
    if example.is_empty() {
        fallback.to_string()
    } else {
        example.to_string()
    }
}

pub mod color;
pub mod config;
pub mod corner;
pub mod datetime;
pub mod flags;
pub mod layout;
pub mod log;
pub mod menu;
pub mod monitor;
pub mod platform;
pub mod rect;
pub mod reconcile;
pub mod settings;
pub mod theme;

pub use corner::Corner;
pub use datetime::{DateTimeFormat, LocalTime, RenderedDateTime};
pub use flags::PendingChanges;
pub use layout::{SurfaceLayout, TextAlign};
pub use menu::{MenuCommand, MenuItem};
pub use monitor::{DpiScale, MonitorInfo};
pub use platform::{
    ClockFrame, ClockResult, DisplayTopology, FormatService, Platform, RenderStatus, Surface,
    SurfaceFactory, SystemServices,
};
pub use rect::Rect;
pub use reconcile::{CommandOutcome, Notification, Reconciler};
pub use settings::Settings;
pub use theme::Theme;

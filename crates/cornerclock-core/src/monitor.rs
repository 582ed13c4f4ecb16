use crate::Rect;

/// Effective DPI of a monitor relative to 96 DPI, per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpiScale {
    pub x: f32,
    pub y: f32,
}

impl DpiScale {
    /// The 100% (96 DPI) scale.
    pub const UNIT: DpiScale = DpiScale { x: 1.0, y: 1.0 };

    /// Converts raw DPI values into a scale factor. Zero falls back to 1.0.
    pub fn from_dpi(dpi_x: u32, dpi_y: u32) -> Self {
        let scale = |dpi: u32| if dpi == 0 { 1.0 } else { dpi as f32 / 96.0 };
        Self {
            x: scale(dpi_x),
            y: scale(dpi_y),
        }
    }
}

impl Default for DpiScale {
    fn default() -> Self {
        Self::UNIT
    }
}

/// A snapshot of one active display.
///
/// The whole list is re-enumerated on every topology change; instances
/// are never patched in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorInfo {
    /// Opaque OS handle (`HMONITOR` on Windows). Only meaningful within
    /// the enumeration pass that produced it.
    pub id: isize,
    /// Full monitor rectangle in virtual-desktop coordinates.
    pub rect: Rect,
    pub dpi: DpiScale,
}

impl MonitorInfo {
    pub fn new(id: isize, rect: Rect, dpi: DpiScale) -> Self {
        Self { id, rect, dpi }
    }

    /// Whether this is the primary monitor.
    ///
    /// The primary monitor is the one whose origin is the desktop origin.
    /// https://devblogs.microsoft.com/oldnewthing/20070809-00/?p=25643
    pub fn is_primary(&self) -> bool {
        self.rect.is_at_origin()
    }
}

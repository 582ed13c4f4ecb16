//! Clock widget geometry: size, corner anchoring, padding and alignment.
//!
//! Everything here is pure arithmetic on [`MonitorInfo`] and the
//! [`ClockConfig`] appearance values, so the platform layer only has to
//! apply the resulting [`SurfaceLayout`].

use crate::config::ClockConfig;
use crate::{Corner, DpiScale, MonitorInfo, Rect};

/// Horizontal text alignment inside the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

/// Everything a surface needs to place and lay out its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceLayout {
    /// Widget rectangle in virtual-desktop pixels.
    pub rect: Rect,
    /// Text cell height in pixels.
    pub font_height: i32,
    /// Horizontal padding on the anchored edge, in pixels.
    pub padding: i32,
    pub align: TextAlign,
}

impl SurfaceLayout {
    /// Computes the layout of the clock widget for `monitor` at `corner`.
    pub fn compute(monitor: &MonitorInfo, corner: Corner, appearance: &ClockConfig) -> Self {
        let size = clock_size(monitor.dpi, appearance.width, appearance.height);
        let (x, y) = clock_position(size, monitor.rect, corner);
        Self {
            rect: Rect::new(x, y, size.0, size.1),
            font_height: scale(appearance.font_size, monitor.dpi.y),
            padding: scale(appearance.padding, monitor.dpi.x),
            align: if corner.is_left() {
                TextAlign::Left
            } else {
                TextAlign::Right
            },
        }
    }

    /// Returns the horizontal text span `(left, right)` inside the widget,
    /// in widget-local pixels. Only the anchored edge is padded.
    pub fn text_span(&self) -> (i32, i32) {
        match self.align {
            TextAlign::Left => (self.padding, self.rect.width),
            TextAlign::Right => (0, self.rect.width - self.padding),
        }
    }
}

/// Widget pixel size for a DPI scale, rounded to the nearest pixel.
pub fn clock_size(dpi: DpiScale, base_width: f32, base_height: f32) -> (i32, i32) {
    (scale(base_width, dpi.x), scale(base_height, dpi.y))
}

/// Top-left position that puts a widget of `size` flush into `corner` of
/// the monitor rectangle.
pub fn clock_position(size: (i32, i32), monitor: Rect, corner: Corner) -> (i32, i32) {
    let (w, h) = size;
    let x = if corner.is_left() {
        monitor.x
    } else {
        monitor.right() - w
    };
    let y = if corner.is_top() {
        monitor.y
    } else {
        monitor.bottom() - h
    };
    (x, y)
}

fn scale(value: f32, factor: f32) -> i32 {
    (value * factor).round() as i32
}

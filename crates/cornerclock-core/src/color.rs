//! Color values and the pixel math used to build layered-window bitmaps.
//!
//! Layered windows presented with per-pixel alpha expect premultiplied
//! BGRA pixels. GDI text output carries no alpha, so text is drawn in
//! white on a zeroed buffer and the resulting grey levels are turned into
//! coverage with [`coverage_to_premultiplied`].

/// RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 0xFF,
        g: 0xFF,
        b: 0xFF,
    };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    /// Win32 `COLORREF` layout (0x00BBGGRR).
    pub fn to_colorref(self) -> u32 {
        u32::from(self.r) | (u32::from(self.g) << 8) | (u32::from(self.b) << 16)
    }
}

/// Converts an RGB Color with a separate alpha (0–255) to a
/// premultiplied-alpha BGRA pixel value.
pub fn pixel_from_color_alpha(c: Color, alpha: u8) -> u32 {
    let a = u32::from(alpha);
    let r = u32::from(c.r) * a / 255;
    let g = u32::from(c.g) * a / 255;
    let b = u32::from(c.b) * a / 255;
    (a << 24) | (r << 16) | (g << 8) | b
}

/// Rewrites a buffer of white-on-transparent GDI output into
/// premultiplied `color` pixels whose alpha is the glyph coverage.
///
/// Untouched pixels stay fully transparent.
pub fn coverage_to_premultiplied(buf: &mut [u32], color: Color) {
    for px in buf.iter_mut() {
        let r = (*px >> 16) & 0xFF;
        let g = (*px >> 8) & 0xFF;
        let b = *px & 0xFF;
        let coverage = r.max(g).max(b) as u8;
        *px = if coverage == 0 {
            0
        } else {
            pixel_from_color_alpha(color, coverage)
        };
    }
}

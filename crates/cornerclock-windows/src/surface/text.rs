//! Two-line text placement inside a clock window.

use cornerclock_core::{SurfaceLayout, TextAlign};
use windows::Win32::Foundation::SIZE;
use windows::Win32::Graphics::Gdi::{GetTextExtentPoint32W, HDC, TextOutW};

/// Draws each line of `text`, stacked and vertically centered, aligned to
/// the anchored edge of the layout's text span.
pub(super) fn draw_lines(dc: HDC, layout: &SurfaceLayout, text: &str) {
    let lines: Vec<(Vec<u16>, SIZE)> = text
        .split('\n')
        .map(|line| {
            let wide: Vec<u16> = line.encode_utf16().collect();
            let size = measure(dc, &wide);
            (wide, size)
        })
        .collect();

    let total: i32 = lines.iter().map(|(_, size)| size.cy).sum();
    let (left, right) = layout.text_span();
    let mut y = (layout.rect.height - total) / 2;

    for (wide, size) in &lines {
        let x = match layout.align {
            TextAlign::Left => left,
            TextAlign::Right => right - size.cx,
        };
        if !wide.is_empty() {
            unsafe {
                let _ = TextOutW(dc, x, y, wide);
            }
        }
        y += size.cy;
    }
}

fn measure(dc: HDC, wide: &[u16]) -> SIZE {
    let mut size = SIZE::default();
    unsafe {
        let _ = GetTextExtentPoint32W(dc, wide, &mut size);
    }
    size
}

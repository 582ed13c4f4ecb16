//! DIB-based rendering for one clock window.
//!
//! GDI draws white text onto a zeroed 32-bit DIB; the glyph coverage is
//! then rewritten as premultiplied theme-colored pixels and presented
//! with `UpdateLayeredWindow`.

use std::mem;

use cornerclock_core::color::{Color, coverage_to_premultiplied};
use cornerclock_core::{ClockFrame, RenderStatus, SurfaceLayout};
use windows::Win32::Foundation::{COLORREF, HWND, POINT, SIZE};
use windows::Win32::Graphics::Gdi::{
    AC_SRC_ALPHA, AC_SRC_OVER, ANTIALIASED_QUALITY, BI_RGB, BITMAPINFO, BITMAPINFOHEADER,
    BLENDFUNCTION, CreateCompatibleDC, CreateDIBSection, CreateFontW, DIB_RGB_COLORS, DeleteDC,
    DeleteObject, FONT_CHARSET, FONT_CLIP_PRECISION, FONT_OUTPUT_PRECISION, GdiFlush, GetDC, HDC,
    ReleaseDC, SelectObject, SetBkMode, SetTextColor, TRANSPARENT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    HWND_TOPMOST, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SetWindowPos, ULW_ALPHA,
    UpdateLayeredWindow,
};
use windows::core::PCWSTR;

use super::text;

/// Draws `frame` into a fresh bitmap and presents it on `hwnd`.
///
/// Returns [`RenderStatus::Lost`] when the bitmap cannot be allocated or
/// the layered update fails.
pub(super) fn render_clock(
    hwnd: HWND,
    layout: &SurfaceLayout,
    font_face: &[u16],
    frame: &ClockFrame<'_>,
) -> RenderStatus {
    let (w, h) = (layout.rect.width, layout.rect.height);
    if w <= 0 || h <= 0 {
        return RenderStatus::Lost;
    }

    unsafe {
        let screen_dc = GetDC(None);
        let mem_dc = CreateCompatibleDC(Some(screen_dc));

        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: w,
                biHeight: -h,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut bits = std::ptr::null_mut();
        let Ok(bmp) = CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0)
        else {
            let _ = DeleteDC(mem_dc);
            let _ = ReleaseDC(None, screen_dc);
            return RenderStatus::Lost;
        };
        if bits.is_null() {
            let _ = DeleteObject(bmp.into());
            let _ = DeleteDC(mem_dc);
            let _ = ReleaseDC(None, screen_dc);
            return RenderStatus::Lost;
        }

        let old_bmp = SelectObject(mem_dc, bmp.into());
        let buf = std::slice::from_raw_parts_mut(bits as *mut u32, (w * h) as usize);
        buf.fill(0);

        let font = CreateFontW(
            layout.font_height,
            0,
            0,
            0,
            400,
            0,
            0,
            0,
            FONT_CHARSET(0),
            FONT_OUTPUT_PRECISION(0),
            FONT_CLIP_PRECISION(0),
            ANTIALIASED_QUALITY,
            0,
            PCWSTR(font_face.as_ptr()),
        );
        let old_font = SelectObject(mem_dc, font.into());
        let _ = SetBkMode(mem_dc, TRANSPARENT);
        let _ = SetTextColor(mem_dc, COLORREF(Color::WHITE.to_colorref()));

        text::draw_lines(mem_dc, layout, frame.text);
        let _ = GdiFlush();
        coverage_to_premultiplied(buf, frame.color);

        let presented = apply_layered(hwnd, screen_dc, mem_dc, layout);

        SelectObject(mem_dc, old_font);
        let _ = DeleteObject(font.into());
        SelectObject(mem_dc, old_bmp);
        let _ = DeleteObject(bmp.into());
        let _ = DeleteDC(mem_dc);
        let _ = ReleaseDC(None, screen_dc);

        if !presented {
            return RenderStatus::Lost;
        }

        // Other topmost windows (the taskbar) can be raised above us.
        let _ = SetWindowPos(
            hwnd,
            Some(HWND_TOPMOST),
            0,
            0,
            0,
            0,
            SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
        );
    }

    RenderStatus::Presented
}

/// Calls `UpdateLayeredWindow` to atomically present the bitmap at the
/// layout position.
unsafe fn apply_layered(hwnd: HWND, screen_dc: HDC, mem_dc: HDC, layout: &SurfaceLayout) -> bool {
    let r = layout.rect;
    let blend = BLENDFUNCTION {
        BlendOp: AC_SRC_OVER as u8,
        SourceConstantAlpha: 255,
        AlphaFormat: AC_SRC_ALPHA as u8,
        ..Default::default()
    };
    unsafe {
        UpdateLayeredWindow(
            hwnd,
            Some(screen_dc),
            Some(&POINT { x: r.x, y: r.y }),
            Some(&SIZE {
                cx: r.width,
                cy: r.height,
            }),
            Some(mem_dc),
            Some(&POINT::default()),
            COLORREF(0),
            Some(&blend),
            ULW_ALPHA,
        )
        .is_ok()
    }
}

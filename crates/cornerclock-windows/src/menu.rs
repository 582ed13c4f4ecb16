//! Win32 popup for the tray menu model.

use cornerclock_core::{MenuCommand, MenuItem};
use windows::Win32::Foundation::{HWND, LPARAM, POINT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, HMENU, MENU_ITEM_FLAGS, MF_CHECKED,
    MF_POPUP, MF_SEPARATOR, MF_STRING, PostMessageW, SetForegroundWindow, TPM_NONOTIFY,
    TPM_RETURNCMD, TPM_RIGHTBUTTON, TrackPopupMenuEx, WM_NULL,
};
use windows::core::PCWSTR;

use crate::wide::wide_z;

/// Shows `items` as a popup at the cursor and blocks until the user picks
/// an item or dismisses the menu.
///
/// Runs a modal loop that dispatches messages to `owner`, so callers must
/// not hold any state borrowed from `owner`'s window procedure.
pub fn show_popup(owner: HWND, items: &[MenuItem]) -> Option<MenuCommand> {
    let menu = unsafe { CreatePopupMenu() }.ok()?;
    append_items(menu, items);

    let mut pt = POINT::default();
    let selected = unsafe {
        let _ = GetCursorPos(&mut pt);
        // Without this the menu does not close when clicking elsewhere.
        let _ = SetForegroundWindow(owner);
        let id = TrackPopupMenuEx(
            menu,
            (TPM_RIGHTBUTTON | TPM_RETURNCMD | TPM_NONOTIFY).0,
            pt.x,
            pt.y,
            owner,
            None,
        );
        let _ = PostMessageW(Some(owner), WM_NULL, WPARAM(0), LPARAM(0));
        // Also destroys every submenu attached with MF_POPUP.
        let _ = DestroyMenu(menu);
        id.0
    };

    u32::try_from(selected).ok().and_then(MenuCommand::from_id)
}

fn append_items(menu: HMENU, items: &[MenuItem]) {
    for item in items {
        match item {
            MenuItem::Action {
                label,
                command,
                checked,
            } => {
                let flags = if *checked { MF_STRING | MF_CHECKED } else { MF_STRING };
                append(menu, flags, command.id() as usize, label);
            }
            MenuItem::Submenu { label, items } => {
                let Ok(submenu) = (unsafe { CreatePopupMenu() }) else {
                    continue;
                };
                append_items(submenu, items);
                append(menu, MF_POPUP, submenu.0 as usize, label);
            }
            MenuItem::Separator => unsafe {
                let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());
            },
        }
    }
}

fn append(menu: HMENU, flags: MENU_ITEM_FLAGS, id: usize, label: &str) {
    let wide = wide_z(label);
    unsafe {
        let _ = AppendMenuW(menu, flags, id, PCWSTR(wide.as_ptr()));
    }
}

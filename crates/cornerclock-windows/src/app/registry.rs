//! Thread-local association between a notification window and its app.
//!
//! Handlers borrow an app only for the duration of one state update and
//! must release it before any call that can re-enter the window
//! procedure (a popup menu's modal loop, `DestroyWindow`). A re-entrant
//! message that finds the app already borrowed is dropped.

use std::cell::RefCell;
use std::collections::HashMap;

use windows::Win32::Foundation::HWND;

use super::App;

#[derive(Default)]
struct Registry {
    apps: Vec<Option<App>>,
    by_hwnd: HashMap<isize, usize>,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

fn key(hwnd: HWND) -> isize {
    hwnd.0 as isize
}

/// Binds `app` to `hwnd`, reusing a free slot if one exists.
pub(super) fn insert(hwnd: HWND, app: App) {
    REGISTRY.with(|cell| {
        let mut reg = cell.borrow_mut();
        let index = match reg.apps.iter().position(Option::is_none) {
            Some(free) => {
                reg.apps[free] = Some(app);
                free
            }
            None => {
                reg.apps.push(Some(app));
                reg.apps.len() - 1
            }
        };
        reg.by_hwnd.insert(key(hwnd), index);
    });
}

/// Runs `f` on the app bound to `hwnd`.
///
/// Returns `None` when no app is bound or the registry is already
/// borrowed further up the stack.
pub(super) fn with_app<R>(hwnd: HWND, f: impl FnOnce(&mut App) -> R) -> Option<R> {
    REGISTRY.with(|cell| {
        let mut reg = cell.try_borrow_mut().ok()?;
        let index = *reg.by_hwnd.get(&key(hwnd))?;
        reg.apps.get_mut(index)?.as_mut().map(f)
    })
}

/// Unbinds and returns the app for `hwnd`.
pub(super) fn take(hwnd: HWND) -> Option<App> {
    REGISTRY.with(|cell| {
        let mut reg = cell.try_borrow_mut().ok()?;
        let index = reg.by_hwnd.remove(&key(hwnd))?;
        reg.apps.get_mut(index)?.take()
    })
}

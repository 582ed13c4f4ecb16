use windows::Win32::Foundation::{CloseHandle, ERROR_ALREADY_EXISTS, GetLastError, HANDLE};
use windows::Win32::System::Threading::CreateMutexW;
use windows::core::w;

/// Holds the per-session named mutex for as long as the clock runs.
pub struct SingleInstance {
    handle: HANDLE,
}

impl SingleInstance {
    /// Claims `Local\CornerClock.SingleInstance`.
    ///
    /// Returns `None` when another copy already holds it, or when the mutex
    /// cannot be created at all.
    pub fn acquire() -> Option<Self> {
        let name = w!("Local\\CornerClock.SingleInstance");
        // SAFETY: the name is a static NUL-terminated wide string.
        let handle = unsafe { CreateMutexW(None, false, name) }.ok()?;

        // SAFETY: read immediately after CreateMutexW on the same thread.
        if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
            // SAFETY: we own this handle and never use it again.
            let _ = unsafe { CloseHandle(handle) };
            return None;
        }

        Some(Self { handle })
    }
}

impl Drop for SingleInstance {
    fn drop(&mut self) {
        // SAFETY: the handle came from CreateMutexW and is closed once.
        let _ = unsafe { CloseHandle(self.handle) };
    }
}

use winit::window::{CursorGrabMode, Window};

/// Tracks whether the host has captured the pointer for mouse-look.
///
/// Acquiring the lock is best effort. When the host refuses, look falls back
/// to dragging with the primary button held.
pub struct PointerLock {
    locked: bool,
}

impl PointerLock {
    pub fn new() -> Self {
        PointerLock { locked: false }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn request(&mut self, window: &Window) -> bool {
        let result = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        match result {
            Ok(()) => {
                window.set_cursor_visible(false);
                log::debug!("pointer lock requested");
                // The browser confirms asynchronously; `poll` picks that up.
                self.locked = !cfg!(target_arch = "wasm32");
            }
            Err(err) => {
                log::warn!("pointer lock unavailable ({err}), drag to look around");
                self.locked = false;
            }
        }
        self.locked
    }

    pub fn release(&mut self, window: &Window) {
        let _ = window.set_cursor_grab(CursorGrabMode::None);
        window.set_cursor_visible(true);
        if self.locked {
            log::debug!("pointer lock released");
        }
        self.locked = false;
    }

    /// Reconcile with the host. Returns the new state if it changed since
    /// the last call, e.g. the browser dropped the lock on Escape.
    pub fn poll(&mut self, window: &Window) -> Option<bool> {
        let actual = host_lock_state()?;
        if actual == self.locked {
            return None;
        }
        self.locked = actual;
        if !actual {
            window.set_cursor_visible(true);
        }
        log::debug!("pointer lock {}", if actual { "acquired" } else { "lost" });
        Some(actual)
    }
}

impl Default for PointerLock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn host_lock_state() -> Option<bool> {
    let document = web_sys::window()?.document()?;
    Some(document.pointer_lock_element().is_some())
}

#[cfg(not(target_arch = "wasm32"))]
fn host_lock_state() -> Option<bool> {
    None
}

//! Resize gate shared by the event thread and the render thread
//!
//! The event thread is the only writer of window geometry. It clears
//! `is_resize_settled` before touching the platform window, which parks the
//! render thread after its current frame, then commits the resulting
//! framebuffer size under the gate's lock and sets the flag again before
//! releasing it. The render thread takes the same lock before it reads the
//! framebuffer size, so a committed change is always visible to the next frame.

use crate::geometry::IntPoint;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};

/// State guarded by the gate's lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncState {
    /// No geometry change is in flight
    pub is_resize_settled: bool,

    /// Size of the drawable surface in physical pixels
    pub framebuffer_size: IntPoint,
}

/// Mutex + condition variable pair gating frames on settled geometry
pub struct RenderSync {
    state: Mutex<SyncState>,
    settled: Condvar,
    closed: AtomicBool,
}

impl RenderSync {
    pub fn new(framebuffer_size: IntPoint) -> Self {
        Self {
            state: Mutex::new(SyncState {
                is_resize_settled: true,
                framebuffer_size,
            }),
            settled: Condvar::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Mark a geometry change as started
    ///
    /// Returns once any frame in flight has been presented. The render thread
    /// then blocks before its next frame until `commit` settles the change.
    pub fn begin_resize(&self) {
        self.state.lock().is_resize_settled = false;
    }

    /// Apply a geometry change under the lock, settle it and wake the renderer
    pub fn commit<R>(&self, apply: impl FnOnce(&mut SyncState) -> R) -> R {
        let result = {
            let mut state = self.state.lock();
            let result = apply(&mut state);
            state.is_resize_settled = true;
            result
        };
        self.settled.notify_all();
        result
    }

    /// Record a new framebuffer size reported by the platform
    pub fn set_framebuffer_size(&self, size: IntPoint) {
        self.commit(|state| state.framebuffer_size = size);
    }

    /// Block until geometry is settled
    ///
    /// Returns the locked state, or `None` once the gate has been closed. The
    /// caller keeps the lock for the duration of one frame.
    pub fn wait_settled(&self) -> Option<MutexGuard<'_, SyncState>> {
        let mut state = self.state.lock();
        while !state.is_resize_settled && !self.is_closed() {
            self.settled.wait(&mut state);
        }

        if self.is_closed() {
            None
        } else {
            Some(state)
        }
    }

    /// Close the gate and release a render thread blocked on it
    pub fn close(&self) {
        {
            let _state = self.state.lock();
            self.closed.store(true, Ordering::SeqCst);
        }
        self.settled.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> SyncState {
        *self.state.lock()
    }
}

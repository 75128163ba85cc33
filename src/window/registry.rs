//! Callback registry for window owners
//!
//! The windowing backend reports every event together with a window id. The
//! registry resolves that id to the owning callback object and dispatches the
//! translated event to the matching trait method.

use crate::geometry::{DoublePoint, IntPoint};
use crate::window::{InputEvent, WindowCallbacks};
use std::collections::HashMap;
use std::hash::Hash;

/// Map from native window id to the owner receiving its callbacks
pub struct CallbackRegistry<K> {
    owners: HashMap<K, Box<dyn WindowCallbacks>>,
}

impl<K: Eq + Hash + std::fmt::Debug> Default for CallbackRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + std::fmt::Debug> CallbackRegistry<K> {
    pub fn new() -> Self {
        Self {
            owners: HashMap::new(),
        }
    }

    /// Register `owner` for `id`, replacing any previous owner
    pub fn register(&mut self, id: K, owner: Box<dyn WindowCallbacks>) {
        if self.owners.insert(id, owner).is_some() {
            log::warn!("Replaced an existing callback owner");
        }
    }

    /// Deliver `event` to the owner of `id`
    ///
    /// Returns `false` when no owner is registered for the id.
    pub fn dispatch(&mut self, id: &K, event: InputEvent) -> bool {
        let Some(owner) = self.owners.get_mut(id) else {
            log::warn!("Event for unregistered window {:?} dropped", id);
            return false;
        };

        match event {
            InputEvent::CloseRequested => owner.on_close_requested(),
            InputEvent::Resized { width, height } => {
                owner.on_resize(IntPoint::new(width as i32, height as i32))
            }
            InputEvent::Moved { x, y } => owner.on_moved(IntPoint::new(x, y)),
            InputEvent::Focused(focused) => owner.on_focus(focused),
            InputEvent::CursorMoved { x, y } => owner.on_cursor_move(DoublePoint::new(x, y)),
            InputEvent::CursorLeft => owner.on_cursor_left(),
            InputEvent::MouseInput { button, state } => owner.on_button(button, state),
            InputEvent::Key { key, state, modifiers } => owner.on_key(key, state, modifiers),
        }
        true
    }

    /// Whether the owner of `id` asked for its window to close
    pub fn should_close(&self, id: &K) -> bool {
        self.owners.get(id).map(|owner| owner.should_close()).unwrap_or(false)
    }

    /// Drop every owner
    pub fn clear(&mut self) {
        self.owners.clear();
    }
}

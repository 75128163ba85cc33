//! Window management module for CGUI
//!
//! This module handles the borderless window: input translation, press
//! classification, move/resize geometry, monitor lookup and the controller
//! that ties them to the render thread. The platform window is reached only
//! through the narrow `WindowOps` contract so the logic runs without a
//! display server in tests.

use crate::geometry::{DoublePoint, IntPoint};

pub use winit::window::CursorIcon;

pub mod controller;
pub mod drag;
pub mod events;
pub mod gesture;
pub mod monitor;
pub mod registry;
pub mod resize;
pub mod winit_window;

pub use controller::WindowController;
pub use gesture::GestureKind;
pub use monitor::{MonitorDescriptor, MonitorSource};
pub use registry::CallbackRegistry;

/// Input delivered to a window owner
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Window close requested by the platform
    CloseRequested,

    /// Framebuffer resized
    Resized { width: u32, height: u32 },

    /// Window moved
    Moved { x: i32, y: i32 },

    /// Focus gained or lost
    Focused(bool),

    /// Cursor moved, window-local coordinates
    CursorMoved { x: f64, y: f64 },

    /// Cursor left the window
    CursorLeft,

    /// Mouse button pressed or released
    MouseInput { button: MouseButton, state: ButtonState },

    /// Keyboard key event
    Key { key: Key, state: KeyState, modifiers: KeyModifiers },
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Repeated,
    Released,
}

/// Keyboard keys the shell reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    F1,
    I,

    /// Any other key the platform recognized
    Other,

    /// A key the platform could not identify
    Unidentified(u32),
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,  // Windows/Super/Command key
}

impl KeyModifiers {
    /// Ctrl and Shift both held, as required by the shell shortcuts
    pub fn is_ctrl_shift(&self) -> bool {
        self.ctrl && self.shift
    }
}

/// Window attributes reported in diagnostic snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowAttributesSnapshot {
    pub decorated: bool,
    pub visible: bool,
    pub resizable: bool,
}

/// Operations the controller needs from the platform window
pub trait WindowOps {
    /// Top-left corner in global desktop coordinates
    fn outer_position(&self) -> IntPoint;

    /// Current client area size
    fn inner_size(&self) -> IntPoint;

    fn set_outer_position(&self, position: IntPoint);

    /// Request a new client area size
    ///
    /// Returns the resulting size when the platform applied it immediately.
    fn request_inner_size(&self, size: IntPoint) -> Option<IntPoint>;

    fn set_cursor(&self, icon: CursorIcon);

    /// Enter borderless fullscreen on `monitor`, or leave fullscreen with `None`
    fn set_fullscreen(&self, monitor: Option<&MonitorDescriptor>);

    fn set_visible(&self, visible: bool);

    fn attributes(&self) -> WindowAttributesSnapshot;

    /// Name and version of the windowing backend
    fn backend_name(&self) -> String;
}

/// Per-window callback interface the platform trampoline dispatches into
pub trait WindowCallbacks {
    fn on_key(&mut self, key: Key, state: KeyState, modifiers: KeyModifiers);

    fn on_cursor_move(&mut self, position: DoublePoint);

    fn on_cursor_left(&mut self) {}

    fn on_button(&mut self, button: MouseButton, state: ButtonState);

    fn on_resize(&mut self, size: IntPoint);

    fn on_moved(&mut self, _position: IntPoint) {}

    fn on_focus(&mut self, _focused: bool) {}

    fn on_close_requested(&mut self);

    /// Whether the owner wants its window closed
    fn should_close(&self) -> bool;
}

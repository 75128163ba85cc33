//! Event handling for the winit window
//!
//! This module converts winit events to CGUI `InputEvent` values and keeps
//! the keyboard modifier state needed to interpret shortcuts.

use crate::window::{ButtonState, InputEvent, Key, KeyModifiers, KeyState, MouseButton};
use winit::event::{
    ElementState,
    MouseButton as WinitMouseButton,
    WindowEvent as WinitWindowEvent,
};
use winit::keyboard::{KeyCode, ModifiersState, NativeKeyCode, PhysicalKey};

/// Event handler for converting winit events to CGUI events
pub struct EventHandler {
    /// Current keyboard modifiers state
    modifiers: ModifiersState,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        Self {
            modifiers: ModifiersState::empty(),
        }
    }

    /// Handle a winit window event and convert to a CGUI event
    pub fn handle_event(&mut self, event: WinitWindowEvent) -> Option<InputEvent> {
        match event {
            WinitWindowEvent::CloseRequested => Some(InputEvent::CloseRequested),

            WinitWindowEvent::Resized(size) => Some(InputEvent::Resized {
                width: size.width,
                height: size.height,
            }),

            WinitWindowEvent::Moved(position) => Some(InputEvent::Moved {
                x: position.x,
                y: position.y,
            }),

            WinitWindowEvent::Focused(focused) => Some(InputEvent::Focused(focused)),

            WinitWindowEvent::CursorMoved { position, .. } => Some(InputEvent::CursorMoved {
                x: position.x,
                y: position.y,
            }),

            WinitWindowEvent::CursorLeft { .. } => Some(InputEvent::CursorLeft),

            WinitWindowEvent::MouseInput { state, button, .. } => {
                let button = convert_mouse_button(button)?;
                Some(InputEvent::MouseInput {
                    button,
                    state: convert_button_state(state),
                })
            }

            WinitWindowEvent::ModifiersChanged(new_modifiers) => {
                self.modifiers = new_modifiers.state();
                None // Don't emit event for modifier changes alone
            }

            WinitWindowEvent::KeyboardInput { event, .. } => {
                let state = match (event.state, event.repeat) {
                    (ElementState::Pressed, false) => KeyState::Pressed,
                    (ElementState::Pressed, true) => KeyState::Repeated,
                    (ElementState::Released, _) => KeyState::Released,
                };
                Some(InputEvent::Key {
                    key: convert_physical_key(event.physical_key),
                    state,
                    modifiers: convert_modifiers(self.modifiers),
                })
            }

            _ => None,
        }
    }
}

/// Convert winit mouse button to CGUI mouse button
fn convert_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

fn convert_button_state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

/// Convert a winit physical key to a CGUI key
fn convert_physical_key(key: PhysicalKey) -> Key {
    match key {
        PhysicalKey::Code(code) => convert_key_code(code),
        PhysicalKey::Unidentified(native) => Key::Unidentified(native_scan_code(native)),
    }
}

fn convert_key_code(keycode: KeyCode) -> Key {
    match keycode {
        KeyCode::Escape => Key::Escape,
        KeyCode::F1 => Key::F1,
        KeyCode::KeyI => Key::I,
        _ => Key::Other,
    }
}

fn native_scan_code(native: NativeKeyCode) -> u32 {
    match native {
        NativeKeyCode::Android(code) | NativeKeyCode::Xkb(code) => code,
        NativeKeyCode::MacOS(code) | NativeKeyCode::Windows(code) => code as u32,
        #[allow(unreachable_patterns)]
        _ => 0,
    }
}

/// Convert winit modifiers to CGUI modifiers
fn convert_modifiers(modifiers: ModifiersState) -> KeyModifiers {
    KeyModifiers {
        shift: modifiers.shift_key(),
        ctrl: modifiers.control_key(),
        alt: modifiers.alt_key(),
        meta: modifiers.super_key(),
    }
}

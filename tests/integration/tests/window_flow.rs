//! Integration tests for the window controller
//!
//! These tests drive the controller through the callback registry with the
//! same translated events the winit shell produces:
//! - Press classification and drag/resize
//! - Minimum size enforcement
//! - Fullscreen switching across monitors
//! - Close shortcuts

use cgui::geometry::IntPoint;
use cgui::platform::GenericPlatform;
use cgui::renderer::{FrameStats, RenderSync};
use cgui::utils::config::WindowConfig;
use cgui::window::{
    ButtonState, CallbackRegistry, CursorIcon, InputEvent, Key, KeyModifiers, KeyState, MouseButton,
    WindowController,
};
use cgui_integration_tests::FakeDesktop;
use std::sync::Arc;

const WINDOW: u32 = 1;

fn setup(desktop: &FakeDesktop) -> (CallbackRegistry<u32>, Arc<RenderSync>) {
    let sync = Arc::new(RenderSync::new(desktop.state().size));
    let controller = WindowController::new(
        desktop.clone(),
        &WindowConfig::default(),
        Box::new(GenericPlatform),
        sync.clone(),
        Arc::new(FrameStats::new()),
    );

    let mut registry = CallbackRegistry::new();
    registry.register(WINDOW, Box::new(controller));
    (registry, sync)
}

fn cursor(registry: &mut CallbackRegistry<u32>, x: f64, y: f64) {
    assert!(registry.dispatch(&WINDOW, InputEvent::CursorMoved { x, y }));
}

fn left(registry: &mut CallbackRegistry<u32>, state: ButtonState) {
    registry.dispatch(&WINDOW, InputEvent::MouseInput { button: MouseButton::Left, state });
}

fn key(registry: &mut CallbackRegistry<u32>, key: Key, modifiers: KeyModifiers) {
    registry.dispatch(&WINDOW, InputEvent::Key { key, state: KeyState::Pressed, modifiers });
}

fn ctrl_shift() -> KeyModifiers {
    KeyModifiers { ctrl: true, shift: true, ..Default::default() }
}

#[test]
fn test_move_drag_moves_window_and_framebuffer_is_untouched() {
    let desktop = FakeDesktop::dual_monitor(IntPoint::new(100, 100), IntPoint::new(512, 256));
    let (mut registry, sync) = setup(&desktop);

    cursor(&mut registry, 256.0, 128.0);
    left(&mut registry, ButtonState::Pressed);

    // The fake applies moves at once, so the local cursor position returns to
    // the press point as the window catches up with the pointer
    cursor(&mut registry, 276.0, 123.0);
    assert_eq!(desktop.state().position, IntPoint::new(120, 95));
    cursor(&mut registry, 286.0, 128.0);
    assert_eq!(desktop.state().position, IntPoint::new(150, 95));

    left(&mut registry, ButtonState::Released);
    assert_eq!(desktop.state().size, IntPoint::new(512, 256));
    assert_eq!(sync.snapshot().framebuffer_size, IntPoint::new(512, 256));
    assert!(sync.snapshot().is_resize_settled);
}

#[test]
fn test_nw_resize_anchors_bottom_right_corner() {
    let desktop = FakeDesktop::dual_monitor(IntPoint::new(100, 100), IntPoint::new(512, 256));
    let (mut registry, sync) = setup(&desktop);

    cursor(&mut registry, 5.0, 5.0);
    assert_eq!(desktop.state().cursor, Some(CursorIcon::NwseResize));
    left(&mut registry, ButtonState::Pressed);

    // Pointer goes up-left by (30, 20); the window is now 30 px further left
    cursor(&mut registry, -25.0, -15.0);
    let state = desktop.state();
    assert_eq!(state.position, IntPoint::new(70, 80));
    assert_eq!(state.size, IntPoint::new(542, 276));
    assert_eq!(state.position + state.size, IntPoint::new(612, 356));
    assert_eq!(sync.snapshot().framebuffer_size, IntPoint::new(542, 276));
}

#[test]
fn test_resize_stops_at_minimum_and_catches_up() {
    let desktop = FakeDesktop::dual_monitor(IntPoint::new(100, 100), IntPoint::new(512, 256));
    let (mut registry, _) = setup(&desktop);

    cursor(&mut registry, 510.0, 128.0);
    left(&mut registry, ButtonState::Pressed);

    // Past the 480 px minimum: the edge holds
    cursor(&mut registry, 400.0, 128.0);
    assert_eq!(desktop.state().size.x, 512);

    // Back to exactly the minimum width
    cursor(&mut registry, 478.0, 128.0);
    assert_eq!(desktop.state().size.x, 480);

    // Overshoot again, then grow: the edge tracks the pointer without a jump
    cursor(&mut registry, 300.0, 128.0);
    assert_eq!(desktop.state().size.x, 480);
    cursor(&mut registry, 530.0, 128.0);
    assert_eq!(desktop.state().size.x, 532);
    assert_eq!(desktop.state().position, IntPoint::new(100, 100));
}

#[test]
fn test_fullscreen_uses_monitor_under_cursor() {
    let desktop = FakeDesktop::dual_monitor(IntPoint::new(2000, 200), IntPoint::new(512, 256));
    let (mut registry, _) = setup(&desktop);

    cursor(&mut registry, 100.0, 100.0);
    key(&mut registry, Key::F1, ctrl_shift());
    assert_eq!(desktop.state().fullscreen_on.as_deref(), Some("Secondary"));

    // Drags do nothing while fullscreen
    registry.dispatch(&WINDOW, InputEvent::Resized { width: 2560, height: 1440 });
    left(&mut registry, ButtonState::Pressed);
    cursor(&mut registry, 300.0, 300.0);
    left(&mut registry, ButtonState::Released);

    key(&mut registry, Key::F1, ctrl_shift());
    let state = desktop.state();
    assert_eq!(state.fullscreen_on, None);
    assert_eq!(state.position, IntPoint::new(2000, 200));
    assert_eq!(state.size, IntPoint::new(512, 256));
    assert!(state.visible);
}

#[test]
fn test_fullscreen_falls_back_to_primary_in_monitor_gap() {
    let desktop = FakeDesktop::dual_monitor(IntPoint::new(100, 1200), IntPoint::new(512, 256));
    let (mut registry, _) = setup(&desktop);

    // (150, 1250) lies below the 1080 px primary and left of the secondary
    cursor(&mut registry, 50.0, 50.0);
    key(&mut registry, Key::F1, ctrl_shift());
    assert_eq!(desktop.state().fullscreen_on.as_deref(), Some("Primary"));
}

#[test]
fn test_close_paths() {
    let desktop = FakeDesktop::dual_monitor(IntPoint::new(100, 100), IntPoint::new(512, 256));

    let (mut registry, _) = setup(&desktop);
    key(&mut registry, Key::I, ctrl_shift());
    key(&mut registry, Key::Other, KeyModifiers::default());
    assert!(!registry.should_close(&WINDOW));
    key(&mut registry, Key::Escape, KeyModifiers::default());
    assert!(registry.should_close(&WINDOW));

    let (mut registry, _) = setup(&desktop);
    registry.dispatch(&WINDOW, InputEvent::CloseRequested);
    assert!(registry.should_close(&WINDOW));
}

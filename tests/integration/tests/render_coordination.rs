//! Integration tests for the render/event coordination
//!
//! These tests run the real render thread against a recording frame target
//! and commit geometry from the test thread, which plays the event thread.

use cgui::geometry::{DoublePoint, IntPoint};
use cgui::platform::GenericPlatform;
use cgui::renderer::{FrameStats, RenderSync, RenderThread};
use cgui::utils::config::WindowConfig;
use cgui::window::{ButtonState, MouseButton, WindowCallbacks, WindowController};
use cgui_integration_tests::{wait_until, FakeDesktop, RecordingTarget};
use anyhow::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn test_committed_size_reaches_next_frame() -> Result<()> {
    let sync = Arc::new(RenderSync::new(IntPoint::new(512, 256)));
    let (target, frames) = RecordingTarget::new(Duration::from_millis(2));
    let mut render = RenderThread::spawn(move || Ok(target), sync.clone(), Arc::new(FrameStats::new()), |_| {})?;

    assert!(wait_until(TIMEOUT, || !frames.lock().is_empty()));

    // Unsettled geometry blocks the next frame
    sync.begin_resize();
    let blocked_at = frames.lock().len();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(frames.lock().len(), blocked_at);

    sync.commit(|state| state.framebuffer_size = IntPoint::new(600, 300));
    assert!(wait_until(TIMEOUT, || frames.lock().len() > blocked_at + 3));
    render.shutdown();

    // Every frame after the commit uses the new size
    let frames = frames.lock();
    assert!(frames[..blocked_at].iter().all(|s| *s == IntPoint::new(512, 256)));
    assert!(frames[blocked_at..].iter().all(|s| *s == IntPoint::new(600, 300)));
    Ok(())
}

#[test]
fn test_shutdown_releases_blocked_renderer() -> Result<()> {
    let sync = Arc::new(RenderSync::new(IntPoint::new(512, 256)));
    let (target, _frames) = RecordingTarget::new(Duration::from_millis(1));
    let mut render = RenderThread::spawn(move || Ok(target), sync.clone(), Arc::new(FrameStats::new()), |_| {})?;

    sync.begin_resize();
    render.shutdown();
    assert!(!render.is_running());
    assert!(sync.is_closed());
    Ok(())
}

#[test]
fn test_drag_resize_is_seen_by_render_thread() -> Result<()> {
    let desktop = FakeDesktop::dual_monitor(IntPoint::new(100, 100), IntPoint::new(512, 256));
    let sync = Arc::new(RenderSync::new(desktop.state().size));
    let stats = Arc::new(FrameStats::new());

    let (target, frames) = RecordingTarget::new(Duration::from_millis(1));
    let mut render = RenderThread::spawn(move || Ok(target), sync.clone(), stats.clone(), |_| {})?;

    let mut controller = WindowController::new(
        desktop.clone(),
        &WindowConfig::default(),
        Box::new(GenericPlatform),
        sync.clone(),
        stats.clone(),
    );

    controller.on_cursor_move(DoublePoint::new(508.0, 250.0));
    controller.on_button(MouseButton::Left, ButtonState::Pressed);
    for step in 1..=20 {
        controller.on_cursor_move(DoublePoint::new(508.0 + step as f64 * 5.0, 250.0 + step as f64 * 3.0));
        thread::sleep(Duration::from_millis(1));
    }
    controller.on_button(MouseButton::Left, ButtonState::Released);

    let final_size = IntPoint::new(612, 316);
    assert_eq!(desktop.state().size, final_size);
    assert!(wait_until(TIMEOUT, || frames.lock().last() == Some(&final_size)));

    render.shutdown();
    assert!(stats.snapshot().frames_total > 0);
    Ok(())
}

#[test]
fn test_controller_resize_parks_renderer_until_settled() -> Result<()> {
    let desktop = FakeDesktop::dual_monitor(IntPoint::new(100, 100), IntPoint::new(512, 256));
    let sync = Arc::new(RenderSync::new(desktop.state().size));
    let stats = Arc::new(FrameStats::new());

    let (target, frames) = RecordingTarget::new(Duration::from_millis(1));
    let mut render = RenderThread::spawn(move || Ok(target), sync.clone(), stats.clone(), |_| {})?;
    assert!(wait_until(TIMEOUT, || !frames.lock().is_empty()));

    // While the platform works on a resize: (gate settled, frames presented meanwhile)
    let observed = Arc::new(Mutex::new(Vec::new()));
    {
        let sync = sync.clone();
        let frames = frames.clone();
        let observed = observed.clone();
        desktop.on_resize_request(move |_| {
            let before = frames.lock().len();
            thread::sleep(Duration::from_millis(15));
            let presented = frames.lock().len() - before;
            observed.lock().push((sync.snapshot().is_resize_settled, presented));
        });
    }

    let mut controller = WindowController::new(
        desktop.clone(),
        &WindowConfig::default(),
        Box::new(GenericPlatform),
        sync.clone(),
        stats,
    );

    controller.on_cursor_move(DoublePoint::new(508.0, 250.0));
    controller.on_button(MouseButton::Left, ButtonState::Pressed);
    for step in 1..=5 {
        controller.on_cursor_move(DoublePoint::new(508.0 + step as f64 * 4.0, 250.0));
    }
    controller.on_button(MouseButton::Left, ButtonState::Released);

    let observed = observed.lock().clone();
    assert_eq!(observed.len(), 5);
    assert!(observed.iter().all(|&(settled, presented)| !settled && presented == 0));

    // Settled again after the drag, and the renderer resumes at the new size
    assert!(sync.snapshot().is_resize_settled);
    let final_size = IntPoint::new(532, 256);
    assert!(wait_until(TIMEOUT, || frames.lock().last() == Some(&final_size)));

    render.shutdown();
    Ok(())
}

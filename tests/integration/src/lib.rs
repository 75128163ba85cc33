//! Integration test utilities for CGUI
//!
//! This module provides fakes that stand in for the windowing backend and
//! the GL backend, so the controller and the render loop can be driven
//! without a display server:
//! - `FakeDesktop`: a window on a configurable set of monitors
//! - `RecordingTarget`: a frame target that records every presented size

use cgui::geometry::IntPoint;
use cgui::renderer::FrameTarget;
use cgui::window::{
    CursorIcon, MonitorDescriptor, MonitorSource, WindowAttributesSnapshot, WindowOps,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Observable state of the fake window
#[derive(Debug, Clone, Default)]
pub struct DesktopState {
    pub position: IntPoint,
    pub size: IntPoint,
    pub cursor: Option<CursorIcon>,
    pub fullscreen_on: Option<String>,
    pub visible: bool,
}

type ResizeHook = Box<dyn Fn(IntPoint) + Send>;

/// A window that applies every request immediately
#[derive(Clone)]
pub struct FakeDesktop {
    state: Arc<Mutex<DesktopState>>,
    monitors: Vec<MonitorDescriptor>,
    resize_hook: Arc<Mutex<Option<ResizeHook>>>,
}

impl FakeDesktop {
    pub fn new(position: IntPoint, size: IntPoint, monitors: Vec<MonitorDescriptor>) -> Self {
        Self {
            state: Arc::new(Mutex::new(DesktopState {
                position,
                size,
                ..Default::default()
            })),
            monitors,
            resize_hook: Arc::new(Mutex::new(None)),
        }
    }

    /// Two side-by-side displays, 1920x1080 then 2560x1440
    pub fn dual_monitor(position: IntPoint, size: IntPoint) -> Self {
        Self::new(
            position,
            size,
            vec![
                monitor(0, "Primary", IntPoint::new(0, 0), IntPoint::new(1920, 1080)),
                monitor(1, "Secondary", IntPoint::new(1920, 0), IntPoint::new(2560, 1440)),
            ],
        )
    }

    pub fn state(&self) -> DesktopState {
        self.state.lock().clone()
    }

    /// Run `hook` with the requested size on every inner size request,
    /// after the size has been applied
    pub fn on_resize_request(&self, hook: impl Fn(IntPoint) + Send + 'static) {
        *self.resize_hook.lock() = Some(Box::new(hook));
    }
}

pub fn monitor(index: usize, name: &str, position: IntPoint, resolution: IntPoint) -> MonitorDescriptor {
    MonitorDescriptor {
        index,
        position,
        resolution,
        refresh_rate: 60,
        name: name.to_string(),
    }
}

impl WindowOps for FakeDesktop {
    fn outer_position(&self) -> IntPoint {
        self.state.lock().position
    }

    fn inner_size(&self) -> IntPoint {
        self.state.lock().size
    }

    fn set_outer_position(&self, position: IntPoint) {
        self.state.lock().position = position;
    }

    fn request_inner_size(&self, size: IntPoint) -> Option<IntPoint> {
        self.state.lock().size = size;
        if let Some(hook) = self.resize_hook.lock().as_ref() {
            hook(size);
        }
        Some(size)
    }

    fn set_cursor(&self, icon: CursorIcon) {
        self.state.lock().cursor = Some(icon);
    }

    fn set_fullscreen(&self, monitor: Option<&MonitorDescriptor>) {
        self.state.lock().fullscreen_on = monitor.map(|m| m.name.clone());
    }

    fn set_visible(&self, visible: bool) {
        self.state.lock().visible = visible;
    }

    fn attributes(&self) -> WindowAttributesSnapshot {
        WindowAttributesSnapshot {
            decorated: false,
            visible: self.state.lock().visible,
            resizable: true,
        }
    }

    fn backend_name(&self) -> String {
        "fake desktop".to_string()
    }
}

impl MonitorSource for FakeDesktop {
    fn monitors(&self) -> Vec<MonitorDescriptor> {
        self.monitors.clone()
    }

    fn primary_monitor(&self) -> Option<MonitorDescriptor> {
        self.monitors.first().cloned()
    }
}

/// Frame target recording the framebuffer size of every presented frame
pub struct RecordingTarget {
    frames: Arc<Mutex<Vec<IntPoint>>>,
    frame_time: Duration,
}

impl RecordingTarget {
    /// Target and the shared list it records into
    pub fn new(frame_time: Duration) -> (Self, Arc<Mutex<Vec<IntPoint>>>) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                frames: frames.clone(),
                frame_time,
            },
            frames,
        )
    }
}

impl FrameTarget for RecordingTarget {
    fn present(&mut self, framebuffer_size: IntPoint) -> cgui::Result<()> {
        self.frames.lock().push(framebuffer_size);
        thread::sleep(self.frame_time);
        Ok(())
    }
}

/// Poll `condition` until it holds or `timeout` passes
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    condition()
}

//! Winit shell for CGUI
//!
//! Runs the blocking event loop on the main thread, adapts the winit window
//! to the controller's `WindowOps`/`MonitorSource` contracts and owns the
//! render thread for the lifetime of the window.

use crate::geometry::IntPoint;
use crate::platform;
use crate::renderer::gl_renderer::{create_gl_window, GlFrameTarget};
use crate::renderer::{FrameStats, RenderSync, RenderThread};
use crate::utils::config::Config;
use crate::utils::error::{CguiError, IntoCguiError, Result};
use crate::window::events::EventHandler;
use crate::window::{
    CallbackRegistry, MonitorDescriptor, MonitorSource, WindowAttributesSnapshot, WindowController, WindowOps,
};
use log::{debug, error, info, warn};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::monitor::MonitorHandle;
use winit::window::{CursorIcon, Fullscreen, Window, WindowId};

/// Events sent to the event loop from other threads
#[derive(Debug)]
pub enum ShellEvent {
    /// The render thread could not start
    RenderFailed(CguiError),
}

/// A winit window seen through the controller's platform contracts
pub struct WinitPlatform {
    window: Arc<Window>,
}

impl WinitPlatform {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl WindowOps for WinitPlatform {
    fn outer_position(&self) -> IntPoint {
        match self.window.outer_position() {
            Ok(position) => IntPoint::new(position.x, position.y),
            // Wayland does not expose global positions
            Err(e) => {
                debug!(target: "cgui::backend", "Outer position unavailable: {}", e);
                IntPoint::ZERO
            }
        }
    }

    fn inner_size(&self) -> IntPoint {
        let size = self.window.inner_size();
        IntPoint::new(size.width as i32, size.height as i32)
    }

    fn set_outer_position(&self, position: IntPoint) {
        self.window.set_outer_position(PhysicalPosition::new(position.x, position.y));
    }

    fn request_inner_size(&self, size: IntPoint) -> Option<IntPoint> {
        self.window
            .request_inner_size(PhysicalSize::new(size.x.max(1) as u32, size.y.max(1) as u32))
            .map(|applied| IntPoint::new(applied.width as i32, applied.height as i32))
    }

    fn set_cursor(&self, icon: CursorIcon) {
        self.window.set_cursor(icon);
    }

    fn set_fullscreen(&self, monitor: Option<&MonitorDescriptor>) {
        match monitor {
            Some(descriptor) => {
                let handle = self.window.available_monitors().nth(descriptor.index);
                if handle.is_none() {
                    warn!(target: "cgui::backend", "Monitor '{}' disappeared, using the current one", descriptor.name);
                }
                self.window.set_fullscreen(Some(Fullscreen::Borderless(handle)));
            }
            None => self.window.set_fullscreen(None),
        }
    }

    fn set_visible(&self, visible: bool) {
        self.window.set_visible(visible);
    }

    fn attributes(&self) -> WindowAttributesSnapshot {
        WindowAttributesSnapshot {
            decorated: self.window.is_decorated(),
            visible: self.window.is_visible().unwrap_or(true),
            resizable: self.window.is_resizable(),
        }
    }

    fn backend_name(&self) -> String {
        let system = self
            .window
            .window_handle()
            .map(|handle| backend_label(&handle.as_raw()))
            .unwrap_or("unknown");
        format!("winit 0.30 ({})", system)
    }
}

impl MonitorSource for WinitPlatform {
    fn monitors(&self) -> Vec<MonitorDescriptor> {
        self.window
            .available_monitors()
            .enumerate()
            .map(|(index, handle)| describe_monitor(index, &handle))
            .collect()
    }

    fn primary_monitor(&self) -> Option<MonitorDescriptor> {
        let mut available = self.window.available_monitors().enumerate();
        match self.window.primary_monitor() {
            Some(primary) => available
                .find(|(_, handle)| *handle == primary)
                .map(|(index, handle)| describe_monitor(index, &handle)),
            // No notion of a primary display, take the first one
            None => available.next().map(|(index, handle)| describe_monitor(index, &handle)),
        }
    }
}

fn describe_monitor(index: usize, handle: &MonitorHandle) -> MonitorDescriptor {
    let position = handle.position();
    let size = handle.size();

    MonitorDescriptor {
        index,
        position: IntPoint::new(position.x, position.y),
        resolution: IntPoint::new(size.width as i32, size.height as i32),
        refresh_rate: millihertz_to_hz(handle.refresh_rate_millihertz()),
        name: handle.name().unwrap_or_else(|| format!("Monitor {}", index)),
    }
}

fn millihertz_to_hz(millihertz: Option<u32>) -> u32 {
    millihertz.map(|mhz| (mhz + 500) / 1000).unwrap_or(0)
}

fn backend_label(handle: &RawWindowHandle) -> &'static str {
    match handle {
        RawWindowHandle::Xlib(_) => "X11/Xlib",
        RawWindowHandle::Xcb(_) => "X11/XCB",
        RawWindowHandle::Wayland(_) => "Wayland",
        RawWindowHandle::AppKit(_) => "AppKit",
        RawWindowHandle::Win32(_) => "Win32",
        _ => "other",
    }
}

/// Application state driven by the winit event loop
struct CguiApp {
    config: Config,
    proxy: EventLoopProxy<ShellEvent>,
    sync: Arc<RenderSync>,
    stats: Arc<FrameStats>,
    events: EventHandler,
    registry: CallbackRegistry<WindowId>,
    window: Option<Arc<Window>>,
    render_thread: Option<RenderThread>,

    /// When the loop last went idle
    wait_started: Instant,

    failure: Option<CguiError>,
}

impl CguiApp {
    fn new(config: Config, proxy: EventLoopProxy<ShellEvent>) -> Self {
        Self {
            config,
            proxy,
            sync: Arc::new(RenderSync::new(IntPoint::ZERO)),
            stats: Arc::new(FrameStats::new()),
            events: EventHandler::new(),
            registry: CallbackRegistry::new(),
            window: None,
            render_thread: None,
            wait_started: Instant::now(),
            failure: None,
        }
    }

    /// Create the window, place it, and start rendering
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (window, bundle) = create_gl_window(event_loop, &self.config.window)?;
        let window = Arc::new(window);

        let size = window.inner_size();
        self.sync
            .set_framebuffer_size(IntPoint::new(size.width as i32, size.height as i32));

        let window_ops = WinitPlatform::new(window.clone());
        info!(target: "cgui::backend", "Windowing backend: {}", window_ops.backend_name());

        let mut controller = WindowController::new(
            window_ops,
            &self.config.window,
            platform::native(),
            self.sync.clone(),
            self.stats.clone(),
        );
        // No global cursor query in winit before the first CursorMoved
        controller.place_initial(None);
        if self.config.window.fullscreen {
            controller.toggle_fullscreen();
        }

        let render_config = self.config.render.clone();
        let proxy = self.proxy.clone();
        let render_thread = RenderThread::spawn(
            move || GlFrameTarget::activate(bundle, &render_config),
            self.sync.clone(),
            self.stats.clone(),
            move |e| {
                if proxy.send_event(ShellEvent::RenderFailed(e)).is_err() {
                    error!("Event loop is gone, render failure not delivered");
                }
            },
        )?;

        self.registry.register(window.id(), Box::new(controller));
        self.render_thread = Some(render_thread);
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: CguiError) {
        error!("{}", error);
        self.failure.get_or_insert(error);
        event_loop.exit();
    }

    fn shutdown(&mut self) {
        if let Some(mut render_thread) = self.render_thread.take() {
            render_thread.shutdown();
            debug!("Render thread joined");
        }
        self.registry.clear();
        self.window = None;
    }
}

impl ApplicationHandler<ShellEvent> for CguiApp {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if !matches!(cause, StartCause::Init) {
            self.stats.record_event_wait(self.wait_started.elapsed());
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.initialize(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: ShellEvent) {
        match event {
            ShellEvent::RenderFailed(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        // Frames come from the render thread
        if matches!(event, WindowEvent::RedrawRequested) {
            return;
        }

        if let Some(input) = self.events.handle_event(event) {
            self.registry.dispatch(&window_id, input);
        }

        if self.registry.should_close(&window_id) {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.wait_started = Instant::now();
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        info!("Event loop exiting");
        self.shutdown();
    }
}

/// Open the window and block until it is closed
pub fn run(config: Config) -> Result<()> {
    let event_loop = EventLoop::<ShellEvent>::with_user_event()
        .build()
        .window_err("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = CguiApp::new(config, event_loop.create_proxy());
    event_loop.run_app(&mut app).window_err("Event loop error")?;
    app.shutdown();

    match app.failure.take() {
        Some(e) => Err(e),
        None => {
            info!("Window closed");
            Ok(())
        }
    }
}

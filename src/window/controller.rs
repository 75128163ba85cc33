//! Window controller
//!
//! Owns the committed window geometry and turns input callbacks into window
//! management: press classification, move and edge resize, fullscreen
//! switching and the keyboard shortcuts. The render thread is parked through
//! the render gate while the platform applies a geometry change, and the
//! resulting size is committed through the same gate, so a frame never reads a
//! half-applied size.

use crate::geometry::{DoublePoint, IntPoint, Rect, WindowGeometry};
use crate::platform::PlatformAdapter;
use crate::renderer::stats::{FrameStats, FrameStatsSnapshot};
use crate::renderer::sync::RenderSync;
use crate::utils::config::WindowConfig;
use crate::utils::format_millis;
use crate::window::drag::PressState;
use crate::window::gesture::{classify, GestureKind};
use crate::window::monitor::{find_monitor_with_max_overlap, monitor_at_or_primary, MonitorSource};
use crate::window::resize::resolve;
use crate::window::{
    ButtonState, Key, KeyModifiers, KeyState, MouseButton, WindowAttributesSnapshot, WindowCallbacks, WindowOps,
};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Controller for one borderless window
pub struct WindowController<P: WindowOps + MonitorSource> {
    platform: P,
    adapter: Box<dyn PlatformAdapter>,
    sync: Arc<RenderSync>,
    stats: Arc<FrameStats>,

    /// Last committed windowed geometry
    geometry: WindowGeometry,

    drag_threshold: i32,
    press: Option<PressState>,
    cursor_local: DoublePoint,
    hover: GestureKind,

    is_fullscreen: bool,

    /// Windowed geometry to restore when leaving fullscreen
    saved_geometry: Option<WindowGeometry>,

    close_requested: bool,
    started_at: Instant,
}

impl<P: WindowOps + MonitorSource> WindowController<P> {
    pub fn new(
        platform: P,
        config: &WindowConfig,
        adapter: Box<dyn PlatformAdapter>,
        sync: Arc<RenderSync>,
        stats: Arc<FrameStats>,
    ) -> Self {
        let geometry = WindowGeometry::new(platform.outer_position(), platform.inner_size(), config.minimum_size());
        debug!(
            "Window controller created on {} platform with geometry {:?}",
            adapter.name(),
            geometry
        );

        Self {
            platform,
            adapter,
            sync,
            stats,
            geometry,
            drag_threshold: config.drag_threshold as i32,
            press: None,
            cursor_local: DoublePoint::ZERO,
            hover: GestureKind::None,
            is_fullscreen: false,
            saved_geometry: None,
            close_requested: false,
            started_at: Instant::now(),
        }
    }

    /// Center the hidden window on a monitor, then show it
    ///
    /// Uses the monitor under `cursor_global` when known, else the primary
    /// monitor. With no monitor at all the window is shown where it is.
    pub fn place_initial(&mut self, cursor_global: Option<IntPoint>) {
        let monitor = match cursor_global {
            Some(point) => monitor_at_or_primary(&self.platform, point),
            None => self.platform.primary_monitor(),
        };

        match monitor {
            Some(monitor) => {
                let mut target = self.geometry.clamped();
                target.position = target.centered_in(&monitor.bounds());
                info!("Placing window on monitor '{}' at {:?}", monitor.name, target.position);
                self.commit_geometry(target);
            }
            None => warn!("No monitor reported, keeping the initial window position"),
        }

        self.platform.set_visible(true);
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Gesture of the active press, if a press is in progress
    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.press.as_ref().filter(|p| p.is_left_button_down).map(|p| p.gesture_kind)
    }

    /// Gesture under the pointer while no button is held
    pub fn hover_gesture(&self) -> GestureKind {
        self.hover
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Switch between windowed and borderless fullscreen
    pub fn toggle_fullscreen(&mut self) {
        if self.is_fullscreen {
            self.leave_fullscreen();
        } else {
            self.enter_fullscreen();
        }
    }

    /// Cursor position in desktop coordinates
    fn cursor_global(&self) -> IntPoint {
        (self.platform.outer_position() + self.cursor_local).to_int()
    }

    fn enter_fullscreen(&mut self) {
        let Some(monitor) = monitor_at_or_primary(&self.platform, self.cursor_global()) else {
            warn!("No monitor available, staying windowed");
            return;
        };

        self.saved_geometry = Some(self.geometry);
        self.press = None;
        self.is_fullscreen = true;

        self.sync.begin_resize();
        self.platform.set_fullscreen(Some(&monitor));
        self.sync.commit(|_| ());
        info!("Window mode has been set to fullscreen on '{}'", monitor.name);
    }

    fn leave_fullscreen(&mut self) {
        let restore = self.saved_geometry.take().unwrap_or(self.geometry);
        self.is_fullscreen = false;

        self.platform.set_visible(false);
        self.sync.begin_resize();
        self.platform.set_fullscreen(None);
        self.sync.commit(|_| ());
        self.apply_geometry(restore, None);
        self.platform.set_visible(true);

        info!("Window mode has been set to windowed");
    }

    /// Commit a geometry produced by a gesture
    ///
    /// Dropped with a warning while fullscreen.
    fn commit_geometry(&mut self, target: WindowGeometry) {
        if self.is_fullscreen {
            warn!("Resize requested while fullscreen, ignoring");
            return;
        }

        let target = self.adapter.constrain(target);
        if target == self.geometry {
            return;
        }

        let previous = self.geometry;
        self.apply_geometry(target, Some(&previous));
    }

    /// Push `target` to the platform with the renderer parked
    ///
    /// With a `previous` geometry only the parts that differ are sent.
    fn apply_geometry(&mut self, target: WindowGeometry, previous: Option<&WindowGeometry>) {
        let move_needed = previous.map_or(true, |p| p.position != target.position);
        let resize_needed = previous.map_or(true, |p| p.size != target.size);

        self.sync.begin_resize();
        if move_needed {
            self.platform.set_outer_position(target.position);
        }
        let applied = if resize_needed {
            self.platform.request_inner_size(target.size)
        } else {
            None
        };

        self.sync.commit(|state| {
            if let Some(applied) = applied {
                state.framebuffer_size = applied;
            }
        });

        self.geometry = target;
    }

    fn update_hover(&mut self) {
        let kind = classify(self.cursor_local, self.geometry.size, self.drag_threshold, self.is_fullscreen);
        if kind != self.hover {
            self.platform.set_cursor(kind.to_cursor_icon());
            self.hover = kind;
        }
    }

    fn end_press(&mut self) {
        if let Some(mut press) = self.press.take() {
            let held = press.release();
            info!(
                "Left button has been released, it was held for: {}",
                format_millis(held.as_millis() as u64)
            );
        }
    }

    /// Collect the state reported by the diagnostic shortcut
    pub fn diagnostics(&self) -> Diagnostics {
        let position = self.platform.outer_position();
        let size = self.platform.inner_size();
        let monitor = find_monitor_with_max_overlap(&self.platform, &Rect::new(position, size));

        Diagnostics {
            uptime: self.started_at.elapsed(),
            stats: self.stats.snapshot(),
            backend: self.platform.backend_name(),
            monitor: monitor.map(|m| m.name),
            position,
            size,
            cursor_local: self.cursor_local,
            cursor_global: self.cursor_global(),
            is_fullscreen: self.is_fullscreen,
            attributes: self.platform.attributes(),
        }
    }

    fn log_diagnostics(&self) {
        info!("/ DEBUG INFO START");
        for line in self.diagnostics().lines() {
            info!("| {}", line);
        }
        info!("\\ DEBUG INFO END");
    }
}

impl<P: WindowOps + MonitorSource> WindowCallbacks for WindowController<P> {
    fn on_key(&mut self, key: Key, state: KeyState, modifiers: KeyModifiers) {
        if state != KeyState::Pressed {
            return;
        }

        match key {
            Key::Escape => {
                info!("Escape has been pressed, window will be closed");
                self.close_requested = true;
            }
            Key::F1 if modifiers.is_ctrl_shift() => self.toggle_fullscreen(),
            Key::I if modifiers.is_ctrl_shift() => self.log_diagnostics(),
            Key::Unidentified(code) => error!("Unidentified key (native code {:#x}) ignored", code),
            _ => {}
        }
    }

    fn on_cursor_move(&mut self, position: DoublePoint) {
        self.cursor_local = position;

        let target = match &self.press {
            Some(press) if press.is_dragging() => {
                let delta = press.pointer_delta(self.cursor_global(), &self.geometry);
                if delta == IntPoint::ZERO {
                    return;
                }
                resolve(press.gesture_kind, &self.geometry, delta, self.geometry.minimum_size)
            }
            // Outside or fullscreen press: nothing follows the pointer
            Some(press) if press.is_left_button_down => return,
            _ => {
                self.update_hover();
                return;
            }
        };

        self.commit_geometry(target);
    }

    fn on_cursor_left(&mut self) {
        if self.press.is_none() {
            self.hover = GestureKind::None;
        }
    }

    fn on_button(&mut self, button: MouseButton, state: ButtonState) {
        if button != MouseButton::Left {
            return;
        }

        match state {
            ButtonState::Pressed => {
                let press = PressState::begin(self.cursor_local, self.geometry, self.drag_threshold, self.is_fullscreen);
                debug!(
                    "Left button has been pressed at ({:.1}, {:.1}): {:?}",
                    self.cursor_local.x, self.cursor_local.y, press.gesture_kind
                );
                self.platform.set_cursor(press.gesture_kind.to_cursor_icon());
                self.hover = press.gesture_kind;
                self.press = Some(press);
            }
            ButtonState::Released => {
                self.end_press();
                self.update_hover();
            }
        }
    }

    fn on_resize(&mut self, size: IntPoint) {
        self.sync.set_framebuffer_size(size);
        if !self.is_fullscreen && self.press.is_none() {
            self.geometry.size = size;
        }
    }

    fn on_moved(&mut self, position: IntPoint) {
        if !self.is_fullscreen && self.press.is_none() {
            self.geometry.position = position;
        }
    }

    fn on_focus(&mut self, focused: bool) {
        if !focused && self.press.is_some() {
            debug!("Focus lost during a press");
            self.end_press();
        }
    }

    fn on_close_requested(&mut self) {
        info!("Close requested by the platform");
        self.close_requested = true;
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }
}

/// Snapshot printed by Ctrl+Shift+I
#[derive(Debug, Clone)]
pub struct Diagnostics {
    pub uptime: Duration,
    pub stats: FrameStatsSnapshot,
    pub backend: String,
    pub monitor: Option<String>,
    pub position: IntPoint,
    pub size: IntPoint,
    pub cursor_local: DoublePoint,
    pub cursor_global: IntPoint,
    pub is_fullscreen: bool,
    pub attributes: WindowAttributesSnapshot,
}

impl Diagnostics {
    pub fn lines(&self) -> Vec<String> {
        let flag = |on: bool, yes: &str, no: &str| if on { yes.to_string() } else { no.to_string() };

        vec![
            format!("Time passed since program started: {}", format_millis(self.uptime.as_millis() as u64)),
            format!("Time required to process last events: {}ms", self.stats.last_frame_event_time_ms),
            format!("Time required to render last frame: {}ms", self.stats.last_frame_render_time_ms),
            format!("Rough estimation of fps: {:.2}fps", self.stats.estimated_fps()),
            format!("Real amount of fps: {}fps", self.stats.frames_per_second_last_second),
            format!("Windowing backend: {}", self.backend),
            format!("Current monitor: {}", self.monitor.as_deref().unwrap_or("none")),
            format!("Current window position: x={} y={}", self.position.x, self.position.y),
            format!("Current window size: x={} y={}", self.size.x, self.size.y),
            format!("Current cursor local position: x={:.2} y={:.2}", self.cursor_local.x, self.cursor_local.y),
            format!("Current cursor global position: x={} y={}", self.cursor_global.x, self.cursor_global.y),
            format!("Current window mode: {}", flag(self.is_fullscreen, "Fullscreen", "Windowed")),
            format!("Current window decoration: {}", flag(self.attributes.decorated, "Decorated", "Not Decorated")),
            format!("Current window visible: {}", flag(self.attributes.visible, "Visible", "Not Visible")),
            format!("Current window resizable: {}", flag(self.attributes.resizable, "Resizable", "Not Resizable")),
        ]
    }
}

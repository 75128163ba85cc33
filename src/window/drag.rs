//! Press sessions for frameless window dragging
//!
//! A `PressState` is created on every left-button press edge. The gesture is
//! classified once at that moment and stays fixed until the button is
//! released, no matter where the pointer travels in between.

use crate::geometry::{DoublePoint, IntPoint, WindowGeometry};
use crate::window::gesture::{classify, GestureKind, HorizontalEdge, VerticalEdge};
use std::time::{Duration, Instant};

/// State of one left-button press
#[derive(Debug, Clone)]
pub struct PressState {
    /// Gesture selected at the press edge
    pub gesture_kind: GestureKind,

    /// Whether the left button is still held
    pub is_left_button_down: bool,

    /// Window-local cursor position at the press edge
    pub press_origin: DoublePoint,

    /// Resize handle width used for classification
    pub drag_threshold: i32,

    /// Screen-space cursor position at the press edge
    press_global: IntPoint,

    /// Committed geometry at the press edge
    start: WindowGeometry,

    /// When the button went down
    pressed_at: Instant,
}

impl PressState {
    /// Start a press session and classify it against the current geometry
    pub fn begin(
        press_origin: DoublePoint,
        geometry: WindowGeometry,
        drag_threshold: i32,
        is_fullscreen: bool,
    ) -> Self {
        let gesture_kind = classify(press_origin, geometry.size, drag_threshold, is_fullscreen);

        Self {
            gesture_kind,
            is_left_button_down: true,
            press_origin,
            drag_threshold,
            press_global: (geometry.position + press_origin).to_int(),
            start: geometry,
            pressed_at: Instant::now(),
        }
    }

    /// Whether pointer motion should currently move or resize the window
    pub fn is_dragging(&self) -> bool {
        self.is_left_button_down && self.gesture_kind.is_drag()
    }

    /// Pointer delta to feed the geometry resolver
    ///
    /// The delta is the pointer travel since the press minus the distance the
    /// dragged edges have already moved. An edge that was held back by the
    /// minimum size therefore catches up with the pointer once it comes back,
    /// instead of jumping or drifting away from it.
    pub fn pointer_delta(&self, cursor_global: IntPoint, current: &WindowGeometry) -> IntPoint {
        let travel = cursor_global - self.press_global;

        let dx = match self.dragged_x(current) {
            Some(edge) => travel.x - (edge - self.dragged_x(&self.start).unwrap_or(edge)),
            None => 0,
        };
        let dy = match self.dragged_y(current) {
            Some(edge) => travel.y - (edge - self.dragged_y(&self.start).unwrap_or(edge)),
            None => 0,
        };

        IntPoint::new(dx, dy)
    }

    /// End the session, returning how long the button was held
    pub fn release(&mut self) -> Duration {
        self.is_left_button_down = false;
        self.pressed_at.elapsed()
    }

    /// Geometry at the press edge
    pub fn start_geometry(&self) -> &WindowGeometry {
        &self.start
    }

    fn dragged_x(&self, g: &WindowGeometry) -> Option<i32> {
        if self.gesture_kind == GestureKind::Move {
            return Some(g.position.x);
        }
        self.gesture_kind.horizontal_edge().map(|edge| match edge {
            HorizontalEdge::Left => g.position.x,
            HorizontalEdge::Right => g.position.x + g.size.x,
        })
    }

    fn dragged_y(&self, g: &WindowGeometry) -> Option<i32> {
        if self.gesture_kind == GestureKind::Move {
            return Some(g.position.y);
        }
        self.gesture_kind.vertical_edge().map(|edge| match edge {
            VerticalEdge::Top => g.position.y,
            VerticalEdge::Bottom => g.position.y + g.size.y,
        })
    }
}

//! Press classification for the frameless window
//!
//! A left-button press is mapped once, at the press edge, onto a window
//! management gesture: move, one of eight resize directions, a press outside
//! the window, or the fullscreen marker (gestures disabled).

use crate::geometry::{DoublePoint, IntPoint};
use winit::window::CursorIcon;

/// Default resize handle width in pixels
pub const DEFAULT_DRAG_THRESHOLD: i32 = 10;

/// Window management gesture selected by a press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Move,
    ResizeN,
    ResizeS,
    ResizeE,
    ResizeW,
    ResizeNE,
    ResizeNW,
    ResizeSE,
    ResizeSW,
    Outside,
    Fullscreen,
    None,
}

/// Horizontal edge driven by a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalEdge {
    Left,
    Right,
}

/// Vertical edge driven by a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalEdge {
    Top,
    Bottom,
}

impl GestureKind {
    pub fn is_resize(&self) -> bool {
        self.horizontal_edge().is_some() || self.vertical_edge().is_some()
    }

    /// Move or resize, i.e. the gesture changes window geometry while dragged
    pub fn is_drag(&self) -> bool {
        *self == GestureKind::Move || self.is_resize()
    }

    /// Left or right edge adjusted by a resize gesture
    pub fn horizontal_edge(&self) -> Option<HorizontalEdge> {
        match self {
            GestureKind::ResizeW | GestureKind::ResizeNW | GestureKind::ResizeSW => Some(HorizontalEdge::Left),
            GestureKind::ResizeE | GestureKind::ResizeNE | GestureKind::ResizeSE => Some(HorizontalEdge::Right),
            _ => None,
        }
    }

    /// Top or bottom edge adjusted by a resize gesture
    pub fn vertical_edge(&self) -> Option<VerticalEdge> {
        match self {
            GestureKind::ResizeN | GestureKind::ResizeNW | GestureKind::ResizeNE => Some(VerticalEdge::Top),
            GestureKind::ResizeS | GestureKind::ResizeSW | GestureKind::ResizeSE => Some(VerticalEdge::Bottom),
            _ => None,
        }
    }

    /// Cursor shown while hovering or dragging with this gesture
    pub fn to_cursor_icon(&self) -> CursorIcon {
        match self {
            GestureKind::ResizeN | GestureKind::ResizeS => CursorIcon::NsResize,
            GestureKind::ResizeE | GestureKind::ResizeW => CursorIcon::EwResize,
            GestureKind::ResizeNW | GestureKind::ResizeSE => CursorIcon::NwseResize,
            GestureKind::ResizeNE | GestureKind::ResizeSW => CursorIcon::NeswResize,
            GestureKind::Move | GestureKind::Outside | GestureKind::Fullscreen | GestureKind::None => {
                CursorIcon::Default
            }
        }
    }
}

/// Classify a press at window-local `press_position`
///
/// Margins of `drag_threshold` pixels along each edge act as resize handles.
/// The left margin is tested first (top-left corner, bottom-left corner, left
/// edge), then the right margin, then the top and bottom margins; anything
/// else inside the window is a move.
pub fn classify(
    press_position: DoublePoint,
    window_size: IntPoint,
    drag_threshold: i32,
    is_fullscreen: bool,
) -> GestureKind {
    if is_fullscreen {
        return GestureKind::Fullscreen;
    }

    let (x, y) = (press_position.x, press_position.y);
    let (w, h) = (window_size.x as f64, window_size.y as f64);
    let t = drag_threshold as f64;

    if x < 0.0 || y < 0.0 || x > w || y > h {
        return GestureKind::Outside;
    }

    let near_top = y < t;
    let near_bottom = y > h - t;

    if x < t {
        if near_top {
            GestureKind::ResizeNW
        } else if near_bottom {
            GestureKind::ResizeSW
        } else {
            GestureKind::ResizeW
        }
    } else if x > w - t {
        if near_top {
            GestureKind::ResizeNE
        } else if near_bottom {
            GestureKind::ResizeSE
        } else {
            GestureKind::ResizeE
        }
    } else if near_top {
        GestureKind::ResizeN
    } else if near_bottom {
        GestureKind::ResizeS
    } else {
        GestureKind::Move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SIZE: IntPoint = IntPoint::new(512, 256);

    fn at(x: f64, y: f64) -> GestureKind {
        classify(DoublePoint::new(x, y), SIZE, DEFAULT_DRAG_THRESHOLD, false)
    }

    #[test]
    fn test_corners() {
        assert_eq!(at(5.0, 5.0), GestureKind::ResizeNW);
        assert_eq!(at(507.0, 5.0), GestureKind::ResizeNE);
        assert_eq!(at(5.0, 251.0), GestureKind::ResizeSW);
        assert_eq!(at(507.0, 251.0), GestureKind::ResizeSE);
    }

    #[test]
    fn test_edges_and_center() {
        assert_eq!(at(5.0, 128.0), GestureKind::ResizeW);
        assert_eq!(at(507.0, 128.0), GestureKind::ResizeE);
        assert_eq!(at(256.0, 5.0), GestureKind::ResizeN);
        assert_eq!(at(256.0, 251.0), GestureKind::ResizeS);
        assert_eq!(at(256.0, 128.0), GestureKind::Move);
    }

    #[test]
    fn test_margin_boundaries_are_exclusive() {
        // Exactly on the threshold line belongs to the interior
        assert_eq!(at(10.0, 128.0), GestureKind::Move);
        assert_eq!(at(502.0, 128.0), GestureKind::Move);
        assert_eq!(at(256.0, 10.0), GestureKind::Move);
        assert_eq!(at(9.99, 128.0), GestureKind::ResizeW);
    }

    #[test]
    fn test_outside_and_fullscreen() {
        assert_eq!(at(-1.0, 128.0), GestureKind::Outside);
        assert_eq!(at(256.0, 300.0), GestureKind::Outside);
        assert_eq!(
            classify(DoublePoint::new(5.0, 5.0), SIZE, DEFAULT_DRAG_THRESHOLD, true),
            GestureKind::Fullscreen
        );
        assert_eq!(
            classify(DoublePoint::new(256.0, 128.0), SIZE, DEFAULT_DRAG_THRESHOLD, true),
            GestureKind::Fullscreen
        );
    }

    #[test]
    fn test_gesture_edges() {
        assert_eq!(GestureKind::ResizeNW.horizontal_edge(), Some(HorizontalEdge::Left));
        assert_eq!(GestureKind::ResizeNW.vertical_edge(), Some(VerticalEdge::Top));
        assert_eq!(GestureKind::ResizeE.vertical_edge(), None);
        assert!(GestureKind::Move.is_drag());
        assert!(!GestureKind::Move.is_resize());
        assert!(!GestureKind::Outside.is_drag());
        assert!(!GestureKind::Fullscreen.is_drag());
    }

    #[test]
    fn test_gesture_to_cursor_mapping() {
        assert_eq!(GestureKind::ResizeN.to_cursor_icon(), CursorIcon::NsResize);
        assert_eq!(GestureKind::ResizeS.to_cursor_icon(), CursorIcon::NsResize);
        assert_eq!(GestureKind::ResizeW.to_cursor_icon(), CursorIcon::EwResize);
        assert_eq!(GestureKind::ResizeE.to_cursor_icon(), CursorIcon::EwResize);
        assert_eq!(GestureKind::ResizeNW.to_cursor_icon(), CursorIcon::NwseResize);
        assert_eq!(GestureKind::ResizeSE.to_cursor_icon(), CursorIcon::NwseResize);
        assert_eq!(GestureKind::ResizeNE.to_cursor_icon(), CursorIcon::NeswResize);
        assert_eq!(GestureKind::ResizeSW.to_cursor_icon(), CursorIcon::NeswResize);
        assert_eq!(GestureKind::Move.to_cursor_icon(), CursorIcon::Default);
    }

    proptest! {
        #[test]
        fn corner_zone_wins_over_edges(
            w in 40i32..4000,
            h in 40i32..4000,
            t_frac in 0.05f64..0.95,
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let t = ((w.min(h) / 2 - 1) as f64 * t_frac).max(1.0) as i32;
            let size = IntPoint::new(w, h);
            let dx = fx * (t as f64 - 0.001);
            let dy = fy * (t as f64 - 0.001);

            prop_assert_eq!(classify(DoublePoint::new(dx, dy), size, t, false), GestureKind::ResizeNW);
            prop_assert_eq!(classify(DoublePoint::new(w as f64 - dx, dy), size, t, false), GestureKind::ResizeNE);
            prop_assert_eq!(classify(DoublePoint::new(dx, h as f64 - dy), size, t, false), GestureKind::ResizeSW);
            prop_assert_eq!(classify(DoublePoint::new(w as f64 - dx, h as f64 - dy), size, t, false), GestureKind::ResizeSE);
        }
    }
}

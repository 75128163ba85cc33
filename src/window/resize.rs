//! Edge resize geometry for borderless windows
//!
//! Computes the window rectangle produced by a move or resize gesture for a
//! given pointer delta. Each axis is accepted or rejected on its own: an edge
//! that would take the window below its minimum size stays where it was.

use crate::geometry::{IntPoint, WindowGeometry};
use crate::window::gesture::{GestureKind, HorizontalEdge, VerticalEdge};

/// Resolve the geometry produced by `gesture` moving the pointer by `delta`
///
/// `current` is the last committed geometry. For `Move` the position shifts
/// by `delta`. For resize gestures the edges named by the gesture follow the
/// pointer, with the opposite edges anchored. `Fullscreen`, `Outside` and
/// `None` return `current` untouched.
pub fn resolve(
    gesture: GestureKind,
    current: &WindowGeometry,
    delta: IntPoint,
    minimum_size: IntPoint,
) -> WindowGeometry {
    let mut next = *current;
    next.minimum_size = minimum_size;

    match gesture {
        GestureKind::Move => {
            next.position += delta;
            return next;
        }
        GestureKind::Fullscreen | GestureKind::Outside | GestureKind::None => return next,
        _ => {}
    }

    match gesture.horizontal_edge() {
        Some(HorizontalEdge::Right) => {
            let width = current.size.x + delta.x;
            if width >= minimum_size.x {
                next.size.x = width;
            }
        }
        Some(HorizontalEdge::Left) => {
            let width = current.size.x - delta.x;
            if width >= minimum_size.x {
                next.position.x = current.position.x + delta.x;
                next.size.x = width;
            }
        }
        None => {}
    }

    match gesture.vertical_edge() {
        Some(VerticalEdge::Bottom) => {
            let height = current.size.y + delta.y;
            if height >= minimum_size.y {
                next.size.y = height;
            }
        }
        Some(VerticalEdge::Top) => {
            let height = current.size.y - delta.y;
            if height >= minimum_size.y {
                next.position.y = current.position.y + delta.y;
                next.size.y = height;
            }
        }
        None => {}
    }

    next
}

//! macOS window placement rules

use super::PlatformAdapter;
use crate::geometry::WindowGeometry;

/// Height of the global menu bar in points
pub const MENU_BAR_HEIGHT: i32 = 25;

/// Keeps the window top edge below the menu bar
#[derive(Debug, Clone, Copy, Default)]
pub struct MacOsPlatform;

impl PlatformAdapter for MacOsPlatform {
    fn name(&self) -> &'static str {
        "macos"
    }

    /// A window reaching into the menu bar loses the covered rows from its
    /// height and is pushed down, but never below its minimum size.
    fn constrain(&self, mut geometry: WindowGeometry) -> WindowGeometry {
        if geometry.position.y < MENU_BAR_HEIGHT {
            geometry.size.y -= MENU_BAR_HEIGHT - geometry.position.y;
            geometry.position.y = MENU_BAR_HEIGHT;
        }
        geometry.clamped()
    }
}

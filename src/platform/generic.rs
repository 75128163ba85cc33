use super::PlatformAdapter;
use crate::geometry::WindowGeometry;

/// Passes geometry through untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericPlatform;

impl PlatformAdapter for GenericPlatform {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn constrain(&self, geometry: WindowGeometry) -> WindowGeometry {
        geometry
    }
}

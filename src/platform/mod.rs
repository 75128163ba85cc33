//! Platform adapters
//!
//! Per-OS adjustments to window geometry live behind one trait, with the
//! implementation picked at build time.

use crate::geometry::WindowGeometry;

mod generic;
#[cfg(target_os = "macos")]
mod macos;

pub use generic::GenericPlatform;
#[cfg(target_os = "macos")]
pub use macos::MacOsPlatform;

/// OS-specific hooks applied by the window controller
pub trait PlatformAdapter: Send + Sync {
    /// Short platform name for diagnostics
    fn name(&self) -> &'static str;

    /// Adjust a geometry the controller is about to commit
    fn constrain(&self, geometry: WindowGeometry) -> WindowGeometry;
}

/// The adapter for the platform this binary was built for
pub fn native() -> Box<dyn PlatformAdapter> {
    #[cfg(target_os = "macos")]
    {
        Box::new(MacOsPlatform)
    }

    #[cfg(not(target_os = "macos"))]
    {
        Box::new(GenericPlatform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_adapter_is_named() {
        let adapter = native();
        assert!(!adapter.name().is_empty());
    }
}

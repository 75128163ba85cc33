//! Utility module for CGUI
//!
//! This module provides common utilities used throughout the shell:
//! - Error handling with custom error types
//! - Configuration management
//! - Logging sink setup

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used items
pub use config::{Config, GeneralConfig, RenderConfig, WindowConfig};
pub use error::{CguiError, Result};

/// Format a millisecond count for diagnostic output
///
/// # Returns
///
/// "N ms" below one second, "S.mmm s" below a minute, "M:SS.mmm" above
pub fn format_millis(ms: u64) -> String {
    if ms < 1_000 {
        format!("{} ms", ms)
    } else if ms < 60_000 {
        format!("{}.{:03} s", ms / 1_000, ms % 1_000)
    } else {
        format!("{}:{:02}.{:03}", ms / 60_000, (ms % 60_000) / 1_000, ms % 1_000)
    }
}

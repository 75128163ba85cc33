//! Error types for CGUI
//!
//! This module defines custom error types used throughout the shell.
//! We use thiserror for convenient error type definitions and anyhow for
//! application-level error handling in `main`.

use thiserror::Error;

/// Main error type for CGUI
#[derive(Error, Debug)]
pub enum CguiError {
    /// Window creation or event loop errors
    #[error("Window error: {0}")]
    Window(String),

    /// OpenGL context creation or activation errors
    #[error("Context error: {0}")]
    Context(String),

    /// GL function loading errors
    #[error("Loader error: {0}")]
    Loader(String),

    /// Per-frame renderer errors
    #[error("Renderer error: {0}")]
    Renderer(String),

    /// Shader compilation or link errors
    #[error("Shader error: {0}")]
    Shader(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Render/event thread coordination errors
    #[error("Synchronization error: {0}")]
    Sync(String),

    /// Generic error for unexpected situations
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::ffi::NulError> for CguiError {
    fn from(err: std::ffi::NulError) -> Self {
        CguiError::Shader(format!("Source contains an interior NUL byte: {}", err))
    }
}

/// Convenience type alias for Results in CGUI
pub type Result<T> = std::result::Result<T, CguiError>;

/// Extension trait for converting other errors to CguiError
pub trait IntoCguiError<T> {
    /// Convert this error into a CguiError with the given context
    fn window_err(self, context: &str) -> Result<T>;
    fn context_err(self, context: &str) -> Result<T>;
    fn renderer_err(self, context: &str) -> Result<T>;
    fn config_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoCguiError<T> for std::result::Result<T, E> {
    fn window_err(self, context: &str) -> Result<T> {
        self.map_err(|e| CguiError::Window(format!("{}: {}", context, e)))
    }

    fn context_err(self, context: &str) -> Result<T> {
        self.map_err(|e| CguiError::Context(format!("{}: {}", context, e)))
    }

    fn renderer_err(self, context: &str) -> Result<T> {
        self.map_err(|e| CguiError::Renderer(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| CguiError::Config(format!("{}: {}", context, e)))
    }
}

/// Helper macro for creating internal errors with file and line information
#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::utils::error::CguiError::Internal(
            format!("{} at {}:{}", $msg, file!(), line!())
        )
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::error::CguiError::Internal(
            format!("{} at {}:{}", format!($fmt, $($arg)*), file!(), line!())
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CguiError::Window("Failed to create window".to_string());
        assert_eq!(err.to_string(), "Window error: Failed to create window");

        let err = CguiError::Loader("glClear missing".to_string());
        assert_eq!(err.to_string(), "Loader error: glClear missing");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let cgui_err: CguiError = io_err.into();
        assert!(matches!(cgui_err, CguiError::FileIO(_)));
    }

    #[test]
    fn test_into_cgui_error_trait() {
        let result: std::result::Result<(), &str> = Err("no matching config");
        let converted = result.context_err("Creating GL context");

        match converted {
            Err(CguiError::Context(msg)) => {
                assert_eq!(msg, "Creating GL context: no matching config");
            }
            _ => panic!("Expected Context error"),
        }
    }

    #[test]
    fn test_config_err_keeps_source_message() {
        let parsed: std::result::Result<u32, _> = "wide".parse::<u32>();
        match parsed.config_err("Invalid CGUI_WINDOW_WIDTH") {
            Err(CguiError::Config(msg)) => {
                assert!(msg.starts_with("Invalid CGUI_WINDOW_WIDTH: "));
            }
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_internal_error_macro() {
        let err = internal_error!("bad state {}", 3);
        assert!(err.to_string().starts_with("Internal error: bad state 3 at"));
    }
}

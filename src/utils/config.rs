//! Configuration management for CGUI
//!
//! This module handles loading and managing the shell configuration
//! from a config file and environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::geometry::IntPoint;
use crate::utils::error::{CguiError, IntoCguiError, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window configuration
    pub window: WindowConfig,

    /// Render thread configuration
    pub render: RenderConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Initial window width
    pub width: u32,

    /// Initial window height
    pub height: u32,

    /// Minimum window width
    pub min_width: u32,

    /// Minimum window height
    pub min_height: u32,

    /// Margin (in pixels) from each edge that acts as a resize handle
    pub drag_threshold: u32,

    /// Start in fullscreen mode
    pub fullscreen: bool,
}

/// Render thread configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Synchronize buffer swaps with the display refresh
    pub vsync: bool,

    /// Load shader sources from this directory instead of the embedded copies
    pub shader_dir: Option<PathBuf>,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log file location, `None` for the platform default
    pub log_file: Option<PathBuf>,

    /// Truncate the log file at startup
    pub clear_log_on_start: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "CGUI Default Window".to_string(),
            width: 512,
            height: 256,
            min_width: 480,
            min_height: 240,
            drag_threshold: 10,
            fullscreen: false,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            clear_log_on_start: true,
        }
    }
}

impl WindowConfig {
    pub fn size(&self) -> IntPoint {
        IntPoint::new(self.width as i32, self.height as i32)
    }

    pub fn minimum_size(&self) -> IntPoint {
        IntPoint::new(self.min_width as i32, self.min_height as i32)
    }
}

impl Config {
    /// Load configuration from various sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. Explicit config file, or the user config file (~/.config/cgui/config.toml on Linux)
    /// 3. Environment variables (CGUI_* prefix)
    ///
    /// The result is not validated here; callers apply command line overrides
    /// first and then call `validate`.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        match explicit {
            Some(path) => config.merge_from_file(path)?,
            None => {
                if let Some(user_path) = Self::user_config_path() {
                    if user_path.exists() {
                        config.merge_from_file(&user_path)?;
                    }
                }
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Merge configuration from a TOML file
    fn merge_from_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)
            .config_err(&format!("Failed to read config file {}", path.display()))?;

        // Missing keys fall back to defaults through #[serde(default)]
        *self = toml::from_str(&contents).config_err("Failed to parse config file")?;

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(width) = std::env::var("CGUI_WINDOW_WIDTH") {
            self.window.width = width.parse().config_err("Invalid CGUI_WINDOW_WIDTH")?;
        }

        if let Ok(height) = std::env::var("CGUI_WINDOW_HEIGHT") {
            self.window.height = height.parse().config_err("Invalid CGUI_WINDOW_HEIGHT")?;
        }

        if let Ok(vsync) = std::env::var("CGUI_VSYNC") {
            self.render.vsync = vsync.parse().config_err("Invalid CGUI_VSYNC")?;
        }

        if let Ok(log_level) = std::env::var("CGUI_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let window = &self.window;
        if window.width == 0 || window.height == 0 {
            return Err(CguiError::Config("Window dimensions must be non-zero".to_string()));
        }

        if window.width < window.min_width || window.height < window.min_height {
            return Err(CguiError::Config(format!(
                "Window size {}x{} is below the minimum {}x{}",
                window.width, window.height, window.min_width, window.min_height
            )));
        }

        // Corner zones must not overlap, otherwise the classifier has no edge zones left
        let half_min = window.min_width.min(window.min_height) / 2;
        if window.drag_threshold == 0 || window.drag_threshold >= half_min {
            return Err(CguiError::Config(format!(
                "Drag threshold must be between 1 and {}",
                half_min.saturating_sub(1)
            )));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(CguiError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level,
                valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cgui").join("config.toml"))
    }
}

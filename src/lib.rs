//! CGUI - a borderless OpenGL window shell
//!
//! The window has no OS decorations: moving and edge resizing are done by
//! the shell itself from raw pointer input. Frames are drawn on a dedicated
//! render thread that is gated on settled window geometry.

pub mod geometry;
pub mod platform;
pub mod renderer;
pub mod utils;
pub mod window;

pub use utils::config::Config;
pub use utils::error::{CguiError, Result};
pub use window::winit_window::run;

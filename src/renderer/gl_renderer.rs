//! OpenGL backend on glutin
//!
//! The window, the GL display and a not-yet-current context are created on
//! the event thread. The context and its surface are then handed to the
//! render thread, which is the only thread that ever makes them current.

use crate::geometry::IntPoint;
use crate::renderer::shader::{ShaderLibrary, ShaderSource, TRIANGLE_PROGRAM};
use crate::renderer::FrameTarget;
use crate::utils::config::{RenderConfig, WindowConfig};
use crate::utils::error::{CguiError, IntoCguiError, Result};
use gl::types::{GLchar, GLenum, GLsizei, GLuint};
use glutin::config::{Config as GlConfig, ConfigTemplateBuilder, GlConfig as _};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{debug, error, info, warn};
use raw_window_handle::HasWindowHandle;
use std::ffi::{c_void, CStr, CString};
use std::num::NonZeroU32;
use std::ptr;
use std::time::Instant;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

/// A context that is current nowhere, together with its window surface
pub struct GlSurfaceBundle {
    context: NotCurrentContext,
    surface: Surface<WindowSurface>,
}

// SAFETY: the context is not current on any thread while the bundle exists,
// and the surface is only used by the thread that later makes it current.
unsafe impl Send for GlSurfaceBundle {}

/// Create the borderless, initially hidden window and its GL context
///
/// Requests an sRGB, double-buffered, transparent framebuffer and a debug
/// OpenGL 3.3 core context.
pub fn create_gl_window(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<(Window, GlSurfaceBundle)> {
    let attributes = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_min_inner_size(PhysicalSize::new(config.min_width, config.min_height))
        .with_decorations(false)
        .with_transparent(true)
        .with_resizable(true)
        .with_visible(false);

    let template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_transparency(true);

    let (window, gl_config) = DisplayBuilder::new()
        .with_window_attributes(Some(attributes))
        .build(event_loop, template, pick_config)
        .map_err(|e| CguiError::Window(format!("Failed to create window: {}", e)))?;

    let window = window.ok_or_else(|| CguiError::Window("Display builder returned no window".to_string()))?;
    debug!(
        "Picked GL config: srgb={}, alpha={}, samples={}",
        gl_config.srgb_capable(),
        gl_config.alpha_size(),
        gl_config.num_samples()
    );

    let raw_handle = window
        .window_handle()
        .map_err(|e| CguiError::Window(format!("Window handle unavailable: {}", e)))?
        .as_raw();

    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .with_profile(GlProfile::Core)
        .with_debug(true)
        .build(Some(raw_handle));

    let gl_display = gl_config.display();
    let context = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
        .context_err("Failed to create OpenGL 3.3 core context")?;

    let surface_attributes = window
        .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new().with_srgb(Some(true)))
        .window_err("Failed to describe window surface")?;
    let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
        .context_err("Failed to create window surface")?;

    info!("Created window '{}' ({}x{})", config.title, config.width, config.height);
    Ok((window, GlSurfaceBundle { context, surface }))
}

/// Prefer sRGB-capable transparent configs, then more samples
fn pick_config(configs: Box<dyn Iterator<Item = GlConfig> + '_>) -> GlConfig {
    let score = |config: &GlConfig| {
        (
            config.srgb_capable(),
            config.supports_transparency().unwrap_or(false),
            config.num_samples(),
        )
    };

    configs
        .reduce(|best, config| if score(&config) > score(&best) { config } else { best })
        .expect("glutin only calls the picker with at least one config")
}

/// The render thread's drawing state
pub struct GlFrameTarget {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    surface_size: IntPoint,
    shaders: ShaderLibrary,
    vertex_array: GLuint,
    vsync: bool,
    started: Instant,
}

impl GlFrameTarget {
    /// Make the context current on the calling thread and load GL
    ///
    /// Fails with `Context` when activation fails and `Loader` when the
    /// function loader cannot resolve core entry points. A shader that fails
    /// to build is logged and frames are drawn without it.
    pub fn activate(bundle: GlSurfaceBundle, render: &RenderConfig) -> Result<Self> {
        let GlSurfaceBundle { context, surface } = bundle;

        let context = context
            .make_current(&surface)
            .context_err("Failed to make the GL context current on the render thread")?;

        let display = context.display();
        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => ptr::null(),
        });

        if !gl::Clear::is_loaded() || !gl::Viewport::is_loaded() || !gl::CreateShader::is_loaded() {
            return Err(CguiError::Loader("Unable to resolve core OpenGL functions".to_string()));
        }

        info!("OpenGL version: {}", gl_string(gl::VERSION));
        info!("GPU renderer: {}", gl_string(gl::RENDERER));
        install_debug_callback();

        let interval = if render.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            warn!("Failed to set swap interval: {}", e);
        }

        let mut shaders = ShaderLibrary::new();
        match ShaderSource::triangle(render.shader_dir.as_deref()) {
            Ok(source) => {
                if let Err(e) = shaders.load(TRIANGLE_PROGRAM, &source) {
                    error!("{}", e);
                }
            }
            Err(e) => error!("{}", e),
        }

        let mut vertex_array = 0;
        unsafe { gl::GenVertexArrays(1, &mut vertex_array) };

        let surface_size = IntPoint::new(
            surface.width().unwrap_or(0) as i32,
            surface.height().unwrap_or(0) as i32,
        );

        Ok(Self {
            context,
            surface,
            surface_size,
            shaders,
            vertex_array,
            vsync: render.vsync,
            started: Instant::now(),
        })
    }

    fn resize_surface(&mut self, size: IntPoint) -> Result<()> {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.x as u32), NonZeroU32::new(size.y as u32)) else {
            return Err(CguiError::InvalidInput(format!("Empty framebuffer {}x{}", size.x, size.y)));
        };
        self.surface.resize(&self.context, width, height);
        self.surface_size = size;
        Ok(())
    }
}

impl FrameTarget for GlFrameTarget {
    fn present(&mut self, framebuffer_size: IntPoint) -> Result<()> {
        if framebuffer_size != self.surface_size {
            self.resize_surface(framebuffer_size)?;
        }

        let [r, g, b] = clear_color(self.started.elapsed().as_secs_f32());
        unsafe {
            gl::Viewport(0, 0, framebuffer_size.x, framebuffer_size.y);
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);

            if let Some(program) = self.shaders.get(TRIANGLE_PROGRAM) {
                program.bind();
                gl::BindVertexArray(self.vertex_array);
                gl::DrawArrays(gl::TRIANGLES, 0, 3);
                gl::BindVertexArray(0);
            }

            if self.vsync {
                gl::Finish();
            }
        }

        self.surface
            .swap_buffers(&self.context)
            .renderer_err("Buffer swap failed")?;

        if self.vsync {
            unsafe { gl::Finish() };
        }
        Ok(())
    }
}

impl Drop for GlFrameTarget {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.vertex_array) };
        debug!("Released GL resources");
    }
}

/// Background color at `seconds` since the renderer started
///
/// Each channel follows a sine wave with its own period so the color keeps
/// drifting while frames are being presented.
pub fn clear_color(seconds: f32) -> [f32; 3] {
    let wave = |period: f32| 0.5 + 0.5 * (seconds * std::f32::consts::TAU / period).sin();
    [wave(7.0), wave(11.0), wave(13.0)]
}

fn gl_string(name: GLenum) -> String {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            "unknown".to_string()
        } else {
            CStr::from_ptr(ptr as *const _).to_string_lossy().into_owned()
        }
    }
}

fn install_debug_callback() {
    if !gl::DebugMessageCallback::is_loaded() {
        debug!("GL debug output not available");
        return;
    }

    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_message), ptr::null());
    }
    debug!("GL debug output enabled");
}

extern "system" fn gl_debug_message(
    _source: GLenum,
    _kind: GLenum,
    id: GLuint,
    severity: GLenum,
    length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    if message.is_null() {
        return;
    }

    let text = unsafe {
        if length >= 0 {
            String::from_utf8_lossy(std::slice::from_raw_parts(message as *const u8, length as usize))
        } else {
            CStr::from_ptr(message).to_string_lossy()
        }
    };

    match severity {
        gl::DEBUG_SEVERITY_HIGH => error!(target: "cgui::gl", "[{}] {}", id, text),
        gl::DEBUG_SEVERITY_MEDIUM => warn!(target: "cgui::gl", "[{}] {}", id, text),
        gl::DEBUG_SEVERITY_LOW => info!(target: "cgui::gl", "[{}] {}", id, text),
        _ => debug!(target: "cgui::gl", "[{}] {}", id, text),
    }
}

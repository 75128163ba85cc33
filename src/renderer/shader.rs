//! GLSL program compilation
//!
//! Every function that touches GL here must run on the render thread with
//! the context current.

use crate::utils::error::{CguiError, Result};
use gl::types::{GLchar, GLenum, GLint, GLuint};
use log::{debug, info};
use std::collections::HashMap;
use std::ffi::CString;
use std::path::Path;
use std::ptr;

/// Name of the program drawn every frame
pub const TRIANGLE_PROGRAM: &str = "triangle";

const TRIANGLE_VERT: &str = include_str!("../../shaders/triangle.vert");
const TRIANGLE_FRAG: &str = include_str!("../../shaders/triangle.frag");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

impl ShaderStage {
    fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
            ShaderStage::Geometry => gl::GEOMETRY_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Geometry => "geometry",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vert",
            ShaderStage::Fragment => "frag",
            ShaderStage::Geometry => "geom",
        }
    }
}

/// GLSL text for one program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
    pub geometry: Option<String>,
}

impl ShaderSource {
    /// The triangle program compiled into the binary
    pub fn builtin_triangle() -> Self {
        Self {
            vertex: TRIANGLE_VERT.to_string(),
            fragment: TRIANGLE_FRAG.to_string(),
            geometry: None,
        }
    }

    /// Read `<name>.vert`, `<name>.frag` and, if present, `<name>.geom` from `dir`
    pub fn from_dir(dir: &Path, name: &str) -> Result<Self> {
        let read = |stage: ShaderStage| {
            let path = dir.join(format!("{}.{}", name, stage.extension()));
            std::fs::read_to_string(&path).map_err(|e| {
                CguiError::Shader(format!("Failed to read {} shader {}: {}", stage.name(), path.display(), e))
            })
        };

        let geometry_path = dir.join(format!("{}.{}", name, ShaderStage::Geometry.extension()));
        let geometry = if geometry_path.exists() {
            Some(read(ShaderStage::Geometry)?)
        } else {
            None
        };

        Ok(Self {
            vertex: read(ShaderStage::Vertex)?,
            fragment: read(ShaderStage::Fragment)?,
            geometry,
        })
    }

    /// Load the triangle program from `shader_dir`, or the embedded copy
    pub fn triangle(shader_dir: Option<&Path>) -> Result<Self> {
        match shader_dir {
            Some(dir) => {
                info!("Loading shaders from {}", dir.display());
                Self::from_dir(dir, TRIANGLE_PROGRAM)
            }
            None => Ok(Self::builtin_triangle()),
        }
    }
}

/// A linked GL program
#[derive(Debug)]
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    /// Compile and link a program from its stage sources
    ///
    /// On failure the error carries the info log of the failing stage or of
    /// the link step. Stage objects never outlive this call.
    pub fn compile(vertex: &str, fragment: &str, geometry: Option<&str>) -> Result<Self> {
        let mut stages = Vec::with_capacity(3);
        let mut compile_all = || -> Result<()> {
            stages.push(compile_stage(ShaderStage::Vertex, vertex)?);
            stages.push(compile_stage(ShaderStage::Fragment, fragment)?);
            if let Some(geometry) = geometry {
                stages.push(compile_stage(ShaderStage::Geometry, geometry)?);
            }
            Ok(())
        };

        if let Err(e) = compile_all() {
            for &stage in &stages {
                unsafe { gl::DeleteShader(stage) };
            }
            return Err(e);
        }

        let id = unsafe { link_program(&stages) }?;
        debug!("Linked shader program {} with {} stages", id, stages.len());
        Ok(Self { id })
    }

    pub fn from_source(source: &ShaderSource) -> Result<Self> {
        Self::compile(&source.vertex, &source.fragment, source.geometry.as_deref())
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Make this the active program
    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) };
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) };
    }
}

/// Programs stored by name
#[derive(Debug, Default)]
pub struct ShaderLibrary {
    programs: HashMap<String, ShaderProgram>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `source` and store it under `name`
    pub fn load(&mut self, name: &str, source: &ShaderSource) -> Result<&ShaderProgram> {
        let program = ShaderProgram::from_source(source)?;
        info!("Compiled shader program '{}'", name);
        self.programs.insert(name.to_string(), program);
        self.get(name)
            .ok_or_else(|| crate::internal_error!("Shader program '{}' missing after insert", name))
    }

    pub fn get(&self, name: &str) -> Option<&ShaderProgram> {
        self.programs.get(name)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

fn compile_stage(stage: ShaderStage, source: &str) -> Result<GLuint> {
    let c_source = CString::new(source)?;

    unsafe {
        let id = gl::CreateShader(stage.gl_enum());
        if id == 0 {
            return Err(CguiError::Shader(format!("glCreateShader failed for the {} stage", stage.name())));
        }

        gl::ShaderSource(id, 1, &c_source.as_ptr(), ptr::null());
        gl::CompileShader(id);

        let mut status = gl::FALSE as GLint;
        gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut status);
        if status != gl::TRUE as GLint {
            let mut len = 0;
            gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            let mut written = 0;
            gl::GetShaderInfoLog(id, len.max(1), &mut written, buf.as_mut_ptr() as *mut GLchar);
            gl::DeleteShader(id);

            return Err(CguiError::Shader(format!(
                "Compilation of the {} stage failed: {}",
                stage.name(),
                clean_info_log(&buf, written)
            )));
        }

        Ok(id)
    }
}

/// Link `stages` into a program, then detach and delete every stage
unsafe fn link_program(stages: &[GLuint]) -> Result<GLuint> {
    let program = gl::CreateProgram();
    for &stage in stages {
        gl::AttachShader(program, stage);
    }
    gl::LinkProgram(program);

    let mut status = gl::FALSE as GLint;
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

    for &stage in stages {
        gl::DetachShader(program, stage);
        gl::DeleteShader(stage);
    }

    if status != gl::TRUE as GLint {
        let mut len = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        gl::GetProgramInfoLog(program, len.max(1), &mut written, buf.as_mut_ptr() as *mut GLchar);
        gl::DeleteProgram(program);

        return Err(CguiError::Shader(format!(
            "Program link failed: {}",
            clean_info_log(&buf, written)
        )));
    }

    Ok(program)
}

/// Turn a driver info log buffer into a single trimmed string
fn clean_info_log(buf: &[u8], written: GLint) -> String {
    let end = (written.max(0) as usize).min(buf.len());
    let text = String::from_utf8_lossy(&buf[..end]);
    let text = text.trim_end_matches('\0').trim();
    if text.is_empty() {
        "no info log".to_string()
    } else {
        text.to_string()
    }
}

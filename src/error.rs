//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::gpu::shader_composer::ShaderError;

/// Errors produced by the cubeview crate.
#[derive(Debug)]
pub enum CubeviewError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Shader composition or pipeline validation failure.
    Shader(ShaderError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// Copying a rendered frame back to the CPU failed.
    Readback(String),
}

impl fmt::Display for CubeviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader(e) => write!(f, "shader error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Readback(msg) => write!(f, "frame readback failed: {msg}"),
        }
    }
}

impl std::error::Error for CubeviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Shader(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) | Self::Viewer(_) | Self::Readback(_) => None,
        }
    }
}

impl From<RenderContextError> for CubeviewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<ShaderError> for CubeviewError {
    fn from(e: ShaderError) -> Self {
        Self::Shader(e)
    }
}

impl From<std::io::Error> for CubeviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

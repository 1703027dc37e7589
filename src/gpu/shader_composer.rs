use std::borrow::Cow;
use std::fmt;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

/// A WGSL source consumed by file name.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSource {
    /// WGSL text.
    pub source: &'static str,
    /// File name reported in diagnostics.
    pub file_path: &'static str,
}

/// Shared module with the uniform and vertex-output types.
const SHAPE_IO: ShaderSource = ShaderSource {
    source: include_str!("../../assets/shaders/modules/shape_io.wgsl"),
    file_path: "modules/shape_io.wgsl",
};

/// Vertex stage of the shape pipeline (`vs_main`).
pub const SHAPE_VERTEX: ShaderSource = ShaderSource {
    source: include_str!("../../assets/shaders/shape_mvp.vert.wgsl"),
    file_path: "shape_mvp.vert.wgsl",
};

/// Fragment stage of the shape pipeline (`fs_main`).
pub const SHAPE_FRAGMENT: ShaderSource = ShaderSource {
    source: include_str!("../../assets/shaders/shape_mvp.frag.wgsl"),
    file_path: "shape_mvp.frag.wgsl",
};

/// Shader composition and pipeline validation failures.
#[derive(Debug)]
pub enum ShaderError {
    /// A shared module failed to register.
    Module {
        /// Module file name.
        file_path: &'static str,
        /// Composer diagnostic.
        message: String,
    },
    /// A shader failed to compose into a naga module.
    Compose {
        /// Shader file name.
        file_path: &'static str,
        /// Composer diagnostic.
        message: String,
    },
    /// wgpu rejected the shader module or the pipeline built from it.
    Validation(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module { file_path, message } => {
                write!(f, "failed to register module '{file_path}': {message}")
            }
            Self::Compose { file_path, message } => {
                write!(f, "failed to compose '{file_path}': {message}")
            }
            Self::Validation(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time. Consuming shaders
/// use `#import cubeview::module_name` to pull in shared code. The composer
/// produces `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Create a composer with all shared modules registered.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::Module`] if a shared module does not parse.
    pub fn new() -> Result<Self, ShaderError> {
        let mut composer = Composer::default();

        // Register shared modules in dependency order.
        for m in [SHAPE_IO] {
            let registered = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map(|_| ());
            if let Err(e) = registered {
                return Err(ShaderError::Module {
                    file_path: m.file_path,
                    message: describe(&e, &composer),
                });
            }
        }

        Ok(Self { composer })
    }

    /// Compose a shader (which may contain `#import` directives) into a
    /// `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::Compose`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        shader: ShaderSource,
    ) -> Result<wgpu::ShaderModule, ShaderError> {
        let naga_module = self.compose_naga(shader)?;
        log::debug!("composed shader '{}'", shader.file_path);

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader into a `naga::Module` without creating a wgpu
    /// shader module. Useful for testing shader composition without a GPU
    /// device.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::Compose`] if composition fails.
    pub fn compose_naga(
        &mut self,
        shader: ShaderSource,
    ) -> Result<naga::Module, ShaderError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source: shader.source,
                file_path: shader.file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| ShaderError::Compose {
                file_path: shader.file_path,
                message: describe(&e, &self.composer),
            })
    }
}

/// Render a composer error with source context.
fn describe(error: &ComposerError, composer: &Composer) -> String {
    error.emit_to_string(composer)
}

#[cfg(test)]
mod tests {
    use naga::valid::{Capabilities, ValidationFlags, Validator};

    use super::*;

    fn validate(module: &naga::Module) {
        let _ = Validator::new(ValidationFlags::all(), Capabilities::all())
            .validate(module)
            .unwrap();
    }

    #[test]
    fn shape_shaders_compose_and_validate() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in [SHAPE_VERTEX, SHAPE_FRAGMENT] {
            let module = composer.compose_naga(shader).unwrap_or_else(|e| {
                panic!("shader '{}' failed: {e}", shader.file_path)
            });
            validate(&module);
        }
    }

    #[test]
    fn vertex_stage_exposes_position_and_color_inputs() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer.compose_naga(SHAPE_VERTEX).unwrap();
        let entry = module
            .entry_points
            .iter()
            .find(|ep| ep.name == "vs_main")
            .unwrap();
        assert_eq!(entry.stage, naga::ShaderStage::Vertex);

        let locations: Vec<u32> = entry
            .function
            .arguments
            .iter()
            .flat_map(|arg| match &module.types[arg.ty].inner {
                naga::TypeInner::Struct { members, .. } => members
                    .iter()
                    .filter_map(|m| match m.binding {
                        Some(naga::Binding::Location { location, .. }) => {
                            Some(location)
                        }
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            })
            .collect();
        assert_eq!(locations, vec![0, 1]);
    }

    #[test]
    fn fragment_stage_has_entry_point() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer.compose_naga(SHAPE_FRAGMENT).unwrap();
        assert!(module
            .entry_points
            .iter()
            .any(|ep| ep.name == "fs_main"
                && ep.stage == naga::ShaderStage::Fragment));
    }

    #[test]
    fn broken_shader_reports_file_name() {
        let mut composer = ShaderComposer::new().unwrap();
        let broken = ShaderSource {
            source: "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return nope; }",
            file_path: "broken.wgsl",
        };
        match composer.compose_naga(broken) {
            Err(ShaderError::Compose { file_path, .. }) => {
                assert_eq!(file_path, "broken.wgsl");
            }
            other => panic!("expected compose error, got {other:?}"),
        }
    }
}

//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, render/depth targets, and
//! shader composition.

/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Off-screen color and depth textures.
pub mod texture;

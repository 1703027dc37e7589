//! Shape geometry and its wgpu renderer.

/// Static vertex/color data.
pub mod mesh;
/// Pipeline, buffers, and draw call.
pub mod shape;

pub use mesh::ShapeMesh;
pub use shape::{DrawStats, ShapeRenderer};

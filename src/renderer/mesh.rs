//! Static vertex data for the rendered shape.

const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BROWN: [f32; 3] = [0.647_059, 0.164_706, 0.164_706];

/// Non-indexed triangle list with one RGB color per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeMesh {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
}

impl ShapeMesh {
    /// Build a mesh from per-vertex positions and colors.
    ///
    /// Returns `None` unless both slices have the same, non-zero length that
    /// is a multiple of three.
    pub fn new(positions: &[[f32; 3]], colors: &[[f32; 3]]) -> Option<Self> {
        let valid = !positions.is_empty()
            && positions.len() == colors.len()
            && positions.len() % 3 == 0;
        valid.then(|| Self {
            positions: positions.to_vec(),
            colors: colors.to_vec(),
        })
    }

    /// A flat tree: three stacked green canopy triangles (the top one 0.4
    /// wide, widening downward) over a brown two-triangle trunk.
    pub fn tree() -> Self {
        let canopy = [
            [-0.2, 0.0, 0.0],
            [0.2, 0.0, 0.0],
            [0.0, 0.2, 0.0],
            [0.4, -0.2, 0.0],
            [-0.4, -0.2, 0.0],
            [0.0, 0.0, 0.0],
            [0.6, -0.4, 0.0],
            [-0.6, -0.4, 0.0],
            [0.0, -0.2, 0.0],
        ];
        let trunk = [
            [-0.1, -0.4, 0.0],
            [-0.1, -0.6, 0.0],
            [0.1, -0.4, 0.0],
            [-0.1, -0.6, 0.0],
            [0.1, -0.6, 0.0],
            [0.1, -0.4, 0.0],
        ];

        let mut positions = Vec::with_capacity(canopy.len() + trunk.len());
        positions.extend_from_slice(&canopy);
        positions.extend_from_slice(&trunk);

        let mut colors = vec![GREEN; canopy.len()];
        colors.resize(positions.len(), BROWN);

        Self { positions, colors }
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Vertex colors.
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }
}

impl Default for ShapeMesh {
    fn default() -> Self {
        Self::tree()
    }
}

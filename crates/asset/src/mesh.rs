//! CPU-side mesh representation used by loaders.

/// Vertex with position/uv. Values are in object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}

/// Indexed triangle mesh with tightly-packed vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u16>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both buffers are non-empty and every index is in range.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty()
            && !self.indices.is_empty()
            && self
                .indices
                .iter()
                .all(|&i| (i as usize) < self.vertices.len())
    }
}

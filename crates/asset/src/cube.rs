//! Fixed geometry of the previewed block: a unit cube standing on y = 0.

use crate::mesh::{MeshData, MeshVertex};

pub const FACE_COUNT: usize = 6;

pub const CUBE_VERTICES: [[f32; 3]; 8] = [
    [0.5, 0.0, -0.5],
    [0.5, 1.0, -0.5],
    [-0.5, 1.0, -0.5],
    [-0.5, 0.0, -0.5],
    [0.5, 0.0, 0.5],
    [0.5, 1.0, 0.5],
    [-0.5, 0.0, 0.5],
    [-0.5, 1.0, 0.5],
];

/// Corner indices into [`CUBE_VERTICES`], one quad per [`Face`].
pub const CUBE_FACES: [[usize; 4]; FACE_COUNT] = [
    [0, 1, 2, 3], // back
    [4, 5, 1, 0], // right
    [6, 7, 5, 4], // front
    [3, 2, 7, 6], // left
    [1, 5, 7, 2], // top
    [4, 0, 3, 6], // bottom
];

/// Texture coordinates for the four corners of every face.
pub const FACE_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];

/// Indices per face after splitting the quad into two triangles.
pub const INDICES_PER_FACE: u32 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Back,
    Right,
    Front,
    Left,
    Top,
    Bottom,
}

impl Face {
    pub const ALL: [Face; FACE_COUNT] = [
        Face::Back,
        Face::Right,
        Face::Front,
        Face::Left,
        Face::Top,
        Face::Bottom,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Range into the index buffer built by [`cube_mesh`].
    pub fn index_range(self) -> std::ops::Range<u32> {
        let start = self.index() as u32 * INDICES_PER_FACE;
        start..start + INDICES_PER_FACE
    }
}

/// 24 vertices (4 per face, each with its own uv) and 36 indices.
pub fn cube_mesh() -> MeshData {
    let mut vertices = Vec::with_capacity(FACE_COUNT * 4);
    let mut indices = Vec::with_capacity(FACE_COUNT * INDICES_PER_FACE as usize);

    for corners in CUBE_FACES {
        let base = vertices.len() as u16;
        for (corner, uv) in corners.iter().zip(FACE_UVS) {
            vertices.push(MeshVertex::new(CUBE_VERTICES[*corner], uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_mesh_shape() {
        let mesh = cube_mesh();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.is_valid());
    }

    #[test]
    fn top_face_lies_on_y_one() {
        let mesh = cube_mesh();
        let range = Face::Top.index_range();
        assert_eq!(range, 24..30);
        for &i in &mesh.indices[range.start as usize..range.end as usize] {
            assert_eq!(mesh.vertices[i as usize].position[1], 1.0);
        }
    }

    #[test]
    fn cube_sits_on_ground_plane() {
        let min_y = CUBE_VERTICES.iter().map(|v| v[1]).fold(f32::MAX, f32::min);
        assert_eq!(min_y, 0.0);
        for v in &cube_mesh().vertices[Face::Bottom.index() * 4..] {
            assert_eq!(v.position[1], 0.0);
        }
    }

    #[test]
    fn face_order_matches_index() {
        for (i, face) in Face::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }
}

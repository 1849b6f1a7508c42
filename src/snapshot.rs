//! Flat render buffers.
//!
//! A [`MeshSnapshot`] copies vertex positions and normals into a tightly
//! packed `f32` array and the triangles into a `u32` index array, ready to
//! upload to a GPU vertex and index buffer. The snapshot does not track the
//! mesh; take a new one after editing positions or recomputing normals.

use bytemuck::{Pod, Zeroable};

use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Interleaved vertex as laid out in a render buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Render buffers captured from a mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshSnapshot {
    /// One entry per mesh vertex, in vertex order.
    pub vertices: Vec<RenderVertex>,
    /// One entry per face, in face order, following the face's winding.
    pub indices: Vec<[u32; 3]>,
}

impl MeshSnapshot {
    /// Capture the current positions, normals and triangles of `mesh`.
    ///
    /// # Panics
    /// If the mesh has more than `u32::MAX` vertices.
    pub fn capture<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Self {
        assert!(
            mesh.num_vertices() <= u32::MAX as usize,
            "mesh too large for 32-bit indices"
        );

        let vertices = (0..mesh.num_vertices())
            .map(|i| {
                let p = mesh.position_at(i);
                let n = mesh.normal_at(i);
                RenderVertex {
                    position: [p.x as f32, p.y as f32, p.z as f32],
                    normal: [n.x as f32, n.y as f32, n.z as f32],
                }
            })
            .collect();

        let indices = mesh
            .face_ids()
            .map(|f| mesh.face_triangle(f).map(|v| v.index() as u32))
            .collect();

        Self { vertices, indices }
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

//! Vertex normal computation.
//!
//! Face normals follow the winding of each face's half-edge cycle,
//! `(p1 - p0) x (p2 - p0)`. A vertex normal is the unweighted mean of the
//! unit normals of its incident faces, renormalized. Face normals are only
//! working state and are discarded afterwards.

use nalgebra::Vector3;

use crate::mesh::{FaceProperty, HalfEdgeMesh, MeshIndex, Property};

/// Unit normal of every face. Degenerate faces get a zero vector.
pub fn face_normals<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> FaceProperty<Vector3<f64>, I> {
    Property::from_vec(mesh.face_ids().map(|f| mesh.face_normal(f)).collect())
}

/// Compute and store the normal of every vertex.
///
/// Vertices without incident faces, and vertices whose face normals cancel
/// out, get a zero normal.
///
/// # Example
/// ```
/// use geolab::prelude::*;
/// use geolab::algo::normals::compute_vertex_normals;
/// use nalgebra::{Point3, Vector3};
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
/// compute_vertex_normals(&mut mesh);
/// assert_eq!(*mesh.normal(VertexId::new(0)), Vector3::z());
/// ```
pub fn compute_vertex_normals<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) {
    let face_normals = face_normals(mesh);
    compute_vertex_normals_with(mesh, &face_normals);
}

/// Compute vertex normals from face normals the caller already has.
pub fn compute_vertex_normals_with<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    face_normals: &FaceProperty<Vector3<f64>, I>,
) {
    let normals: Vec<Vector3<f64>> = mesh
        .vertex_ids()
        .map(|v| {
            let sum: Vector3<f64> = mesh.vertex_faces(v).map(|f| face_normals[f]).sum();
            sum.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros)
        })
        .collect();

    let isolated = normals.iter().filter(|n| **n == Vector3::zeros()).count();
    for (vertex, normal) in mesh.vertices.iter_mut().zip(normals) {
        vertex.normal = normal;
    }

    log::debug!(
        "computed normals for {} vertices ({} without a defined normal)",
        mesh.num_vertices(),
        isolated
    );
}

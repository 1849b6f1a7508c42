//! Bounding cube normalization.
//!
//! Translates a mesh so its axis-aligned bounding box is centred on the
//! origin and scales it uniformly so the largest half extent equals the
//! requested extent `a`. The other axes keep their proportions and end up
//! strictly inside `[-a, a]`.

use nalgebra::Point3;

use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Normalize vertex positions into the cube `[-a, a]^3`.
///
/// Vertex normals are unaffected since the transform is a translation
/// followed by a positive uniform scale. Derived frame data is dropped.
/// A mesh whose vertices all coincide is only translated.
///
/// # Panics
/// Panics if the mesh has no vertices, since its bounding box and therefore
/// its centre are undefined.
///
/// # Example
/// ```
/// use geolab::prelude::*;
/// use geolab::algo::normalize::normalize_positions;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(4.0, 0.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// ];
/// let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
/// normalize_positions(&mut mesh, 1.0);
///
/// let (min, max) = mesh.bounding_box().unwrap();
/// assert!((max.x - 1.0).abs() < 1e-12 && (min.x + 1.0).abs() < 1e-12);
/// assert!((max.y - 0.5).abs() < 1e-12);
/// ```
pub fn normalize_positions<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>, a: f64) {
    let Some((min, max)) = mesh.bounding_box() else {
        panic!("cannot normalize an empty mesh: bounding box is undefined");
    };

    let center = Point3::from((min.coords + max.coords) * 0.5);
    let half_extent = (max - min) * 0.5;
    let scale = half_extent.max();
    let factor = if scale > 0.0 { a / scale } else { 1.0 };

    log::debug!(
        "normalizing {} vertices: center {:?}, half extent {}, target {}",
        mesh.num_vertices(),
        center,
        scale,
        a
    );

    for v in mesh.vertices.iter_mut() {
        v.position = Point3::from((v.position - center) * factor);
    }
    mesh.clear_derived();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_triangles, fixtures};

    const EPS: f64 = 1e-10;

    fn stretched_box() -> HalfEdgeMesh {
        let (vertices, faces) = fixtures::unit_cube_data();
        let vertices: Vec<Point3<f64>> = vertices
            .iter()
            .map(|p| Point3::new(3.0 + 8.0 * p.x, -2.0 + 2.0 * p.y, 10.0 + 4.0 * p.z))
            .collect();
        build_from_triangles(&vertices, &faces).unwrap()
    }

    #[test]
    fn test_bounds_after_normalize() {
        let mut mesh = stretched_box();
        normalize_positions(&mut mesh, 2.0);

        for v in mesh.vertex_ids() {
            let p = mesh.position(v);
            for i in 0..3 {
                assert!(p[i].abs() <= 2.0 + EPS);
            }
        }

        let (min, max) = mesh.bounding_box().unwrap();
        // x had the largest extent and reaches the cube faces
        assert!((max.x - 2.0).abs() < EPS);
        assert!((min.x + 2.0).abs() < EPS);
        // y and z keep their proportions
        assert!((max.y - 0.5).abs() < EPS);
        assert!((max.z - 1.0).abs() < EPS);

        let center = (min.coords + max.coords) * 0.5;
        assert!(center.norm() < EPS);
    }

    #[test]
    fn test_idempotent() {
        let mut mesh = stretched_box();
        normalize_positions(&mut mesh, 1.0);
        let first: Vec<Point3<f64>> = mesh.vertex_ids().map(|v| *mesh.position(v)).collect();

        normalize_positions(&mut mesh, 1.0);
        for (v, p) in mesh.vertex_ids().zip(first.iter()) {
            assert!((mesh.position(v) - p).norm() < EPS);
        }
    }

    #[test]
    fn test_point_like_mesh_is_centred() {
        let vertices = vec![Point3::new(2.0, 2.0, 2.0); 3];
        let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
        normalize_positions(&mut mesh, 1.0);
        for v in mesh.vertex_ids() {
            assert!(mesh.position(v).coords.norm() < EPS);
            assert!(mesh.position(v).x.is_finite());
        }
    }

    #[test]
    #[should_panic(expected = "empty mesh")]
    fn test_empty_mesh_panics() {
        let mut mesh = HalfEdgeMesh::<u32>::new();
        normalize_positions(&mut mesh, 1.0);
    }
}

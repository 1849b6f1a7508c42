//! Wavefront OBJ format support.
//!
//! Parsing is done by wavefront_obj, which fans polygons into triangles.
//! Points and lines are ignored. Vertices keep the order of the `v`
//! records in the file, unreferenced ones included, so vertex `i` of the
//! mesh is the file's vertex `i + 1`.

use std::path::Path;

use ::wavefront_obj::obj::{self, Primitive};
use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_triangles, HalfEdgeMesh, MeshIndex};

/// Load a mesh from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use geolab::io::obj;
/// use geolab::mesh::HalfEdgeMesh;
///
/// let mesh: HalfEdgeMesh = obj::load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let obj_set = obj::parse(source).map_err(|e| MeshError::load(path, e))?;

    // Object indices are local to the object; concatenating objects in
    // file order restores the global `v` table.
    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<[usize; 3]> = Vec::new();
    for object in &obj_set.objects {
        let offset = vertices.len();
        vertices.extend(object.vertices.iter().map(|v| Point3::new(v.x, v.y, v.z)));

        for geometry in &object.geometry {
            for shape in &geometry.shapes {
                if let Primitive::Triangle(a, b, c) = &shape.primitive {
                    faces.push([a.0 + offset, b.0 + offset, c.0 + offset]);
                }
            }
        }
    }

    log::debug!(
        "{}: {} objects, {} vertices, {} triangles",
        path.display(),
        obj_set.objects.len(),
        vertices.len(),
        faces.len()
    );

    if faces.is_empty() {
        return Err(MeshError::load(path, "OBJ file contains no faces"));
    }

    build_from_triangles(&vertices, &faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::test_sources::{write, CUBE_OBJ};
    use crate::mesh::{FaceId, VertexId};

    #[test]
    fn test_cube() {
        let (_dir, path) = write("cube.obj", CUBE_OBJ);
        let mesh: HalfEdgeMesh = load(&path).unwrap();
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_faces(), 12);
        assert_eq!(mesh.num_edges(), 18);
        assert!(mesh.halfedge_ids().all(|he| !mesh.is_boundary_halfedge(he)));
    }

    #[test]
    fn test_unreferenced_vertex_is_kept() {
        let source = "\
v 9 9 9
v 0 0 0
v 1 0 0
v 0 1 0
f 2 3 4
";
        let (_dir, path) = write("lonely.obj", source);
        let mesh: HalfEdgeMesh = load(&path).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(*mesh.position_at(0), Point3::new(9.0, 9.0, 9.0));
        assert!(!mesh.vertex(VertexId::new(0)).halfedge.is_valid());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_vertices_keep_file_order() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 3 1 2
";
        let (_dir, path) = write("order.obj", source);
        let mesh: HalfEdgeMesh = load(&path).unwrap();
        assert_eq!(*mesh.position_at(0), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(*mesh.position_at(1), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(*mesh.position_at(2), Point3::new(0.0, 1.0, 0.0));
        assert_eq!(
            mesh.face_triangle(FaceId::new(0)).map(|v| v.index()),
            [2, 0, 1]
        );
    }

    #[test]
    fn test_quads_are_triangulated() {
        let source = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";
        let (_dir, path) = write("quad.obj", source);
        let mesh: HalfEdgeMesh = load(&path).unwrap();
        assert_eq!(mesh.num_faces(), 2);
        assert!((mesh.surface_area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_groups_share_vertices() {
        let source = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
g first
f 1 2 3
g second
f 1 3 4
";
        let (_dir, path) = write("groups.obj", source);
        let mesh: HalfEdgeMesh = load(&path).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_edges(), 5);
    }

    #[test]
    fn test_coincident_vertices_stay_separate() {
        // Two triangles touching at a point that is stored twice
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 0
v -1 0 0
v 0 -1 0
f 1 2 3
f 4 5 6
";
        let (_dir, path) = write("split.obj", source);
        let mesh: HalfEdgeMesh = load(&path).unwrap();
        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.num_faces(), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_bad_coordinate() {
        let (_dir, path) = write("bad.obj", "v 0 0 zz\nf 1 1 1\n");
        let result: Result<HalfEdgeMesh> = load(&path);
        assert!(matches!(result, Err(MeshError::LoadError { .. })));
    }

    #[test]
    fn test_no_faces() {
        let (_dir, path) = write("points.obj", "v 0 0 0\nv 1 0 0\n");
        let result: Result<HalfEdgeMesh> = load(&path);
        assert!(result.is_err());
    }
}

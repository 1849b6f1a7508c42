//! PLY (Stanford polygon) format support.
//!
//! ASCII and binary PLY are read through ply-rs. Only `x`, `y`, `z` of the
//! `vertex` element and the index list of the `face` element are used;
//! polygons are split into triangle fans.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_triangles, HalfEdgeMesh, MeshIndex};

/// Load a mesh from a PLY file.
///
/// # Example
///
/// ```no_run
/// use geolab::io::ply;
/// use geolab::mesh::HalfEdgeMesh;
///
/// let mesh: HalfEdgeMesh = ply::load("model.ply").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| MeshError::load(path, e))?;

    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| MeshError::load(path, "PLY file has no vertex element"))?;

    let mut vertices: Vec<Point3<f64>> = Vec::with_capacity(vertex_element.len());
    for vertex in vertex_element {
        let coord = |name: &str| {
            get_float_property(vertex, name)
                .ok_or_else(|| MeshError::load(path, format!("vertex missing {name} coordinate")))
        };
        vertices.push(Point3::new(coord("x")?, coord("y")?, coord("z")?));
    }

    let face_element = ply
        .payload
        .get("face")
        .ok_or_else(|| MeshError::load(path, "PLY file has no face element"))?;

    let mut faces: Vec<[usize; 3]> = Vec::with_capacity(face_element.len());
    for face in face_element {
        let indices = get_list_property(face, "vertex_indices")
            .or_else(|| get_list_property(face, "vertex_index"))
            .ok_or_else(|| MeshError::load(path, "face missing vertex_indices property"))?;

        if indices.len() < 3 {
            log::warn!("{}: skipping face with {} vertices", path.display(), indices.len());
            continue;
        }
        for i in 1..indices.len() - 1 {
            faces.push([indices[0], indices[i], indices[i + 1]]);
        }
    }

    if faces.is_empty() {
        return Err(MeshError::load(path, "PLY file contains no faces"));
    }

    build_from_triangles(&vertices, &faces)
}

fn get_float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

// Negative indices map to usize::MAX and are rejected by the builder.
fn get_list_property(element: &DefaultElement, name: &str) -> Option<Vec<usize>> {
    fn signed<T: Copy + Into<i64>>(v: &[T]) -> Vec<usize> {
        v.iter()
            .map(|&x| usize::try_from(x.into()).unwrap_or(usize::MAX))
            .collect()
    }

    match element.get(name)? {
        Property::ListInt(v) => Some(signed(v)),
        Property::ListShort(v) => Some(signed(v)),
        Property::ListChar(v) => Some(signed(v)),
        Property::ListUInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::test_sources::write;

    const QUAD_PLY: &str = "\
ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
1 1 0
0 1 0
4 0 1 2 3
";

    #[test]
    fn test_quad_is_fanned() {
        let (_dir, path) = write("quad.ply", QUAD_PLY);
        let mesh: HalfEdgeMesh = load(&path).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_edges(), 5);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_out_of_range_index() {
        let source = QUAD_PLY.replace("4 0 1 2 3", "3 0 1 7");
        let (_dir, path) = write("bad.ply", &source);
        let result: Result<HalfEdgeMesh> = load(&path);
        assert!(matches!(
            result,
            Err(MeshError::InvalidVertexIndex { vertex: 7, .. })
        ));
    }

    #[test]
    fn test_missing_faces() {
        let source = "\
ply
format ascii 1.0
element vertex 1
property float x
property float y
property float z
end_header
0 0 0
";
        let (_dir, path) = write("points.ply", source);
        let result: Result<HalfEdgeMesh> = load(&path);
        assert!(matches!(result, Err(MeshError::LoadError { .. })));
    }
}

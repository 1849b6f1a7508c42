//! STL (stereolithography) format support.
//!
//! Both binary and ASCII files are accepted. STL has no shared vertices;
//! the codec merges corners with identical coordinates, so the built mesh
//! has real connectivity. Triangles that collapse after merging are dropped.

use std::fs::File;
use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_triangles, HalfEdgeMesh, MeshIndex};

/// Load a mesh from an STL file.
///
/// # Example
///
/// ```no_run
/// use geolab::io::stl;
/// use geolab::mesh::HalfEdgeMesh;
///
/// let mesh: HalfEdgeMesh = stl::load("model.stl").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    let path = path.as_ref();
    let mut file = File::open(path)?;

    let stl = stl_io::read_stl(&mut file).map_err(|e| MeshError::load(path, e))?;

    let vertices: Vec<Point3<f64>> = stl
        .vertices
        .iter()
        .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
        .collect();

    let mut faces: Vec<[usize; 3]> = Vec::with_capacity(stl.faces.len());
    let mut skipped = 0usize;
    for tri in &stl.faces {
        let [i0, i1, i2] = tri.vertices;
        if i0 == i1 || i1 == i2 || i0 == i2 {
            skipped += 1;
            continue;
        }
        faces.push([i0, i1, i2]);
    }

    if skipped > 0 {
        log::warn!(
            "{}: skipped {} degenerate triangles",
            path.display(),
            skipped
        );
    }

    if faces.is_empty() {
        return Err(MeshError::load(path, "STL file contains no valid triangles"));
    }

    build_from_triangles(&vertices, &faces)
}

//! Per-face isometric flattening and face areas.
//!
//! Every triangle is laid out in its own 2D frame: the origin of its anchor
//! half-edge `h01` sits at `(0, 0)` and the end of `h01` at `(l01, 0)`, with
//! the third vertex placed in the upper half plane. The frame preserves edge
//! lengths and angles, so the three half-edge vectors are the building block
//! for discrete gradient and Laplace operators.
//!
//! Results are attached to the mesh as two tables that always appear and
//! disappear together:
//!
//! - [`HalfEdgeMesh::prop_halfedge_diff`]: 2D edge vector per half-edge
//!   (zero on boundary half-edges)
//! - [`HalfEdgeMesh::prop_face_area`]: area per face

use nalgebra::{Point3, Vector2};
use rayon::prelude::*;

use crate::mesh::{FaceId, FaceProperty, HalfEdgeMesh, HalfEdgeProperty, MeshIndex, Property};

/// Options for [`compute_halfedge_difference_and_face_area`].
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    /// Whether to process faces in parallel (default: true).
    pub parallel: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl FlattenOptions {
    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Local frame of one triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleFrame {
    /// Edge vectors of `h01`, `h12` and `h20`; they sum to zero.
    pub diffs: [Vector2<f64>; 3],
    /// Triangle area.
    pub area: f64,
}

/// Flatten a triangle given its corners in half-edge cycle order.
///
/// Zero-length edges and collinear corners are treated as a fold with
/// `sin = 0`: the area is zero and every edge vector lies on the x axis.
pub fn flatten_triangle(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> TriangleFrame {
    let dx01 = p1 - p0;
    let dx02 = p2 - p0;
    let l01 = dx01.norm();
    let l02 = dx02.norm();

    let denom = l01 * l02;
    let cos0 = if denom > 0.0 {
        (dx01.dot(&dx02) / denom).clamp(-1.0, 1.0)
    } else {
        1.0
    };
    let sin0 = (1.0 - cos0 * cos0).max(0.0).sqrt();

    let d01 = Vector2::new(l01, 0.0);
    let d12 = Vector2::new(l02 * cos0 - l01, l02 * sin0);
    let d20 = -d01 - d12;

    TriangleFrame {
        diffs: [d01, d12, d20],
        area: 0.5 * l01 * l02 * sin0,
    }
}

/// Local frame of one face of the mesh.
pub fn face_frame<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>) -> TriangleFrame {
    let [p0, p1, p2] = mesh.face_positions(f);
    flatten_triangle(&p0, &p1, &p2)
}

/// Compute and attach the per-half-edge 2D differences and per-face areas.
///
/// Does nothing if both tables are already attached. Otherwise every face is
/// flattened and both tables are attached at once, so callers never observe
/// one without the other.
///
/// # Example
/// ```
/// use geolab::prelude::*;
/// use geolab::algo::flatten::{compute_halfedge_difference_and_face_area, FlattenOptions};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
/// compute_halfedge_difference_and_face_area(&mut mesh, &FlattenOptions::default());
///
/// let area = mesh.prop_face_area().unwrap()[FaceId::new(0)];
/// assert!((area - 1.0).abs() < 1e-12);
/// ```
pub fn compute_halfedge_difference_and_face_area<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    options: &FlattenOptions,
) {
    if mesh.has_halfedge_difference() && mesh.has_face_area() {
        log::debug!("local frames already present, skipping");
        return;
    }

    let frames: Vec<TriangleFrame> = {
        let mesh = &*mesh;
        if options.parallel {
            (0..mesh.num_faces())
                .into_par_iter()
                .map(|i| face_frame(mesh, FaceId::new(i)))
                .collect()
        } else {
            mesh.face_ids().map(|f| face_frame(mesh, f)).collect()
        }
    };

    let mut diff: HalfEdgeProperty<Vector2<f64>, I> =
        Property::filled(mesh.num_halfedges(), Vector2::zeros());
    let mut area: FaceProperty<f64, I> = Property::filled(mesh.num_faces(), 0.0);
    for (f, frame) in mesh.face_ids().zip(&frames) {
        for (he, d) in mesh.face_halfedge_triple(f).into_iter().zip(frame.diffs) {
            diff[he] = d;
        }
        area[f] = frame.area;
    }

    log::debug!("flattened {} faces, total area {}", frames.len(), area.sum());

    mesh.attach_derived(diff, area);
}

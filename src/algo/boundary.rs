//! Boundary loop extraction.
//!
//! Boundary half-edges are linked through `next` into closed cycles, one per
//! hole. [`compute_boundaries`] scans the half-edge arena once, walks every
//! cycle it has not seen yet and reports the loops longest first.

use crate::mesh::{
    CycleIter, HalfEdgeId, HalfEdgeMesh, HalfEdgeProperty, MeshIndex, Property, VertexId,
};

/// One closed loop of boundary half-edges.
///
/// Loops are computed on demand and are not stored in the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryLoop<I: MeshIndex = u32> {
    /// The half-edge the loop was discovered from.
    pub start: HalfEdgeId<I>,
    /// Number of edges in the loop.
    pub length: usize,
}

impl<I: MeshIndex> BoundaryLoop<I> {
    /// Walk the loop's half-edges, beginning at `start`.
    pub fn halfedges<'a>(&self, mesh: &'a HalfEdgeMesh<I>) -> CycleIter<'a, I> {
        CycleIter::new(mesh, self.start)
    }

    /// Vertices along the loop, in walking order.
    pub fn vertices<'a>(
        &self,
        mesh: &'a HalfEdgeMesh<I>,
    ) -> impl Iterator<Item = VertexId<I>> + 'a {
        self.halfedges(mesh).map(move |he| mesh.origin(he))
    }

    /// Total length of the loop's edges.
    pub fn perimeter(&self, mesh: &HalfEdgeMesh<I>) -> f64 {
        self.halfedges(mesh).map(|he| mesh.edge_length(he)).sum()
    }
}

/// Find every boundary loop of the mesh.
///
/// The result is sorted by [`BoundaryLoop::length`], longest first; loops of
/// equal length keep the order in which they were found. A closed mesh has
/// no loops. Runs in time linear in the number of half-edges.
///
/// # Example
/// ```
/// use geolab::prelude::*;
/// use geolab::algo::boundary::compute_boundaries;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
/// let loops = compute_boundaries(&mesh);
/// assert_eq!(loops.len(), 1);
/// assert_eq!(loops[0].length, 3);
/// ```
pub fn compute_boundaries<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Vec<BoundaryLoop<I>> {
    let mut visited: HalfEdgeProperty<bool, I> = Property::filled(mesh.num_halfedges(), false);
    let mut loops = Vec::new();

    for he in mesh.halfedge_ids() {
        if visited[he] || !mesh.is_boundary_halfedge(he) {
            continue;
        }

        let mut boundary = BoundaryLoop { start: he, length: 0 };
        for it in boundary.halfedges(mesh) {
            debug_assert!(mesh.is_boundary_halfedge(it));
            visited[it] = true;
            boundary.length += 1;
        }
        loops.push(boundary);
    }

    // Stable, so equal lengths stay in discovery order
    loops.sort_by(|a, b| b.length.cmp(&a.length));

    log::debug!(
        "found {} boundary loops (lengths {:?})",
        loops.len(),
        loops.iter().map(|l| l.length).collect::<Vec<_>>()
    );

    loops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures;

    #[test]
    fn test_closed_mesh_has_no_boundary() {
        let mesh = fixtures::cube();
        assert!(compute_boundaries(&mesh).is_empty());
    }

    #[test]
    fn test_single_triangle() {
        let mesh = fixtures::single_triangle();
        let loops = compute_boundaries(&mesh);
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].length, 3);

        let mut verts: Vec<usize> = loops[0].vertices(&mesh).map(|v| v.index()).collect();
        verts.sort_unstable();
        assert_eq!(verts, vec![0, 1, 2]);
    }

    #[test]
    fn test_longest_first() {
        let mesh = fixtures::triangle_and_pentagon();
        let loops = compute_boundaries(&mesh);
        let lengths: Vec<usize> = loops.iter().map(|l| l.length).collect();
        assert_eq!(lengths, vec![5, 3]);

        // The rim of the fan consists of the five ring vertices
        let mut rim: Vec<usize> = loops[0].vertices(&mesh).map(|v| v.index()).collect();
        rim.sort_unstable();
        assert_eq!(rim, vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_open_box() {
        let mesh = fixtures::open_box();
        let loops = compute_boundaries(&mesh);
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].length, 4);
        assert!((loops[0].perimeter(&mesh) - 4.0).abs() < 1e-12);
        for he in loops[0].halfedges(&mesh) {
            assert!(mesh.position(mesh.origin(he)).z == 1.0);
        }
    }

    #[test]
    fn test_equal_loops_keep_discovery_order() {
        let mesh = fixtures::tube();
        let loops = compute_boundaries(&mesh);
        assert_eq!(loops.len(), 2);
        assert!(loops.iter().all(|l| l.length == 4));
        assert!(loops[0].start.index() < loops[1].start.index());

        // One loop per rim
        let rim_height = |l: &BoundaryLoop| {
            let heights: Vec<f64> = l.vertices(&mesh).map(|v| mesh.position(v).z).collect();
            assert!(heights.iter().all(|&z| z == heights[0]));
            heights[0]
        };
        assert_ne!(rim_height(&loops[0]), rim_height(&loops[1]));
    }

    #[test]
    fn test_repeated_calls_agree() {
        let mesh = fixtures::triangle_and_pentagon();
        assert_eq!(compute_boundaries(&mesh), compute_boundaries(&mesh));
    }

    #[test]
    fn test_every_boundary_halfedge_in_exactly_one_loop() {
        let mesh = fixtures::triangle_and_pentagon();
        let loops = compute_boundaries(&mesh);
        let total: usize = loops.iter().map(|l| l.length).sum();
        let boundary = mesh
            .halfedge_ids()
            .filter(|&he| mesh.is_boundary_halfedge(he))
            .count();
        assert_eq!(total, boundary);
    }
}

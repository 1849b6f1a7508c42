//! Half-edge mesh data structure.
//!
//! Connectivity is kept in three flat arenas (vertices, half-edges, faces)
//! whose entries reference each other through typed handles. Topology is
//! fixed once a mesh is built; only vertex positions, vertex normals and the
//! derived per-face properties change afterwards.
//!
//! # Structure
//!
//! - Every undirected edge is stored as two **half-edges** with opposite
//!   directions. Each half-edge knows its **opposite**, the **next** and
//!   **prev** half-edge in its cycle, its **origin** vertex and its **face**.
//! - Each vertex stores one outgoing half-edge. For boundary vertices this is
//!   always a boundary half-edge.
//! - Each face stores one half-edge of its cycle.
//!
//! # Boundary Handling
//!
//! Half-edges without a face are boundary half-edges. They are linked with
//! `next`/`prev` into closed cycles that run around the holes of the surface,
//! so every half-edge lies on exactly one finite `next` cycle.

use nalgebra::{Point3, Vector2, Vector3};

use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use super::property::{FaceProperty, HalfEdgeProperty, Property, VertexProperty};

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// Unit normal. Zero until normals have been computed, and zero for
    /// vertices without incident faces.
    pub normal: Vector3<f64>,

    /// One outgoing half-edge; invalid for isolated vertices.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create an unconnected vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// A directed half-edge.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge starts from.
    pub origin: VertexId<I>,

    /// The paired half-edge running the other way along the same edge.
    pub opposite: HalfEdgeId<I>,

    /// Successor in the face cycle, or in the boundary loop.
    pub next: HalfEdgeId<I>,

    /// Predecessor in the face cycle, or in the boundary loop.
    pub prev: HalfEdgeId<I>,

    /// Incident face; invalid for boundary half-edges.
    pub face: FaceId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a half-edge with every reference unset.
    pub fn new() -> Self {
        Self {
            origin: VertexId::invalid(),
            opposite: HalfEdgeId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
        }
    }

    /// Whether this half-edge has no incident face.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.face.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A triangular face.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge of the face cycle. It is the `h01` edge of the face's
    /// local frame.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a face anchored at the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

/// A half-edge triangle mesh.
///
/// Besides connectivity the mesh owns the derived per-face frame data
/// produced by [`crate::algo::flatten`]. Both tables are attached together
/// and dropped together.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) halfedges: Vec<HalfEdge<I>>,
    pub(crate) faces: Vec<Face<I>>,

    /// Local 2D edge vectors, one per half-edge.
    pub(crate) halfedge_diff: Option<HalfEdgeProperty<Vector2<f64>, I>>,
    /// Triangle areas, one per face.
    pub(crate) face_area: Option<FaceProperty<f64, I>>,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
            halfedge_diff: None,
            face_area: None,
        }
    }

    /// Create an empty mesh with room for the given element counts.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        // 3 half-edges per face plus headroom for boundary half-edges
        let num_halfedges = num_faces * 3 + num_faces / 2;

        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_halfedges),
            faces: Vec::with_capacity(num_faces),
            halfedge_diff: None,
            face_area: None,
        }
    }

    // ==================== Accessors ====================

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of half-edges, boundary half-edges included.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.halfedges.len() / 2
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    #[inline]
    pub(crate) fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    #[inline]
    pub(crate) fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Move a vertex.
    ///
    /// Any derived frame data no longer matches the geometry afterwards and
    /// is dropped.
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
        self.clear_derived();
    }

    /// Normal of a vertex (see [`crate::algo::normals`]).
    #[inline]
    pub fn normal(&self, v: VertexId<I>) -> &Vector3<f64> {
        &self.vertex(v).normal
    }

    /// Position of the vertex at arena index `i`, for buffer export.
    #[inline]
    pub fn position_at(&self, i: usize) -> &Point3<f64> {
        &self.vertices[i].position
    }

    /// Normal of the vertex at arena index `i`, for buffer export.
    #[inline]
    pub fn normal_at(&self, i: usize) -> &Vector3<f64> {
        &self.vertices[i].normal
    }

    // ==================== Derived Properties ====================

    /// Whether per-half-edge local frame vectors are attached.
    #[inline]
    pub fn has_halfedge_difference(&self) -> bool {
        self.halfedge_diff.is_some()
    }

    /// Whether per-face areas are attached.
    #[inline]
    pub fn has_face_area(&self) -> bool {
        self.face_area.is_some()
    }

    /// Local 2D edge vector of every half-edge, if computed.
    #[inline]
    pub fn prop_halfedge_diff(&self) -> Option<&HalfEdgeProperty<Vector2<f64>, I>> {
        self.halfedge_diff.as_ref()
    }

    /// Area of every face, if computed.
    #[inline]
    pub fn prop_face_area(&self) -> Option<&FaceProperty<f64, I>> {
        self.face_area.as_ref()
    }

    pub(crate) fn attach_derived(
        &mut self,
        diff: HalfEdgeProperty<Vector2<f64>, I>,
        area: FaceProperty<f64, I>,
    ) {
        debug_assert_eq!(diff.len(), self.num_halfedges());
        debug_assert_eq!(area.len(), self.num_faces());
        self.halfedge_diff = Some(diff);
        self.face_area = Some(area);
    }

    pub(crate) fn clear_derived(&mut self) {
        self.halfedge_diff = None;
        self.face_area = None;
    }

    // ==================== Topology Queries ====================

    #[inline]
    pub fn opposite(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).opposite
    }

    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Start vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).origin
    }

    /// End vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.origin(self.opposite(he))
    }

    /// Incident face of a half-edge (invalid on the boundary).
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Whether a vertex touches a hole. Isolated vertices count as boundary.
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        let he = self.vertex(v).halfedge;
        // The builder anchors boundary vertices on a boundary half-edge.
        !he.is_valid() || self.is_boundary_halfedge(he)
    }

    /// Whether either side of the edge is a boundary half-edge.
    #[inline]
    pub fn is_boundary_edge(&self, he: HalfEdgeId<I>) -> bool {
        self.is_boundary_halfedge(he) || self.is_boundary_halfedge(self.opposite(he))
    }

    // ==================== Iteration ====================

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Outgoing half-edges around a vertex.
    pub fn vertex_halfedges(&self, v: VertexId<I>) -> VertexHalfEdgeIter<'_, I> {
        VertexHalfEdgeIter::new(self, v)
    }

    /// Vertices sharing an edge with `v`.
    pub fn vertex_neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex_halfedges(v).map(|he| self.dest(he))
    }

    /// Faces incident to `v`.
    pub fn vertex_faces(&self, v: VertexId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.vertex_halfedges(v)
            .map(|he| self.face_of(he))
            .filter(|f| f.is_valid())
    }

    /// Half-edges of a face, starting at its anchor half-edge.
    pub fn face_halfedges(&self, f: FaceId<I>) -> CycleIter<'_, I> {
        CycleIter::new(self, self.face(f).halfedge)
    }

    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_halfedges(f).map(|he| self.origin(he))
    }

    /// The `(h01, h12, h20)` half-edges of a triangle in cycle order.
    #[inline]
    pub fn face_halfedge_triple(&self, f: FaceId<I>) -> [HalfEdgeId<I>; 3] {
        let h01 = self.face(f).halfedge;
        let h12 = self.next(h01);
        [h01, h12, self.next(h12)]
    }

    /// The three vertices of a triangle in cycle order.
    pub fn face_triangle(&self, f: FaceId<I>) -> [VertexId<I>; 3] {
        self.face_halfedge_triple(f).map(|he| self.origin(he))
    }

    pub fn face_positions(&self, f: FaceId<I>) -> [Point3<f64>; 3] {
        self.face_triangle(f).map(|v| *self.position(v))
    }

    // ==================== Geometry ====================

    /// Vector from origin to destination of a half-edge.
    pub fn edge_vector(&self, he: HalfEdgeId<I>) -> Vector3<f64> {
        self.position(self.dest(he)) - self.position(self.origin(he))
    }

    pub fn edge_length(&self, he: HalfEdgeId<I>) -> f64 {
        self.edge_vector(he).norm()
    }

    /// Unit normal of a face following its cycle winding. Zero for
    /// degenerate triangles.
    pub fn face_normal(&self, f: FaceId<I>) -> Vector3<f64> {
        let [p0, p1, p2] = self.face_positions(f);
        (p1 - p0)
            .cross(&(p2 - p0))
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Area of a face from the cross product of two edges.
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        let [p0, p1, p2] = self.face_positions(f);
        0.5 * (p1 - p0).cross(&(p2 - p0)).norm()
    }

    pub fn surface_area(&self) -> f64 {
        self.face_ids().map(|f| self.face_area(f)).sum()
    }

    /// Axis-aligned bounding box `(min, max)`, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (min.inf(&v.position), max.sup(&v.position))
        }))
    }

    // ==================== Construction ====================

    /// Add an unconnected vertex.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        id
    }

    // ==================== Validation ====================

    /// Check every connectivity invariant.
    ///
    /// - `opposite(opposite(h)) == h` and the two share their end points
    ///   swapped;
    /// - `next`/`prev` are inverse to each other and every `next` cycle
    ///   closes;
    /// - face cycles have length 3 and all of their half-edges reference the
    ///   face, while boundary cycles contain no face;
    /// - a vertex's half-edge starts at that vertex, and walking its fan
    ///   reaches every face the vertex belongs to.
    pub fn is_valid(&self) -> bool {
        let n = self.halfedges.len();

        for (i, v) in self.vertices.iter().enumerate() {
            if v.halfedge.is_valid() && self.origin(v.halfedge).index() != i {
                return false;
            }
        }

        for (i, he) in self.halfedges.iter().enumerate() {
            let id = HalfEdgeId::<I>::new(i);
            if !he.opposite.is_valid() || !he.next.is_valid() || !he.prev.is_valid() {
                return false;
            }
            let opp = self.halfedge(he.opposite);
            if opp.opposite != id || opp.origin == he.origin {
                return false;
            }
            if self.dest(id) != self.origin(he.next) {
                return false;
            }
            if self.prev(he.next) != id || self.next(he.prev) != id {
                return false;
            }
            if he.face != self.face_of(he.next) {
                return false;
            }

            // next cycles must close within the arena size
            let mut cur = he.next;
            let mut steps = 1;
            while cur != id {
                if steps > n {
                    return false;
                }
                cur = self.next(cur);
                steps += 1;
            }
            if !he.is_boundary() && steps != 3 {
                return false;
            }
        }

        for (i, f) in self.faces.iter().enumerate() {
            if !f.halfedge.is_valid() || self.face_of(f.halfedge).index() != i {
                return false;
            }
        }

        self.find_pinched_vertex().is_none()
    }

    /// First vertex whose fan misses some of its faces, which happens when
    /// several fans meet at one vertex.
    pub(crate) fn find_pinched_vertex(&self) -> Option<VertexId<I>> {
        let mut corners: VertexProperty<usize, I> = Property::filled(self.num_vertices(), 0);
        for f in self.face_ids() {
            for v in self.face_triangle(f) {
                corners[v] += 1;
            }
        }
        self.vertex_ids()
            .find(|&v| self.vertex_faces(v).count() != corners[v])
    }
}

/// Iterator over the outgoing half-edges of a vertex.
pub struct VertexHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> VertexHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, v: VertexId<I>) -> Self {
        let start = mesh.vertex(v).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<I: MeshIndex> Iterator for VertexHalfEdgeIter<'_, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;

        // he: v -> w, opposite(he): w -> v, and the half-edge after that
        // leaves v again.
        self.current = self.mesh.next(self.mesh.opposite(self.current));
        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

/// Iterator along a `next` cycle: a face or a boundary loop.
pub struct CycleIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> CycleIter<'a, I> {
    pub(crate) fn new(mesh: &'a HalfEdgeMesh<I>, start: HalfEdgeId<I>) -> Self {
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<I: MeshIndex> Iterator for CycleIter<'_, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.next(self.current);
        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_triangles, fixtures};

    #[test]
    fn test_vertex_creation() {
        let v = Vertex::<u32>::new(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(v.normal, Vector3::zeros());
        assert!(!v.halfedge.is_valid());
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::<u32>::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.num_halfedges(), 0);
        assert!(mesh.bounding_box().is_none());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_cube_topology() {
        let mesh = fixtures::cube();
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_faces(), 12);
        assert_eq!(mesh.num_halfedges(), 36);
        assert_eq!(mesh.num_edges(), 18);
        assert!(mesh.is_valid());

        for he in mesh.halfedge_ids() {
            assert_eq!(mesh.opposite(mesh.opposite(he)), he);
            assert_eq!(mesh.origin(mesh.opposite(he)), mesh.dest(he));
            assert!(!mesh.is_boundary_halfedge(he));
        }
        for f in mesh.face_ids() {
            assert_eq!(mesh.face_halfedges(f).count(), 3);
        }
    }

    #[test]
    fn test_vertex_fans() {
        let mesh = fixtures::cube();
        // Corner 0 of the cube is shared by six triangles
        let v0 = VertexId::new(0);
        assert_eq!(mesh.vertex_faces(v0).count(), 6);
        let mut neighbors: Vec<usize> = mesh.vertex_neighbors(v0).map(|v| v.index()).collect();
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![1, 2, 3, 4, 5, 7]);
        for he in mesh.vertex_halfedges(v0) {
            assert_eq!(mesh.origin(he), v0);
        }
    }

    #[test]
    fn test_boundary_queries() {
        let mesh = fixtures::single_triangle();
        for v in mesh.vertex_ids() {
            assert!(mesh.is_boundary_vertex(v));
            assert_eq!(mesh.vertex_faces(v).count(), 1);
        }
        let f = FaceId::new(0);
        for he in mesh.face_halfedges(f) {
            assert!(!mesh.is_boundary_halfedge(he));
            assert!(mesh.is_boundary_edge(he));
        }
    }

    #[test]
    fn test_face_geometry() {
        let mesh = fixtures::single_triangle();
        let f = FaceId::new(0);
        assert!((mesh.face_area(f) - 0.5).abs() < 1e-12);
        let n = mesh.face_normal(f);
        assert!((n - Vector3::z()).norm() < 1e-12);
        assert_eq!(
            mesh.face_triangle(f).map(|v| v.index()),
            [0, 1, 2]
        );
    }

    #[test]
    fn test_cube_bounding_box() {
        let mesh = fixtures::cube();
        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 1.0));
        assert!((mesh.surface_area() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_position_drops_derived() {
        let mut mesh = fixtures::single_triangle();
        mesh.attach_derived(
            Property::filled(mesh.num_halfedges(), Vector2::zeros()),
            Property::filled(mesh.num_faces(), 0.0),
        );
        assert!(mesh.has_halfedge_difference() && mesh.has_face_area());

        mesh.set_position(VertexId::new(0), Point3::new(-1.0, 0.0, 0.0));
        assert!(!mesh.has_halfedge_difference());
        assert!(!mesh.has_face_area());
    }

    #[test]
    fn test_is_valid_detects_pinched_vertex() {
        let (vertices, faces) = fixtures::two_tetrahedra_data();
        let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
        assert!(mesh.is_valid());

        // Glue the second apex onto the first
        let (apex, glued) = (VertexId::new(0), VertexId::new(4));
        let moved: Vec<HalfEdgeId> = mesh
            .halfedge_ids()
            .filter(|&he| mesh.origin(he) == glued)
            .collect();
        for he in moved {
            mesh.halfedge_mut(he).origin = apex;
        }
        mesh.vertex_mut(glued).halfedge = HalfEdgeId::invalid();

        assert_eq!(mesh.vertex_faces(apex).count(), 3);
        assert_eq!(mesh.find_pinched_vertex(), Some(apex));
        assert!(!mesh.is_valid());
    }

    #[test]
    fn test_is_valid_detects_broken_opposite() {
        let mut mesh = fixtures::single_triangle();
        let he = HalfEdgeId::new(0);
        mesh.halfedge_mut(he).opposite = HalfEdgeId::new(1);
        assert!(!mesh.is_valid());
    }
}

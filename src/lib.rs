//! # Geolab
//!
//! A half-edge triangle mesh kernel for geometry processing experiments.
//!
//! Geolab loads a triangle mesh from disk into a half-edge connectivity
//! store and prepares the per-element data that discrete differential
//! operators are built on.
//!
//! ## Features
//!
//! - **Half-edge data structure**: O(1) adjacency queries with type-safe handles
//! - **Flexible indexing**: 16-bit, 32-bit and 64-bit handles
//! - **Typed side tables**: per-vertex, per-half-edge and per-face properties
//! - **Loading**: OBJ, STL and PLY, with vertex normals and normalization
//! - **Boundary loops**: every hole, longest first
//! - **Local frames**: per-face isometric flattening and face areas, in parallel
//! - **Render buffers**: packed `f32` vertices and `u32` indices
//!
//! ## Quick Start
//!
//! ```no_run
//! use geolab::prelude::*;
//!
//! // Load a mesh, normalized into [-1, 1]^3 with vertex normals
//! let mut mesh: HalfEdgeMesh = geolab::io::load("model.obj").unwrap();
//!
//! for hole in compute_boundaries(&mesh) {
//!     println!("boundary loop with {} edges", hole.length);
//! }
//!
//! compute_halfedge_difference_and_face_area(&mut mesh, &FlattenOptions::default());
//! let area: f64 = mesh.prop_face_area().unwrap().sum();
//! println!("surface area: {}", area);
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use geolab::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let faces = vec![
//!     [0, 2, 1], // bottom
//!     [0, 1, 3], // front
//!     [1, 2, 3], // right
//!     [2, 0, 3], // left
//! ];
//!
//! let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! compute_vertex_normals(&mut mesh);
//! assert_eq!(mesh.num_vertices(), 4);
//! assert!(compute_boundaries(&mesh).is_empty());
//! ```
//!
//! ## Mesh Traversal
//!
//! ```
//! use geolab::prelude::*;
//! use nalgebra::Point3;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0),
//! # ];
//! # let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
//! let v = VertexId::new(0);
//! for neighbor in mesh.vertex_neighbors(v) {
//!     println!("Neighbor: {:?}", neighbor);
//! }
//!
//! let f = FaceId::new(0);
//! for he in mesh.face_halfedges(f) {
//!     println!("{:?} -> {:?}", mesh.origin(he), mesh.dest(he));
//! }
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;
pub mod snapshot;

/// Prelude module for convenient imports.
///
/// ```
/// use geolab::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        compute_boundaries, compute_halfedge_difference_and_face_area, compute_vertex_normals,
        normalize_positions, BoundaryLoop, FlattenOptions,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::io::LoadOptions;
    pub use crate::mesh::{
        build_from_triangles, Face, FaceId, FaceProperty, HalfEdge, HalfEdgeId, HalfEdgeMesh,
        HalfEdgeProperty, MeshIndex, Property, Vertex, VertexId, VertexProperty,
    };
    pub use crate::snapshot::{MeshSnapshot, RenderVertex};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

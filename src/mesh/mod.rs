//! Half-edge connectivity store.
//!
//! The primary type is [`HalfEdgeMesh`], a triangle mesh held in flat arenas
//! of vertices, half-edges and faces that refer to each other through typed
//! handles ([`VertexId`], [`HalfEdgeId`], [`FaceId`]). Per-element data that
//! is computed on demand lives in [`Property`] tables keyed by those handles.
//!
//! ```
//! use geolab::mesh::{build_from_triangles, HalfEdgeMesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
//! assert!(mesh.is_valid());
//! ```

mod builder;
mod halfedge;
mod index;
mod property;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::build_from_triangles;
pub use halfedge::{CycleIter, Face, HalfEdge, HalfEdgeMesh, Vertex, VertexHalfEdgeIter};
pub use index::{ElementId, FaceId, HalfEdgeId, MeshIndex, VertexId};
pub use property::{FaceProperty, HalfEdgeProperty, Property, VertexProperty};

//! Mesh kernel algorithms.
//!
//! - [`normalize`]: translate and scale positions into a bounding cube
//! - [`normals`]: face and vertex normals
//! - [`boundary`]: boundary loop extraction, longest loop first
//! - [`flatten`]: per-face local 2D frames and face areas
//!
//! All algorithms are synchronous and deterministic. Only flattening runs
//! in parallel, since each face reads and writes nothing but its own data.

pub mod boundary;
pub mod flatten;
pub mod normalize;
pub mod normals;

pub use boundary::{compute_boundaries, BoundaryLoop};
pub use flatten::{compute_halfedge_difference_and_face_area, FlattenOptions};
pub use normalize::normalize_positions;
pub use normals::compute_vertex_normals;

//! Error types for geolab.
//!
//! Loading is the only fallible stage of the kernel. Every `Err` returned by
//! the [`crate::io`] entry points is a load failure; the variant tells why.
//! Misuse of the algorithms on an unsuitable mesh (such as normalizing an
//! empty one) is a programming error and panics instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building or loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The source has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references a vertex that does not exist.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face repeats a vertex.
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// The directed edge `v0 -> v1` is used by more than one face, either
    /// because more than two faces share the edge or because neighbouring
    /// faces disagree on orientation.
    #[error("directed edge ({v0}, {v1}) is used by more than one face")]
    NonManifoldEdge {
        /// Start vertex of the edge.
        v0: usize,
        /// End vertex of the edge.
        v1: usize,
    },

    /// A vertex joins several separate fans of faces, along the boundary or
    /// as a pinch point between closed fans.
    #[error("vertex {vertex} is non-manifold")]
    NonManifoldVertex {
        /// The vertex index.
        vertex: usize,
    },

    /// More elements than the handle type can address.
    #[error("{count} {kind} do not fit the index type (at most {max})")]
    TooManyElements {
        /// Element kind, such as "vertices" or "half-edges".
        kind: &'static str,
        /// Number of elements required.
        count: usize,
        /// Largest count the index type supports.
        max: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The codec could not parse the source.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// No codec for this file extension.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn load(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        MeshError::LoadError {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

//! Mesh loading.
//!
//! Parsing is delegated to a format codec chosen by file extension; the
//! codec yields positions and triangles which are built into connectivity.
//! [`load_with_options`] then finishes the mesh the way every consumer
//! expects it: vertex normals are always computed, and positions are
//! normalized into the cube `[-extent, extent]^3` unless disabled.
//!
//! | Format | Extension | Codec |
//! |--------|-----------|-------|
//! | Wavefront OBJ | `.obj` | wavefront_obj |
//! | STL | `.stl` | stl_io (binary and ASCII) |
//! | PLY | `.ply` | ply-rs |
//!
//! ```no_run
//! use geolab::io::{self, LoadOptions};
//! use geolab::mesh::HalfEdgeMesh;
//!
//! // Normalized into [-1, 1]^3
//! let mesh: HalfEdgeMesh = io::load("bunny.obj").unwrap();
//!
//! // Original coordinates
//! let raw: HalfEdgeMesh = io::load_with_options("bunny.obj", &LoadOptions::raw()).unwrap();
//! ```

pub mod obj;
pub mod ply;
pub mod stl;

use std::path::Path;

use crate::algo::{normalize::normalize_positions, normals::compute_vertex_normals};
use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
    /// STL (stereolithography) format.
    Stl,
    /// PLY (Stanford polygon) format.
    Ply,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            "stl" => Some(Format::Stl),
            "ply" => Some(Format::Ply),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

/// Post-processing applied by [`load_with_options`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether to normalize positions into the bounding cube (default: true).
    pub normalize: bool,

    /// Half width of the bounding cube (default: 1.0).
    pub extent: f64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            extent: 1.0,
        }
    }
}

impl LoadOptions {
    /// Options that keep the source coordinates.
    pub fn raw() -> Self {
        Self {
            normalize: false,
            ..Self::default()
        }
    }

    /// Set whether to normalize positions.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set the half width of the bounding cube.
    ///
    /// # Errors
    /// [`MeshError::InvalidParameter`] unless `extent` is finite and positive.
    pub fn with_extent(mut self, extent: f64) -> Result<Self> {
        if !extent.is_finite() || extent <= 0.0 {
            return Err(MeshError::invalid_param(
                "extent",
                extent,
                "must be finite and positive",
            ));
        }
        self.extent = extent;
        Ok(self)
    }
}

/// Load a mesh with default options: normals computed, positions
/// normalized into `[-1, 1]^3`.
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    load_with_options(path, &LoadOptions::default())
}

/// Load a mesh, compute its vertex normals and optionally normalize it.
///
/// On failure nothing is returned; there is no partially loaded mesh.
pub fn load_with_options<P: AsRef<Path>, I: MeshIndex>(
    path: P,
    options: &LoadOptions,
) -> Result<HalfEdgeMesh<I>> {
    let path = path.as_ref();
    let mut mesh = read(path).map_err(|e| {
        log::error!("failed to load {}: {}", path.display(), e);
        e
    })?;

    compute_vertex_normals(&mut mesh);
    if options.normalize {
        normalize_positions(&mut mesh, options.extent);
    }

    log::info!(
        "loaded {}: {} vertices, {} faces, {} edges",
        path.display(),
        mesh.num_vertices(),
        mesh.num_faces(),
        mesh.num_edges()
    );

    Ok(mesh)
}

/// Parse a mesh file into connectivity only, with no normals and no
/// normalization.
pub fn read<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    match format {
        Format::Obj => obj::load(path),
        Format::Stl => stl::load(path),
        Format::Ply => ply::load(path),
    }
}

//! Mesh construction from face-vertex lists.
//!
//! Codecs hand over plain positions and index triples; this module turns
//! them into linked half-edge connectivity, creating boundary half-edges for
//! unpaired edges and chaining those into closed loops.

use std::collections::HashMap;

use nalgebra::Point3;

use super::halfedge::{Face, HalfEdge, HalfEdgeMesh};
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a half-edge mesh from vertices and triangle faces.
///
/// Faces must be consistently oriented; each face's half-edge cycle follows
/// the order of its index triple and the face is anchored at the half-edge
/// leaving `face[0]`.
///
/// # Errors
/// - [`MeshError::EmptyMesh`] if `faces` is empty
/// - [`MeshError::InvalidVertexIndex`] / [`MeshError::DegenerateFace`] for
///   bad index triples
/// - [`MeshError::NonManifoldEdge`] if a directed edge appears twice
/// - [`MeshError::NonManifoldVertex`] if a vertex lies on two holes at once
///   or joins several fans of faces
/// - [`MeshError::TooManyElements`] if the vertices or half-edges do not fit
///   the handle type `I`
///
/// # Example
/// ```
/// use geolab::mesh::{build_from_triangles, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
/// assert_eq!(mesh.num_halfedges(), 6);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<HalfEdgeMesh<I>> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    for (fi, face) in faces.iter().enumerate() {
        if let Some(&vi) = face.iter().find(|&&vi| vi >= vertices.len()) {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
            return Err(MeshError::DegenerateFace { face: fi });
        }
    }

    check_capacity::<I>("vertices", vertices.len())?;
    check_capacity::<I>("half-edges", faces.len().saturating_mul(3))?;

    let mut mesh = HalfEdgeMesh::with_capacity(vertices.len(), faces.len());
    for &pos in vertices {
        mesh.add_vertex(pos);
    }

    // Directed edge (from, to) -> half-edge
    let mut edge_map: HashMap<(usize, usize), HalfEdgeId<I>> =
        HashMap::with_capacity(faces.len() * 3);

    for face in faces {
        let face_id = FaceId::<I>::new(mesh.num_faces());
        let base = mesh.num_halfedges();
        let ids = [0, 1, 2].map(|k| HalfEdgeId::<I>::new(base + k));
        mesh.faces.push(Face::new(ids[0]));

        for k in 0..3 {
            let (from, to) = (face[k], face[(k + 1) % 3]);
            if edge_map.insert((from, to), ids[k]).is_some() {
                return Err(MeshError::NonManifoldEdge { v0: from, v1: to });
            }

            mesh.halfedges.push(HalfEdge {
                origin: VertexId::new(from),
                next: ids[(k + 1) % 3],
                prev: ids[(k + 2) % 3],
                face: face_id,
                ..HalfEdge::new()
            });
            mesh.vertex_mut(VertexId::new(from)).halfedge = ids[k];
        }
    }

    let unpaired = edge_map
        .keys()
        .filter(|&&(from, to)| !edge_map.contains_key(&(to, from)))
        .count();
    check_capacity::<I>("half-edges", mesh.num_halfedges() + unpaired)?;

    // Pair half-edges; unpaired ones get a boundary partner. Faces are
    // walked in input order so boundary half-edge ids are deterministic.
    for face in faces {
        for k in 0..3 {
            let (from, to) = (face[k], face[(k + 1) % 3]);
            let he = edge_map[&(from, to)];
            if mesh.opposite(he).is_valid() {
                continue;
            }
            match edge_map.get(&(to, from)) {
                Some(&opp) => {
                    mesh.halfedge_mut(he).opposite = opp;
                    mesh.halfedge_mut(opp).opposite = he;
                }
                None => {
                    let boundary = HalfEdgeId::<I>::new(mesh.num_halfedges());
                    mesh.halfedges.push(HalfEdge {
                        origin: VertexId::new(to),
                        opposite: he,
                        ..HalfEdge::new()
                    });
                    mesh.halfedge_mut(he).opposite = boundary;
                }
            }
        }
    }

    link_boundary_loops(&mut mesh)?;

    if let Some(v) = mesh.find_pinched_vertex() {
        return Err(MeshError::NonManifoldVertex { vertex: v.index() });
    }

    Ok(mesh)
}

fn check_capacity<I: MeshIndex>(kind: &'static str, count: usize) -> Result<()> {
    // The largest value is reserved for invalid handles
    let max = I::INVALID.to_usize();
    if count > max {
        return Err(MeshError::TooManyElements { kind, count, max });
    }
    Ok(())
}

/// Chain boundary half-edges into loops and anchor boundary vertices on them.
fn link_boundary_loops<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) -> Result<()> {
    let boundary: Vec<HalfEdgeId<I>> = mesh
        .halfedge_ids()
        .filter(|&he| mesh.is_boundary_halfedge(he))
        .collect();

    // On a manifold surface each vertex has at most one outgoing boundary
    // half-edge, which makes the successor of every boundary half-edge unique.
    let mut outgoing: HashMap<VertexId<I>, HalfEdgeId<I>> =
        HashMap::with_capacity(boundary.len());
    for &he in &boundary {
        let origin = mesh.origin(he);
        if outgoing.insert(origin, he).is_some() {
            return Err(MeshError::NonManifoldVertex {
                vertex: origin.index(),
            });
        }
    }

    for &he in &boundary {
        let dest = mesh.dest(he);
        let next = *outgoing.get(&dest).ok_or(MeshError::NonManifoldVertex {
            vertex: dest.index(),
        })?;
        mesh.halfedge_mut(he).next = next;
        mesh.halfedge_mut(next).prev = he;
    }

    for (v, he) in outgoing {
        mesh.vertex_mut(v).halfedge = he;
    }

    Ok(())
}

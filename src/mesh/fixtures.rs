//! Small meshes shared by the unit tests.

use nalgebra::Point3;

use super::{build_from_triangles, HalfEdgeMesh};

pub(crate) fn unit_cube_data() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    // Outward facing, two right triangles per side
    let faces = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    (vertices, faces)
}

/// Closed unit cube, 8 vertices and 12 faces.
pub(crate) fn cube() -> HalfEdgeMesh {
    let (vertices, faces) = unit_cube_data();
    build_from_triangles(&vertices, &faces).unwrap()
}

/// Unit cube without its top side: one boundary loop of length 4.
pub(crate) fn open_box() -> HalfEdgeMesh {
    let (vertices, faces) = unit_cube_data();
    let faces: Vec<[usize; 3]> = faces
        .into_iter()
        .filter(|f| *f != [4, 5, 6] && *f != [4, 6, 7])
        .collect();
    build_from_triangles(&vertices, &faces).unwrap()
}

/// Unit cube without top and bottom: one component, two boundary loops of
/// length 4 at z = 0 and z = 1.
pub(crate) fn tube() -> HalfEdgeMesh {
    let (vertices, faces) = unit_cube_data();
    let faces: Vec<[usize; 3]> = faces.into_iter().skip(4).collect();
    build_from_triangles(&vertices, &faces).unwrap()
}

/// Two disjoint closed tetrahedra whose apexes 0 and 4 coincide in space.
pub(crate) fn two_tetrahedra_data() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 0.0, -1.0),
    ];
    let faces = vec![
        [0, 2, 1],
        [0, 1, 3],
        [0, 3, 2],
        [1, 2, 3],
        [4, 5, 6],
        [4, 7, 5],
        [4, 6, 7],
        [5, 7, 6],
    ];
    (vertices, faces)
}

/// Right triangle with legs of length 1 in the z = 0 plane.
pub(crate) fn single_triangle() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap()
}

/// Two disjoint patches: a lone triangle (listed first) and a five-triangle
/// fan whose rim is a loop of length 5.
pub(crate) fn triangle_and_pentagon() -> HalfEdgeMesh {
    let mut vertices = vec![
        Point3::new(5.0, 0.0, 0.0),
        Point3::new(6.0, 0.0, 0.0),
        Point3::new(5.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 0.0),
    ];
    for k in 0..5 {
        let angle = k as f64 * std::f64::consts::TAU / 5.0;
        vertices.push(Point3::new(angle.cos(), angle.sin(), 0.0));
    }
    let mut faces = vec![[0, 1, 2]];
    for k in 0..5 {
        faces.push([3, 4 + k, 4 + (k + 1) % 5]);
    }
    build_from_triangles(&vertices, &faces).unwrap()
}

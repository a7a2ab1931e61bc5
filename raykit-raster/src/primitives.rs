//! Procedural meshes

use raykit_core::{Color, Point3f, TriangleMesh};
use std::collections::HashMap;

/// The `[-1, 1]³` box: 8 corners, 12 outward-wound triangles, white vertices
pub fn unit_box() -> TriangleMesh {
    let vertices = vec![
        Point3f::new(-1.0, -1.0, -1.0),
        Point3f::new(-1.0, -1.0, 1.0),
        Point3f::new(-1.0, 1.0, -1.0),
        Point3f::new(-1.0, 1.0, 1.0),
        Point3f::new(1.0, -1.0, -1.0),
        Point3f::new(1.0, -1.0, 1.0),
        Point3f::new(1.0, 1.0, -1.0),
        Point3f::new(1.0, 1.0, 1.0),
    ];
    let faces = vec![
        [0, 1, 2],
        [1, 3, 2],
        [2, 3, 6],
        [3, 7, 6],
        [0, 2, 4],
        [2, 6, 4],
        [0, 4, 1],
        [1, 4, 5],
        [4, 6, 5],
        [5, 6, 7],
        [1, 5, 3],
        [3, 5, 7],
    ];
    let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
    mesh.set_colors(vec![Color::WHITE; 8]);
    mesh
}

/// A unit-radius icosphere.
///
/// Starts from an icosahedron and splits every triangle into four `level`
/// times, pushing new vertices onto the sphere. The result has
/// `10 * 4^level + 2` vertices and `20 * 4^level` faces.
pub fn icosphere(level: u32) -> TriangleMesh {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let mut vertices: Vec<Point3f> = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Point3f::from(nalgebra::Vector3::new(x, y, z).normalize()))
    .collect();

    let mut faces: Vec<[usize; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for _ in 0..level {
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut midpoint = |a: usize, b: usize, vertices: &mut Vec<Point3f>| -> usize {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let mid = (vertices[a].coords + vertices[b].coords).normalize();
                vertices.push(Point3f::from(mid));
                vertices.len() - 1
            })
        };

        let mut next = Vec::with_capacity(faces.len() * 4);
        for &[a, b, c] in &faces {
            let ab = midpoint(a, b, &mut vertices);
            let bc = midpoint(b, c, &mut vertices);
            let ca = midpoint(c, a, &mut vertices);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }
        faces = next;
    }

    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

//! Geometric losses with analytic per-vertex gradients
//!
//! Every loss returns its value together with the gradient with respect to
//! each vertex position, in vertex order.

use raykit_core::{BruteForceSearch, Error, Point3f, Result, Vector3f};
use rayon::prelude::*;

/// Mean squared nearest-neighbor distance from `from` to `to`
fn directed_chamfer(from: &[Point3f], to: &BruteForceSearch) -> f32 {
    let total: f32 = to
        .find_nearest_batch(from)
        .into_iter()
        .flatten()
        .map(|(_, d2)| d2)
        .sum();
    total / from.len() as f32
}

fn check_non_empty(points: &[Point3f], what: &str) -> Result<()> {
    if points.is_empty() {
        return Err(Error::InvalidData(format!("{} point set is empty", what)));
    }
    Ok(())
}

/// Symmetric chamfer distance between two point sets.
///
/// The mean squared distance from each point of `a` to its nearest point in
/// `b`, plus the same measured from `b` to `a`.
pub fn chamfer_distance(a: &[Point3f], b: &[Point3f]) -> Result<f32> {
    check_non_empty(a, "first")?;
    check_non_empty(b, "second")?;
    let search_a = BruteForceSearch::new(a);
    let search_b = BruteForceSearch::new(b);
    Ok(directed_chamfer(a, &search_b) + directed_chamfer(b, &search_a))
}

/// Chamfer distance between mesh vertices and fixed target samples, with the
/// gradient with respect to the vertices.
///
/// Nearest-neighbor assignments are held fixed when differentiating.
pub fn chamfer_loss(vertices: &[Point3f], target: &[Point3f]) -> Result<(f32, Vec<Vector3f>)> {
    check_non_empty(vertices, "vertex")?;
    check_non_empty(target, "target")?;

    let n_src = vertices.len() as f32;
    let n_tgt = target.len() as f32;
    let mut grad = vec![Vector3f::zeros(); vertices.len()];
    let mut loss = 0.0;

    let target_search = BruteForceSearch::new(target);
    for (i, nearest) in target_search.find_nearest_batch(vertices).into_iter().enumerate() {
        if let Some((j, d2)) = nearest {
            loss += d2 / n_src;
            grad[i] += (vertices[i] - target[j]) * (2.0 / n_src);
        }
    }

    let vertex_search = BruteForceSearch::new(vertices);
    for (j, nearest) in vertex_search.find_nearest_batch(target).into_iter().enumerate() {
        if let Some((i, d2)) = nearest {
            loss += d2 / n_tgt;
            grad[i] += (vertices[i] - target[j]) * (2.0 / n_tgt);
        }
    }

    Ok((loss, grad))
}

/// Mean squared edge length, pulling every edge toward zero length
pub fn edge_loss(vertices: &[Point3f], edges: &[(usize, usize)]) -> (f32, Vec<Vector3f>) {
    let mut grad = vec![Vector3f::zeros(); vertices.len()];
    if edges.is_empty() {
        return (0.0, grad);
    }
    let n = edges.len() as f32;
    let mut loss = 0.0;
    for &(a, b) in edges {
        let d = vertices[a] - vertices[b];
        loss += d.norm_squared() / n;
        let g = d * (2.0 / n);
        grad[a] += g;
        grad[b] -= g;
    }
    (loss, grad)
}

/// Uniform Laplacian smoothing loss.
///
/// The residual of vertex `i` is `v_i - mean(neighbors(i))`; the loss is the
/// mean squared residual norm. Vertices without neighbors contribute nothing.
pub fn laplacian_loss(vertices: &[Point3f], neighbors: &[Vec<usize>]) -> (f32, Vec<Vector3f>) {
    let mut grad = vec![Vector3f::zeros(); vertices.len()];
    if vertices.is_empty() {
        return (0.0, grad);
    }
    let n = vertices.len() as f32;

    let residuals: Vec<Vector3f> = neighbors
        .par_iter()
        .enumerate()
        .map(|(i, nbrs)| {
            if nbrs.is_empty() {
                return Vector3f::zeros();
            }
            let sum = nbrs
                .iter()
                .fold(Vector3f::zeros(), |acc, &j| acc + vertices[j].coords);
            vertices[i].coords - sum / nbrs.len() as f32
        })
        .collect();

    let loss = residuals.iter().map(|r| r.norm_squared()).sum::<f32>() / n;

    for (i, (nbrs, r)) in neighbors.iter().zip(&residuals).enumerate() {
        if nbrs.is_empty() {
            continue;
        }
        grad[i] += r * (2.0 / n);
        let share = r * (2.0 / (n * nbrs.len() as f32));
        for &j in nbrs {
            grad[j] -= share;
        }
    }

    (loss, grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use raykit_core::TriangleMesh;

    fn tetrahedron() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.1, 0.0, 0.0),
                Point3f::new(1.0, 0.2, 0.0),
                Point3f::new(0.0, 1.1, 0.3),
                Point3f::new(0.2, 0.3, 0.9),
            ],
            vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        )
    }

    /// Central differences of `f` around `vertices`
    fn numeric_gradient<F: Fn(&[Point3f]) -> f32>(vertices: &[Point3f], f: F) -> Vec<Vector3f> {
        let h = 1e-3;
        let mut out = vec![Vector3f::zeros(); vertices.len()];
        for i in 0..vertices.len() {
            for axis in 0..3 {
                let mut plus = vertices.to_vec();
                let mut minus = vertices.to_vec();
                plus[i][axis] += h;
                minus[i][axis] -= h;
                out[i][axis] = (f(&plus) - f(&minus)) / (2.0 * h);
            }
        }
        out
    }

    fn assert_gradients_match(analytic: &[Vector3f], numeric: &[Vector3f]) {
        for (a, n) in analytic.iter().zip(numeric) {
            for axis in 0..3 {
                assert_relative_eq!(a[axis], n[axis], epsilon = 2e-3);
            }
        }
    }

    #[test]
    fn test_chamfer_distance_identical_sets() {
        let points = tetrahedron().vertices;
        assert_relative_eq!(chamfer_distance(&points, &points).unwrap(), 0.0);
    }

    #[test]
    fn test_chamfer_distance_known_value() {
        let a = vec![Point3f::new(0.0, 0.0, 0.0)];
        let b = vec![Point3f::new(1.0, 0.0, 0.0), Point3f::new(0.0, 2.0, 0.0)];
        // a->b: 1, b->a: (1 + 4) / 2
        assert_relative_eq!(chamfer_distance(&a, &b).unwrap(), 3.5);
        assert_relative_eq!(chamfer_distance(&b, &a).unwrap(), 3.5);
    }

    #[test]
    fn test_chamfer_distance_empty_fails() {
        let a = vec![Point3f::origin()];
        assert!(chamfer_distance(&a, &[]).is_err());
        assert!(chamfer_distance(&[], &a).is_err());
    }

    #[test]
    fn test_chamfer_loss_matches_distance() {
        let vertices = tetrahedron().vertices;
        let target = vec![
            Point3f::new(0.5, 0.5, 0.5),
            Point3f::new(-0.3, 0.1, 0.0),
            Point3f::new(1.2, 1.0, 0.2),
        ];
        let (loss, _) = chamfer_loss(&vertices, &target).unwrap();
        assert_relative_eq!(loss, chamfer_distance(&vertices, &target).unwrap(), epsilon = 1e-6);
    }

    #[test]
    fn test_chamfer_gradient() {
        let vertices = tetrahedron().vertices;
        let target = vec![
            Point3f::new(0.5, 0.5, 0.5),
            Point3f::new(-0.3, 0.1, 0.0),
            Point3f::new(1.2, 1.0, 0.2),
            Point3f::new(0.3, 0.4, 1.4),
        ];
        let (_, grad) = chamfer_loss(&vertices, &target).unwrap();
        let numeric = numeric_gradient(&vertices, |v| chamfer_distance(v, &target).unwrap());
        assert_gradients_match(&grad, &numeric);
    }

    #[test]
    fn test_edge_loss_value_and_gradient() {
        let mesh = tetrahedron();
        let edges = mesh.edges();
        let (loss, grad) = edge_loss(&mesh.vertices, &edges);
        let expected = edges
            .iter()
            .map(|&(a, b)| (mesh.vertices[a] - mesh.vertices[b]).norm_squared())
            .sum::<f32>()
            / edges.len() as f32;
        assert_relative_eq!(loss, expected, epsilon = 1e-6);

        let numeric = numeric_gradient(&mesh.vertices, |v| edge_loss(v, &edges).0);
        assert_gradients_match(&grad, &numeric);
    }

    #[test]
    fn test_edge_loss_without_edges() {
        let (loss, grad) = edge_loss(&[Point3f::origin()], &[]);
        assert_eq!(loss, 0.0);
        assert_eq!(grad, vec![Vector3f::zeros()]);
    }

    #[test]
    fn test_laplacian_flat_grid_is_zero() {
        // center vertex sits at the mean of its four neighbors
        let vertices = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(-1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            Point3f::new(0.0, -1.0, 0.0),
        ];
        let neighbors = vec![vec![1, 2, 3, 4], vec![], vec![], vec![], vec![]];
        let (loss, grad) = laplacian_loss(&vertices, &neighbors);
        assert_relative_eq!(loss, 0.0);
        for g in grad {
            assert_relative_eq!(g.norm(), 0.0);
        }
    }

    #[test]
    fn test_laplacian_gradient() {
        let mesh = tetrahedron();
        let neighbors = mesh.vertex_neighbors();
        let (_, grad) = laplacian_loss(&mesh.vertices, &neighbors);
        let numeric = numeric_gradient(&mesh.vertices, |v| laplacian_loss(v, &neighbors).0);
        assert_gradients_match(&grad, &numeric);
    }
}

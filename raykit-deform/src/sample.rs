//! Surface sampling

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use raykit_core::{Error, Point3f, Result, TriangleMesh};

/// Draw `n` points uniformly over the surface of `mesh`.
///
/// Faces are picked with probability proportional to their area, then a point
/// is drawn uniformly inside the chosen triangle.
pub fn sample_points<R: Rng + ?Sized>(
    mesh: &TriangleMesh,
    n: usize,
    rng: &mut R,
) -> Result<Vec<Point3f>> {
    if mesh.faces.is_empty() {
        return Err(Error::InvalidData("cannot sample an empty mesh".to_string()));
    }
    mesh.validate()?;

    let areas: Vec<f32> = (0..mesh.face_count()).map(|f| mesh.face_area(f)).collect();
    let faces = WeightedIndex::new(&areas)
        .map_err(|e| Error::InvalidData(format!("mesh has no sampleable area: {}", e)))?;

    let points = (0..n)
        .map(|_| {
            let [a, b, c] = mesh.faces[faces.sample(&mut *rng)];
            let (v0, v1, v2) = (mesh.vertices[a], mesh.vertices[b], mesh.vertices[c]);
            let mut u: f32 = rng.gen();
            let mut v: f32 = rng.gen();
            // fold the unit square onto the triangle
            if u + v > 1.0 {
                u = 1.0 - u;
                v = 1.0 - v;
            }
            v0 + (v1 - v0) * u + (v2 - v0) * v
        })
        .collect();
    Ok(points)
}

//! Nearest neighbor search implementations

use crate::{NearestNeighborSearch, Point3f};
use rayon::prelude::*;

/// Simple brute force nearest neighbor search for small datasets
pub struct BruteForceSearch {
    points: Vec<Point3f>,
}

impl BruteForceSearch {
    pub fn new(points: &[Point3f]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Nearest neighbor of every query, computed in parallel.
    ///
    /// The output is in query order; `None` only when the search set is empty.
    pub fn find_nearest_batch(&self, queries: &[Point3f]) -> Vec<Option<(usize, f32)>> {
        queries.par_iter().map(|q| self.find_nearest(q)).collect()
    }
}

impl NearestNeighborSearch for BruteForceSearch {
    fn find_nearest(&self, query: &Point3f) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, point) in self.points.iter().enumerate() {
            let d2 = (point - query).norm_squared();
            // strict comparison keeps the lowest index on ties
            match best {
                Some((_, bd)) if d2 >= bd => {}
                _ => best = Some((idx, d2)),
            }
        }
        best
    }

    fn find_k_nearest(&self, query: &Point3f, k: usize) -> Vec<(usize, f32)> {
        let mut distances: Vec<(usize, f32)> = self
            .points
            .iter()
            .enumerate()
            .map(|(idx, point)| (idx, (point - query).norm_squared()))
            .collect();

        // Sort by distance and take k nearest
        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        distances.truncate(k);
        distances
    }
}

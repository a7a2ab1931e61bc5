//! Core traits for raykit

use crate::{mesh::*, point::*, transform::Transform3D};

/// Trait for nearest neighbor search functionality
pub trait NearestNeighborSearch {
    /// Find the nearest point to `query`, returning its index and squared distance
    fn find_nearest(&self, query: &Point3f) -> Option<(usize, f32)>;

    /// Find the k nearest neighbors to a query point
    fn find_k_nearest(&self, query: &Point3f, k: usize) -> Vec<(usize, f32)>;
}

/// Trait for objects with a spatial extent
pub trait Bounded {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

/// Trait for objects that can be transformed
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &Transform3D);
}

impl Bounded for TriangleMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        if self.vertices.is_empty() {
            return (Point3f::origin(), Point3f::origin());
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for vertex in &self.vertices {
            min = min.inf(vertex);
            max = max.sup(vertex);
        }

        (min, max)
    }
}

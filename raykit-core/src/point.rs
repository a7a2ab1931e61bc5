//! Point, vector and ray types

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A half-line starting at `origin` and extending along `direction`.
///
/// The direction is not normalized; ray parameters are measured in units of
/// `direction`, so `point_at(1.0) == origin + direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3f,
    pub direction: Vector3f,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Point3f, direction: Vector3f) -> Self {
        Self { origin, direction }
    }

    /// Point reached after travelling `t` direction-lengths along the ray
    pub fn point_at(&self, t: f32) -> Point3f {
        self.origin + self.direction * t
    }
}

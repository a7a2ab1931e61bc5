//! 3D transformation utilities

use crate::error::{Error, Result};
use crate::mesh::TriangleMesh;
use crate::traits::{Bounded, Transformable};
use nalgebra::{Matrix3, Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// An affine transformation stored as a homogeneous 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation transformation from a quaternion
    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Rotation of `angle` radians about `axis`
    pub fn axis_angle(axis: Vector3<f32>, angle: f32) -> Self {
        let axis = nalgebra::Unit::new_normalize(axis);
        Self::rotation(UnitQuaternion::from_axis_angle(&axis, angle))
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Create a scaling transformation
    pub fn scaling(scale: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&scale),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Apply the linear part of the transformation to a vector
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }

    /// Transform a surface normal with the inverse transpose of the linear part
    pub fn transform_normal(&self, normal: &Vector3<f32>) -> Vector3<f32> {
        let linear: Matrix3<f32> = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let n = match linear.try_inverse() {
            Some(inv) => inv.transpose() * normal,
            None => linear * normal,
        };
        n.try_normalize(f32::EPSILON).unwrap_or(*normal)
    }

    /// Compose this transformation with another (`other` is applied first)
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Get the inverse transformation
    pub fn inverse(self) -> Option<Self> {
        self.matrix
            .try_inverse()
            .map(|inv_matrix| Self { matrix: inv_matrix })
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

impl Transformable for TriangleMesh {
    fn transform(&mut self, transform: &Transform3D) {
        for v in &mut self.vertices {
            *v = transform.transform_point(v);
        }
        if let Some(normals) = &mut self.normals {
            for n in normals.iter_mut() {
                *n = transform.transform_normal(n);
            }
        }
    }
}

impl TriangleMesh {
    /// Center the bounding box on the origin and scale uniformly so the
    /// longest side spans `[-1, 1]`.
    ///
    /// Returns the transform that was applied.
    pub fn fit_to_unit_cube(&mut self) -> Result<Transform3D> {
        if self.vertices.is_empty() {
            return Err(Error::InvalidData("cannot frame an empty mesh".to_string()));
        }
        let (min, max) = self.bounding_box();
        let half_extent = (max - min).max() * 0.5;
        if half_extent <= f32::EPSILON {
            return Err(Error::InvalidData(
                "cannot frame a mesh whose vertices coincide".to_string(),
            ));
        }
        let t = Transform3D::uniform_scaling(1.0 / half_extent)
            * Transform3D::translation(-self.center().coords);
        self.transform(&t);
        Ok(t)
    }
}

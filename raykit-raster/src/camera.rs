//! Perspective camera for mesh rendering

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

/// A right-handed perspective camera looking from `position` at `target`
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Camera on a sphere of radius `dist` around the origin, looking at it.
    ///
    /// `elev_deg` tilts up from the XZ plane and `azim_deg` turns around +Y,
    /// starting from the +Z axis.
    pub fn look_at_view(dist: f32, elev_deg: f32, azim_deg: f32) -> Self {
        let elev = elev_deg.to_radians();
        let azim = azim_deg.to_radians();
        let position = Point3::new(
            dist * elev.cos() * azim.sin(),
            dist * elev.sin(),
            dist * elev.cos() * azim.cos(),
        );
        // straight above or below, +Y is parallel to the view direction
        let up = if elev.cos().abs() < 1e-4 {
            Vector3::new(-azim.sin(), 0.0, -azim.cos()) * elev.sin().signum()
        } else {
            Vector3::y()
        };
        Self {
            position,
            target: Point3::origin(),
            up,
            ..Self::default()
        }
    }

    pub fn with_fov_degrees(mut self, fov_deg: f32) -> Self {
        self.fov = fov_deg.to_radians();
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        perspective.into_inner()
    }

    /// Combined world-to-clip matrix
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, 2.7),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            60f32.to_radians(),
            1.0,
            1.0,
            100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_look_at_view_positions() {
        let front = Camera::look_at_view(2.7, 0.0, 0.0);
        assert_relative_eq!(front.position, Point3::new(0.0, 0.0, 2.7), epsilon = 1e-6);

        let side = Camera::look_at_view(2.0, 0.0, 90.0);
        assert_relative_eq!(side.position, Point3::new(2.0, 0.0, 0.0), epsilon = 1e-6);

        let top = Camera::look_at_view(3.0, 90.0, 0.0);
        assert_relative_eq!(top.position.y, 3.0, epsilon = 1e-6);
        assert!(top.view_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = Camera::look_at_view(5.0, 20.0, 30.0);
        let clip = camera.view_projection() * Point3::origin().to_homogeneous();
        assert!(clip.w > 0.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
    }
}

//! Light and material parameters for mesh shading

use raykit_core::{Color, Point3f};
use serde::{Deserialize, Serialize};

/// A point light with separate ambient, diffuse and specular colors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub location: Point3f,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
}

impl PointLight {
    /// A light at `location` with the default color split
    pub fn at(location: Point3f) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            location: Point3f::new(0.0, 1.0, 0.0),
            ambient: Color::gray(0.5),
            diffuse: Color::gray(0.3),
            specular: Color::gray(0.2),
        }
    }
}

/// Surface reflectance shared by every face of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParams {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f32,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            ambient: Color::WHITE,
            diffuse: Color::WHITE,
            specular: Color::WHITE,
            shininess: 64.0,
        }
    }
}

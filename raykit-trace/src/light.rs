//! Point lights and surface reflectance

use raykit_core::Point3f;
use serde::{Deserialize, Serialize};

/// A white point light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Point3f,
    pub intensity: f32,
}

impl Light {
    pub fn new(position: Point3f, intensity: f32) -> Self {
        Self { position, intensity }
    }
}

/// Phong reflectance coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Scales the scene's ambient term
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl Material {
    /// A surface with no highlight
    pub fn matte() -> Self {
        Self {
            specular: 0.0,
            ..Self::default()
        }
    }

    pub fn with_specular(mut self, specular: f32, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: 1.0,
            diffuse: 1.0,
            specular: 0.5,
            shininess: 32.0,
        }
    }
}

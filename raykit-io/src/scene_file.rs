//! TOML scene descriptions for the ray tracer
//!
//! ```toml
//! width = 100
//! height = 100
//! background = [0.7, 0.5, 0.5]
//! camera_path = [[0.0, 0.0, 0.0], [20.0, 0.0, 0.0]]
//!
//! [[spheres]]
//! center = [0.0, 0.0, -300.0]
//! radius = 50.0
//! color = [0.0, 0.0, 1.0]
//!
//! [[boxes]]
//! min = [-200.0, -200.0, -600.0]
//! max = [200.0, 200.0, -600.0]
//! color = [0.5, 0.5, 0.0]
//!
//! [[lights]]
//! position = [30.0, 30.0, -50.0]
//! intensity = 0.5
//! ```

use raykit_core::{Color, Error, Point3f, Result};
use raykit_trace::{Cuboid, Light, Material, Scene, Sphere};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereSpec {
    pub center: Point3f,
    pub radius: f32,
    pub color: Color,
    #[serde(default)]
    pub material: Material,
}

/// An axis-aligned box given by two opposite corners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub min: Point3f,
    pub max: Point3f,
    pub color: Color,
    #[serde(default)]
    pub material: Material,
}

/// Everything needed to build a [`Scene`] and the camera positions to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneFile {
    pub width: usize,
    pub height: usize,
    pub depth: f32,
    pub ambient_light: f32,
    /// Defaults to a gray of the ambient level
    pub background: Option<Color>,
    /// Camera positions; an empty path renders once from the origin
    pub camera_path: Vec<Point3f>,
    pub spheres: Vec<SphereSpec>,
    pub boxes: Vec<BoxSpec>,
    pub lights: Vec<Light>,
}

impl Default for SceneFile {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            depth: -100.0,
            ambient_light: 0.3,
            background: None,
            camera_path: Vec::new(),
            spheres: Vec::new(),
            boxes: Vec::new(),
            lights: Vec::new(),
        }
    }
}

impl SceneFile {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(format!("invalid scene file: {}", e)))
    }

    /// Build the scene, placing the camera at the first path position
    pub fn into_scene(self) -> Result<(Scene, Vec<Point3f>)> {
        let camera_path = if self.camera_path.is_empty() {
            vec![Point3f::origin()]
        } else {
            self.camera_path
        };

        let mut builder = Scene::builder()
            .with_size(self.width, self.height)
            .with_depth(self.depth)
            .with_ambient_light(self.ambient_light)
            .with_camera(camera_path[0]);
        if let Some(background) = self.background {
            builder = builder.with_background(background);
        }

        for (i, s) in self.spheres.into_iter().enumerate() {
            if !(s.radius.is_finite() && s.radius > 0.0) {
                return Err(Error::Config(format!(
                    "sphere {} has invalid radius {}",
                    i, s.radius
                )));
            }
            builder = builder.with_object(Sphere::new(s.center, s.radius, s.color).with_material(s.material));
        }
        for b in self.boxes {
            builder = builder.with_object(Cuboid::new(b.min, b.max, b.color).with_material(b.material));
        }
        for light in self.lights {
            builder = builder.with_light(light);
        }

        Ok((builder.build()?, camera_path))
    }
}

/// Read a scene file from disk
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<(Scene, Vec<Point3f>)> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let file = SceneFile::from_toml_str(&text)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    let (scene, camera_path) = file.into_scene()?;
    info!(
        path = %path.display(),
        objects = scene.objects.len(),
        lights = scene.lights.len(),
        cameras = camera_path.len(),
        "loaded scene"
    );
    Ok((scene, camera_path))
}

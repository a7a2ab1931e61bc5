//! Scene description for the tracer

use crate::light::Light;
use crate::shape::Shape;
use raykit_core::{Color, Error, Point3f, Result};

/// Objects, lights and a pinhole camera.
///
/// The camera sits at `camera` and looks along the z axis toward `depth`.
/// Pixel `(x, y)` is reached through the image-plane offset
/// `(x - width / 2, y - height / 2, depth)`, so `|depth|` acts as the focal
/// length in pixels. Moving the camera translates the view; it never rotates.
#[derive(Debug)]
pub struct Scene {
    pub objects: Vec<Box<dyn Shape>>,
    pub lights: Vec<Light>,
    pub camera: Point3f,
    pub width: usize,
    pub height: usize,
    pub depth: f32,
    pub ambient_light: f32,
    pub background: Color,
}

impl Scene {
    /// Start building a scene with the default 100x100 image and depth -100
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// Move the camera, keeping everything else
    pub fn set_camera(&mut self, camera: Point3f) {
        self.camera = camera;
    }
}

/// Builder for [`Scene`]
#[derive(Debug)]
pub struct SceneBuilder {
    objects: Vec<Box<dyn Shape>>,
    lights: Vec<Light>,
    camera: Point3f,
    width: usize,
    height: usize,
    depth: f32,
    ambient_light: f32,
    background: Option<Color>,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            camera: Point3f::origin(),
            width: 100,
            height: 100,
            depth: -100.0,
            ambient_light: 0.3,
            background: None,
        }
    }
}

impl SceneBuilder {
    pub fn with_object<S: Shape + 'static>(mut self, shape: S) -> Self {
        self.objects.push(Box::new(shape));
        self
    }

    pub fn with_boxed_object(mut self, shape: Box<dyn Shape>) -> Self {
        self.objects.push(shape);
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    pub fn with_camera(mut self, camera: Point3f) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: f32) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    /// Background color; defaults to a gray at the ambient light level
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    pub fn build(self) -> Result<Scene> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.depth == 0.0 || !self.depth.is_finite() {
            return Err(Error::Config(format!(
                "image plane depth must be finite and non-zero, got {}",
                self.depth
            )));
        }
        if !self.ambient_light.is_finite() || self.ambient_light < 0.0 {
            return Err(Error::Config(format!(
                "ambient light must be non-negative, got {}",
                self.ambient_light
            )));
        }
        let background = self
            .background
            .unwrap_or_else(|| Color::gray(self.ambient_light));
        Ok(Scene {
            objects: self.objects,
            lights: self.lights,
            camera: self.camera,
            width: self.width,
            height: self.height,
            depth: self.depth,
            ambient_light: self.ambient_light,
            background,
        })
    }
}

//! Rasterizer plus shader in one call

use crate::camera::Camera;
use crate::lighting::{MaterialParams, PointLight};
use crate::rasterizer::{rasterize, RasterSettings};
use crate::shader::shade_phong;
use raykit_core::{Framebuffer, Result, TriangleMesh};
use tracing::info;

/// Renders meshes with a fixed camera, light and material
#[derive(Debug, Clone, Default)]
pub struct MeshRenderer {
    pub camera: Camera,
    pub settings: RasterSettings,
    pub light: PointLight,
    pub material: MaterialParams,
}

impl MeshRenderer {
    pub fn new(camera: Camera, settings: RasterSettings, light: PointLight) -> Self {
        Self {
            camera,
            settings,
            light,
            material: MaterialParams::default(),
        }
    }

    pub fn with_material(mut self, material: MaterialParams) -> Self {
        self.material = material;
        self
    }

    pub fn render(&self, mesh: &TriangleMesh) -> Result<Framebuffer> {
        let fragments = rasterize(mesh, &self.camera, &self.settings)?;
        info!(
            covered_pixels = fragments.coverage(),
            image_size = self.settings.image_size,
            "rendered mesh"
        );
        shade_phong(
            mesh,
            &fragments,
            &self.camera,
            &self.light,
            &self.material,
            self.settings.background,
        )
    }
}

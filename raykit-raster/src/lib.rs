//! Triangle mesh rendering for raykit
//!
//! A small CPU rasterizer: meshes are projected through a perspective
//! [`Camera`], resolved per pixel with a z-buffer and shaded with the Phong
//! model under a single [`PointLight`].
//!
//! # Example
//!
//! ```rust
//! use raykit_core::Point3f;
//! use raykit_raster::{primitives, Camera, MeshRenderer, PointLight, RasterSettings};
//!
//! fn main() -> raykit_core::Result<()> {
//!     let renderer = MeshRenderer::new(
//!         Camera::look_at_view(2.7, 0.0, 0.0),
//!         RasterSettings::default().with_image_size(64),
//!         PointLight::at(Point3f::new(0.0, 0.0, -3.0)),
//!     );
//!     let image = renderer.render(&primitives::unit_box())?;
//!     assert_eq!(image.width(), 64);
//!     Ok(())
//! }
//! ```

pub mod camera;
pub mod lighting;
pub mod primitives;
pub mod rasterizer;
pub mod renderer;
pub mod shader;

pub use camera::*;
pub use lighting::*;
pub use rasterizer::*;
pub use renderer::*;
pub use shader::*;

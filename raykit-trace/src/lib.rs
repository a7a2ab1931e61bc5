//! Ray projection and Phong ray tracing
//!
//! This crate casts one primary ray per pixel from a translating pinhole
//! camera into a scene of spheres and axis-aligned boxes:
//! - [`render_projection`] maps each object to the image plane in its flat
//!   color, dimmed when the object lies beyond the plane
//! - [`render_phong`] shades hits with ambient, diffuse and specular terms
//!
//! # Example
//!
//! ```rust
//! use raykit_core::{Color, Point3f};
//! use raykit_trace::{render_phong, Light, Scene, Sphere};
//!
//! fn main() -> raykit_core::Result<()> {
//!     let scene = Scene::builder()
//!         .with_object(Sphere::new(Point3f::new(0.0, 0.0, -60.0), 12.0, Color::new(0.0, 0.0, 1.0)))
//!         .with_light(Light::new(Point3f::new(15.0, -10.0, -50.0), 0.8))
//!         .build()?;
//!     let image = render_phong(&scene);
//!     assert_eq!(image.width(), 100);
//!     Ok(())
//! }
//! ```

pub mod demo;
pub mod light;
pub mod render;
pub mod scene;
pub mod shape;

pub use light::*;
pub use render::*;
pub use scene::*;
pub use shape::*;

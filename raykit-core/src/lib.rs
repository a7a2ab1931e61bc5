//! Core data structures and traits for raykit
//!
//! This crate provides the fundamental types shared by the ray tracer, the
//! mesh rasterizer and the mesh fitter: points and rays, linear colors, the
//! framebuffer that renders land in, triangle meshes and essential traits.

pub mod color;
pub mod error;
pub mod framebuffer;
pub mod mesh;
pub mod nearest_neighbor;
pub mod point;
pub mod traits;
pub mod transform;

pub use color::*;
pub use error::*;
pub use framebuffer::*;
pub use mesh::*;
pub use nearest_neighbor::*;
pub use point::*;
pub use traits::*;
pub use transform::*;

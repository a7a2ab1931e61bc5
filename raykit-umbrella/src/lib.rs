//! # raykit
//!
//! Small CPU renderers and a mesh fitter, in one place.
//!
//! This is the umbrella crate that re-exports the individual raykit crates.
//! Use it to get everything at once, or depend on the crates you need.
//!
//! ## Features
//!
//! - **Core**: rays, colors, framebuffers, triangle meshes and transforms
//! - **Trace**: ray projection and Phong ray tracing of spheres and boxes
//! - **Raster**: z-buffered mesh rasterization with Phong shading
//! - **Deform**: fitting a template mesh to a target surface
//! - **I/O**: PNG output, contact sheets, OBJ meshes and TOML scenes
//!
//! ## Quick Start
//!
//! ```rust
//! use raykit::prelude::*;
//!
//! let scene = Scene::builder()
//!     .with_object(Sphere::new(Point3f::new(0.0, 0.0, -300.0), 50.0, Color::new(0.0, 0.0, 1.0)))
//!     .with_light(Light::new(Point3f::new(30.0, 30.0, -50.0), 0.5))
//!     .build()
//!     .unwrap();
//! let image = render_phong(&scene);
//! assert_eq!(image.width(), 100);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: enables trace, raster, deform and io
//! - `trace`, `raster`, `deform`, `io`: the individual crates
//! - `all`: enables all features

// Re-export core functionality
pub use raykit_core::*;

// Re-export sub-crates
#[cfg(feature = "trace")]
pub use raykit_trace as trace;

#[cfg(feature = "raster")]
pub use raykit_raster as raster;

#[cfg(feature = "deform")]
pub use raykit_deform as deform;

#[cfg(feature = "io")]
pub use raykit_io as io;

/// Convenient imports for common use cases
pub mod prelude {
    pub use raykit_core::{
        Bounded, BruteForceSearch, Color, Error, Framebuffer, NearestNeighborSearch, Point3f, Ray,
        Result, Transform3D, Transformable, TriangleMesh, Vector3f,
    };

    #[cfg(feature = "trace")]
    pub use raykit_trace::{
        render, render_phong, render_projection, Cuboid, Hit, Light, Material, RenderMode, Scene,
        SceneBuilder, Shape, Sphere,
    };

    #[cfg(feature = "raster")]
    pub use raykit_raster::{
        primitives, rasterize, shade_phong, Camera, MaterialParams, MeshRenderer, PointLight,
        RasterSettings,
    };

    #[cfg(feature = "deform")]
    pub use raykit_deform::{chamfer_distance, sample_points, DeformConfig, FitResult, MeshFitter};

    #[cfg(feature = "io")]
    pub use raykit_io::{
        contact_sheet, load_scene, read_mesh, three_row_sheet, write_mesh, write_png, MeshReader,
        MeshWriter, SceneFile,
    };
}

//! Mesh deformation for raykit
//!
//! Fits a template mesh (typically an icosphere) to a target surface by
//! moving its vertices with SGD and momentum. The objective combines a
//! chamfer term against points sampled from the target with edge-length and
//! Laplacian regularizers.

pub mod fitter;
pub mod losses;
pub mod sample;

pub use fitter::*;
pub use losses::*;
pub use sample::*;

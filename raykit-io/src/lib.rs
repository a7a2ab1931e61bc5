//! File I/O for raykit
//!
//! Writes rendered frames as PNG images (single frames or contact sheets),
//! reads and writes triangle meshes as OBJ, and loads ray tracing scenes from
//! TOML files.

pub mod obj;
pub mod png;
pub mod scene_file;
pub mod sheet;

pub use obj::{ObjReader, ObjWriter};
pub use png::{read_png, write_png};
pub use scene_file::{load_scene, BoxSpec, SceneFile, SphereSpec};
pub use sheet::{contact_sheet, three_row_sheet};

use raykit_core::{Error, Result, TriangleMesh};
use std::path::Path;

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("obj") => ObjReader::read_mesh(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

/// Auto-detect format and write mesh
pub fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("obj") => ObjWriter::write_mesh(mesh, path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

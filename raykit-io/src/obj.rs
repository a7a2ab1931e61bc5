//! Wavefront OBJ support
//!
//! Only geometry is read: `v` records become vertices and `f` records are
//! fan-triangulated into faces. Texture coordinates, normals, groups and
//! materials are skipped.

use crate::{MeshReader, MeshWriter};
use raykit_core::{Error, Point3f, Result, TriangleMesh};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

pub struct ObjReader;
pub struct ObjWriter;

impl ObjReader {
    /// Parse OBJ text from any buffered reader
    pub fn parse<R: BufRead>(reader: R) -> Result<TriangleMesh> {
        let mut vertices: Vec<Point3f> = Vec::new();
        let mut faces: Vec<[usize; 3]> = Vec::new();
        let mut skipped = 0usize;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = line_no + 1;
            let content = line.split('#').next().unwrap_or("").trim();
            let mut tokens = content.split_whitespace();

            match tokens.next() {
                Some("v") => {
                    let coords: Vec<f32> = tokens
                        .take(3)
                        .map(|t| parse_float(t, line_no))
                        .collect::<Result<_>>()?;
                    if coords.len() != 3 {
                        return Err(Error::InvalidData(format!(
                            "line {}: vertex needs three coordinates",
                            line_no
                        )));
                    }
                    vertices.push(Point3f::new(coords[0], coords[1], coords[2]));
                }
                Some("f") => {
                    let indices: Vec<usize> = tokens
                        .map(|t| parse_index(t, vertices.len(), line_no))
                        .collect::<Result<_>>()?;
                    if indices.len() < 3 {
                        return Err(Error::InvalidData(format!(
                            "line {}: face needs at least three vertices",
                            line_no
                        )));
                    }
                    for k in 1..indices.len() - 1 {
                        faces.push([indices[0], indices[k], indices[k + 1]]);
                    }
                }
                Some(_) => skipped += 1,
                None => {}
            }
        }

        let mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
        mesh.validate()?;
        debug!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            skipped_records = skipped,
            "parsed obj"
        );
        Ok(mesh)
    }
}

fn parse_float(token: &str, line_no: usize) -> Result<f32> {
    token
        .parse::<f32>()
        .map_err(|_| Error::InvalidData(format!("line {}: invalid number '{}'", line_no, token)))
}

/// Resolve one `f` entry (`i`, `i/t`, `i//n` or `i/t/n`) to a 0-based index.
///
/// Negative indices count back from the last vertex read so far.
fn parse_index(token: &str, vertex_count: usize, line_no: usize) -> Result<usize> {
    let head = token.split('/').next().unwrap_or("");
    let raw: i64 = head
        .parse()
        .map_err(|_| Error::InvalidData(format!("line {}: invalid index '{}'", line_no, token)))?;
    let resolved = if raw > 0 {
        raw - 1
    } else if raw < 0 {
        vertex_count as i64 + raw
    } else {
        -1
    };
    if resolved < 0 || resolved >= vertex_count as i64 {
        return Err(Error::InvalidData(format!(
            "line {}: index {} out of range for {} vertices",
            line_no, raw, vertex_count
        )));
    }
    Ok(resolved as usize)
}

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }
}

impl ObjWriter {
    /// Write OBJ text to any writer
    pub fn write_to<W: Write>(mesh: &TriangleMesh, mut writer: W) -> Result<()> {
        writeln!(writer, "# {} vertices, {} faces", mesh.vertex_count(), mesh.face_count())?;
        for v in &mesh.vertices {
            writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for [a, b, c] in &mesh.faces {
            writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl MeshWriter for ObjWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let path = path.as_ref();
        mesh.validate()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Self::write_to(mesh, BufWriter::new(file))?;
        info!(path = %path.display(), vertices = mesh.vertex_count(), "wrote mesh");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(text: &str) -> Result<TriangleMesh> {
        ObjReader::parse(text.as_bytes())
    }

    #[test]
    fn test_parse_triangle() {
        let mesh = parse("# comment\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn test_quad_is_fan_triangulated() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_slash_forms_and_negative_indices() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\n\
                    f 1/1/1 2/1/1 3/1/1\nf 1//1 2//1 3//1\nf -3 -2 -1\n";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2]; 3]);
    }

    #[test]
    fn test_other_records_are_ignored() {
        let text = "mtllib box.mtl\no box\ng side\nusemtl red\ns off\n\
                    v 0 0 0 1.0\nv 1 0 0\nv 0 1 0\nf 1 2 3 # trailing\n";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_bad_input_fails() {
        assert!(parse("v 0 0\n").is_err());
        assert!(parse("v 0 zero 0\n").is_err());
        assert!(parse("v 0 0 0\nv 1 0 0\nf 1 2\n").is_err());
        assert!(parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n").is_err());
        assert!(parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").is_err());
        assert!(parse("v 0 0 0\nf -2 -1 1\n").is_err());
    }

    #[test]
    fn test_write_then_parse() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.5, -1.25, 2.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let mut buffer = Vec::new();
        ObjWriter::write_to(&mesh, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("f 1 2 3"));

        let loaded = parse(&text).unwrap();
        assert_eq!(loaded.faces, mesh.faces);
        assert_relative_eq!(loaded.vertices[0].y, -1.25);
    }
}

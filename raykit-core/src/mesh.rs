//! Mesh data structures and functionality

use crate::color::Color;
use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
    pub colors: Option<Vec<Color>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
            colors: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
            colors: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Check that every face references three distinct, existing vertices
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        for (i, face) in self.faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&v| v >= n) {
                return Err(Error::InvalidData(format!(
                    "face {} references vertex {} but the mesh has {} vertices",
                    i, bad, n
                )));
            }
            if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
                return Err(Error::InvalidData(format!(
                    "face {} repeats a vertex: {:?}",
                    i, face
                )));
            }
        }
        if let Some(normals) = &self.normals {
            if normals.len() != n {
                return Err(Error::InvalidData(format!(
                    "{} normals for {} vertices",
                    normals.len(),
                    n
                )));
            }
        }
        if let Some(colors) = &self.colors {
            if colors.len() != n {
                return Err(Error::InvalidData(format!(
                    "{} colors for {} vertices",
                    colors.len(),
                    n
                )));
            }
        }
        Ok(())
    }

    /// Calculate face normals (zero for degenerate faces)
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];

                let edge1 = v1 - v0;
                let edge2 = v2 - v0;

                edge1
                    .cross(&edge2)
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vector3f::zeros)
            })
            .collect()
    }

    /// Area-weighted vertex normals.
    ///
    /// Each face adds its unnormalized cross product (twice its area times
    /// its normal) to its three corners. Vertices that touch no face get a
    /// zero normal.
    pub fn compute_vertex_normals(&self) -> Vec<Vector3f> {
        let mut normals = vec![Vector3f::zeros(); self.vertices.len()];
        for face in &self.faces {
            let v0 = self.vertices[face[0]];
            let v1 = self.vertices[face[1]];
            let v2 = self.vertices[face[2]];
            let weighted = (v1 - v0).cross(&(v2 - v0));
            for &idx in face {
                normals[idx] += weighted;
            }
        }
        for n in &mut normals {
            *n = n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::zeros);
        }
        normals
    }

    /// Vertex normals, either the stored ones or freshly computed
    pub fn vertex_normals(&self) -> Vec<Vector3f> {
        match &self.normals {
            Some(normals) if normals.len() == self.vertices.len() => normals.clone(),
            _ => self.compute_vertex_normals(),
        }
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Set vertex colors
    pub fn set_colors(&mut self, colors: Vec<Color>) {
        if colors.len() == self.vertices.len() {
            self.colors = Some(colors);
        }
    }

    /// Unique undirected edges as `(low, high)` index pairs, sorted
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = BTreeSet::new();
        for face in &self.faces {
            for k in 0..3 {
                let a = face[k];
                let b = face[(k + 1) % 3];
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.into_iter().collect()
    }

    /// One-ring neighbors of every vertex, sorted and deduplicated
    pub fn vertex_neighbors(&self) -> Vec<Vec<usize>> {
        let mut neighbors = vec![Vec::new(); self.vertices.len()];
        for (a, b) in self.edges() {
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }
        neighbors
    }

    /// Area of a single face
    pub fn face_area(&self, face: usize) -> f32 {
        let [a, b, c] = self.faces[face];
        let v0 = self.vertices[a];
        (self.vertices[b] - v0).cross(&(self.vertices[c] - v0)).norm() * 0.5
    }

    /// Total surface area
    pub fn surface_area(&self) -> f32 {
        (0..self.faces.len()).map(|f| self.face_area(f)).sum()
    }

    /// Mean of all vertex positions
    pub fn centroid(&self) -> Point3f {
        if self.vertices.is_empty() {
            return Point3f::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3f::zeros(), |acc, v| acc + v.coords);
        Point3f::from(sum / self.vertices.len() as f32)
    }

    /// Center the mesh on its vertex centroid and scale it so the farthest
    /// vertex lies on the unit sphere.
    ///
    /// Returns the `(center, scale)` that was applied, so that
    /// `original = normalized / scale + center`.
    pub fn normalize_to_unit_sphere(&mut self) -> Result<(Point3f, f32)> {
        if self.vertices.is_empty() {
            return Err(Error::InvalidData("cannot normalize an empty mesh".to_string()));
        }
        let center = self.centroid();
        let radius = self
            .vertices
            .iter()
            .map(|v| (v - center).norm())
            .fold(0.0f32, f32::max);
        if radius <= f32::EPSILON {
            return Err(Error::InvalidData(
                "cannot normalize a mesh whose vertices coincide".to_string(),
            ));
        }
        let scale = 1.0 / radius;
        for v in &mut self.vertices {
            *v = Point3f::from((*v - center) * scale);
        }
        Ok((center, scale))
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.normals = None;
        self.colors = None;
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

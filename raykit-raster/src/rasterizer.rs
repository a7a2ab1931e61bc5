//! Z-buffered triangle rasterization
//!
//! Every face is projected to screen space once; rows of the output are then
//! filled in parallel, each row scanning only the faces whose screen-space
//! extent covers it. Pixel centers are sampled at `(x + 0.5, y + 0.5)` with
//! row `0` at the bottom, and barycentric weights are perspective-corrected so
//! attributes interpolate linearly in world space.

use crate::camera::Camera;
use raykit_core::{Color, Error, Result, TriangleMesh};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Rasterization options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterSettings {
    /// Width and height of the square output, in pixels
    pub image_size: usize,
    pub background: Color,
    /// Drop faces wound clockwise on screen
    pub cull_backfaces: bool,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            image_size: 512,
            background: Color::WHITE,
            cull_backfaces: false,
        }
    }
}

impl RasterSettings {
    pub fn with_image_size(mut self, image_size: usize) -> Self {
        self.image_size = image_size;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_cull_backfaces(mut self, cull: bool) -> Self {
        self.cull_backfaces = cull;
        self
    }
}

/// The nearest face covering a pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub face: usize,
    /// NDC depth in `[-1, 1]`, smaller is nearer
    pub depth: f32,
    /// Perspective-correct barycentric weights of the face's three vertices
    pub bary: [f32; 3],
}

/// Per-pixel rasterization output, bottom row first
#[derive(Debug, Clone)]
pub struct Fragments {
    size: usize,
    fragments: Vec<Option<Fragment>>,
}

impl Fragments {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Fragment> {
        if x < self.size && y < self.size {
            self.fragments[y * self.size + x]
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[Option<Fragment>] {
        &self.fragments
    }

    /// Number of pixels covered by some face
    pub fn coverage(&self) -> usize {
        self.fragments.iter().filter(|f| f.is_some()).count()
    }
}

#[derive(Debug, Clone, Copy)]
struct ScreenTriangle {
    face: usize,
    xy: [[f32; 2]; 3],
    z: [f32; 3],
    inv_w: [f32; 3],
    area: f32,
    y_min: f32,
    y_max: f32,
    x_min: f32,
    x_max: f32,
}

#[inline]
fn edge(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

fn project_faces(mesh: &TriangleMesh, camera: &Camera, settings: &RasterSettings) -> Vec<ScreenTriangle> {
    let view_proj = camera.view_projection();
    let size = settings.image_size as f32;

    let projected: Vec<Option<([f32; 2], f32, f32)>> = mesh
        .vertices
        .iter()
        .map(|v| {
            let clip = view_proj * v.to_homogeneous();
            // behind (or on) the near plane
            if clip.w < camera.near {
                return None;
            }
            let ndc_x = clip.x / clip.w;
            let ndc_y = clip.y / clip.w;
            let ndc_z = clip.z / clip.w;
            let sx = (ndc_x + 1.0) * 0.5 * size;
            let sy = (ndc_y + 1.0) * 0.5 * size;
            Some(([sx, sy], ndc_z, 1.0 / clip.w))
        })
        .collect();

    mesh.faces
        .iter()
        .enumerate()
        .filter_map(|(face, idx)| {
            let a = projected[idx[0]]?;
            let b = projected[idx[1]]?;
            let c = projected[idx[2]]?;
            let xy = [a.0, b.0, c.0];
            let area = edge(xy[0], xy[1], xy[2]);
            if area == 0.0 || !area.is_finite() {
                return None;
            }
            if settings.cull_backfaces && area < 0.0 {
                return None;
            }
            Some(ScreenTriangle {
                face,
                xy,
                z: [a.1, b.1, c.1],
                inv_w: [a.2, b.2, c.2],
                area,
                y_min: xy[0][1].min(xy[1][1]).min(xy[2][1]),
                y_max: xy[0][1].max(xy[1][1]).max(xy[2][1]),
                x_min: xy[0][0].min(xy[1][0]).min(xy[2][0]),
                x_max: xy[0][0].max(xy[1][0]).max(xy[2][0]),
            })
        })
        .collect()
}

/// Find the nearest face behind every pixel
pub fn rasterize(mesh: &TriangleMesh, camera: &Camera, settings: &RasterSettings) -> Result<Fragments> {
    if settings.image_size == 0 {
        return Err(Error::InvalidData("image_size must be positive".to_string()));
    }
    mesh.validate()?;

    let start = Instant::now();
    let size = settings.image_size;
    let triangles = project_faces(mesh, camera, settings);
    let mut fragments: Vec<Option<Fragment>> = vec![None; size * size];

    fragments.par_chunks_mut(size).enumerate().for_each(|(y, row)| {
        let py = y as f32 + 0.5;
        for tri in triangles.iter().filter(|t| t.y_min <= py && py <= t.y_max) {
            let x_start = tri.x_min.floor().max(0.0) as usize;
            let x_end = (tri.x_max.ceil().max(0.0) as usize).min(size);
            for (x, slot) in row.iter_mut().enumerate().take(x_end).skip(x_start) {
                let p = [x as f32 + 0.5, py];
                let l0 = edge(tri.xy[1], tri.xy[2], p) / tri.area;
                let l1 = edge(tri.xy[2], tri.xy[0], p) / tri.area;
                let l2 = edge(tri.xy[0], tri.xy[1], p) / tri.area;
                if l0 < 0.0 || l1 < 0.0 || l2 < 0.0 {
                    continue;
                }

                let depth = l0 * tri.z[0] + l1 * tri.z[1] + l2 * tri.z[2];
                if !(-1.0..=1.0).contains(&depth) {
                    continue;
                }
                if matches!(slot, Some(existing) if existing.depth <= depth) {
                    continue;
                }

                let w0 = l0 * tri.inv_w[0];
                let w1 = l1 * tri.inv_w[1];
                let w2 = l2 * tri.inv_w[2];
                let sum = w0 + w1 + w2;
                if sum <= 0.0 {
                    continue;
                }
                *slot = Some(Fragment {
                    face: tri.face,
                    depth,
                    bary: [w0 / sum, w1 / sum, w2 / sum],
                });
            }
        }
    });

    debug!(
        faces = mesh.face_count(),
        visible_faces = triangles.len(),
        image_size = size,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "rasterized mesh"
    );

    Ok(Fragments { size, fragments })
}

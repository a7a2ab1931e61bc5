//! Primary-ray rendering
//!
//! Two shading modes share the same camera and visibility rules:
//! - [`RenderMode::Projection`] paints each hit in its object's flat color and
//!   halves it when the object sits beyond the image plane,
//! - [`RenderMode::Phong`] applies ambient, diffuse and specular terms for
//!   every light.

use crate::scene::Scene;
use crate::shape::{Hit, Shape};
use raykit_core::{Color, Framebuffer, Ray, Vector3f};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Shading mode applied to primary-ray hits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Projection,
    Phong,
}

/// The ray through pixel `(x, y)`
pub fn primary_ray(scene: &Scene, x: usize, y: usize) -> Ray {
    let direction = Vector3f::new(
        x as f32 - scene.width as f32 / 2.0,
        y as f32 - scene.height as f32 / 2.0,
        scene.depth,
    );
    Ray::new(scene.camera, direction)
}

/// Nearest visible object along the ray.
///
/// A hit counts when `0 <= t < best`; on equal distance the object that comes
/// first in the scene wins.
pub fn trace(ray: &Ray, scene: &Scene) -> Option<(usize, Hit)> {
    let mut closest: Option<(usize, Hit)> = None;
    for (idx, object) in scene.objects.iter().enumerate() {
        if let Some(hit) = object.intersect(ray) {
            let best = closest.map_or(f32::INFINITY, |(_, h)| h.t);
            if hit.t >= 0.0 && hit.t < best {
                closest = Some((idx, hit));
            }
        }
    }
    closest
}

/// Render with the given shading mode
pub fn render(scene: &Scene, mode: RenderMode) -> Framebuffer {
    let start = Instant::now();
    let mut image = Framebuffer::new(scene.width, scene.height, scene.background);

    image.par_rows_mut().enumerate().for_each(|(y, row)| {
        for (x, pixel) in row.iter_mut().enumerate() {
            let ray = primary_ray(scene, x, y);
            if let Some((idx, hit)) = trace(&ray, scene) {
                let object = scene.objects[idx].as_ref();
                *pixel = match mode {
                    RenderMode::Projection => flat_color(scene, object),
                    RenderMode::Phong => phong_color(scene, object, &ray, &hit),
                };
            }
        }
    });

    debug!(
        ?mode,
        width = scene.width,
        height = scene.height,
        objects = scene.objects.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "rendered scene"
    );
    image
}

/// Flat-colored projection of the scene
pub fn render_projection(scene: &Scene) -> Framebuffer {
    render(scene, RenderMode::Projection)
}

/// Phong-shaded rendering of the scene
pub fn render_phong(scene: &Scene) -> Framebuffer {
    render(scene, RenderMode::Phong)
}

fn flat_color(scene: &Scene, object: &dyn Shape) -> Color {
    let color = object.color();
    if between_camera_and_plane(scene, object.center().z) {
        color
    } else {
        color.scale(0.5)
    }
}

/// Whether `z` lies in the closed interval between the camera and the image
/// plane at `scene.depth`.
fn between_camera_and_plane(scene: &Scene, z: f32) -> bool {
    let cam = scene.camera.z;
    let plane = scene.depth;
    (cam <= z && z <= plane) || (cam >= z && z >= plane)
}

fn phong_color(scene: &Scene, object: &dyn Shape, ray: &Ray, hit: &Hit) -> Color {
    let base = object.color();
    let material = object.material();
    let n = hit.normal;
    let view = match (-ray.direction).try_normalize(f32::EPSILON) {
        Some(v) => v,
        None => return base.scale(scene.ambient_light * material.ambient),
    };

    let mut color = base.scale(scene.ambient_light * material.ambient);
    for light in &scene.lights {
        let Some(l) = (light.position - hit.point).try_normalize(f32::EPSILON) else {
            continue;
        };
        let n_dot_l = n.dot(&l);
        if n_dot_l <= 0.0 {
            continue;
        }
        color += base.scale(light.intensity * material.diffuse * n_dot_l);

        if material.specular > 0.0 {
            let reflected = n * (2.0 * n_dot_l) - l;
            let r_dot_v = reflected.dot(&view).max(0.0);
            let highlight = material.specular * r_dot_v.powf(material.shininess);
            color += Color::gray(light.intensity * highlight);
        }
    }
    color
}

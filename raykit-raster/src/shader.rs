//! Per-pixel Phong shading of rasterized fragments

use crate::camera::Camera;
use crate::lighting::{MaterialParams, PointLight};
use crate::rasterizer::{Fragment, Fragments};
use raykit_core::{Color, Error, Framebuffer, Point3f, Result, TriangleMesh, Vector3f};
use rayon::prelude::*;

/// Shade every covered pixel; uncovered pixels get `background`.
///
/// Normals are interpolated from the mesh's vertex normals (computed with area
/// weighting when the mesh has none) and are flipped toward the viewer, so
/// both sides of a face are lit. Vertex colors default to white.
pub fn shade_phong(
    mesh: &TriangleMesh,
    fragments: &Fragments,
    camera: &Camera,
    light: &PointLight,
    material: &MaterialParams,
    background: Color,
) -> Result<Framebuffer> {
    let size = fragments.size();
    let normals = mesh.vertex_normals();
    let colors = match &mesh.colors {
        Some(colors) if colors.len() == mesh.vertex_count() => colors.clone(),
        Some(colors) => {
            return Err(Error::InvalidData(format!(
                "{} vertex colors for {} vertices",
                colors.len(),
                mesh.vertex_count()
            )))
        }
        None => vec![Color::WHITE; mesh.vertex_count()],
    };

    let pixels: Vec<Color> = fragments
        .as_slice()
        .par_iter()
        .map(|fragment| match fragment {
            Some(frag) => shade_fragment(mesh, &normals, &colors, frag, camera, light, material),
            None => background,
        })
        .collect();

    Framebuffer::from_pixels(size, size, pixels)
}

fn shade_fragment(
    mesh: &TriangleMesh,
    normals: &[Vector3f],
    colors: &[Color],
    frag: &Fragment,
    camera: &Camera,
    light: &PointLight,
    material: &MaterialParams,
) -> Color {
    let face = mesh.faces[frag.face];
    let [b0, b1, b2] = frag.bary;

    let position = Point3f::from(
        mesh.vertices[face[0]].coords * b0
            + mesh.vertices[face[1]].coords * b1
            + mesh.vertices[face[2]].coords * b2,
    );
    let texel = colors[face[0]] * b0 + colors[face[1]] * b1 + colors[face[2]] * b2;

    let interpolated = normals[face[0]] * b0 + normals[face[1]] * b1 + normals[face[2]] * b2;
    let mut normal = match interpolated.try_normalize(f32::EPSILON) {
        Some(n) => n,
        None => {
            // vertex normals cancelled out; fall back to the flat face normal
            let (v0, v1, v2) = (
                mesh.vertices[face[0]],
                mesh.vertices[face[1]],
                mesh.vertices[face[2]],
            );
            (v1 - v0)
                .cross(&(v2 - v0))
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(Vector3f::z)
        }
    };

    let view = (camera.position - position)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3f::z);
    if normal.dot(&view) < 0.0 {
        normal = -normal;
    }

    let ambient = material.ambient * light.ambient;
    let mut diffuse = Color::BLACK;
    let mut specular = Color::BLACK;
    if let Some(to_light) = (light.location - position).try_normalize(f32::EPSILON) {
        let n_dot_l = normal.dot(&to_light);
        if n_dot_l > 0.0 {
            diffuse = material.diffuse * light.diffuse * n_dot_l;
            let reflected = normal * (2.0 * n_dot_l) - to_light;
            let r_dot_v = reflected.dot(&view).max(0.0);
            specular = material.specular * light.specular * r_dot_v.powf(material.shininess);
        }
    }

    texel * (ambient + diffuse) + specular
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{rasterize, RasterSettings};
    use approx::assert_relative_eq;

    fn facing_quad() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(-1.0, -1.0, 0.0),
                Point3f::new(1.0, -1.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
                Point3f::new(-1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    fn shade(mesh: &TriangleMesh, light: &PointLight) -> Framebuffer {
        let camera = Camera::look_at_view(5.0, 0.0, 0.0);
        let settings = RasterSettings::default().with_image_size(32);
        let fragments = rasterize(mesh, &camera, &settings).unwrap();
        shade_phong(mesh, &fragments, &camera, light, &MaterialParams::default(), settings.background)
            .unwrap()
    }

    #[test]
    fn test_background_outside_mesh() {
        let image = shade(&facing_quad(), &PointLight::at(Point3f::new(0.0, 0.0, 5.0)));
        assert_eq!(image.get(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_unlit_side_is_ambient() {
        let image = shade(&facing_quad(), &PointLight::at(Point3f::new(0.0, 0.0, -5.0)));
        let c = image.get(16, 16).unwrap();
        assert_relative_eq!(c.r, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_front_light_adds_diffuse_and_specular() {
        let image = shade(&facing_quad(), &PointLight::at(Point3f::new(0.0, 0.0, 5.0)));
        let c = image.get(16, 16).unwrap();
        assert!(c.r > 0.9, "expected a lit center, got {:?}", c);
    }

    #[test]
    fn test_flipped_winding_shades_the_same() {
        let light = PointLight::at(Point3f::new(0.0, 0.0, 5.0));
        let mut flipped = facing_quad();
        for face in &mut flipped.faces {
            face.swap(1, 2);
        }
        let a = shade(&facing_quad(), &light);
        let b = shade(&flipped, &light);
        for (pa, pb) in a.pixels().iter().zip(b.pixels()) {
            assert_relative_eq!(pa.r, pb.r, epsilon = 1e-4);
            assert_relative_eq!(pa.b, pb.b, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_vertex_colors_tint_output() {
        let mut mesh = facing_quad();
        mesh.set_colors(vec![Color::new(1.0, 0.0, 0.0); 4]);
        let image = shade(&mesh, &PointLight::at(Point3f::new(0.0, 0.0, -5.0)));
        let c = image.get(16, 16).unwrap();
        assert_relative_eq!(c.g, 0.0);
        assert_relative_eq!(c.r, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_light_behind_surface_adds_no_highlight() {
        let mesh = facing_quad();
        let normals = mesh.vertex_normals();
        let colors = vec![Color::WHITE; 4];
        let camera = Camera::look_at_view(5.0, 0.0, 0.0);
        // grazing light just behind the quad, mirrored past the view direction
        let light = PointLight::at(Point3f::new(20.0, 0.0, -0.5));
        let material = MaterialParams {
            shininess: 1.0,
            ..MaterialParams::default()
        };
        let frag = Fragment {
            face: 0,
            depth: 0.0,
            bary: [0.1, 0.45, 0.45],
        };
        let c = shade_fragment(&mesh, &normals, &colors, &frag, &camera, &light, &material);
        assert_relative_eq!(c.r, 0.5, epsilon = 1e-5);
        assert_relative_eq!(c.b, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_mismatched_colors_fail() {
        let mut mesh = facing_quad();
        mesh.colors = Some(vec![Color::WHITE; 2]);
        let camera = Camera::look_at_view(5.0, 0.0, 0.0);
        let settings = RasterSettings::default().with_image_size(8);
        // validate() inside rasterize already rejects the mesh
        assert!(rasterize(&mesh, &camera, &settings).is_err());
    }
}

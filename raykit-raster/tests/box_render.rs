//! Integration tests for rendering the unit box

use raykit_core::{Color, Point3f};
use raykit_raster::{primitives, Camera, MeshRenderer, PointLight, RasterSettings};

fn renderer(dist: f32, light: Point3f) -> MeshRenderer {
    MeshRenderer::new(
        Camera::look_at_view(dist, 0.0, 0.0),
        RasterSettings::default().with_image_size(64),
        PointLight::at(light),
    )
}

#[test]
fn test_box_fills_center_and_leaves_background() {
    let image = renderer(6.0, Point3f::new(0.0, 0.0, 3.0))
        .render(&primitives::unit_box())
        .unwrap();
    assert_eq!(image.width(), 64);
    assert_eq!(image.height(), 64);
    assert_eq!(image.get(0, 0), Some(Color::WHITE));
    assert_ne!(image.get(32, 32), Some(Color::WHITE));
}

#[test]
fn test_light_in_front_is_brighter_than_behind() {
    let mesh = primitives::unit_box();
    let front = renderer(6.0, Point3f::new(0.0, 0.0, 3.0)).render(&mesh).unwrap();
    let back = renderer(6.0, Point3f::new(0.0, 0.0, -3.0)).render(&mesh).unwrap();
    let f = front.get(32, 32).unwrap();
    let b = back.get(32, 32).unwrap();
    assert!(f.r > b.r);
}

#[test]
fn test_default_view_renders() {
    // the mesh demo view: camera at distance 2.7, light behind the box
    let image = renderer(2.7, Point3f::new(0.0, 0.0, -3.0))
        .render(&primitives::unit_box())
        .unwrap();
    assert!(image.pixels().iter().all(|c| c.is_finite()));
    assert_ne!(image.get(32, 32), Some(Color::WHITE));
}

#[test]
fn test_icosphere_silhouette_is_round() {
    let image = renderer(4.0, Point3f::new(2.0, 2.0, 4.0))
        .render(&primitives::icosphere(3))
        .unwrap();
    // symmetric coverage along the two axes through the center
    let covered = |x: usize, y: usize| image.get(x, y) != Some(Color::WHITE);
    let row: usize = (0..64).filter(|&x| covered(x, 32)).count();
    let col: usize = (0..64).filter(|&y| covered(32, y)).count();
    assert!(row > 0);
    assert!((row as i32 - col as i32).abs() <= 2);
}

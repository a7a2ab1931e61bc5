//! Integration tests for the built-in demo scenes

use raykit_core::{Color, Point3f};
use raykit_trace::demo::{camera_path, phong_scene, projection_scene, DEMO_BACKGROUND};
use raykit_trace::{render, render_phong, render_projection, RenderMode};

fn background_pixels(image: &raykit_core::Framebuffer) -> usize {
    image.pixels().iter().filter(|c| **c == DEMO_BACKGROUND).count()
}

#[test]
fn test_projection_from_origin_sees_front_sphere() {
    let scene = projection_scene().unwrap();
    let image = render_projection(&scene);
    assert_eq!(image.width(), 100);
    assert_eq!(image.height(), 100);
    assert_eq!(image.get(50, 50), Some(Color::new(0.0, 0.0, 1.0)));
    assert!(background_pixels(&image) > 0);
}

#[test]
fn test_every_camera_position_renders() {
    let mut scene = projection_scene().unwrap();
    let mut frames = Vec::new();
    for position in camera_path() {
        scene.set_camera(position);
        frames.push(render_projection(&scene));
    }
    assert_eq!(frames.len(), 9);
    // moving the camera changes the picture
    assert_ne!(frames[0].to_rgb8(), frames[8].to_rgb8());
}

#[test]
fn test_room_hides_background() {
    let projection = render_projection(&projection_scene().unwrap());
    let phong = render_phong(&phong_scene().unwrap());
    assert!(background_pixels(&phong) < background_pixels(&projection));
    assert!(phong.pixels().iter().all(|c| c.is_finite()));
}

#[test]
fn test_modes_share_visibility() {
    let mut scene = phong_scene().unwrap();
    scene.set_camera(Point3f::new(10.0, 10.0, -40.0));
    let flat = render(&scene, RenderMode::Projection);
    let shaded = render(&scene, RenderMode::Phong);
    assert_eq!(flat.width(), shaded.width());
    assert_ne!(flat.to_rgb8(), shaded.to_rgb8());
}

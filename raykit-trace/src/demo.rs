//! Built-in demo scenes

use crate::light::Light;
use crate::scene::Scene;
use crate::shape::{Cuboid, Sphere};
use raykit_core::{Color, Point3f, Result};

/// Background shared by both demos
pub const DEMO_BACKGROUND: Color = Color::new(0.7, 0.5, 0.5);

const WALL_COLOR: Color = Color::new(0.5, 0.5, 0.0);

fn demo_spheres() -> Vec<Sphere> {
    vec![
        Sphere::new(Point3f::new(0.0, -10.0, -60.0), 12.0, Color::new(0.0, 0.0, 1.0)),
        Sphere::new(Point3f::new(-10.0, 0.0, -80.0), 10.0, Color::new(1.0, 1.0, 0.0)),
        Sphere::new(Point3f::new(0.0, 20.0, -100.0), 10.0, Color::new(0.0, 1.0, 0.0)),
        Sphere::new(Point3f::new(20.0, 0.0, -120.0), 10.0, Color::new(1.0, 0.5, 0.0)),
        Sphere::new(Point3f::new(10.0, 0.0, -130.0), 10.0, Color::new(1.0, 0.0, 1.0)),
        Sphere::new(Point3f::new(0.0, 10.0, -140.0), 10.0, Color::new(0.0, 1.0, 1.0)),
    ]
}

fn demo_room() -> Vec<Cuboid> {
    let corners = [
        // back wall
        ((-100.0, -100.0, -150.0), (100.0, 100.0, -151.0)),
        // floor, ceiling, left and right walls
        ((-35.0, -35.0, -150.0), (35.0, -35.0, 0.0)),
        ((-35.0, 35.0, -150.0), (35.0, 35.0, 0.0)),
        ((-35.0, -35.0, -150.0), (-35.0, 35.0, 0.0)),
        ((35.0, 35.0, -150.0), (35.0, -35.0, 0.0)),
        // pillars
        ((30.0, 35.0, -80.0), (25.0, 30.0, -100.0)),
        ((30.0, -35.0, -80.0), (25.0, -25.0, -100.0)),
    ];
    corners
        .iter()
        .map(|&(a, b)| {
            Cuboid::new(
                Point3f::new(a.0, a.1, a.2),
                Point3f::new(b.0, b.1, b.2),
                WALL_COLOR,
            )
        })
        .collect()
}

/// Six colored spheres receding from the camera
pub fn projection_scene() -> Result<Scene> {
    demo_spheres()
        .into_iter()
        .fold(Scene::builder(), |b, s| b.with_object(s))
        .with_background(DEMO_BACKGROUND)
        .build()
}

/// The projection spheres inside a lit room
pub fn phong_scene() -> Result<Scene> {
    let builder = demo_spheres()
        .into_iter()
        .fold(Scene::builder(), |b, s| b.with_object(s));
    demo_room()
        .into_iter()
        .fold(builder, |b, c| b.with_object(c))
        .with_light(Light::new(Point3f::new(-30.0, -30.0, 0.0), 0.2))
        .with_light(Light::new(Point3f::new(30.0, 30.0, -50.0), 0.5))
        .with_light(Light::new(Point3f::new(15.0, -10.0, -50.0), 0.8))
        .with_background(DEMO_BACKGROUND)
        .build()
}

/// Camera positions the demos are rendered from, in order
pub fn camera_path() -> Vec<Point3f> {
    [
        (0.0, 0.0, 0.0),
        (5.0, 5.0, -20.0),
        (10.0, 10.0, -40.0),
        (15.0, 15.0, -40.0),
        (20.0, 20.0, -40.0),
        (25.0, 25.0, -40.0),
        (25.0, 25.0, -60.0),
        (20.0, 20.0, -80.0),
        (10.0, 10.0, -100.0),
    ]
    .iter()
    .map(|&(x, y, z)| Point3f::new(x, y, z))
    .collect()
}

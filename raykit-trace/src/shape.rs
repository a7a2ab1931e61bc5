//! Traceable shapes

use crate::light::Material;
use raykit_core::{Color, Point3f, Ray, Vector3f};

/// A ray-surface intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Ray parameter of the hit, in units of the ray direction. May be negative
    /// when the surface lies behind the ray origin.
    pub t: f32,
    pub point: Point3f,
    /// Unit outward surface normal at `point`
    pub normal: Vector3f,
}

/// A surface that rays can be traced against
pub trait Shape: std::fmt::Debug + Send + Sync {
    /// Intersect the ray with the shape's surface.
    ///
    /// Only the first crossing along the full line is reported, even if it is
    /// behind the origin; callers decide which distances are visible.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;

    /// Flat base color
    fn color(&self) -> Color;

    /// Reference point used for depth cueing
    fn center(&self) -> Point3f;

    /// Surface reflectance used by Phong shading
    fn material(&self) -> Material {
        Material::default()
    }
}

/// A sphere given by center and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3f,
    pub radius: f32,
    pub color: Color,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Point3f, radius: f32, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
            material: Material::default(),
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

impl Shape for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(&ray.direction);
        if a == 0.0 {
            return None;
        }
        let b = 2.0 * oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        // near root only: a ray starting inside the sphere reports a negative t
        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        let point = ray.point_at(t);
        let normal = (point - self.center)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3f::z);
        Some(Hit { t, point, normal })
    }

    fn color(&self) -> Color {
        self.color
    }

    fn center(&self) -> Point3f {
        self.center
    }

    fn material(&self) -> Material {
        self.material
    }
}

/// An axis-aligned box.
///
/// Either extent may be zero, which makes the box a flat rectangle (walls and
/// floors are modelled that way).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    min: Point3f,
    max: Point3f,
    pub color: Color,
    pub material: Material,
}

impl Cuboid {
    /// Build a box from any two opposite corners
    pub fn new(a: Point3f, b: Point3f, color: Color) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
            color,
            material: Material::default(),
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn min(&self) -> Point3f {
        self.min
    }

    pub fn max(&self) -> Point3f {
        self.max
    }
}

impl Shape for Cuboid {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_axis = None;

        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d == 0.0 {
                // parallel to this slab: either always inside it or never
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let t0 = (lo - o) / d;
            let t1 = (hi - o) / d;
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };

            if near > t_enter {
                t_enter = near;
                enter_axis = Some(axis);
            }
            t_exit = t_exit.min(far);
            if t_enter > t_exit {
                return None;
            }
        }

        let axis = enter_axis?;
        let mut normal = Vector3f::zeros();
        normal[axis] = -ray.direction[axis].signum();
        Some(Hit {
            t: t_enter,
            point: ray.point_at(t_enter),
            normal,
        })
    }

    fn color(&self) -> Color {
        self.color
    }

    fn center(&self) -> Point3f {
        nalgebra::center(&self.min, &self.max)
    }

    fn material(&self) -> Material {
        self.material
    }
}

//! Closed set of shapes the tracer can intersect.

use crate::hittable::{HitRecord, Hittable};
use crate::{Plane, Sphere, Triangle};
use glint_core::Geometry;
use glint_math::Ray;

/// Any supported primitive, dispatched by `match`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Plane(Plane),
    Triangle(Triangle),
    Sphere(Sphere),
}

impl Primitive {
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Plane(_) => "plane",
            Primitive::Triangle(_) => "triangle",
            Primitive::Sphere(_) => "sphere",
        }
    }
}

impl From<&Geometry> for Primitive {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Plane { normal, d } => Primitive::Plane(Plane::new(*normal, *d)),
            Geometry::Triangle { positions, normals } => {
                Primitive::Triangle(Triangle::new(*positions, *normals))
            }
            Geometry::Sphere { radius } => Primitive::Sphere(Sphere::new(*radius)),
        }
    }
}

impl From<Plane> for Primitive {
    fn from(plane: Plane) -> Self {
        Primitive::Plane(plane)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl Hittable for Primitive {
    fn intersect(&self, ray: &Ray, t_min: f32, best: &HitRecord) -> Option<HitRecord> {
        match self {
            Primitive::Plane(plane) => plane.intersect(ray, t_min, best),
            Primitive::Triangle(triangle) => triangle.intersect(ray, t_min, best),
            Primitive::Sphere(sphere) => sphere.intersect(ray, t_min, best),
        }
    }
}

//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use glint_math::{Ray, Vec3};

/// A sphere centred at the object-space origin.
///
/// Like the plane, the reported normal is the outward normal whether the
/// ray starts outside or inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray, t_min: f32, best: &HitRecord) -> Option<HitRecord> {
        let oc = -ray.origin();
        let a = ray.direction().length_squared();
        if a == 0.0 || self.radius == 0.0 {
            return None;
        }

        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !best.accepts(root, t_min) {
            root = (h + sqrtd) / a;
            if !best.accepts(root, t_min) {
                return None;
            }
        }

        let normal = ray.at(root) / self.radius;
        Some(HitRecord::new(root, normal))
    }
}

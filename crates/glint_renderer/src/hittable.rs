//! Hittable trait and HitRecord for ray-object intersection.

use glint_math::{Interval, Ray, Vec3};

/// Below this magnitude a ray is treated as parallel to a surface.
///
/// Only used for degeneracy tests; the offset applied to secondary ray
/// origins is `SURFACE_EPSILON`.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Best intersection found so far, in the space of the test that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Ray parameter of the hit
    pub time: f32,
    /// Surface normal at the hit
    pub normal: Vec3,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            time: f32::INFINITY,
            normal: Vec3::ZERO,
        }
    }
}

impl HitRecord {
    pub fn new(time: f32, normal: Vec3) -> Self {
        Self { time, normal }
    }

    /// Whether a candidate at parameter `t` beats this record.
    ///
    /// Accepts `t_min <= t < self.time`.
    #[inline]
    pub fn accepts(&self, t: f32, t_min: f32) -> bool {
        Interval::new(t_min, self.time).admits(t)
    }
}

/// Trait for shapes that can be hit by rays in their own local frame.
pub trait Hittable: Send + Sync {
    /// Test a ray against this shape.
    ///
    /// Returns a new record only when the hit is valid (`t >= t_min`) and
    /// strictly closer than `best`; otherwise `None`, and `best` stands.
    /// Threading the result through several shapes keeps the closest hit.
    fn intersect(&self, ray: &Ray, t_min: f32, best: &HitRecord) -> Option<HitRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_accepts_anything_ahead() {
        let rec = HitRecord::default();
        assert!(rec.accepts(0.0, 0.0));
        assert!(rec.accepts(1e20, 0.0));
        assert!(!rec.accepts(-0.5, 0.0));
    }

    #[test]
    fn test_record_requires_strict_improvement() {
        let rec = HitRecord::new(3.0, Vec3::Y);
        assert!(rec.accepts(2.999, 0.0));
        assert!(!rec.accepts(3.0, 0.0));
        assert!(!rec.accepts(4.0, 0.0));
    }
}

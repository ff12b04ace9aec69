//! Infinite plane primitive.

use crate::hittable::{HitRecord, Hittable, PARALLEL_EPSILON};
use glint_math::{Ray, Vec3};

/// The plane `{x : dot(x, normal) = d}` in object space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    normal: Vec3,
    /// Signed offset along the normal
    d: f32,
}

impl Plane {
    /// Create a new plane. The normal is normalized.
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self {
            normal: normal.normalize(),
            d,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn d(&self) -> f32 {
        self.d
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray, t_min: f32, best: &HitRecord) -> Option<HitRecord> {
        let denom = ray.direction().dot(self.normal);

        // Ray is parallel to the plane
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.d - ray.origin().dot(self.normal)) / denom;
        if !best.accepts(t, t_min) {
            return None;
        }

        // The normal is reported as authored, whichever side the ray came from
        Some(HitRecord::new(t, self.normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> Plane {
        Plane::new(Vec3::Y, 0.0)
    }

    #[test]
    fn test_plane_hit_straight_down() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = ground()
            .intersect(&ray, 0.0, &HitRecord::default())
            .expect("ray should hit the plane");

        assert!((rec.time - 5.0).abs() < 1e-6);
        assert_eq!(rec.normal, Vec3::Y);
    }

    #[test]
    fn test_plane_hit_lies_on_plane() {
        let plane = Plane::new(Vec3::new(1.0, 2.0, -0.5), 1.5);
        let ray = Ray::new(Vec3::new(-3.0, 4.0, 2.0), Vec3::new(0.7, -1.3, 0.2));

        let rec = plane
            .intersect(&ray, 0.0, &HitRecord::default())
            .expect("ray should hit the plane");

        let p = ray.at(rec.time);
        assert!((p.dot(plane.normal()) - plane.d()).abs() < 1e-4);
        assert!(rec.time >= 0.0);
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(ground().intersect(&ray, 0.0, &HitRecord::default()).is_none());
    }

    #[test]
    fn test_plane_behind_origin_rejected() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(ground().intersect(&ray, 0.0, &HitRecord::default()).is_none());

        // And a hit closer than t_min is rejected too
        let down = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(ground().intersect(&down, 6.0, &HitRecord::default()).is_none());
    }

    #[test]
    fn test_plane_keeps_closer_record() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let closer = HitRecord::new(2.0, Vec3::X);
        assert!(ground().intersect(&ray, 0.0, &closer).is_none());

        let farther = HitRecord::new(7.0, Vec3::X);
        let rec = ground().intersect(&ray, 0.0, &farther).unwrap();
        assert!((rec.time - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_plane_back_face_normal_not_flipped() {
        // Hit from below: the authored +Y normal is still reported
        let ray = Ray::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Y);
        let rec = ground().intersect(&ray, 0.0, &HitRecord::default()).unwrap();
        assert_eq!(rec.normal, Vec3::Y);
    }
}

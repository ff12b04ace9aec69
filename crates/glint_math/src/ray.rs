use crate::{Mat4, Vec3};

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length. Rays handed to the
/// intersection tests after a space change keep whatever length the
/// transform gave them, so `t` stays a parameter of the original ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Re-express this ray in another space.
    ///
    /// The origin is transformed as a point (w = 1, with the projective
    /// divide) and the direction as a vector (w = 0). The direction is not
    /// renormalized.
    pub fn apply_transform(&mut self, matrix: &Mat4) {
        self.origin = matrix.project_point3(self.origin);
        self.direction = matrix.transform_vector3(self.direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_apply_translation_moves_origin_only() {
        let mut ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -2.0));
        ray.apply_transform(&Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));

        assert_eq!(ray.origin, Vec3::new(11.0, 2.0, 3.0));
        assert_eq!(ray.direction, Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_apply_scale_keeps_parameter() {
        let world = Ray::new(Vec3::new(0.0, 4.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let world_to_local = Mat4::from_scale(Vec3::splat(0.5));

        let mut local = world;
        local.apply_transform(&world_to_local);

        // The same t lands on the same point once mapped back to world space
        let back = world_to_local.inverse().transform_point3(local.at(3.0));
        assert!((back - world.at(3.0)).length() < 1e-5);
        assert!((local.direction.length() - 0.5).abs() < 1e-6);
    }
}

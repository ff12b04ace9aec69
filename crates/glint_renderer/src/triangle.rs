//! Triangle primitive for ray tracing.
//!
//! Solves `[-D | e1 | e2] * [t, beta, gamma]^T = O - v0` directly for the
//! ray parameter and the barycentric coordinates, then interpolates the
//! vertex normals for smooth shading.

use crate::hittable::{HitRecord, Hittable, PARALLEL_EPSILON};
use glint_math::{Mat3, Ray, Vec3};

/// A triangle with per-vertex shading normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    positions: [Vec3; 3],
    normals: [Vec3; 3],
}

/// Solution of the ray/triangle system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    /// Ray parameter
    pub t: f32,
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl Barycentric {
    /// Inside test: `beta >= 0`, `gamma >= 0`, `beta + gamma <= 1`.
    pub fn is_inside(&self) -> bool {
        self.beta >= 0.0 && self.gamma >= 0.0 && self.beta + self.gamma <= 1.0
    }
}

impl Triangle {
    /// Create a triangle with explicit vertex normals.
    pub fn new(positions: [Vec3; 3], normals: [Vec3; 3]) -> Self {
        Self { positions, normals }
    }

    /// Create a triangle whose vertex normals all equal `normal`.
    pub fn with_normal(v0: Vec3, v1: Vec3, v2: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        Self::new([v0, v1, v2], [normal; 3])
    }

    pub fn positions(&self) -> &[Vec3; 3] {
        &self.positions
    }

    /// Solve for the ray parameter and barycentric coordinates of the
    /// ray's crossing with the triangle's plane.
    ///
    /// Returns `None` when the ray is parallel to that plane. The result is
    /// not checked against the triangle's edges.
    pub fn solve(&self, ray: &Ray) -> Option<Barycentric> {
        let [v0, v1, v2] = self.positions;
        let e1 = v1 - v0;
        let e2 = v2 - v0;

        let system = Mat3::from_cols(-ray.direction(), e1, e2);
        if system.determinant().abs() < PARALLEL_EPSILON {
            return None;
        }

        let solution = system.inverse() * (ray.origin() - v0);
        let (t, beta, gamma) = (solution.x, solution.y, solution.z);

        Some(Barycentric {
            t,
            alpha: 1.0 - beta - gamma,
            beta,
            gamma,
        })
    }

    /// Interpolated, normalized shading normal at barycentric coordinates.
    pub fn shading_normal(&self, bary: &Barycentric) -> Vec3 {
        let [n0, n1, n2] = self.normals;
        (bary.alpha * n0 + bary.beta * n1 + bary.gamma * n2).normalize()
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray, t_min: f32, best: &HitRecord) -> Option<HitRecord> {
        let bary = self.solve(ray)?;

        if !bary.is_inside() {
            return None;
        }

        if !best.accepts(bary.t, t_min) {
            return None;
        }

        Some(HitRecord::new(bary.t, self.shading_normal(&bary)))
    }
}

// Transform utilities for Mat4
//
// Extends glam::Mat4 with the pieces the tracer needs when moving hits
// between object space and world space.

use glam::{Mat3, Mat4, Vec3};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Translation component (the fourth column) of an affine matrix.
    fn translation(&self) -> Vec3;

    /// Inverse-transpose of the upper 3x3 block.
    ///
    /// Maps object-space normals to world space, including under
    /// non-uniform scale.
    fn normal_matrix(&self) -> Mat3;

    /// Transform a normal with the normal matrix and renormalize it.
    fn transform_normal(&self, normal: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn translation(&self) -> Vec3 {
        self.w_axis.truncate()
    }

    fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(*self).inverse().transpose()
    }

    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        (self.normal_matrix() * normal).normalize()
    }
}

//! Pinhole perspective camera.

use glint_math::{Ray, Vec2, Vec3};

/// Camera generating primary rays from normalized device coordinates.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    /// Vertical field of view in degrees
    vfov: f32,
    /// Image width over height
    aspect: f32,
    /// Minimum valid ray parameter
    t_min: f32,

    // Cached computed values (set by initialize())
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    half_width: f32,
    half_height: f32,
}

impl PerspectiveCamera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        let mut camera = Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 45.0,
            aspect: 1.0,
            t_min: 0.0,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            half_width: 1.0,
            half_height: 1.0,
        };
        camera.initialize();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Set the aspect ratio (width / height).
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Set the minimum valid ray parameter.
    pub fn with_t_min(mut self, t_min: f32) -> Self {
        self.t_min = t_min;
        self
    }

    /// Recompute the camera basis (call after changing settings).
    pub fn initialize(&mut self) {
        self.forward = (self.look_at - self.look_from).normalize();
        self.right = self.forward.cross(self.vup).normalize();
        self.up = self.right.cross(self.forward);

        self.half_height = (self.vfov.to_radians() / 2.0).tan();
        self.half_width = self.half_height * self.aspect;
    }

    /// Generate a unit-direction ray through a point in normalized device
    /// coordinates, `[-1, 1]` on both axes with +y up.
    pub fn generate_ray(&self, ndc: Vec2) -> Ray {
        let direction = self.forward
            + ndc.x * self.half_width * self.right
            + ndc.y * self.half_height * self.up;
        Ray::new(self.look_from, direction.normalize())
    }

    pub fn t_min(&self) -> f32 {
        self.t_min
    }

    pub fn position(&self) -> Vec3 {
        self.look_from
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new()
    }
}

//! Object-space shape descriptions.

use glint_math::Vec3;

/// Shape data attached to a renderable node, expressed in the node's
/// local coordinate frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// The set `{x : dot(x, normal) = d}`.
    Plane { normal: Vec3, d: f32 },

    /// Three vertices with one shading normal per vertex.
    Triangle {
        positions: [Vec3; 3],
        normals: [Vec3; 3],
    },

    /// A sphere centred at the local origin.
    Sphere { radius: f32 },
}

impl Geometry {
    /// Create a plane. The normal is normalized by the renderer.
    pub fn plane(normal: Vec3, d: f32) -> Self {
        Geometry::Plane { normal, d }
    }

    /// Create a triangle with explicit per-vertex normals.
    pub fn triangle(positions: [Vec3; 3], normals: [Vec3; 3]) -> Self {
        Geometry::Triangle { positions, normals }
    }

    /// Create a triangle whose vertex normals all equal the face normal
    /// given by the counter-clockwise winding `p0 -> p1 -> p2`.
    pub fn flat_triangle(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();
        Geometry::Triangle {
            positions: [p0, p1, p2],
            normals: [normal; 3],
        }
    }

    /// Create a sphere around the local origin.
    pub fn sphere(radius: f32) -> Self {
        Geometry::Sphere { radius }
    }

    /// Short name for log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Plane { .. } => "plane",
            Geometry::Triangle { .. } => "triangle",
            Geometry::Sphere { .. } => "sphere",
        }
    }
}

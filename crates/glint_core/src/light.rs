//! Light sources.

use glint_math::Vec3;

/// A light in the scene.
///
/// The variant set is closed; the renderer matches it exhaustively. Point
/// lights take their position from the node they are attached to.
#[derive(Clone, Debug, PartialEq)]
pub enum Light {
    /// Parallel light travelling along `direction` (unit length).
    Directional { direction: Vec3, color: Vec3 },

    /// Omnidirectional light at the owning node's origin.
    ///
    /// Intensity falls off as `1 / (attenuation.x * d^2)`. Scene authors
    /// must supply a positive `attenuation.x`; it is not validated.
    Point { color: Vec3, attenuation: Vec3 },

    /// Uniform light with no position, direction or occlusion.
    Ambient { color: Vec3 },
}

impl Light {
    /// Create a directional light. The direction is normalized.
    pub fn directional(direction: Vec3, color: Vec3) -> Self {
        Light::Directional {
            direction: direction.normalize(),
            color,
        }
    }

    /// Create a point light.
    pub fn point(color: Vec3, attenuation: Vec3) -> Self {
        Light::Point { color, attenuation }
    }

    /// Create an ambient light.
    pub fn ambient(color: Vec3) -> Self {
        Light::Ambient { color }
    }

    /// Light color (before any falloff).
    pub fn color(&self) -> Vec3 {
        match self {
            Light::Directional { color, .. }
            | Light::Point { color, .. }
            | Light::Ambient { color } => *color,
        }
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self, Light::Ambient { .. })
    }

    /// Short name for error and log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Light::Directional { .. } => "directional",
            Light::Point { .. } => "point",
            Light::Ambient { .. } => "ambient",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_is_normalized() {
        let light = Light::directional(Vec3::new(0.0, -3.0, 0.0), Vec3::ONE);
        match light {
            Light::Directional { direction, .. } => {
                assert!((direction - Vec3::NEG_Y).length() < 1e-6);
            }
            _ => panic!("expected directional light"),
        }
    }

    #[test]
    fn test_kind_and_color() {
        let ambient = Light::ambient(Vec3::splat(0.2));
        assert!(ambient.is_ambient());
        assert_eq!(ambient.kind(), "ambient");
        assert_eq!(ambient.color(), Vec3::splat(0.2));

        let point = Light::point(Vec3::ONE, Vec3::new(1.0, 0.0, 0.0));
        assert!(!point.is_ambient());
        assert_eq!(point.kind(), "point");
    }
}

//! Per-light incoming radiance at a shading point.

use crate::{PreparedLight, RenderError, RenderResult};
use glint_core::Light;
use glint_math::Vec3;

/// What a single light delivers to a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illumination {
    /// Unit vector from the point toward the light
    pub direction_to_light: Vec3,
    /// Incoming intensity after falloff
    pub intensity: Vec3,
    /// World distance to the light (`+inf` for directional lights)
    pub distance: f32,
}

/// Evaluate a directional or point light at `hit_point`.
///
/// Ambient lights carry no direction or distance and are rejected; the
/// shading model sums them separately. A point light with a zero
/// attenuation coefficient yields a non-finite intensity.
pub fn illuminate(light: &PreparedLight, hit_point: Vec3) -> RenderResult<Illumination> {
    match &light.light {
        Light::Directional { direction, color } => Ok(Illumination {
            direction_to_light: -*direction,
            intensity: *color,
            distance: f32::INFINITY,
        }),
        Light::Point { color, attenuation } => {
            let to_light = light.position() - hit_point;
            let distance = to_light.length();

            // I = I_base / (alpha * d^2)
            let falloff = 1.0 / (attenuation.x * distance * distance);

            Ok(Illumination {
                direction_to_light: to_light / distance,
                intensity: *color * falloff,
                distance,
            })
        }
        Light::Ambient { .. } => Err(RenderError::NonDirectionalLight(light.light.kind())),
    }
}

//! Local Phong shading with shadow rays.

use crate::illuminator::illuminate;
use crate::{Color, RenderResult, TraceCounters, World};
use glint_core::{Light, Material};
use glint_math::{Ray, Vec3};

/// Offset applied along a secondary ray's direction before casting it, so
/// the ray does not immediately re-hit the surface it leaves.
pub const SURFACE_EPSILON: f32 = 1e-3;

/// Everything known about a hit when it is shaded.
#[derive(Debug, Clone, Copy)]
pub struct ShadingContext<'a> {
    /// World-space hit point
    pub hit_point: Vec3,
    /// World-space unit normal
    pub normal: Vec3,
    /// Direction of the incoming ray (any length)
    pub ray_direction: Vec3,
    pub material: &'a Material,
}

/// Shade a hit: ambient from every ambient light, plus diffuse and
/// specular from every other light that is not occluded.
///
/// The result is not clamped.
pub fn phong_shading(
    ctx: &ShadingContext,
    world: &World,
    t_min: f32,
    shadows_enabled: bool,
    counters: &mut TraceCounters,
) -> RenderResult<Color> {
    let material = ctx.material;

    let mut color: Color = world
        .lights()
        .iter()
        .filter_map(|prepared| match prepared.light {
            Light::Ambient { color } => Some(material.ambient * color),
            _ => None,
        })
        .sum();

    let view_dir = (-ctx.ray_direction).normalize();

    for prepared in world.lights().iter().filter(|l| !l.light.is_ambient()) {
        let illum = illuminate(prepared, ctx.hit_point)?;
        let light_dir = illum.direction_to_light;

        if shadows_enabled {
            let shadow_ray = Ray::new(ctx.hit_point + SURFACE_EPSILON * light_dir, light_dir);
            counters.shadow_rays += 1;
            if world.occluded(&shadow_ray, t_min, illum.distance - SURFACE_EPSILON) {
                continue;
            }
        }

        // Diffuse
        let n_dot_l = ctx.normal.dot(light_dir).max(0.0);
        let diffuse = n_dot_l * material.diffuse * illum.intensity;

        // Specular
        let reflect_dir = reflect(-light_dir, ctx.normal);
        let spec_factor = reflect_dir.dot(view_dir).max(0.0).powf(material.shininess);
        let specular = spec_factor * material.specular * illum.intensity;

        color += diffuse + specular;
    }

    Ok(color)
}

/// Reflect a vector about a normal.
#[inline]
pub(crate) fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

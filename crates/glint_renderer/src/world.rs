//! Flattened, render-ready view of a scene.
//!
//! Each object keeps its primitive in object space together with the
//! matrices needed to move rays in and hits out. Rays are transformed per
//! object; since object-space parameters are not comparable across
//! differently scaled objects, candidates are ranked by world-space
//! distance from the ray origin.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use crate::{Primitive, RenderResult};
use glint_core::{Light, Material, Scene};
use glint_math::{Mat3, Mat4, Mat4Ext, Ray, Vec3};

/// An object ready for intersection.
#[derive(Debug, Clone)]
pub struct Traceable {
    pub primitive: Primitive,
    pub material: Option<Arc<Material>>,
    local_to_world: Mat4,
    world_to_local: Mat4,
    normal_matrix: Mat3,
}

impl Traceable {
    pub fn new(primitive: Primitive, local_to_world: Mat4, material: Option<Arc<Material>>) -> Self {
        Self {
            primitive,
            material,
            local_to_world,
            world_to_local: local_to_world.inverse(),
            normal_matrix: local_to_world.normal_matrix(),
        }
    }

    pub fn local_to_world(&self) -> &Mat4 {
        &self.local_to_world
    }

    /// Intersect a world-space ray with this object.
    ///
    /// Returns the object-space record together with the world-space hit
    /// point.
    fn intersect_world(&self, ray: &Ray, t_min: f32) -> Option<(HitRecord, Vec3)> {
        let mut local_ray = *ray;
        local_ray.apply_transform(&self.world_to_local);

        let record = self
            .primitive
            .intersect(&local_ray, t_min, &HitRecord::default())?;
        let world_point = self
            .local_to_world
            .project_point3(local_ray.at(record.time));

        Some((record, world_point))
    }

    /// Object-space normal to world space, normalized.
    pub fn world_normal(&self, local_normal: Vec3) -> Vec3 {
        (self.normal_matrix * local_normal).normalize()
    }
}

/// A light with its owning node's transform resolved.
#[derive(Debug, Clone)]
pub struct PreparedLight {
    pub light: Light,
    pub local_to_world: Mat4,
}

impl PreparedLight {
    pub fn new(light: Light, local_to_world: Mat4) -> Self {
        Self {
            light,
            local_to_world,
        }
    }

    /// World position, the translation of the owning transform.
    pub fn position(&self) -> Vec3 {
        self.local_to_world.translation()
    }
}

/// The winning intersection of a closest-hit search.
#[derive(Debug, Clone, Copy)]
pub struct WorldHit<'a> {
    pub object: &'a Traceable,
    /// Index of the object in the world
    pub index: usize,
    /// World-space distance from the ray origin
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// World-space unit normal
    pub normal: Vec3,
}

/// Read-only scene data for one render.
#[derive(Debug, Clone, Default)]
pub struct World {
    objects: Vec<Traceable>,
    lights: Vec<PreparedLight>,
}

impl World {
    /// Create a world from already prepared parts.
    pub fn new(objects: Vec<Traceable>, lights: Vec<PreparedLight>) -> Self {
        Self { objects, lights }
    }

    /// Flatten a scene graph, resolving every node transform once.
    pub fn from_scene(scene: &Scene) -> RenderResult<Self> {
        let objects = scene
            .renderables()
            .iter()
            .map(|renderable| {
                let local_to_world = scene.local_to_world(renderable.node)?;
                Ok(Traceable::new(
                    Primitive::from(&renderable.geometry),
                    local_to_world,
                    renderable.material.clone(),
                ))
            })
            .collect::<RenderResult<Vec<_>>>()?;

        let lights = scene
            .lights()
            .iter()
            .map(|source| {
                let local_to_world = scene.local_to_world(source.node)?;
                Ok(PreparedLight::new(source.light.clone(), local_to_world))
            })
            .collect::<RenderResult<Vec<_>>>()?;

        log::info!(
            "Prepared world '{}': {} objects, {} lights",
            scene.name,
            objects.len(),
            lights.len()
        );

        Ok(Self::new(objects, lights))
    }

    pub fn objects(&self) -> &[Traceable] {
        &self.objects
    }

    pub fn lights(&self) -> &[PreparedLight] {
        &self.lights
    }

    /// Find the closest object along a world-space ray.
    ///
    /// Ties keep the earlier object.
    pub fn closest_hit(&self, ray: &Ray, t_min: f32) -> Option<WorldHit<'_>> {
        let (index, record, point, distance) = self
            .objects
            .iter()
            .enumerate()
            .filter_map(|(index, object)| {
                let (record, point) = object.intersect_world(ray, t_min)?;
                let distance = (point - ray.origin()).length();
                Some((index, record, point, distance))
            })
            .fold(None, |best: Option<(usize, HitRecord, Vec3, f32)>, candidate| {
                match best {
                    Some(best) if best.3 <= candidate.3 => Some(best),
                    _ => Some(candidate),
                }
            })?;

        let object = &self.objects[index];
        Some(WorldHit {
            object,
            index,
            distance,
            point,
            normal: object.world_normal(record.normal),
        })
    }

    /// Whether any object lies along `ray` closer than `max_distance`
    /// (world units). Stops at the first such object.
    pub fn occluded(&self, ray: &Ray, t_min: f32, max_distance: f32) -> bool {
        self.objects.iter().any(|object| {
            object
                .intersect_world(ray, t_min)
                .is_some_and(|(_, point)| (point - ray.origin()).length() < max_distance)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Plane, Sphere, Triangle};
    use glint_core::{Geometry, Transform};

    fn sphere_at(center: Vec3, scale: f32) -> Traceable {
        Traceable::new(
            Sphere::new(1.0).into(),
            Mat4::from_scale_rotation_translation(
                Vec3::splat(scale),
                glint_math::Quat::IDENTITY,
                center,
            ),
            None,
        )
    }

    #[test]
    fn test_closest_hit_uses_world_distance() {
        // Differently scaled spheres, the nearer one listed last
        let near = sphere_at(Vec3::new(0.0, 0.0, -5.0), 2.0);
        let far = sphere_at(Vec3::new(0.0, 0.0, -10.0), 0.5);
        let world = World::new(vec![far, near], Vec::new());

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = world.closest_hit(&ray, 0.0).expect("should hit");

        assert_eq!(hit.index, 1);
        assert!((hit.distance - 3.0).abs() < 1e-4);
        assert!((hit.point - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-4);
        assert!((hit.normal - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn test_closest_hit_is_order_independent() {
        let objects = vec![
            Traceable::new(Plane::new(Vec3::Y, 0.0).into(), Mat4::IDENTITY, None),
            sphere_at(Vec3::new(0.3, 1.0, -4.0), 1.0),
            Traceable::new(
                Triangle::with_normal(
                    Vec3::new(-2.0, -1.0, 0.0),
                    Vec3::new(2.0, -1.0, 0.0),
                    Vec3::new(0.0, 3.0, 0.0),
                    Vec3::Z,
                )
                .into(),
                Mat4::from_translation(Vec3::new(0.0, 0.0, -6.0)) * Mat4::from_scale(Vec3::new(3.0, 1.0, 1.0)),
                None,
            ),
        ];
        let mut reversed = objects.clone();
        reversed.reverse();

        let forward = World::new(objects, Vec::new());
        let backward = World::new(reversed, Vec::new());

        for dir in [
            Vec3::new(0.05, -0.1, -1.0),
            Vec3::new(0.0, -0.6, -1.0),
            Vec3::new(-0.3, 0.1, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
        ] {
            let ray = Ray::new(Vec3::new(0.0, 1.0, 2.0), dir);
            let a = forward.closest_hit(&ray, 0.0);
            let b = backward.closest_hit(&ray, 0.0);

            match (a, b) {
                (Some(a), Some(b)) => {
                    assert_eq!(a.object.primitive, b.object.primitive);
                    assert!((a.distance - b.distance).abs() < 1e-6);
                }
                (None, None) => {}
                _ => panic!("hit/miss disagreement for direction {dir:?}"),
            }
        }
    }

    #[test]
    fn test_normal_uses_inverse_transpose() {
        // Plane tilted 45 degrees, then squashed along X
        let plane = Plane::new(Vec3::new(1.0, 1.0, 0.0), 0.0);
        let object = Traceable::new(plane.into(), Mat4::from_scale(Vec3::new(4.0, 1.0, 1.0)), None);
        let world = World::new(vec![object], Vec::new());

        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let hit = world.closest_hit(&ray, 0.0).unwrap();

        // World surface tangent is (4, -1, 0)
        assert!(hit.normal.dot(Vec3::new(4.0, -1.0, 0.0)).abs() < 1e-5);
        assert!((hit.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_occluded_respects_limit() {
        let blocker = sphere_at(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let world = World::new(vec![blocker], Vec::new());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(world.occluded(&ray, 0.0, 10.0));
        // Light sits in front of the blocker
        assert!(!world.occluded(&ray, 0.0, 3.0));
        assert!(!world.occluded(&Ray::new(Vec3::ZERO, Vec3::Z), 0.0, f32::INFINITY));
    }

    #[test]
    fn test_from_scene_resolves_hierarchy() {
        let mut scene = Scene::new("test");
        let parent = scene
            .add_node("parent", None, Transform::from_translation(Vec3::new(0.0, 0.0, -5.0)))
            .unwrap();
        let child = scene
            .add_node("child", Some(parent), Transform::from_translation(Vec3::new(0.0, 2.0, 0.0)))
            .unwrap();
        scene.add_renderable(child, Geometry::sphere(1.0), None).unwrap();
        scene
            .add_light(child, Light::point(Vec3::ONE, Vec3::X))
            .unwrap();

        let world = World::from_scene(&scene).unwrap();
        assert_eq!(world.objects().len(), 1);
        assert!((world.lights()[0].position() - Vec3::new(0.0, 2.0, -5.0)).length() < 1e-5);

        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z);
        let hit = world.closest_hit(&ray, 0.0).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-4);
    }
}

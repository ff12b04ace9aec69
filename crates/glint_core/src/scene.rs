//! Scene graph types for glint.
//!
//! Nodes live in an arena and refer to their parent by `NodeId`. Surfaces
//! and lights are attached to nodes and read their transform from there,
//! so neither owns any lifetime over the node it hangs off.

use std::sync::Arc;

use glint_math::{Mat4, Quat, Vec3};
use thiserror::Error;

use crate::{Geometry, Light};

/// Errors that can occur while assembling a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("unknown node id {0}")]
    UnknownNode(usize),

    #[error("parent node {parent} of `{name}` does not exist")]
    UnknownParent { name: String, parent: usize },
}

/// A Phong material.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name (for logs)
    pub name: String,

    /// Reflectance under ambient light
    pub ambient: Vec3,

    /// Lambertian reflectance
    pub diffuse: Vec3,

    /// Highlight color, also the mirror reflectance
    pub specular: Vec3,

    /// Phong exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vec3::ZERO,
            diffuse: Vec3::new(0.5, 0.5, 0.5), // Grey default
            specular: Vec3::ZERO,
            shininess: 1.0,
        }
    }
}

impl Material {
    /// Create a material from all of its terms.
    pub fn new(
        name: impl Into<String>,
        ambient: Vec3,
        diffuse: Vec3,
        specular: Vec3,
        shininess: f32,
    ) -> Self {
        Self {
            name: name.into(),
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Create a purely diffuse material.
    pub fn matte(diffuse: Vec3) -> Self {
        Self {
            diffuse,
            ..Default::default()
        }
    }

    /// Mean of the specular channels; drives mirror reflection.
    pub fn reflectivity(&self) -> f32 {
        (self.specular.x + self.specular.y + self.specular.z) / 3.0
    }
}

/// Transform components that can be composed into a matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation (as quaternion)
    pub rotation: Quat,

    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Set the rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Key of a node in the scene arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the transform hierarchy.
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    /// Transform relative to the parent
    pub transform: Transform,
}

/// A piece of geometry attached to a node.
#[derive(Clone, Debug)]
pub struct Renderable {
    pub node: NodeId,
    pub geometry: Geometry,
    /// Material (optional; the renderer substitutes a diagnostic color)
    pub material: Option<Arc<Material>>,
}

/// A light attached to a node.
#[derive(Clone, Debug)]
pub struct LightSource {
    pub node: NodeId,
    pub light: Light,
}

/// A complete scene: the node arena plus everything attached to it.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    nodes: Vec<Node>,
    renderables: Vec<Renderable>,
    lights: Vec<LightSource>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a node under `parent` (or at the root) and return its key.
    ///
    /// Parents must be added before their children, which keeps the
    /// hierarchy acyclic.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeId>,
        transform: Transform,
    ) -> Result<NodeId, SceneError> {
        let name = name.into();
        if let Some(parent) = parent {
            if parent.0 >= self.nodes.len() {
                return Err(SceneError::UnknownParent {
                    name,
                    parent: parent.0,
                });
            }
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            parent,
            transform,
        });
        Ok(id)
    }

    /// Attach geometry to a node.
    pub fn add_renderable(
        &mut self,
        node: NodeId,
        geometry: Geometry,
        material: Option<Arc<Material>>,
    ) -> Result<(), SceneError> {
        self.check_node(node)?;
        self.renderables.push(Renderable {
            node,
            geometry,
            material,
        });
        Ok(())
    }

    /// Attach a light to a node.
    pub fn add_light(&mut self, node: NodeId, light: Light) -> Result<(), SceneError> {
        self.check_node(node)?;
        self.lights.push(LightSource { node, light });
        Ok(())
    }

    /// Get a node by key.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable node by key (to animate a transform between renders).
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Compose the local-to-world matrix of a node through its ancestors.
    pub fn local_to_world(&self, id: NodeId) -> Result<Mat4, SceneError> {
        let mut matrix = Mat4::IDENTITY;
        let mut current = Some(id);

        while let Some(node_id) = current {
            let node = self.node(node_id).ok_or(SceneError::UnknownNode(node_id.0))?;
            matrix = node.transform.to_matrix() * matrix;
            current = node.parent;
        }

        Ok(matrix)
    }

    pub fn renderables(&self) -> &[Renderable] {
        &self.renderables
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    /// Get node count.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn check_node(&self, id: NodeId) -> Result<(), SceneError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(SceneError::UnknownNode(id.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_creation() {
        let mut scene = Scene::new("test");

        let root = scene.add_node("root", None, Transform::default()).unwrap();
        let child = scene
            .add_node("child", Some(root), Transform::from_translation(Vec3::X))
            .unwrap();

        scene
            .add_renderable(child, Geometry::sphere(1.0), None)
            .unwrap();
        scene
            .add_light(root, Light::ambient(Vec3::splat(0.1)))
            .unwrap();

        assert_eq!(scene.node_count(), 2);
        assert_eq!(scene.renderables().len(), 1);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.node(child).unwrap().parent, Some(root));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut scene = Scene::new("test");
        let err = scene
            .add_node("orphan", Some(NodeId(3)), Transform::default())
            .unwrap_err();

        assert_eq!(
            err,
            SceneError::UnknownParent {
                name: "orphan".to_string(),
                parent: 3
            }
        );
    }

    #[test]
    fn test_unknown_node_rejected() {
        let mut scene = Scene::new("test");
        assert_eq!(
            scene.add_light(NodeId(0), Light::ambient(Vec3::ONE)),
            Err(SceneError::UnknownNode(0))
        );
        assert!(scene.local_to_world(NodeId(7)).is_err());
    }

    #[test]
    fn test_local_to_world_composes_parents() {
        let mut scene = Scene::new("test");

        let parent = scene
            .add_node(
                "parent",
                None,
                Transform::from_translation(Vec3::new(0.0, 5.0, 0.0)).with_scale(Vec3::splat(2.0)),
            )
            .unwrap();
        let child = scene
            .add_node("child", Some(parent), Transform::from_translation(Vec3::X))
            .unwrap();

        // Child origin: parent scale doubles the local offset, then lifts by 5
        let world = scene.local_to_world(child).unwrap();
        let origin = world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(2.0, 5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_material_reflectivity() {
        let mirror = Material::new("mirror", Vec3::ZERO, Vec3::ZERO, Vec3::new(0.9, 0.6, 0.3), 50.0);
        assert!((mirror.reflectivity() - 0.6).abs() < 1e-6);
        assert_eq!(Material::matte(Vec3::ONE).reflectivity(), 0.0);
    }

    #[test]
    fn test_transform_matrix_srt_order() {
        let transform = Transform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };

        // +X scaled to 2, rotated onto -Z, then translated
        let p = transform.to_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 2.0, 1.0)).length() < 1e-5);
    }
}

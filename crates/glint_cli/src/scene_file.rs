//! JSON scene description.
//!
//! Materials are declared once and referenced by name. Nodes are listed in
//! order and a parent must appear before its children.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use glint_core::{Geometry, Light, Material, NodeId, Scene, Transform};
use glint_math::{EulerRot, Quat, Vec3};
use glint_renderer::{PerspectiveCamera, RenderConfig};

#[derive(Debug, Deserialize)]
pub struct SceneFile {
    #[serde(default = "default_scene_name")]
    pub name: String,
    #[serde(default)]
    pub camera: CameraDesc,
    #[serde(default)]
    pub render: RenderConfig,
    /// Cube map directory, relative to the scene file
    #[serde(default)]
    pub environment: Option<PathBuf>,
    #[serde(default)]
    pub materials: Vec<MaterialDesc>,
    #[serde(default)]
    pub nodes: Vec<NodeDesc>,
}

fn default_scene_name() -> String {
    "untitled".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub t_min: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 45.0,
            t_min: 0.0,
        }
    }
}

impl CameraDesc {
    pub fn build(&self, aspect: f32) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new()
            .with_position(self.look_from, self.look_at, self.vup)
            .with_fov(self.vfov)
            .with_aspect(aspect)
            .with_t_min(self.t_min);
        camera.initialize();
        camera
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialDesc {
    pub name: String,
    #[serde(default)]
    pub ambient: Vec3,
    #[serde(default)]
    pub diffuse: Vec3,
    #[serde(default)]
    pub specular: Vec3,
    #[serde(default = "default_shininess")]
    pub shininess: f32,
}

fn default_shininess() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransformDesc {
    pub translation: Vec3,
    /// Euler angles in degrees, applied X then Y then Z
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for TransformDesc {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl From<&TransformDesc> for Transform {
    fn from(desc: &TransformDesc) -> Self {
        let r = desc.rotation;
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            r.x.to_radians(),
            r.y.to_radians(),
            r.z.to_radians(),
        );
        Transform::from_translation(desc.translation)
            .with_rotation(rotation)
            .with_scale(desc.scale)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeometryDesc {
    Plane {
        normal: Vec3,
        #[serde(default)]
        d: f32,
    },
    Triangle {
        positions: [Vec3; 3],
        /// Per-vertex normals; the face normal is used when absent
        #[serde(default)]
        normals: Option<[Vec3; 3]>,
    },
    Sphere {
        radius: f32,
    },
}

impl From<&GeometryDesc> for Geometry {
    fn from(desc: &GeometryDesc) -> Self {
        match *desc {
            GeometryDesc::Plane { normal, d } => Geometry::plane(normal, d),
            GeometryDesc::Triangle {
                positions,
                normals: Some(normals),
            } => Geometry::triangle(positions, normals),
            GeometryDesc::Triangle {
                positions: [p0, p1, p2],
                normals: None,
            } => Geometry::flat_triangle(p0, p1, p2),
            GeometryDesc::Sphere { radius } => Geometry::sphere(radius),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDesc {
    Directional { direction: Vec3, color: Vec3 },
    Point {
        color: Vec3,
        #[serde(default = "default_attenuation")]
        attenuation: Vec3,
    },
    Ambient { color: Vec3 },
}

fn default_attenuation() -> Vec3 {
    Vec3::X
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeDesc {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub transform: TransformDesc,
    #[serde(default)]
    pub geometry: Option<GeometryDesc>,
    /// Name of a declared material
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub light: Option<LightDesc>,
}

/// Everything needed to render a loaded scene file.
pub struct LoadedScene {
    pub scene: Scene,
    pub camera: CameraDesc,
    pub config: RenderConfig,
    /// Resolved cube map directory
    pub environment: Option<PathBuf>,
}

impl SceneFile {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid scene description")
    }

    /// Read, parse and build a scene file.
    pub fn load(path: &Path) -> Result<LoadedScene> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        let file = Self::parse(&json).with_context(|| format!("in {}", path.display()))?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        file.build(base_dir)
    }

    /// Resolve material and parent names into a scene graph.
    pub fn build(self, base_dir: &Path) -> Result<LoadedScene> {
        let mut materials: HashMap<&str, Arc<Material>> = HashMap::new();
        for desc in &self.materials {
            let material = Material::new(
                desc.name.clone(),
                desc.ambient,
                desc.diffuse,
                desc.specular,
                desc.shininess,
            );
            if materials.insert(&desc.name, Arc::new(material)).is_some() {
                log::warn!("Material '{}' declared twice, keeping the last one", desc.name);
            }
        }

        let mut scene = Scene::new(self.name.clone());
        let mut node_ids: HashMap<&str, NodeId> = HashMap::new();

        for node in &self.nodes {
            let parent = match &node.parent {
                Some(parent) => match node_ids.get(parent.as_str()) {
                    Some(&id) => Some(id),
                    None => bail!(
                        "node '{}' references unknown parent '{}'",
                        node.name,
                        parent
                    ),
                },
                None => None,
            };

            let id = scene.add_node(node.name.clone(), parent, Transform::from(&node.transform))?;
            if node_ids.insert(&node.name, id).is_some() {
                log::warn!("Node name '{}' is not unique; children bind to the last one", node.name);
            }

            if let Some(geometry) = &node.geometry {
                let material = match &node.material {
                    Some(name) => match materials.get(name.as_str()) {
                        Some(material) => Some(Arc::clone(material)),
                        None => bail!("node '{}' references unknown material '{}'", node.name, name),
                    },
                    None => {
                        log::warn!("Node '{}' has no material", node.name);
                        None
                    }
                };
                scene.add_renderable(id, Geometry::from(geometry), material)?;
            }

            if let Some(light) = &node.light {
                scene.add_light(id, light_from_desc(&node.name, light))?;
            }
        }

        log::debug!(
            "Built scene '{}': {} nodes, {} renderables, {} lights",
            scene.name,
            scene.node_count(),
            scene.renderables().len(),
            scene.lights().len()
        );

        Ok(LoadedScene {
            scene,
            camera: self.camera,
            config: self.render,
            environment: self.environment.map(|dir| base_dir.join(dir)),
        })
    }
}

fn light_from_desc(node: &str, desc: &LightDesc) -> Light {
    match *desc {
        LightDesc::Directional { direction, color } => Light::directional(direction, color),
        LightDesc::Point { color, attenuation } => {
            if attenuation.x <= 0.0 {
                log::warn!(
                    "Point light on '{}' has non-positive attenuation {}; its falloff is undefined",
                    node,
                    attenuation.x
                );
            }
            Light::point(color, attenuation)
        }
        LightDesc::Ambient { color } => Light::ambient(color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "name": "test",
        "camera": { "look_from": [0, 1, 5], "look_at": [0, 1, 0], "vfov": 60 },
        "render": { "image_width": 64, "image_height": 32, "max_bounces": 2 },
        "environment": "sky",
        "materials": [
            { "name": "floor", "diffuse": [0.8, 0.8, 0.8] },
            { "name": "chrome", "specular": [0.9, 0.9, 0.9], "shininess": 80 }
        ],
        "nodes": [
            { "name": "root", "transform": { "translation": [0, 0, -2] } },
            {
                "name": "ground",
                "parent": "root",
                "geometry": { "type": "plane", "normal": [0, 1, 0] },
                "material": "floor"
            },
            {
                "name": "ball",
                "parent": "root",
                "transform": { "translation": [0, 1, 0], "scale": [2, 2, 2] },
                "geometry": { "type": "sphere", "radius": 0.5 },
                "material": "chrome"
            },
            { "name": "sun", "light": { "type": "directional", "direction": [0, -1, 0], "color": [1, 1, 1] } },
            { "name": "fill", "light": { "type": "ambient", "color": [0.1, 0.1, 0.1] } }
        ]
    }"#;

    #[test]
    fn test_build_scene() {
        let loaded = SceneFile::parse(SCENE)
            .unwrap()
            .build(Path::new("scenes"))
            .unwrap();

        assert_eq!(loaded.scene.name, "test");
        assert_eq!(loaded.scene.node_count(), 5);
        assert_eq!(loaded.scene.renderables().len(), 2);
        assert_eq!(loaded.scene.lights().len(), 2);

        assert_eq!(loaded.config.image_width, 64);
        assert_eq!(loaded.config.max_bounces, 2);
        // Unspecified render settings keep their defaults
        assert!(loaded.config.shadows_enabled);

        assert_eq!(loaded.camera.vfov, 60.0);
        assert_eq!(loaded.camera.vup, Vec3::Y);
        assert_eq!(loaded.environment, Some(PathBuf::from("scenes").join("sky")));

        // Ball world transform = root * ball
        let ball = loaded.scene.renderables()[1].node;
        let world = loaded.scene.local_to_world(ball).unwrap();
        let center = world.transform_point3(Vec3::ZERO);
        assert!((center - Vec3::new(0.0, 1.0, -2.0)).length() < 1e-6);

        let chrome = loaded.scene.renderables()[1].material.as_ref().unwrap();
        assert_eq!(chrome.name, "chrome");
        assert!((chrome.reflectivity() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_material_is_error() {
        let json = r#"{
            "nodes": [
                { "name": "a", "geometry": { "type": "sphere", "radius": 1 }, "material": "gold" }
            ]
        }"#;
        let err = SceneFile::parse(json)
            .unwrap()
            .build(Path::new("."))
            .err()
            .unwrap();
        assert!(err.to_string().contains("unknown material 'gold'"));
    }

    #[test]
    fn test_parent_must_be_declared_first() {
        let json = r#"{
            "nodes": [
                { "name": "child", "parent": "later" },
                { "name": "later" }
            ]
        }"#;
        let err = SceneFile::parse(json)
            .unwrap()
            .build(Path::new("."))
            .err()
            .unwrap();
        assert!(err.to_string().contains("unknown parent 'later'"));
    }

    #[test]
    fn test_missing_material_allowed() {
        let json = r#"{ "nodes": [ { "name": "a", "geometry": { "type": "sphere", "radius": 1 } } ] }"#;
        let loaded = SceneFile::parse(json).unwrap().build(Path::new(".")).unwrap();
        assert!(loaded.scene.renderables()[0].material.is_none());
    }

    #[test]
    fn test_rotation_in_degrees() {
        let desc = TransformDesc {
            rotation: Vec3::new(0.0, 90.0, 0.0),
            ..TransformDesc::default()
        };
        let m = Transform::from(&desc).to_matrix();
        // +X rotated a quarter turn about +Y points down -Z
        let x = m.transform_vector3(Vec3::X);
        assert!((x - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_triangle_without_normals_is_flat() {
        let json = r#"{ "type": "triangle", "positions": [[0, 0, 0], [1, 0, 0], [0, 1, 0]] }"#;
        let desc: GeometryDesc = serde_json::from_str(json).unwrap();
        match Geometry::from(&desc) {
            Geometry::Triangle { normals, .. } => {
                assert!(normals.iter().all(|n| (*n - Vec3::Z).length() < 1e-6));
            }
            other => panic!("expected a triangle, got {}", other.kind()),
        }
    }

    #[test]
    fn test_camera_uses_image_aspect() {
        let camera = CameraDesc::default().build(2.0);
        assert_eq!(camera.aspect(), 2.0);
        assert_eq!(camera.t_min(), 0.0);
    }

    #[test]
    fn test_bad_json_reports_error() {
        assert!(SceneFile::parse("{ \"nodes\": 3 }").is_err());
    }
}

//! glint core - scene description for the Whitted ray tracer.
//!
//! This crate provides:
//!
//! - **Scene graph types**: `Scene`, `Node`, `Transform`, `Renderable`
//! - **Surface data**: `Geometry`, `Material`, `Light`
//! - **Environment maps**: `Texture`, `CubeMap`
//!
//! Nothing here knows how to intersect or shade; the renderer flattens a
//! `Scene` into its own representation at the start of a render.
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Geometry, Light, Material, Scene, Transform};
//!
//! let mut scene = Scene::new("demo");
//! let floor = scene.add_node("floor", None, Transform::default())?;
//! let white = Arc::new(Material::matte(Vec3::ONE));
//! scene.add_renderable(floor, Geometry::plane(Vec3::Y, 0.0), Some(white))?;
//! scene.add_light(floor, Light::ambient(Vec3::splat(0.1)))?;
//! ```

pub mod geometry;
pub mod light;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use geometry::Geometry;
pub use light::Light;
pub use scene::{LightSource, Material, Node, NodeId, Renderable, Scene, SceneError, Transform};
pub use texture::{CubeMap, CubeFace, Texture, TextureError};

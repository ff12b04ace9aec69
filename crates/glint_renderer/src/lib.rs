//! glint renderer - CPU Whitted-style ray tracing.
//!
//! Casts one ray per pixel, shades the closest hit with a Phong model and
//! shadow rays, and follows mirror reflections up to a bounce budget.
//! Intersection is a brute-force linear search over the scene's objects.

mod bucket;
mod camera;
mod error;
mod hittable;
mod illuminator;
mod image_buffer;
mod plane;
mod primitive;
mod shading;
mod sphere;
mod tracer;
mod triangle;
mod world;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::PerspectiveCamera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, PARALLEL_EPSILON};
pub use illuminator::{illuminate, Illumination};
pub use image_buffer::{color_to_rgb8, ImageBuffer};
pub use plane::Plane;
pub use primitive::Primitive;
pub use shading::{phong_shading, ShadingContext, SURFACE_EPSILON};
pub use sphere::Sphere;
pub use tracer::{RenderConfig, TraceCounters, Tracer, MISSING_MATERIAL_COLOR};
pub use triangle::{Barycentric, Triangle};
pub use world::{PreparedLight, Traceable, World, WorldHit};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Ray, Vec2, Vec3};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

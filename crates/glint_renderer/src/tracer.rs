//! Recursive Whitted ray tracer.
//!
//! Every primary, shadow and reflection ray is a plain nested call that
//! returns a color. Recursion depth is bounded by the bounce budget.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::Deserialize;

use crate::shading::reflect;
use crate::{
    generate_buckets, phong_shading, render_bucket, Color, ImageBuffer, PerspectiveCamera,
    RenderError, RenderResult, ShadingContext, World, DEFAULT_BUCKET_SIZE, SURFACE_EPSILON,
};
use glint_core::{CubeMap, Scene};
use glint_math::{Ray, Vec2, Vec3};

/// Returned for hits on objects without a material.
pub const MISSING_MATERIAL_COLOR: Color = Color::new(1.0, 0.0, 1.0);

/// Materials at or below this mean specular do not spawn reflection rays.
const REFLECTIVITY_THRESHOLD: f32 = 0.01;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Maximum number of mirror bounces after the primary hit
    pub max_bounces: u32,
    /// Cast shadow rays toward directional and point lights
    pub shadows_enabled: bool,
    /// Color for rays that miss everything (when no environment map is set)
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            max_bounces: 3,
            shadows_enabled: true,
            background: Color::ZERO,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> RenderResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        Ok(())
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }
}

/// Ray statistics gathered while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceCounters {
    pub primary_rays: u64,
    pub reflection_rays: u64,
    pub shadow_rays: u64,
    /// Deepest reflection level reached (0 = primary hit only)
    pub max_depth: u32,
    /// Hits on objects that carry no material
    pub missing_material_hits: u64,
}

impl TraceCounters {
    pub fn merge(&mut self, other: &TraceCounters) {
        self.primary_rays += other.primary_rays;
        self.reflection_rays += other.reflection_rays;
        self.shadow_rays += other.shadow_rays;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.missing_material_hits += other.missing_material_hits;
    }

    pub fn total_rays(&self) -> u64 {
        self.primary_rays + self.reflection_rays + self.shadow_rays
    }
}

/// Renders a prepared world through a camera.
pub struct Tracer {
    world: World,
    camera: PerspectiveCamera,
    config: RenderConfig,
    environment: Option<Arc<CubeMap>>,
}

impl Tracer {
    pub fn new(world: World, camera: PerspectiveCamera, config: RenderConfig) -> Self {
        Self {
            world,
            camera,
            config,
            environment: None,
        }
    }

    /// Flatten `scene` and build a tracer for it.
    pub fn from_scene(
        scene: &Scene,
        camera: PerspectiveCamera,
        config: RenderConfig,
    ) -> RenderResult<Self> {
        Ok(Self::new(World::from_scene(scene)?, camera, config))
    }

    /// Use an environment map instead of the flat background color.
    pub fn with_environment(mut self, environment: Arc<CubeMap>) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Color seen along `ray` with up to `bounces` mirror reflections.
    pub fn trace_ray(&self, ray: &Ray, bounces: u32) -> RenderResult<Color> {
        let mut counters = TraceCounters::default();
        self.trace(ray, bounces, 0, &mut counters)
    }

    /// Like `trace_ray`, also returning the ray statistics.
    pub fn trace_ray_counted(&self, ray: &Ray, bounces: u32) -> RenderResult<(Color, TraceCounters)> {
        let mut counters = TraceCounters::default();
        let color = self.trace(ray, bounces, 0, &mut counters)?;
        Ok((color, counters))
    }

    fn trace(
        &self,
        ray: &Ray,
        bounces: u32,
        depth: u32,
        counters: &mut TraceCounters,
    ) -> RenderResult<Color> {
        counters.max_depth = counters.max_depth.max(depth);
        let t_min = self.camera.t_min();

        let Some(hit) = self.world.closest_hit(ray, t_min) else {
            return Ok(self.background_color(ray.direction()));
        };

        let Some(material) = hit.object.material.as_deref() else {
            counters.missing_material_hits += 1;
            log::trace!("{} {} has no material", hit.object.primitive.kind(), hit.index);
            return Ok(MISSING_MATERIAL_COLOR);
        };

        let ctx = ShadingContext {
            hit_point: hit.point,
            normal: hit.normal,
            ray_direction: ray.direction(),
            material,
        };
        let mut color = phong_shading(
            &ctx,
            &self.world,
            t_min,
            self.config.shadows_enabled,
            counters,
        )?;

        if bounces > 0 && material.reflectivity() > REFLECTIVITY_THRESHOLD {
            let reflect_dir = reflect(ray.direction().normalize(), hit.normal);
            let reflect_ray = Ray::new(hit.point + SURFACE_EPSILON * reflect_dir, reflect_dir);

            counters.reflection_rays += 1;
            let reflected = self.trace(&reflect_ray, bounces - 1, depth + 1, counters)?;
            color += material.specular * reflected;
        }

        Ok(color)
    }

    /// Background for a ray that hits nothing.
    pub fn background_color(&self, direction: Vec3) -> Color {
        match &self.environment {
            Some(cube_map) => cube_map.texel(direction),
            None => self.config.background,
        }
    }

    /// Map a pixel center to normalized device coordinates (+y up, so
    /// row 0 looks toward the top of the frame).
    pub fn pixel_ndc(&self, x: u32, y: u32) -> Vec2 {
        let width = self.config.image_width as f32;
        let height = self.config.image_height as f32;
        Vec2::new(
            2.0 * (x as f32 + 0.5) / width - 1.0,
            1.0 - 2.0 * (y as f32 + 0.5) / height,
        )
    }

    /// Trace the primary ray through pixel (x, y), clamped to [0, 1].
    pub fn render_pixel(&self, x: u32, y: u32, counters: &mut TraceCounters) -> RenderResult<Color> {
        let ray = self.camera.generate_ray(self.pixel_ndc(x, y));
        counters.primary_rays += 1;

        let color = self.trace(&ray, self.config.max_bounces, 0, counters)?;
        Ok(color.clamp(Color::ZERO, Color::ONE))
    }

    /// Render the whole image, buckets in parallel.
    ///
    /// Any fatal error aborts the render; no partial image is returned.
    pub fn render(&self) -> RenderResult<ImageBuffer> {
        self.config.validate()?;
        let (width, height) = (self.config.image_width, self.config.image_height);

        let buckets = generate_buckets(width, height, DEFAULT_BUCKET_SIZE);
        log::info!(
            "Rendering {}x{} in {} buckets (max bounces {}, shadows {})",
            width,
            height,
            buckets.len(),
            self.config.max_bounces,
            if self.config.shadows_enabled { "on" } else { "off" }
        );

        let start = Instant::now();
        let results = buckets
            .par_iter()
            .map(|bucket| render_bucket(bucket, self))
            .collect::<RenderResult<Vec<_>>>()?;

        let mut image = ImageBuffer::new(width, height);
        let mut counters = TraceCounters::default();
        for result in &results {
            let bucket = &result.bucket;
            for (i, color) in result.pixels.iter().enumerate() {
                let local_x = i as u32 % bucket.width;
                let local_y = i as u32 / bucket.width;
                image.set(bucket.x + local_x, bucket.y + local_y, *color);
            }
            counters.merge(&result.counters);
        }

        log::info!(
            "Rendered in {:.2?}: {} rays ({} primary, {} reflection, {} shadow), max depth {}",
            start.elapsed(),
            counters.total_rays(),
            counters.primary_rays,
            counters.reflection_rays,
            counters.shadow_rays,
            counters.max_depth
        );
        if counters.missing_material_hits > 0 {
            log::warn!(
                "{} rays hit objects without a material (rendered magenta)",
                counters.missing_material_hits
            );
        }

        Ok(image)
    }
}

//! Image tiles rendered independently in parallel.
//!
//! Tiles are ordered center-out so the middle of the frame is traced first.

use std::cmp::Ordering;

use crate::{Color, RenderResult, TraceCounters, Tracer};

/// Default tile edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// A rectangular region of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Top-left corner
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Global pixel coordinates covered by this bucket, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }

    /// Squared distance from the bucket center to `(cx, cy)`.
    fn distance_sq_to(&self, cx: f32, cy: f32) -> f32 {
        let dx = self.x as f32 + self.width as f32 / 2.0 - cx;
        let dy = self.y as f32 + self.height as f32 / 2.0 - cy;
        dx * dx + dy * dy
    }
}

/// Split a `width` x `height` image into buckets, nearest the center first.
///
/// Edge buckets are cropped to the image.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(size as usize)
        .flat_map(|y| {
            (0..width).step_by(size as usize).map(move |x| {
                Bucket::new(x, y, size.min(width - x), size.min(height - y), 0)
            })
        })
        .collect();

    sort_spiral(&mut buckets, width, height);
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Stable sort by distance from the image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    buckets.sort_by(|a, b| {
        a.distance_sq_to(cx, cy)
            .partial_cmp(&b.distance_sq_to(cx, cy))
            .unwrap_or(Ordering::Equal)
    });
}

/// Pixels of one rendered bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Colors in row-major order within the bucket
    pub pixels: Vec<Color>,
    /// Rays traced for this bucket
    pub counters: TraceCounters,
}

/// Trace every pixel of a bucket.
pub fn render_bucket(bucket: &Bucket, tracer: &Tracer) -> RenderResult<BucketResult> {
    let mut counters = TraceCounters::default();
    let pixels = bucket
        .pixels()
        .map(|(x, y)| tracer.render_pixel(x, y, &mut counters))
        .collect::<RenderResult<Vec<_>>>()?;

    log::trace!(
        "Bucket {} at ({}, {}) done, {} rays",
        bucket.index,
        bucket.x,
        bucket.y,
        counters.total_rays()
    );

    Ok(BucketResult {
        bucket: *bucket,
        pixels,
        counters,
    })
}

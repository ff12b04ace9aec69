//! Texture loading and cube-map environment lookup.
//!
//! Environment maps are stored as six square face images. Colors are kept
//! exactly as the file encodes them (byte / 255); the tracer writes pixels
//! without a transfer curve, so a background texel lands in the output
//! unchanged.

use std::path::Path;

use glint_math::Vec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Cube map face {face:?} is missing from {dir}")]
    MissingFace { face: CubeFace, dir: String },

    #[error("Texture {path} is empty")]
    Empty { path: String },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data in RGB format (0-1 range), row-major, top row first
    pub pixels: Vec<Vec3>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Vec3>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Vec3) -> Self {
        Self::new(1, 1, vec![color], "<solid>")
    }

    /// Load a texture from an image file.
    pub fn load(path: &Path) -> TextureResult<Self> {
        let display = path.display().to_string();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: display.clone(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { path: display });
        }

        let pixels = rgb
            .pixels()
            .map(|p| Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
            .collect();

        log::debug!("Loaded texture: {} ({}x{})", display, width, height);

        Ok(Self::new(width, height, pixels, display))
    }

    /// Sample the texture at UV coordinates (bilinear filtering).
    ///
    /// UV coordinates are in [0, 1] range, with (0, 0) at bottom-left.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        // Convert to pixel coordinates
        let x = u * (self.width as f32 - 1.0);
        let y = (1.0 - v) * (self.height as f32 - 1.0); // Flip V for image coordinates

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        let top = self.get_pixel(x0, y0).lerp(self.get_pixel(x1, y0), fx);
        let bottom = self.get_pixel(x0, y1).lerp(self.get_pixel(x1, y1), fx);

        top.lerp(bottom, fy)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> Vec3 {
        let idx = (y * self.width + x) as usize;
        self.pixels.get(idx).copied().unwrap_or(Vec3::ZERO)
    }
}

/// One face of a cube map, named by the axis it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// File stem used by `CubeMap::load_dir`.
    pub fn file_stem(self) -> &'static str {
        match self {
            CubeFace::PositiveX => "px",
            CubeFace::NegativeX => "nx",
            CubeFace::PositiveY => "py",
            CubeFace::NegativeY => "ny",
            CubeFace::PositiveZ => "pz",
            CubeFace::NegativeZ => "nz",
        }
    }

    /// Pick the face a direction points at, plus that face's (s, t)
    /// coordinates with t running down the image.
    fn project(direction: Vec3) -> (CubeFace, f32, f32) {
        let abs = direction.abs();
        let (face, sc, tc, ma) = if abs.x >= abs.y && abs.x >= abs.z {
            if direction.x > 0.0 {
                (CubeFace::PositiveX, -direction.z, -direction.y, abs.x)
            } else {
                (CubeFace::NegativeX, direction.z, -direction.y, abs.x)
            }
        } else if abs.y >= abs.z {
            if direction.y > 0.0 {
                (CubeFace::PositiveY, direction.x, direction.z, abs.y)
            } else {
                (CubeFace::NegativeY, direction.x, -direction.z, abs.y)
            }
        } else if direction.z > 0.0 {
            (CubeFace::PositiveZ, direction.x, -direction.y, abs.z)
        } else {
            (CubeFace::NegativeZ, -direction.x, -direction.y, abs.z)
        };

        let s = 0.5 * (sc / ma + 1.0);
        let t = 0.5 * (tc / ma + 1.0);
        (face, s, t)
    }
}

/// Six-face environment map indexed by world-space direction.
#[derive(Clone, Debug)]
pub struct CubeMap {
    /// Faces in `CubeFace::ALL` order
    faces: [Texture; 6],
}

impl CubeMap {
    /// Build a cube map from faces in `CubeFace::ALL` order.
    pub fn new(faces: [Texture; 6]) -> Self {
        Self { faces }
    }

    /// Load `px.png`, `nx.png`, `py.png`, `ny.png`, `pz.png` and `nz.png`
    /// from a directory.
    pub fn load_dir(dir: &Path) -> TextureResult<Self> {
        let mut faces = Vec::with_capacity(6);
        for face in CubeFace::ALL {
            let path = dir.join(format!("{}.png", face.file_stem()));
            if !path.is_file() {
                return Err(TextureError::MissingFace {
                    face,
                    dir: dir.display().to_string(),
                });
            }
            faces.push(Texture::load(&path)?);
        }

        log::info!("Loaded cube map from {}", dir.display());

        let faces: [Texture; 6] = faces
            .try_into()
            .map_err(|_| TextureError::Empty {
                path: dir.display().to_string(),
            })?;
        Ok(Self::new(faces))
    }

    /// Color seen looking along `direction` (need not be unit length).
    pub fn texel(&self, direction: Vec3) -> Vec3 {
        if direction.length_squared() == 0.0 {
            return Vec3::ZERO;
        }

        let (face, s, t) = CubeFace::project(direction);
        self.faces[face as usize].sample(s, 1.0 - t)
    }
}

//! Errors that abort a render.

use glint_core::SceneError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    /// Only directional and point lights have a direction and distance.
    #[error("{0} light cannot be evaluated at a point")]
    NonDirectionalLight(&'static str),

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to save image: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;

//! Render options consumed once when a render job starts.
//!
//! The JSON form uses the same camelCase keys as the job's start message:
//!
//! ```json
//! {
//!   "width": 400, "height": 225,
//!   "viewportWidth": 3.5555, "viewportHeight": 2.0,
//!   "cameraOrigin": [0, 0, 0], "focalLength": 1.0,
//!   "sampleCount": 100, "maxDepth": 50
//! }
//! ```
//!
//! No field has a default. A missing key is a parse error.

use std::path::Path;

use prism_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating render options.
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Image must be at least 2x2 pixels, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Viewport must have positive finite size, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Focal length must be positive and finite, got {0}")]
    InvalidFocalLength(f32),

    #[error("Sample count must be at least 1")]
    ZeroSamples,
}

/// Configuration for a single render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Viewport width in world units
    pub viewport_width: f32,
    /// Viewport height in world units
    pub viewport_height: f32,
    /// Camera position
    pub camera_origin: Vec3,
    /// Distance from the camera to the viewport plane
    pub focal_length: f32,
    /// Jittered samples per pixel
    pub sample_count: u32,
    /// Maximum number of scattering events per path
    pub max_depth: u32,
}

impl RenderOptions {
    /// Load options from a JSON file and validate them.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse options from a JSON string and validate them.
    pub fn from_json(content: &str) -> Result<Self, OptionsError> {
        let options: RenderOptions = serde_json::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject configurations the render driver cannot handle.
    ///
    /// Pixel coordinates are normalized by `width - 1` and `height - 1`,
    /// so a single row or column would divide by zero.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.width < 2 || self.height < 2 {
            return Err(OptionsError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let positive = |x: f32| x.is_finite() && x > 0.0;
        if !positive(self.viewport_width) || !positive(self.viewport_height) {
            return Err(OptionsError::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if !positive(self.focal_length) {
            return Err(OptionsError::InvalidFocalLength(self.focal_length));
        }
        if self.sample_count == 0 {
            return Err(OptionsError::ZeroSamples);
        }

        Ok(())
    }

    /// Total number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

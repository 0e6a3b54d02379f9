use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use prism_core::{RenderOptions, SceneDescription};
use prism_math::Vec3;

/// Render a sphere scene with the Prism path tracer.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON render options; individual flags below override its fields
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// JSON scene description; the built-in four-sphere scene when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Where to write the final image
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Seed for the sampling RNG
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Also write every partial snapshot into this directory
    #[arg(long)]
    pub snapshots: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    pub max_depth: Option<u32>,
}

impl Args {
    /// Resolve the render options: file (or built-in defaults), then flags.
    ///
    /// When only the image size changes, the viewport width follows the new
    /// aspect ratio.
    pub fn render_options(&self) -> Result<RenderOptions> {
        let mut options = match &self.options {
            Some(path) => RenderOptions::load(path)
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => default_options(),
        };

        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        if self.options.is_none() && options.height > 0 {
            options.viewport_width =
                options.viewport_height * options.width as f32 / options.height as f32;
        }
        if let Some(samples) = self.samples {
            options.sample_count = samples;
        }
        if let Some(max_depth) = self.max_depth {
            options.max_depth = max_depth;
        }

        options.validate().context("Invalid render options")?;
        Ok(options)
    }

    /// Load the scene file, or fall back to the built-in scene.
    pub fn scene(&self) -> Result<SceneDescription> {
        match &self.scene {
            Some(path) => SceneDescription::load(path)
                .with_context(|| format!("Failed to load scene from {}", path.display())),
            None => Ok(SceneDescription::reference()),
        }
    }
}

/// 16:9 frame looking down -Z from the origin.
fn default_options() -> RenderOptions {
    RenderOptions {
        width: 400,
        height: 225,
        viewport_width: 2.0 * 16.0 / 9.0,
        viewport_height: 2.0,
        camera_origin: Vec3::ZERO,
        focal_length: 1.0,
        sample_count: 100,
        max_depth: 50,
    }
}

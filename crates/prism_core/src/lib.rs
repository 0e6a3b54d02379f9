//! Prism Core - render options and scene descriptions.
//!
//! This crate provides:
//!
//! - **Render options**: `RenderOptions`, the configuration a render job starts with
//! - **Scene descriptions**: `SceneDescription`, the material and sphere
//!   parameters a renderer builds its world from, loadable from JSON
//!
//! # Example
//!
//! ```ignore
//! use prism_core::{RenderOptions, SceneDescription};
//!
//! let options = RenderOptions::load("options.json")?;
//! let scene = SceneDescription::load("scene.json")?;
//! println!("{} spheres at {}x{}", scene.spheres.len(), options.width, options.height);
//! ```

pub mod options;
pub mod scene;

// Re-export commonly used types
pub use options::{OptionsError, RenderOptions};
pub use scene::{MaterialDesc, SceneDescription, SceneError, SphereDesc};

//! Simple path tracer example.
//!
//! Renders the built-in scene on the calling thread and saves it as PNG.

use prism_core::{RenderOptions, SceneDescription};
use prism_renderer::{build_world, render, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    println!("Prism Path Tracer - Simple Example");
    println!("==================================");

    // Build the scene
    let start = std::time::Instant::now();
    let world = build_world(&SceneDescription::reference()).expect("Built-in scene is valid");
    println!("Scene built in {:?}", start.elapsed());

    let options = RenderOptions {
        width: 400,
        height: 225,
        viewport_width: 2.0 * 16.0 / 9.0,
        viewport_height: 2.0,
        camera_origin: Vec3::ZERO,
        focal_length: 1.0,
        sample_count: 50,
        max_depth: 10,
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        options.width, options.height, options.sample_count
    );

    let start = std::time::Instant::now();
    let mut rng = StdRng::seed_from_u64(0);
    let image = render(&options, &world, &mut rng, |_, rows| {
        println!("  {}/{} scanlines", rows, options.height);
    });
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    image.save(filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

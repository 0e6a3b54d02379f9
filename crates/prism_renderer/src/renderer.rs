//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Gamma correction
//! - Anti-aliasing via multi-sampling

use std::time::Instant;

use crate::{material::Scatter, Camera, Color, Framebuffer, Hittable, Ray};
use prism_core::RenderOptions;
use prism_math::Interval;
use rand::RngCore;

/// Progress snapshots are offered at the top of every this many scanlines.
pub const PROGRESS_INTERVAL: u32 = 50;

/// Horizon color of the sky.
const SKY_HORIZON: Color = Color::new(1.0, 1.0, 1.0);
/// Zenith color of the sky.
const SKY_ZENITH: Color = Color::new(0.5, 0.6, 1.0);

/// Compute the color seen by a ray.
///
/// Traces the ray through the world, bouncing off surfaces until it
/// escapes to the sky, is absorbed, or runs out of `depth`.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::FORWARD) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Loop form of [`ray_color`] that keeps a running attenuation instead of
/// recursing.
///
/// Draws random numbers in the same order, so with the same RNG state it
/// matches the recursive version up to floating-point rounding.
pub fn ray_color_iterative(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::FORWARD) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// Compute sky gradient background.
///
/// Blends from white at the nadir to a light blue at the zenith.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    SKY_HORIZON * (1.0 - a) + SKY_ZENITH * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an accumulated sample sum to 8-bit RGBA.
///
/// Averages over `sample_count`, applies gamma 2, clamps to [0, 0.999] and
/// scales by 256. NaN channels (from degenerate geometry) fail the gamma
/// guard and come out as 0. A zero `sample_count` yields opaque black.
pub fn color_to_rgba(sum: Color, sample_count: u32) -> [u8; 4] {
    if sample_count == 0 {
        return [0, 0, 0, 255];
    }

    let color = sum / sample_count as f32;
    let intensity = Interval::new(0.0, 0.999);
    let quantize = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;

    [quantize(color.x), quantize(color.y), quantize(color.z), 255]
}

/// Render a single pixel with multi-sampling.
///
/// Returns the sum of `options.sample_count` samples, not their average.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    options: &RenderOptions,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..options.sample_count {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, options.max_depth, rng);
    }

    pixel_color
}

/// Render the entire scene to a framebuffer.
///
/// Single-threaded and deterministic for a given RNG state. Before
/// scanlines 0, 50, 100, … `on_progress` receives the partially written
/// framebuffer and the number of completed scanlines. Scanlines are traced
/// bottom-up; scanline `y` lands in framebuffer row `height - 1 - y`.
pub fn render<F>(
    options: &RenderOptions,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
    mut on_progress: F,
) -> Framebuffer
where
    F: FnMut(&Framebuffer, u32),
{
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, camera at {}",
        options.width,
        options.height,
        options.sample_count,
        options.max_depth,
        options.camera_origin
    );

    let start = Instant::now();
    let camera = Camera::new(options);
    let mut image = Framebuffer::new(options.width, options.height);

    for y in 0..options.height {
        if y % PROGRESS_INTERVAL == 0 {
            log::debug!("Scanline {}/{}", y, options.height);
            on_progress(&image, y);
        }

        let row = options.height - 1 - y;
        for x in 0..options.width {
            let color = render_pixel(&camera, world, x, y, options, rng);
            image.set_pixel(x, row, color_to_rgba(color, options.sample_count));
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

//! Camera for ray generation.

use crate::Ray;
use prism_core::RenderOptions;
use prism_math::{gen_f32, Vec3};
use rand::RngCore;

/// A pinhole camera looking down -Z at a flat viewport.
///
/// Pixel coordinates run from the lower-left corner: `y = 0` is the
/// bottom scanline.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Create a camera from the image size, viewport size, origin and focal length.
    pub fn new(options: &RenderOptions) -> Self {
        let origin = options.camera_origin;
        let horizontal = Vec3::new(options.viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, options.viewport_height, 0.0);
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - Vec3::new(0.0, 0.0, options.focal_length);

        Self {
            image_width: options.width,
            image_height: options.height,
            origin,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    /// Get the camera origin.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Ray through normalized viewport coordinates `(u, v)`, both in [0, 1]
    /// from the lower-left corner.
    pub fn ray_through(&self, u: f32, v: f32) -> Ray {
        let target = self.lower_left_corner + u * self.horizontal + v * self.vertical;
        Ray::new(self.origin, target - self.origin)
    }

    /// Generate a jittered ray for pixel (x, y).
    ///
    /// Each coordinate gets an independent offset in [0, 1) before being
    /// normalized by `width - 1` and `height - 1`.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let u = (x as f32 + gen_f32(rng)) / (self.image_width - 1) as f32;
        let v = (y as f32 + gen_f32(rng)) / (self.image_height - 1) as f32;
        self.ray_through(u, v)
    }
}

//! Prism Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metallic and
//! dielectric materials. Rendering is single-threaded and deterministic
//! for a given RNG seed; [`RenderWorker`] runs it on a background thread
//! and streams partial framebuffers back over a channel.

mod camera;
mod framebuffer;
mod hittable;
mod job;
mod material;
mod renderer;
mod sphere;
mod world;

pub use camera::Camera;
pub use framebuffer::Framebuffer;
pub use hittable::{HitRecord, Hittable, HittableList, Surface};
pub use job::{JobCommand, JobError, JobEvent, RenderWorker};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, Scatter, ScatterResult};
pub use renderer::{
    color_to_rgba, linear_to_gamma, ray_color, ray_color_iterative, render, render_pixel,
    sky_gradient, PROGRESS_INTERVAL,
};
pub use sphere::{Sphere, SURFACE_OFFSET};
pub use world::build_world;

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Interval, Ray, Vec3};

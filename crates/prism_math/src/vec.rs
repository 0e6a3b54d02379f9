//! Vector helpers that glam does not provide with the semantics we need.
//!
//! Arithmetic, dot/cross, length and `normalize` come straight from
//! [`glam::Vec3`]. Reflection, refraction and random sampling live here as
//! free functions taking an explicit RNG so that renders can be seeded.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Components closer to zero than this count as zero.
const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Draw a uniform `f32` in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// True when every component is within 1e-8 of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO_EPSILON && v.y.abs() < NEAR_ZERO_EPSILON && v.z.abs() < NEAR_ZERO_EPSILON
}

/// Reflect a vector about a normal: `v - 2 (v·n) n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n` facing
/// against `uv`.
///
/// `etai_over_etat` is the ratio of the incident medium's index to the
/// transmitted medium's index. There is no total internal reflection
/// branch: a negative radicand is clamped to zero.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).max(0.0).sqrt() * n;
    r_out_perp + r_out_parallel
}

/// A vector whose components are independently uniform in `[min, max)`.
pub fn random_range(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    let span = max - min;
    Vec3::new(
        min + span * gen_f32(rng),
        min + span * gen_f32(rng),
        min + span * gen_f32(rng),
    )
}

/// A point uniformly distributed inside the unit ball.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling, ~1.9 draws on average
    loop {
        let v = random_range(rng, -1.0, 1.0);
        if v.length_squared() < 1.0 {
            return v;
        }
    }
}

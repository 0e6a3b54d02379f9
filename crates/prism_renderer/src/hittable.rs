//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray, Sphere};
use prism_math::{Interval, Vec3};

/// Record of a ray-object intersection.
///
/// Borrowed from the surface that produced it and consumed right away by
/// the integrator.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection, pulled slightly back toward the ray origin
    pub p: Vec3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting the outward normal against the ray.
    ///
    /// A ray travelling along the outward normal is leaving the solid, so
    /// it sees the back face and the stored normal is flipped.
    pub fn new(ray: &Ray, p: Vec3, outward_normal: Vec3, t: f32, material: &'a Material) -> Self {
        // Only a strictly positive dot product is a back face; NaN stays front
        let front_face = !(ray.direction().dot(outward_normal) > 0.0);
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p,
            normal,
            material,
            t,
            front_face,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Return the nearest hit with `t` inside `ray_t` (inclusive), if any.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

/// Every kind of surface a scene can contain.
#[derive(Debug, Clone)]
pub enum Surface {
    Sphere(Sphere),
}

impl Hittable for Surface {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match self {
            Surface::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}

/// A list of surfaces, scanned linearly in insertion order.
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    objects: Vec<Surface>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Surface>) {
        self.objects.push(object.into());
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over the objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Surface> {
        self.objects.iter()
    }
}

impl FromIterator<Surface> for HittableList {
    fn from_iter<I: IntoIterator<Item = Surface>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

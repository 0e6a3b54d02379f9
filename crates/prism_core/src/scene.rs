//! Scene description types for Prism.
//!
//! A scene is a list of materials and a list of spheres that refer to
//! materials by index, so several spheres can share one material. The
//! description is plain data; `prism_renderer` turns it into a world.

use std::path::Path;

use prism_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {sphere} references material {index}, but only {count} materials exist")]
    MaterialIndex {
        sphere: usize,
        index: usize,
        count: usize,
    },

    #[error("Sphere {sphere} has non-positive radius {radius}")]
    InvalidRadius { sphere: usize, radius: f32 },

    #[error("Material {material} has albedo {albedo} outside [0, 1]")]
    InvalidAlbedo { material: usize, albedo: Vec3 },

    #[error("Material {material} has fuzz {fuzz} outside [0, 1]")]
    InvalidFuzz { material: usize, fuzz: f32 },

    #[error("Material {material} has non-positive refractive index {ior}")]
    InvalidRefractiveIndex { material: usize, ior: f32 },
}

/// Parameters of one material.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDesc {
    /// Diffuse surface
    Lambertian { albedo: Vec3 },

    /// Reflective surface, `fuzz` 0 is a perfect mirror
    Metal {
        albedo: Vec3,
        #[serde(default)]
        fuzz: f32,
    },

    /// Transparent refracting surface
    Dielectric {
        #[serde(rename = "refractiveIndex")]
        refractive_index: f32,
    },
}

impl MaterialDesc {
    fn validate(&self, material: usize) -> Result<(), SceneError> {
        let unit = |x: f32| (0.0..=1.0).contains(&x);

        match *self {
            MaterialDesc::Lambertian { albedo } | MaterialDesc::Metal { albedo, .. }
                if !albedo.to_array().into_iter().all(unit) =>
            {
                Err(SceneError::InvalidAlbedo { material, albedo })
            }
            MaterialDesc::Metal { fuzz, .. } if !unit(fuzz) => {
                Err(SceneError::InvalidFuzz { material, fuzz })
            }
            MaterialDesc::Dielectric { refractive_index } if !(refractive_index > 0.0) => {
                Err(SceneError::InvalidRefractiveIndex {
                    material,
                    ior: refractive_index,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Geometry of one sphere plus the index of its material.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    pub material: usize,
}

/// Materials and spheres of a scene, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub materials: Vec<MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

impl SceneDescription {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material and return its index.
    pub fn add_material(&mut self, material: MaterialDesc) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Add a sphere using a previously added material.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: usize) {
        self.spheres.push(SphereDesc {
            center,
            radius,
            material,
        });
    }

    /// The built-in scene: three small spheres resting on a large ground sphere.
    ///
    /// From left to right: a mirror, a diffuse green ball, and glass.
    pub fn reference() -> Self {
        let mut scene = Self::new();

        let ground = scene.add_material(MaterialDesc::Lambertian {
            albedo: Vec3::new(0.8, 0.8, 0.0),
        });
        let mirror = scene.add_material(MaterialDesc::Metal {
            albedo: Vec3::new(0.9, 0.9, 0.9),
            fuzz: 0.0,
        });
        let center = scene.add_material(MaterialDesc::Lambertian {
            albedo: Vec3::new(0.1, 0.6, 0.0),
        });
        let glass = scene.add_material(MaterialDesc::Dielectric {
            refractive_index: 1.3,
        });

        scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, center);
        scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, glass);
        scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, mirror);
        scene.add_sphere(Vec3::new(0.0, -100.5, -2.0), 100.0, ground);

        scene
    }

    /// Load a scene from a JSON file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let scene = Self::from_json(&content)?;
        log::debug!(
            "Loaded scene {}: {} materials, {} spheres",
            path.display(),
            scene.materials.len(),
            scene.spheres.len()
        );
        Ok(scene)
    }

    /// Parse a scene from a JSON string and validate it.
    pub fn from_json(content: &str) -> Result<Self, SceneError> {
        let scene: SceneDescription = serde_json::from_str(content)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Check every material parameter and sphere reference.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (index, material) in self.materials.iter().enumerate() {
            material.validate(index)?;
        }

        let count = self.materials.len();
        for (sphere, desc) in self.spheres.iter().enumerate() {
            if desc.material >= count {
                return Err(SceneError::MaterialIndex {
                    sphere,
                    index: desc.material,
                    count,
                });
            }
            if !(desc.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    sphere,
                    radius: desc.radius,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scene() {
        let scene = SceneDescription::reference();

        assert_eq!(scene.materials.len(), 4);
        assert_eq!(scene.spheres.len(), 4);
        assert!(scene.validate().is_ok());

        // Ground is last and much larger than the rest
        let ground = scene.spheres[3];
        assert_eq!(ground.radius, 100.0);
        assert_eq!(
            scene.materials[ground.material],
            MaterialDesc::Lambertian {
                albedo: Vec3::new(0.8, 0.8, 0.0)
            }
        );
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "materials": [
                { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] },
                { "type": "metal", "albedo": [0.9, 0.9, 0.9], "fuzz": 0.3 },
                { "type": "dielectric", "refractiveIndex": 1.5 }
            ],
            "spheres": [
                { "center": [0.0, 0.0, -1.0], "radius": 0.5, "material": 0 },
                { "center": [1.0, 0.0, -1.0], "radius": 0.5, "material": 2 }
            ]
        }"#;

        let scene = SceneDescription::from_json(json).unwrap();
        assert_eq!(scene.materials.len(), 3);
        assert_eq!(
            scene.materials[1],
            MaterialDesc::Metal {
                albedo: Vec3::splat(0.9),
                fuzz: 0.3
            }
        );
        assert_eq!(
            scene.materials[2],
            MaterialDesc::Dielectric {
                refractive_index: 1.5
            }
        );
        assert_eq!(scene.spheres[1].material, 2);
    }

    #[test]
    fn test_metal_fuzz_defaults_to_zero() {
        let json = r#"{
            "materials": [{ "type": "metal", "albedo": [1.0, 1.0, 1.0] }],
            "spheres": []
        }"#;

        let scene = SceneDescription::from_json(json).unwrap();
        assert_eq!(
            scene.materials[0],
            MaterialDesc::Metal {
                albedo: Vec3::ONE,
                fuzz: 0.0
            }
        );
    }

    #[test]
    fn test_unknown_material_type() {
        let json = r#"{ "materials": [{ "type": "plastic" }], "spheres": [] }"#;
        assert!(matches!(
            SceneDescription::from_json(json),
            Err(SceneError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_material_index() {
        let mut scene = SceneDescription::new();
        scene.add_sphere(Vec3::ZERO, 1.0, 0);

        assert!(matches!(
            scene.validate(),
            Err(SceneError::MaterialIndex {
                sphere: 0,
                index: 0,
                count: 0
            })
        ));
    }

    #[test]
    fn test_validate_radius() {
        let mut scene = SceneDescription::new();
        let mat = scene.add_material(MaterialDesc::Lambertian { albedo: Vec3::ONE });
        scene.add_sphere(Vec3::ZERO, 0.0, mat);

        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidRadius { sphere: 0, .. })
        ));
    }

    #[test]
    fn test_validate_material_parameters() {
        let mut scene = SceneDescription::new();
        scene.add_material(MaterialDesc::Metal {
            albedo: Vec3::ONE,
            fuzz: 1.5,
        });
        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidFuzz { material: 0, .. })
        ));

        let mut scene = SceneDescription::new();
        scene.add_material(MaterialDesc::Dielectric {
            refractive_index: 0.0,
        });
        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidRefractiveIndex { material: 0, .. })
        ));

        let mut scene = SceneDescription::new();
        scene.add_material(MaterialDesc::Lambertian {
            albedo: Vec3::new(0.5, 1.2, 0.5),
        });
        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidAlbedo { material: 0, .. })
        ));
    }
}

//! Build a renderable world from a scene description.

use std::sync::Arc;

use prism_core::{SceneDescription, SceneError};

use crate::{HittableList, Material, Sphere};

/// Validate `scene` and turn it into a list of spheres.
///
/// Each material entry becomes one shared `Arc<Material>`; every sphere
/// that names it holds a clone of that `Arc`.
pub fn build_world(scene: &SceneDescription) -> Result<HittableList, SceneError> {
    scene.validate()?;

    let materials: Vec<Arc<Material>> = scene
        .materials
        .iter()
        .map(|desc| Arc::new(Material::from(desc)))
        .collect();

    let mut world = HittableList::new();
    for (index, sphere) in scene.spheres.iter().enumerate() {
        let material = materials
            .get(sphere.material)
            .ok_or(SceneError::MaterialIndex {
                sphere: index,
                index: sphere.material,
                count: materials.len(),
            })?;
        world.add(Sphere::new(sphere.center, sphere.radius, Arc::clone(material)));
    }

    log::debug!(
        "Built world with {} spheres sharing {} materials",
        world.len(),
        materials.len()
    );
    Ok(world)
}

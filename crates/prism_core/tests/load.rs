//! Loading options and scenes from files on disk.

use std::path::PathBuf;

use prism_core::{OptionsError, RenderOptions, SceneDescription, SceneError};

fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("prism_core_{}_{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_options_file() {
    let path = temp_file(
        "options.json",
        r#"{
            "width": 400, "height": 225,
            "viewportWidth": 3.5555, "viewportHeight": 2.0,
            "cameraOrigin": [0.0, 0.0, 0.0], "focalLength": 1.0,
            "sampleCount": 100, "maxDepth": 50
        }"#,
    );

    let options = RenderOptions::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(options.width, 400);
    assert_eq!(options.sample_count, 100);
    assert_eq!(options.max_depth, 50);
}

#[test]
fn load_options_rejects_invalid_values() {
    let path = temp_file(
        "bad_options.json",
        r#"{
            "width": 400, "height": 225,
            "viewportWidth": 3.5555, "viewportHeight": 2.0,
            "cameraOrigin": [0.0, 0.0, 0.0], "focalLength": 1.0,
            "sampleCount": 0, "maxDepth": 50
        }"#,
    );

    let result = RenderOptions::load(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(OptionsError::ZeroSamples)));
}

#[test]
fn load_missing_files() {
    let missing = std::env::temp_dir().join("prism_core_does_not_exist.json");

    assert!(matches!(RenderOptions::load(&missing), Err(OptionsError::Io(_))));
    assert!(matches!(SceneDescription::load(&missing), Err(SceneError::Io(_))));
}

#[test]
fn scene_round_trips_through_file() {
    let _ = env_logger::builder().is_test(true).try_init();

    let scene = SceneDescription::reference();
    let path = temp_file("scene.json", &serde_json::to_string_pretty(&scene).unwrap());

    let loaded = SceneDescription::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, scene);
}

#[test]
fn scene_with_bad_reference_fails_to_load() {
    let path = temp_file(
        "bad_scene.json",
        r#"{
            "materials": [{ "type": "lambertian", "albedo": [0.5, 0.5, 0.5] }],
            "spheres": [{ "center": [0.0, 0.0, -1.0], "radius": 0.5, "material": 1 }]
        }"#,
    );

    let result = SceneDescription::load(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(SceneError::MaterialIndex { .. })));
}

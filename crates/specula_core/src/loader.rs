//! JSON scene loading.
//!
//! A scene file names its materials once and lets spheres refer to them:
//!
//! ```json
//! {
//!   "camera": { "look_from": [0, 1, 6], "look_at": [0, 0, 0], "vfov": 45 },
//!   "render": { "width": 640, "height": 360, "bounce_limit": 5 },
//!   "materials": {
//!     "mirror": { "diffuse": [0.1, 0.1, 0.1], "specular": [0.8, 0.8, 0.8], "shininess": 100 }
//!   },
//!   "spheres": [ { "center": [0, 0, 0], "radius": 1, "material": "mirror" } ],
//!   "lights": [ { "position": [5, 5, 5], "intensity": [1, 1, 1] } ],
//!   "environment": { "type": "gradient", "bottom": [1, 1, 1], "top": [0.5, 0.7, 1] }
//! }
//! ```
//!
//! Cube map face paths are resolved against the scene file's directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use specula_math::Vec3;
use thiserror::Error;

use crate::environment::{CubeMap, Environment, SkyGradient, SolidColor};
use crate::scene::{CameraSettings, Color, Light, Material, RenderSettings, Scene, Sphere};
use crate::texture::TextureError;

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Environment texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Sphere {index} has non-positive radius {radius}")]
    InvalidSphere { index: usize, radius: f32 },

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Deserialize)]
struct SceneFile {
    #[serde(default)]
    camera: CameraSettings,
    #[serde(default)]
    render: RenderSettings,
    #[serde(default)]
    materials: HashMap<String, MaterialDesc>,
    spheres: Vec<SphereDesc>,
    #[serde(default)]
    lights: Vec<LightDesc>,
    #[serde(default)]
    environment: EnvironmentDesc,
}

#[derive(Deserialize)]
struct MaterialDesc {
    diffuse: Vec3,
    #[serde(default)]
    specular: Vec3,
    #[serde(default = "default_shininess")]
    shininess: f32,
}

fn default_shininess() -> f32 {
    Material::default().shininess
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        Material::new(desc.diffuse, desc.specular, desc.shininess)
    }
}

#[derive(Deserialize)]
struct SphereDesc {
    center: Vec3,
    radius: f32,
    material: String,
}

#[derive(Deserialize)]
struct LightDesc {
    position: Vec3,
    intensity: Color,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum EnvironmentDesc {
    Solid { color: Color },
    Gradient { bottom: Color, top: Color },
    CubeMap { faces: Vec<PathBuf> },
}

impl Default for EnvironmentDesc {
    fn default() -> Self {
        EnvironmentDesc::Solid { color: Color::ZERO }
    }
}

impl EnvironmentDesc {
    fn build(self, base_dir: Option<&Path>) -> LoadResult<Box<dyn Environment>> {
        let env: Box<dyn Environment> = match self {
            EnvironmentDesc::Solid { color } => Box::new(SolidColor::new(color)),
            EnvironmentDesc::Gradient { bottom, top } => Box::new(SkyGradient::new(bottom, top)),
            EnvironmentDesc::CubeMap { faces } => {
                let resolved: Vec<PathBuf> = faces
                    .iter()
                    .map(|face| resolve_path(base_dir, face))
                    .collect();
                Box::new(CubeMap::load(&resolved)?)
            }
        };
        Ok(env)
    }
}

/// Resolve a path relative to the scene file's directory.
fn resolve_path(base_dir: Option<&Path>, path: &Path) -> PathBuf {
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

/// Load a scene file from disk.
///
/// # Example
///
/// ```ignore
/// use specula_core::load_scene;
///
/// let scene = load_scene("scenes/mirror_spheres.json")?;
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    load_scene_from_str(&content, name, path.parent())
}

/// Load a scene from a JSON string (useful for testing).
pub fn load_scene_from_str(
    content: &str,
    name: &str,
    base_dir: Option<&Path>,
) -> LoadResult<Scene> {
    let file: SceneFile = serde_json::from_str(content)?;

    if file.render.width == 0 || file.render.height == 0 {
        return Err(LoadError::InvalidResolution {
            width: file.render.width,
            height: file.render.height,
        });
    }

    let materials: HashMap<&str, Material> = file
        .materials
        .iter()
        .map(|(name, desc)| (name.as_str(), Material::from(desc)))
        .collect();

    let mut scene = Scene::new(name);
    scene.camera = file.camera;
    scene.render = file.render;

    for (index, desc) in file.spheres.iter().enumerate() {
        // NaN radii fail this check too
        if !(desc.radius > 0.0) {
            return Err(LoadError::InvalidSphere {
                index,
                radius: desc.radius,
            });
        }
        let material = materials
            .get(desc.material.as_str())
            .copied()
            .ok_or_else(|| LoadError::UnknownMaterial(desc.material.clone()))?;
        scene.add_sphere(Sphere::new(desc.center, desc.radius, material));
    }

    for desc in &file.lights {
        scene.add_light(Light::new(desc.position, desc.intensity));
    }

    if scene.lights.is_empty() {
        log::warn!(
            "Scene '{}' has no lights; only reflections of the environment will show",
            name
        );
    }

    scene.environment = file.environment.build(base_dir)?;

    log::debug!(
        "Loaded scene '{}': {} spheres, {} lights, {} materials",
        name,
        scene.sphere_count(),
        scene.light_count(),
        materials.len()
    );

    Ok(scene)
}

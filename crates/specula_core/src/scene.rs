//! Scene types for Specula.
//!
//! A scene is an ordered list of spheres, a list of point lights and an
//! environment that colors every ray leaving the geometry. Everything here
//! is read-only once built, so a scene can be shared across render threads
//! by plain reference.

use std::fmt;

use serde::Deserialize;
use specula_math::Vec3;

use crate::environment::{Environment, SolidColor};

/// Color type alias (linear RGB, unclamped).
pub type Color = Vec3;

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Blinn-Phong surface description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse coefficient k_d, per channel
    pub diffuse: Color,

    /// Specular coefficient k_s, per channel. Also drives mirror reflection.
    pub specular: Color,

    /// Specular exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Color::splat(0.5), // Grey default
            specular: Color::ZERO,
            shininess: 32.0,
        }
    }
}

impl Material {
    /// Create a new material.
    pub fn new(diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            diffuse,
            specular,
            shininess,
        }
    }

    /// A purely diffuse material (no highlight, no reflection).
    pub fn diffuse(diffuse: Color) -> Self {
        Self {
            diffuse,
            specular: Color::ZERO,
            ..Default::default()
        }
    }
}

/// An analytic sphere primitive.
///
/// `radius` must be positive. The renderer does not check this; the scene
/// loader does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// A point light. No falloff with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: Color,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// Pinhole camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 45.0,
        }
    }
}

/// Output and quality settings for a render.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Maximum number of mirror bounces per primary ray
    pub bounce_limit: u32,
    pub bucket_size: u32,
    /// Apply gamma 2.0 when quantizing to 8 bits
    pub gamma: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            bounce_limit: 5,
            bucket_size: DEFAULT_BUCKET_SIZE,
            gamma: false,
        }
    }
}

/// A complete scene: geometry, lights, environment and how to view it.
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    /// Spheres in file order
    pub spheres: Vec<Sphere>,

    pub lights: Vec<Light>,

    /// Background for rays that leave the geometry
    pub environment: Box<dyn Environment>,

    pub camera: CameraSettings,

    pub render: RenderSettings,
}

impl Scene {
    /// Create an empty scene with a black background.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spheres: Vec::new(),
            lights: Vec::new(),
            environment: Box::new(SolidColor::new(Color::ZERO)),
            camera: CameraSettings::default(),
            render: RenderSettings::default(),
        }
    }

    /// Replace the environment.
    pub fn with_environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    /// Add a sphere and return its index.
    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        self.spheres.push(sphere);
        self.spheres.len() - 1
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Get sphere count.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("spheres", &self.spheres.len())
            .field("lights", &self.lights.len())
            .field("camera", &self.camera)
            .field("render", &self.render)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_creation() {
        let mut scene = Scene::new("test");

        let id = scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, Material::default()));
        assert_eq!(id, 0);
        let id = scene.add_sphere(Sphere::new(Vec3::X * 3.0, 0.5, Material::default()));
        assert_eq!(id, 1);

        scene.add_light(Light::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE));

        assert_eq!(scene.sphere_count(), 2);
        assert_eq!(scene.light_count(), 1);
        assert_eq!(scene.environment.sample(Vec3::Y), Color::ZERO);
    }

    #[test]
    fn test_with_environment() {
        let scene = Scene::new("sky").with_environment(SolidColor::new(Color::new(0.2, 0.3, 0.4)));
        assert_eq!(scene.environment.sample(Vec3::X), Color::new(0.2, 0.3, 0.4));
    }
}

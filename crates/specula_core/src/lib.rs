//! Specula Core - scene description for the Specula ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`, `Material`, `Light`
//! - **Environments**: `SolidColor`, `SkyGradient`, `CubeMap` behind the
//!   `Environment` trait
//! - **Scene files**: JSON loading with validation
//!
//! # Example
//!
//! ```ignore
//! use specula_core::load_scene;
//!
//! let scene = load_scene("scenes/mirror_spheres.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     scene.sphere_count(),
//!     scene.light_count());
//! ```

pub mod environment;
pub mod loader;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use environment::{CubeFace, CubeMap, Environment, SkyGradient, SolidColor};
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use scene::{CameraSettings, Color, Light, Material, RenderSettings, Scene, Sphere};
pub use texture::{Texture, TextureError, TextureResult};

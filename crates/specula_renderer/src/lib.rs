//! Specula Renderer - Whitted-style ray tracing of spheres.
//!
//! The kernel is [`trace_ray`]: one ray in, one color plus a hit flag out.
//! It finds the nearest sphere, lights it with Blinn-Phong point lights and
//! hard shadows, then follows mirror reflections up to a bounce limit,
//! falling back to the scene environment whenever a ray escapes.
//!
//! The rest of the crate is a host for that kernel: a pinhole [`Camera`],
//! bucket tiling and a parallel [`render`] that fills an [`ImageBuffer`].

mod bucket;
mod camera;
mod hit;
mod renderer;
mod shading;
mod tracer;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hit::{hit_sphere, intersect, HitInfo};
pub use renderer::{color_to_rgba, linear_to_gamma, render, ImageBuffer, RenderConfig};
pub use shading::{shade, SHADOW_BIAS};
pub use tracer::{trace_ray, TraceResult, MAX_BOUNCES, REFLECTION_BIAS};

/// Re-export scene types from specula_core
pub use specula_core::{Color, Environment, Light, Material, Scene, Sphere};

/// Re-export Vec3 and common math types from specula_math
pub use specula_math::{Interval, Ray, Vec3, Vec4};

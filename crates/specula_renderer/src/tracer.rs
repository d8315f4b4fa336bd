//! Ray tracing entry point: nearest hit, direct light, mirror bounces.
//!
//! `trace_ray` reads only its arguments, so any number of rays can be
//! traced concurrently against the same scene.

use specula_core::{Color, Environment, Light, Sphere};
use specula_math::{reflect, Ray, Vec4};

use crate::hit::{intersect, HitInfo};
use crate::shading::shade;

/// Hard cap on mirror bounces, whatever the caller asks for.
pub const MAX_BOUNCES: u32 = 16;

/// Offset along the normal for reflection ray origins.
pub const REFLECTION_BIAS: f32 = 1e-2;

/// Color seen along one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    /// Linear RGB, unclamped
    pub color: Color,
    /// True if the primary ray hit a sphere, false if it saw only the environment
    pub hit_geometry: bool,
}

impl TraceResult {
    /// 1.0 over geometry, 0.0 over background.
    pub fn alpha(&self) -> f32 {
        if self.hit_geometry {
            1.0
        } else {
            0.0
        }
    }

    /// Color and alpha packed together.
    pub fn to_rgba(&self) -> Vec4 {
        self.color.extend(self.alpha())
    }
}

/// Trace one viewing ray through the scene.
///
/// Misses return the environment color. Hits return direct light at the
/// hit point plus up to `min(bounce_limit, MAX_BOUNCES)` mirror reflections,
/// each weighted by the product of specular coefficients along the chain.
/// The chain stops early when that weight reaches zero or a reflection
/// ray escapes to the environment.
pub fn trace_ray(
    ray: &Ray,
    spheres: &[Sphere],
    lights: &[Light],
    environment: &dyn Environment,
    bounce_limit: u32,
) -> TraceResult {
    let ray = ray.normalized();

    let Some(hit) = intersect(&ray, spheres) else {
        return TraceResult {
            color: environment.sample(ray.direction()),
            hit_geometry: false,
        };
    };

    let mut accumulated = shade_hit(&hit, &ray, lights, spheres);
    let mut attenuation = hit.material.specular;

    let mut ray = ray;
    let mut hit = hit;

    for bounce in 0..MAX_BOUNCES {
        if bounce >= bounce_limit {
            break;
        }
        if attenuation.element_sum() <= 0.0 {
            break;
        }

        let reflection_ray = Ray::new(
            hit.position + hit.normal * REFLECTION_BIAS,
            reflect(ray.direction(), hit.normal).normalize(),
        );

        match intersect(&reflection_ray, spheres) {
            Some(reflection_hit) => {
                let direct = shade_hit(&reflection_hit, &reflection_ray, lights, spheres);
                accumulated += attenuation * direct;
                attenuation *= reflection_hit.material.specular;
                hit = reflection_hit;
                ray = reflection_ray;
            }
            None => {
                accumulated += attenuation * environment.sample(reflection_ray.direction());
                break;
            }
        }
    }

    TraceResult {
        color: accumulated,
        hit_geometry: true,
    }
}

/// Direct light at a hit, viewed from the ray that found it.
fn shade_hit(hit: &HitInfo, ray: &Ray, lights: &[Light], spheres: &[Sphere]) -> Color {
    let view = (-ray.direction()).normalize();
    shade(&hit.material, hit.position, hit.normal, view, lights, spheres)
}

//! Direct lighting: Blinn-Phong with hard shadows.

use specula_core::{Color, Light, Material, Sphere};
use specula_math::{Ray, Vec3};

use crate::hit::intersect;

/// Offset along the normal for shadow ray origins.
pub const SHADOW_BIAS: f32 = 1e-3;

/// Direct light arriving at `position` and reflected toward `view`.
///
/// `view` is the unit vector from the point back toward the viewer. Each
/// light contributes a diffuse and a Blinn-Phong specular term unless any
/// sphere blocks the segment to it, in which case it contributes nothing.
/// There is no ambient term.
pub fn shade(
    material: &Material,
    position: Vec3,
    normal: Vec3,
    view: Vec3,
    lights: &[Light],
    spheres: &[Sphere],
) -> Color {
    let mut color = Color::ZERO;

    for light in lights {
        let to_light = light.position - position;
        let light_dir = to_light.normalize();

        if is_occluded(position, normal, light_dir, to_light.length(), spheres) {
            continue;
        }

        let diffuse = normal.dot(light_dir).max(0.0) * material.diffuse * light.intensity;

        let half_vec = (light_dir + view).normalize();
        let spec = normal.dot(half_vec).max(0.0).powf(material.shininess);
        let specular = spec * material.specular * light.intensity;

        color += diffuse + specular;
    }

    color
}

/// True if something sits between the surface point and a light
/// `light_distance` away along `light_dir`.
fn is_occluded(
    position: Vec3,
    normal: Vec3,
    light_dir: Vec3,
    light_distance: f32,
    spheres: &[Sphere],
) -> bool {
    let shadow_ray = Ray::new(position + normal * SHADOW_BIAS, light_dir);
    intersect(&shadow_ray, spheres).is_some_and(|hit| hit.t < light_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chalk() -> Material {
        Material::new(Color::new(0.8, 0.6, 0.4), Color::ZERO, 1.0)
    }

    #[test]
    fn test_no_lights_is_black() {
        let shiny = Material::new(Color::ONE, Color::ONE, 10.0);
        let color = shade(&shiny, Vec3::Z, Vec3::Z, Vec3::Z, &[], &[]);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_diffuse_head_on() {
        let lights = [Light::new(Vec3::new(0.0, 0.0, 10.0), Color::new(1.0, 0.5, 2.0))];
        let color = shade(&chalk(), Vec3::Z, Vec3::Z, Vec3::Z, &lights, &[]);

        // n.l = 1, no specular: k_d * I
        let expected = Color::new(0.8, 0.3, 0.8);
        assert!((color - expected).length() < 1e-6);
    }

    #[test]
    fn test_light_behind_surface() {
        let lights = [Light::new(Vec3::new(0.0, 0.0, -10.0), Color::ONE)];
        let color = shade(&chalk(), Vec3::Z, Vec3::Z, Vec3::Z, &lights, &[]);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_occluder_blocks_light() {
        let surface = Sphere::new(Vec3::ZERO, 1.0, chalk());
        let blocker = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, chalk());
        let lights = [Light::new(Vec3::new(0.0, 0.0, 10.0), Color::ONE)];

        let shadowed = shade(&chalk(), Vec3::Z, Vec3::Z, Vec3::Z, &lights, &[surface, blocker]);
        assert_eq!(shadowed, Color::ZERO);

        let lit = shade(&chalk(), Vec3::Z, Vec3::Z, Vec3::Z, &lights, &[surface]);
        assert!(lit.x > 0.0 && lit.y > 0.0 && lit.z > 0.0);
    }

    #[test]
    fn test_sphere_beyond_light_does_not_shadow() {
        let beyond = Sphere::new(Vec3::new(0.0, 0.0, 20.0), 1.0, chalk());
        let lights = [Light::new(Vec3::new(0.0, 0.0, 10.0), Color::ONE)];

        let color = shade(&chalk(), Vec3::Z, Vec3::Z, Vec3::Z, &lights, &[beyond]);
        assert!((color - chalk().diffuse).length() < 1e-6);
    }

    #[test]
    fn test_only_blocked_light_is_dropped() {
        let blocker = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, chalk());
        let lights = [
            Light::new(Vec3::new(0.0, 0.0, 10.0), Color::ONE),
            Light::new(Vec3::new(10.0, 0.0, 10.0), Color::ONE),
        ];

        let both = shade(&chalk(), Vec3::Z, Vec3::Z, Vec3::Z, &lights, &[]);
        let one = shade(&chalk(), Vec3::Z, Vec3::Z, Vec3::Z, &lights, &[blocker]);
        assert!(one.x > 0.0);
        assert!(one.x < both.x);
    }

    #[test]
    fn test_specular_highlight_peak() {
        // Light and viewer both along the normal: half vector == normal
        let mirror_like = Material::new(Color::ZERO, Color::new(0.5, 0.5, 0.5), 50.0);
        let lights = [Light::new(Vec3::new(0.0, 0.0, 10.0), Color::ONE)];

        let color = shade(&mirror_like, Vec3::Z, Vec3::Z, Vec3::Z, &lights, &[]);
        assert!((color - Color::splat(0.5)).length() < 1e-5);
    }

    #[test]
    fn test_specular_falls_off_away_from_mirror_direction() {
        let glossy = Material::new(Color::ZERO, Color::ONE, 50.0);
        let lights = [Light::new(Vec3::new(0.0, 0.0, 10.0), Color::ONE)];

        let aligned = shade(&glossy, Vec3::Z, Vec3::Z, Vec3::Z, &lights, &[]);
        let oblique_view = Vec3::new(1.0, 0.0, 1.0).normalize();
        let off = shade(&glossy, Vec3::Z, Vec3::Z, oblique_view, &lights, &[]);
        assert!(off.x < aligned.x);
        assert!(off.x > 0.0);
    }
}

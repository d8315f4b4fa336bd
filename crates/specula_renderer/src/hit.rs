//! Ray-sphere intersection and the nearest-hit query.

use specula_core::{Material, Sphere};
use specula_math::{Interval, Ray, Vec3};

/// Record of a ray-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Parameter t where the intersection occurs (always > 0)
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal, pointing away from the sphere center
    pub normal: Vec3,
    /// Material of the sphere that was hit
    pub material: Material,
}

/// Intersect a single sphere, accepting only roots strictly inside `ray_t`.
///
/// Both roots of the quadratic are tried, nearest first, so a ray starting
/// inside the sphere reports the far wall. A zero discriminant (tangent ray)
/// counts as a miss.
pub fn hit_sphere(sphere: &Sphere, ray: &Ray, ray_t: Interval) -> Option<HitInfo> {
    let oc = ray.origin() - sphere.center;
    let a = ray.direction().dot(ray.direction());
    let b = 2.0 * oc.dot(ray.direction());
    let c = oc.dot(oc) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if !(discriminant > 0.0) {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let mut root = (-b - sqrtd) / (2.0 * a);
    if !ray_t.surrounds(root) {
        root = (-b + sqrtd) / (2.0 * a);
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    let position = ray.at(root);
    Some(HitInfo {
        t: root,
        position,
        normal: (position - sphere.center).normalize(),
        material: sphere.material,
    })
}

/// Find the nearest hit in front of the ray origin across all spheres.
///
/// Spheres are tested in order; the search window shrinks to the closest
/// hit so far, so on an exact tie the earlier sphere wins.
pub fn intersect(ray: &Ray, spheres: &[Sphere]) -> Option<HitInfo> {
    let mut closest: Option<HitInfo> = None;
    let mut ray_t = Interval::POSITIVE;

    for sphere in spheres {
        if let Some(hit) = hit_sphere(sphere, ray, ray_t) {
            ray_t = ray_t.with_max(hit.t);
            closest = Some(hit);
        }
    }

    closest
}

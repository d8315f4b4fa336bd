// Re-export glam for convenience
pub use glam::*;

// Specula math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Mirror-reflect `v` about the unit normal `n`.
///
/// Returns `v - 2 * dot(v, n) * n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

//! Whole-image rendering.
//!
//! Splits the image into buckets, traces them in parallel with rayon and
//! gathers the results into an RGBA float buffer. The alpha channel holds
//! the geometry-hit flag so the image can be composited over other content.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use specula_core::{RenderSettings, Scene};
use specula_math::{Interval, Vec4};

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::Camera;
use crate::tracer::MAX_BOUNCES;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Maximum mirror bounces per primary ray
    pub bounce_limit: u32,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Apply gamma 2.0 when converting to 8-bit
    pub gamma: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bounce_limit: 5,
            bucket_size: DEFAULT_BUCKET_SIZE,
            gamma: false,
        }
    }
}

impl RenderConfig {
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            bounce_limit: settings.bounce_limit,
            bucket_size: settings.bucket_size,
            gamma: settings.gamma,
        }
    }

    pub fn with_bounce_limit(mut self, bounce_limit: u32) -> Self {
        self.bounce_limit = bounce_limit;
        self
    }

    pub fn with_gamma(mut self, gamma: bool) -> Self {
        self.gamma = gamma;
        self
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear RGBA color to 8-bit, clamping to the displayable range.
pub fn color_to_rgba(color: Vec4, gamma: bool) -> [u8; 4] {
    let encode = |c: f32| {
        let c = if gamma { linear_to_gamma(c) } else { c };
        (255.0 * Interval::UNIT.clamp(c)).round() as u8
    };
    [
        encode(color.x),
        encode(color.y),
        encode(color.z),
        (255.0 * Interval::UNIT.clamp(color.w)).round() as u8,
    ]
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Linear RGB plus hit alpha, row-major
    pub pixels: Vec<Vec4>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Vec4) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba8(&self, gamma: bool) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color, gamma));
        }
        bytes
    }

    /// Convert to an `image` RGBA8 image.
    pub fn to_image(&self, gamma: bool) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(color_to_rgba(self.get(x, y), gamma))
        })
    }

    /// Write the buffer to disk; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P, gamma: bool) -> image::ImageResult<()> {
        self.to_image(gamma).save(path)
    }
}

/// Render the entire scene to an image buffer.
///
/// Buckets are traced in parallel on the rayon thread pool.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    if config.bounce_limit > MAX_BOUNCES {
        log::warn!(
            "Bounce limit {} exceeds the maximum of {}; extra bounces are ignored",
            config.bounce_limit,
            MAX_BOUNCES
        );
    }

    let buckets = generate_buckets(camera.image_width, camera.image_height, config.bucket_size);
    log::info!(
        "Rendering '{}' at {}x{} ({} buckets, {} spheres, {} lights, bounce limit {})",
        scene.name,
        camera.image_width,
        camera.image_height,
        buckets.len(),
        scene.sphere_count(),
        scene.light_count(),
        config.bounce_limit
    );

    let start = Instant::now();
    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, camera, scene, config.bounce_limit);
            log::debug!(
                "Bucket {} done ({}x{} at {},{})",
                bucket.index,
                bucket.width,
                bucket.height,
                bucket.x,
                bucket.y
            );
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::trace_ray;
    use specula_core::{Color, Light, Material, SkyGradient, Sphere};
    use specula_math::Vec3;

    fn test_scene() -> Scene {
        let mut scene = Scene::new("test").with_environment(SkyGradient::default());
        scene.add_sphere(Sphere::new(
            Vec3::ZERO,
            1.0,
            Material::new(Color::new(0.6, 0.2, 0.2), Color::splat(0.3), 40.0),
        ));
        scene.add_sphere(Sphere::new(
            Vec3::new(0.0, -101.0, 0.0),
            100.0,
            Material::diffuse(Color::splat(0.7)),
        ));
        scene.add_light(Light::new(Vec3::new(4.0, 6.0, 4.0), Color::ONE));
        scene
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        let rgba = color_to_rgba(Vec4::new(2.0, -1.0, 0.5, 1.0), false);
        assert_eq!(rgba, [255, 0, 128, 255]);

        let rgba = color_to_rgba(Vec4::new(0.25, 0.0, 1.0, 0.0), true);
        assert_eq!(rgba, [128, 0, 255, 0]);
    }

    #[test]
    fn test_write_bucket() {
        let mut image = ImageBuffer::new(4, 4);
        let bucket = crate::Bucket::new(2, 1, 2, 2, 0);
        let pixels = vec![Vec4::ONE, Vec4::X, Vec4::Y, Vec4::Z];
        image.write_bucket(&BucketResult::new(bucket, pixels));

        assert_eq!(image.get(2, 1), Vec4::ONE);
        assert_eq!(image.get(3, 1), Vec4::X);
        assert_eq!(image.get(2, 2), Vec4::Y);
        assert_eq!(image.get(3, 2), Vec4::Z);
        assert_eq!(image.get(0, 0), Vec4::ZERO);
    }

    #[test]
    fn test_render_matches_per_pixel_trace() {
        let scene = test_scene();
        let camera = Camera::from_settings(&scene.camera, 24, 16);
        let config = RenderConfig::default().with_bounce_limit(3);

        // Small buckets so the image spans several of them
        let image = render(&camera, &scene, &RenderConfig { bucket_size: 5, ..config });

        for y in 0..camera.image_height {
            for x in 0..camera.image_width {
                let expected = trace_ray(
                    &camera.get_ray(x, y),
                    &scene.spheres,
                    &scene.lights,
                    scene.environment.as_ref(),
                    config.bounce_limit,
                );
                assert_eq!(image.get(x, y), expected.to_rgba(), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_render_alpha_marks_geometry() {
        let scene = test_scene();
        let camera = Camera::from_settings(&scene.camera, 32, 32);
        let image = render(&camera, &scene, &RenderConfig::default());

        // Center of frame looks at the sphere, top row looks at the sky
        assert_eq!(image.get(16, 16).w, 1.0);
        assert_eq!(image.get(16, 0).w, 0.0);

        let bytes = image.to_rgba8(false);
        assert_eq!(bytes.len(), 32 * 32 * 4);
        assert_eq!(bytes[(16 * 32 + 16) * 4 + 3], 255);
    }
}

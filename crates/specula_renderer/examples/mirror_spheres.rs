//! Mirror spheres example.
//!
//! Renders a small built-in scene and saves it to PPM format.
//!
//! Run with: cargo run --example mirror_spheres

use specula_core::{CameraSettings, SkyGradient};
use specula_renderer::{
    color_to_rgba, render, Camera, Color, ImageBuffer, Light, Material, RenderConfig, Scene,
    Sphere, Vec3,
};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    println!("Specula - Mirror Spheres Example");
    println!("================================");

    let scene = build_scene();
    println!("Scene has {} spheres, {} lights", scene.sphere_count(), scene.light_count());

    let camera = Camera::from_settings(&scene.camera, 800, 450);
    let config = RenderConfig::default().with_bounce_limit(6).with_gamma(true);

    println!(
        "Rendering {}x{} with up to {} bounces...",
        camera.image_width, camera.image_height, config.bounce_limit
    );

    let start = std::time::Instant::now();
    let image = render(&camera, &scene, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "mirror_spheres.ppm";
    save_ppm(&image, filename, config.gamma).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let mut scene = Scene::new("mirror_spheres").with_environment(SkyGradient::new(
        Color::new(0.9, 0.9, 0.85),
        Color::new(0.3, 0.5, 0.9),
    ));
    scene.camera = CameraSettings {
        look_from: Vec3::new(0.0, 1.5, 7.0),
        look_at: Vec3::new(0.0, 0.5, 0.0),
        vup: Vec3::Y,
        vfov: 40.0,
    };

    // Ground
    scene.add_sphere(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::new(Color::splat(0.5), Color::splat(0.1), 10.0),
    ));

    // Chrome in the middle, colored glossy spheres either side
    scene.add_sphere(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Material::new(Color::splat(0.05), Color::splat(0.9), 200.0),
    ));
    scene.add_sphere(Sphere::new(
        Vec3::new(-2.2, 0.7, 0.5),
        0.7,
        Material::new(Color::new(0.7, 0.15, 0.1), Color::splat(0.3), 60.0),
    ));
    scene.add_sphere(Sphere::new(
        Vec3::new(2.2, 0.7, 0.5),
        0.7,
        Material::new(Color::new(0.1, 0.25, 0.7), Color::splat(0.3), 60.0),
    ));

    // Ring of small matte spheres
    for i in 0..8 {
        let angle = i as f32 * std::f32::consts::TAU / 8.0;
        let center = Vec3::new(3.5 * angle.cos(), 0.25, 3.5 * angle.sin() - 1.0);
        let hue = i as f32 / 8.0;
        let albedo = Color::new(0.5 + 0.4 * hue, 0.8 - 0.5 * hue, 0.3 + 0.3 * hue);
        scene.add_sphere(Sphere::new(center, 0.25, Material::diffuse(albedo)));
    }

    scene.add_light(Light::new(Vec3::new(5.0, 8.0, 6.0), Color::splat(0.8)));
    scene.add_light(Light::new(Vec3::new(-6.0, 4.0, 2.0), Color::splat(0.3)));
    scene
}

fn save_ppm(image: &ImageBuffer, filename: &str, gamma: bool) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let rgba = color_to_rgba(image.get(x, y), gamma);
            writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
        }
    }

    Ok(())
}

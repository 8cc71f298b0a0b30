//! Render one small scene with every sampling strategy.
//!
//! A glossy floor under two spherical lights of different size makes the
//! difference between BSDF sampling, light sampling and MIS easy to see.
//! Writes `strategy_<name>.png` into the current directory.

use lux_renderer::{
    render, Camera, Color, DiffuseLight, Hittable, Lambertian, Metal, Quad, RenderConfig,
    SamplingStrategy, Scene, Sphere, Vec3,
};
use std::sync::Arc;

fn main() -> lux_renderer::Result<()> {
    env_logger::init();

    let (world, lights) = build_scene();
    let camera = Camera::new()
        .with_position(Vec3::new(0.0, 2.0, 6.0), Vec3::new(0.0, 0.5, 0.0), Vec3::Y)
        .with_lens(40.0)
        .with_aspect_ratio(16.0 / 9.0);

    for strategy in SamplingStrategy::ALL {
        let config = RenderConfig {
            image_width: 320,
            image_height: 180,
            samples_per_pixel: 32,
            max_depth: 8,
            strategy,
            seed: Some(1),
            ..Default::default()
        };

        let image = render(&camera, &world, Some(&lights), &config)?;
        image.save(format!("strategy_{strategy}.png"))?;
    }

    Ok(())
}

fn build_scene() -> (Scene, Scene) {
    let mut world = Scene::new();
    let mut lights = Scene::new();

    world.add(Arc::new(Quad::new(
        Vec3::new(-10.0, 0.0, -10.0),
        Vec3::new(0.0, 0.0, 20.0),
        Vec3::new(20.0, 0.0, 0.0),
        Arc::new(Metal::new(Color::splat(0.9), 0.15)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 0.5, 0.0),
        0.5,
        Arc::new(Lambertian::new(Color::new(0.2, 0.4, 0.8))),
    )));

    let small: Arc<dyn Hittable> = Arc::new(Sphere::new(
        Vec3::new(-1.5, 2.0, -1.0),
        0.1,
        Arc::new(DiffuseLight::with_intensity(Color::new(1.0, 0.6, 0.3), 40.0)),
    ));
    let large: Arc<dyn Hittable> = Arc::new(Sphere::new(
        Vec3::new(1.5, 2.0, -1.0),
        0.6,
        Arc::new(DiffuseLight::with_intensity(Color::new(0.3, 0.6, 1.0), 2.0)),
    ));
    for light in [small, large] {
        world.add(light.clone());
        lights.add(light);
    }

    (world, lights)
}

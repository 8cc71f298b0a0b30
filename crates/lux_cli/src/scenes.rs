//! Built-in demo scenes.
//!
//! Every preset comes with its own lights aggregate (the emitters that next
//! event estimation aims at) and a render configuration tuned for it.

use clap::ValueEnum;
use lux_renderer::{
    Camera, Color, DiffuseLight, Hittable, Lambertian, Material, Metal, Quad, RenderConfig,
    SamplingStrategy, Scene, Sphere, Vec3, WrongLambertian,
};
use std::sync::Arc;

/// Names accepted by `--scene`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenePreset {
    /// Diffuse and metal spheres under a sky gradient
    RandomSpheres,
    /// Red sphere lit by a spherical and a rectangular light
    SimpleLight,
    /// Classic Cornell box with a diffuse sphere
    CornellBox,
    /// Box of mirrors around a spherical light
    MirrorBox,
    /// Four metal strips of rising roughness under five lights of rising size
    MisComparison,
    /// Cosine-sampled vs uniformly sampled diffuse spheres in a Cornell box
    CompareSampling,
    /// Diffuse sphere next to a perfect mirror sphere in a Cornell box
    Playground,
}

/// Everything needed to render one preset.
pub struct Preset {
    pub world: Scene,
    pub lights: Scene,
    pub camera: Camera,
    pub config: RenderConfig,
}

impl ScenePreset {
    pub fn build(self) -> Preset {
        match self {
            ScenePreset::RandomSpheres => random_spheres(),
            ScenePreset::SimpleLight => simple_light(),
            ScenePreset::CornellBox => cornell_box(),
            ScenePreset::MirrorBox => mirror_box(),
            ScenePreset::MisComparison => mis_comparison(),
            ScenePreset::CompareSampling => compare_sampling(),
            ScenePreset::Playground => playground(),
        }
    }

    /// Default output file name, e.g. `cornell_box.png`.
    pub fn file_name(self) -> String {
        let name = self
            .to_possible_value()
            .map(|value| value.get_name().replace('-', "_"))
            .unwrap_or_else(|| "render".to_string());
        format!("{name}.png")
    }
}

fn camera(look_from: Vec3, look_at: Vec3, vfov: f32) -> Camera {
    Camera::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(vfov)
}

fn square_config(width: u32, samples_per_pixel: u32, max_depth: u32) -> RenderConfig {
    RenderConfig {
        image_width: width,
        image_height: width,
        samples_per_pixel,
        max_depth,
        ..Default::default()
    }
}

/// Add `object` to the world and to the lights.
fn add_light(world: &mut Scene, lights: &mut Scene, object: Arc<dyn Hittable>) {
    world.add(object.clone());
    lights.add(object);
}

fn random_spheres() -> Preset {
    let mut world = Scene::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let left: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.8, 0.8), 0.3));
    let right: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0));

    world.add(Arc::new(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, center)));
    world.add(Arc::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, left)));
    world.add(Arc::new(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, right)));

    Preset {
        world,
        lights: Scene::new(),
        camera: camera(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 90.0),
        config: RenderConfig {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            use_sky_gradient: true,
            ..Default::default()
        },
    }
}

fn simple_light() -> Preset {
    let mut world = Scene::new();
    let mut lights = Scene::new();

    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::splat(0.5))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 2.0, 0.0),
        2.0,
        Arc::new(Lambertian::new(Color::new(0.7, 0.1, 0.1))),
    )));

    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(4.0)));
    add_light(
        &mut world,
        &mut lights,
        Arc::new(Sphere::new(Vec3::new(0.0, 7.0, 0.0), 2.0, light.clone())),
    );
    add_light(
        &mut world,
        &mut lights,
        Arc::new(Quad::new(
            Vec3::new(3.0, 1.0, -2.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            light,
        )),
    );

    Preset {
        world,
        lights,
        camera: camera(Vec3::new(26.0, 3.0, 6.0), Vec3::new(0.0, 2.0, 0.0), 20.0),
        config: RenderConfig {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 800,
            max_depth: 200,
            ..Default::default()
        },
    }
}

/// Walls of the 555-unit Cornell box plus its ceiling light.
fn cornell_shell(world: &mut Scene, lights: &mut Scene) {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(15.0)));

    world.add(Arc::new(Quad::new(
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        green,
    )));
    world.add(Arc::new(Quad::new(
        Vec3::ZERO,
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        red,
    )));
    add_light(
        world,
        lights,
        Arc::new(Quad::new(
            Vec3::new(343.0, 554.0, 332.0),
            Vec3::new(-130.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -105.0),
            light,
        )),
    );
    world.add(Arc::new(Quad::new(
        Vec3::ZERO,
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(555.0, 555.0, 555.0),
        Vec3::new(-555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        white,
    )));
}

fn cornell_camera() -> Camera {
    camera(Vec3::new(278.0, 278.0, -800.0), Vec3::new(278.0, 278.0, 0.0), 40.0)
}

fn cornell_box() -> Preset {
    let mut world = Scene::new();
    let mut lights = Scene::new();
    cornell_shell(&mut world, &mut lights);

    world.add(Arc::new(Sphere::new(
        Vec3::new(278.0, 100.0, 278.0),
        100.0,
        Arc::new(Lambertian::new(Color::splat(0.73))),
    )));

    Preset {
        world,
        lights,
        camera: cornell_camera(),
        config: square_config(600, 300, 70),
    }
}

fn mirror_box() -> Preset {
    let mut world = Scene::new();
    let mut lights = Scene::new();

    let mirror: Arc<dyn Material> = Arc::new(Metal::new(Color::splat(0.9), 0.002));
    let perfect_mirror: Arc<dyn Material> = Arc::new(Metal::new(Color::splat(0.9), 0.0));
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let gray: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.2)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(12.0)));

    let walls = [
        (Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 555.0, 0.0), Vec3::new(0.0, 0.0, 555.0), &mirror),
        (Vec3::ZERO, Vec3::new(0.0, 555.0, 0.0), Vec3::new(0.0, 0.0, 555.0), &mirror),
        (Vec3::ZERO, Vec3::new(700.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 700.0), &gray),
        (Vec3::new(0.0, 555.0, 0.0), Vec3::new(700.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 700.0), &mirror),
        (Vec3::new(0.0, 0.0, 555.0), Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 555.0, 0.0), &mirror),
        (Vec3::ZERO, Vec3::new(700.0, 0.0, 0.0), Vec3::new(0.0, 700.0, 0.0), &mirror),
    ];
    for (q, u, v, material) in walls {
        world.add(Arc::new(Quad::new(q, u, v, material.clone())));
    }

    world.add(Arc::new(Sphere::new(Vec3::new(278.0, 100.0, 278.0), 100.0, red)));
    add_light(
        &mut world,
        &mut lights,
        Arc::new(Sphere::new(Vec3::new(378.0, 70.0, 100.0), 70.0, light)),
    );
    world.add(Arc::new(Sphere::new(
        Vec3::new(350.0, 350.0, 350.0),
        80.0,
        perfect_mirror,
    )));

    Preset {
        world,
        lights,
        camera: camera(Vec3::new(10.0, 250.0, 40.0), Vec3::new(278.0, 278.0, 100.0), 40.0),
        config: square_config(1024, 6000, 400),
    }
}

/// A 550 x 120 metal strip centered at `center`, tilted so that light from
/// `light` reflects toward `eye`.
fn mirror_strip(light: Vec3, eye: Vec3, center: Vec3, material: Arc<dyn Material>) -> Quad {
    let incident = (center - light).normalize();
    let to_eye = (eye - center).normalize();
    let normal = (incident - to_eye).normalize();

    let length = Vec3::new(550.0, 0.0, 0.0);
    let width = normal.cross(length).normalize() * 120.0;

    Quad::new(center - length * 0.5 - width * 0.5, length, width, material)
}

fn mis_comparison() -> Preset {
    let mut world = Scene::new();
    let mut lights = Scene::new();

    let eye = Vec3::new(0.0, 250.0, -500.0);
    let light_row = Vec3::new(0.0, 400.0, 280.0);

    let strips = [
        (0.03, Vec3::new(0.0, 280.0, 420.0)),
        (0.05, Vec3::new(0.0, 180.0, 290.0)),
        (0.09, Vec3::new(0.0, 110.0, 150.0)),
        (0.11, Vec3::new(0.0, 70.0, 0.0)),
    ];
    for (fuzz, center) in strips {
        let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::splat(0.95), fuzz));
        world.add(Arc::new(mirror_strip(light_row, eye, center, metal)));
    }

    let emitters = [
        (-255.0, 5.0, Color::new(0.8, 0.2, 0.2), 5.0),
        (-180.0, 15.0, Color::new(0.2, 0.2, 0.8), 3.0),
        (-80.0, 25.0, Color::new(0.2, 0.8, 0.2), 2.0),
        (45.0, 45.0, Color::new(0.8, 0.8, 0.2), 2.0),
        (200.0, 60.0, Color::splat(0.9), 1.0),
    ];
    for (x, radius, color, intensity) in emitters {
        let material: Arc<dyn Material> = Arc::new(DiffuseLight::with_intensity(color, intensity));
        add_light(
            &mut world,
            &mut lights,
            Arc::new(Sphere::new(Vec3::new(x, light_row.y, light_row.z), radius, material)),
        );
    }

    Preset {
        world,
        lights,
        camera: camera(eye, Vec3::new(0.0, 180.0, 0.0), 50.0),
        config: square_config(400, 100, 70),
    }
}

fn compare_sampling() -> Preset {
    let mut world = Scene::new();
    let mut lights = Scene::new();
    cornell_shell(&mut world, &mut lights);

    let albedo = Color::splat(0.73);
    world.add(Arc::new(Sphere::new(
        Vec3::new(180.0, 100.0, 278.0),
        100.0,
        Arc::new(Lambertian::new(albedo)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(375.0, 100.0, 278.0),
        100.0,
        Arc::new(WrongLambertian::new(albedo)),
    )));

    Preset {
        world,
        lights,
        camera: cornell_camera(),
        config: RenderConfig {
            strategy: SamplingStrategy::Material,
            ..square_config(600, 100, 70)
        },
    }
}

fn playground() -> Preset {
    let mut world = Scene::new();
    let mut lights = Scene::new();
    cornell_shell(&mut world, &mut lights);

    world.add(Arc::new(Sphere::new(
        Vec3::new(180.0, 100.0, 220.0),
        100.0,
        Arc::new(Lambertian::new(Color::splat(0.8))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(375.0, 100.0, 350.0),
        100.0,
        Arc::new(Metal::new(Color::ONE, 0.0)),
    )));

    Preset {
        world,
        lights,
        camera: camera(Vec3::new(278.0, 278.0, -780.0), Vec3::new(278.0, 278.0, 0.0), 40.0),
        config: square_config(600, 300, 50),
    }
}

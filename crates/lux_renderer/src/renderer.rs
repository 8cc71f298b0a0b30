//! Parallel render loop.
//!
//! Rows of the image are independent: each is rendered on the rayon pool into
//! its own slice of the output buffer with its own random number generator.

use crate::error::{RenderError, Result};
use crate::hittable::{Hittable, Scene};
use crate::image_buffer::{color_to_rgb, ImageBuffer};
use crate::integrator::Integrator;
use crate::sampling::sample_square;
use crate::{Camera, Color, RenderConfig};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

/// Progress is logged roughly this many times per render.
const PROGRESS_STEPS: usize = 20;

/// Render a single pixel with multi-sampling.
///
/// `row` counts from the top of the image; the camera's `t` axis counts from
/// the bottom.
pub fn render_pixel(
    integrator: &Integrator,
    camera: &Camera,
    col: u32,
    row: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let config = integrator.config();
    let j = config.image_height - 1 - row;
    let s_scale = 1.0 / config.image_width.saturating_sub(1).max(1) as f32;
    let t_scale = 1.0 / config.image_height.saturating_sub(1).max(1) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let (dx, dy) = sample_square(rng);
        let s = (col as f32 + 0.5 + dx) * s_scale;
        let t = (j as f32 + 0.5 + dy) * t_scale;
        let ray = camera.get_ray(s, t);
        pixel_color += integrator.ray_color(&ray, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Render the entire scene to an image buffer.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&Scene>,
    config: &RenderConfig,
) -> Result<ImageBuffer> {
    render_cancellable(camera, world, lights, config, &AtomicBool::new(false))
}

/// Like [`render`], but stops with [`RenderError::Cancelled`] once `cancel`
/// is set. The flag is checked before each row.
pub fn render_cancellable(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&Scene>,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> Result<ImageBuffer> {
    config.validate()?;

    let pool = build_thread_pool(config.threads)?;
    let integrator = Integrator::new(world, lights, config);
    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    let stride = image.row_stride();

    let total_rows = config.image_height as usize;
    let progress_every = (total_rows / PROGRESS_STEPS).max(1);
    let rows_done = AtomicUsize::new(0);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, strategy {}, {} threads",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth,
        config.strategy,
        pool.current_num_threads()
    );
    let start = Instant::now();

    pool.install(|| {
        image
            .pixels
            .par_chunks_mut(stride)
            .enumerate()
            .try_for_each(|(row, out)| {
                if cancel.load(Ordering::Relaxed) {
                    return Err(RenderError::Cancelled);
                }

                let mut rng = row_rng(config.seed, row);
                for (col, pixel) in out.chunks_exact_mut(3).enumerate() {
                    let color = render_pixel(&integrator, camera, col as u32, row as u32, &mut rng);
                    pixel.copy_from_slice(&color_to_rgb(color));
                }

                let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                if done % progress_every == 0 || done == total_rows {
                    log::debug!("{done}/{total_rows} rows");
                }
                Ok(())
            })
    })
    .inspect_err(|err| log::warn!("Render stopped: {err}"))?;

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}

fn build_thread_pool(threads: Option<usize>) -> Result<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    Ok(builder.build()?)
}

/// Per-row generator: reproducible when a seed is given.
fn row_rng(seed: Option<u64>, row: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(row as u64)),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiffuseLight, Lambertian, Quad, Sphere, Vec3};
    use std::sync::Arc;

    fn small_scene() -> (Scene, Scene, Camera) {
        let light: Arc<dyn Hittable> = Arc::new(Quad::new(
            Vec3::new(-1.0, 3.0, -3.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Arc::new(DiffuseLight::new(Color::splat(8.0))),
        ));

        let mut world = Scene::new();
        world.add(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            1.0,
            Arc::new(Lambertian::new(Color::new(0.7, 0.3, 0.3))),
        )));
        world.add(Arc::new(Quad::new(
            Vec3::new(-5.0, -1.0, -8.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 0.0),
            Arc::new(Lambertian::new(Color::splat(0.5))),
        )));
        world.add(light.clone());

        let mut lights = Scene::new();
        lights.add(light);

        let camera = Camera::new()
            .with_position(Vec3::new(0.0, 0.5, 1.0), Vec3::new(0.0, 0.0, -3.0), Vec3::Y)
            .with_lens(50.0)
            .with_aspect_ratio(4.0 / 3.0);

        (world, lights, camera)
    }

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn small_config() -> RenderConfig {
        RenderConfig {
            image_width: 16,
            image_height: 12,
            samples_per_pixel: 4,
            max_depth: 6,
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_produces_lit_image() {
        init_logging();
        let (world, lights, camera) = small_scene();
        let config = small_config();

        let image = render(&camera, &world, Some(&lights), &config).unwrap();
        assert_eq!((image.width, image.height), (16, 12));
        assert_eq!(image.pixels.len(), 16 * 12 * 3);

        // Center of the frame looks at the lit sphere
        let center = (6 * image.row_stride()) + 8 * 3;
        assert!(
            image.pixels[center..center + 3].iter().any(|&c| c > 0),
            "center pixel is black"
        );
    }

    #[test]
    fn test_seeded_render_is_reproducible_across_thread_counts() {
        let (world, lights, camera) = small_scene();
        let single = RenderConfig {
            threads: Some(1),
            ..small_config()
        };
        let multi = RenderConfig {
            threads: Some(4),
            ..small_config()
        };

        let a = render(&camera, &world, Some(&lights), &single).unwrap();
        let b = render(&camera, &world, Some(&lights), &multi).unwrap();
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_render_cancelled() {
        let (world, lights, camera) = small_scene();
        let cancel = AtomicBool::new(true);

        let result = render_cancellable(&camera, &world, Some(&lights), &small_config(), &cancel);
        assert!(matches!(result, Err(RenderError::Cancelled)));
    }

    #[test]
    fn test_render_rejects_invalid_config() {
        let (world, _, camera) = small_scene();
        let config = RenderConfig {
            samples_per_pixel: 0,
            ..small_config()
        };
        assert!(matches!(
            render(&camera, &world, None, &config),
            Err(RenderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_render_pixel_background() {
        let world = Scene::new();
        let config = RenderConfig {
            background: Color::new(0.5, 0.7, 1.0),
            ..small_config()
        };
        let integrator = Integrator::new(&world, None, &config);
        let camera = Camera::new();
        let mut rng = StdRng::seed_from_u64(42);

        let color = render_pixel(&integrator, &camera, 5, 5, &mut rng);
        assert!((color - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
    }
}

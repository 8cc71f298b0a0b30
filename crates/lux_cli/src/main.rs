//! `lux`: render one of the built-in scenes to a PNG.

mod cli;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use lux_renderer::{render, RenderConfig};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let preset = args.scene.build();
    log::info!(
        "Scene {:?}: {} objects, {} lights",
        args.scene,
        preset.world.len(),
        preset.lights.len()
    );

    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("Failed to load render config {}", path.display()))?,
        None => preset.config,
    };
    args.apply_overrides(&mut config);
    config.validate().context("Invalid render settings")?;

    let camera = preset.camera.with_aspect_ratio(config.aspect_ratio());
    let image = render(&camera, &preset.world, Some(&preset.lights), &config)
        .context("Render failed")?;

    let output = args.output_path();
    image
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(())
}

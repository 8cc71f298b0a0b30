use crate::scenes::ScenePreset;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lux_renderer::{RenderConfig, SamplingStrategy};
use std::path::PathBuf;

/// Log levels accepted by `--log-level`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lux")]
#[command(about = "Path tracer with multiple importance sampling")]
pub struct Args {
    /// Scene preset to render
    #[arg(short, long, value_enum, default_value = "cornell-box")]
    pub scene: ScenePreset,

    /// Output PNG path (defaults to the scene name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON render config replacing the preset's settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel
    #[arg(long = "spp")]
    pub samples_per_pixel: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// material, light, mis or mixture
    #[arg(long)]
    pub strategy: Option<SamplingStrategy>,

    /// Disable Russian roulette path termination
    #[arg(long)]
    pub no_roulette: bool,

    /// Seed for a reproducible render
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of `config`.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.image_width = width;
        }
        if let Some(height) = self.height {
            config.image_height = height;
        }
        if let Some(spp) = self.samples_per_pixel {
            config.samples_per_pixel = spp;
        }
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if self.no_roulette {
            config.russian_roulette = false;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.scene.file_name()))
    }
}

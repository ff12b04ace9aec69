use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_renderer::RenderConfig;
use log::LevelFilter;

/// Log levels accepted on the command line.
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

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Whitted ray tracer for JSON scene files")]
pub struct Args {
    /// Scene description (JSON)
    pub scene: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Image width in pixels (overrides the scene file)
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels (overrides the scene file)
    #[arg(long)]
    pub height: Option<u32>,

    /// Maximum mirror bounces (overrides the scene file)
    #[arg(long, short = 'b')]
    pub max_bounces: Option<u32>,

    /// Skip shadow rays
    #[arg(long)]
    pub no_shadows: bool,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of the scene's render settings.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.image_width = width;
        }
        if let Some(height) = self.height {
            config.image_height = height;
        }
        if let Some(max_bounces) = self.max_bounces {
            config.max_bounces = max_bounces;
        }
        if self.no_shadows {
            config.shadows_enabled = false;
        }
    }
}

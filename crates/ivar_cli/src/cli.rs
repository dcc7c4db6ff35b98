use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
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

/// Built-in scenes used when no scene file is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoScene {
    /// Random field of small spheres around three large ones
    BookCover,
    /// Hollow glass sphere next to a diffuse and a metal one
    Bubble,
}

#[derive(Parser, Debug)]
#[command(name = "ivar")]
#[command(about = "Multithreaded CPU path tracer for sphere scenes")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1920)]
    pub width: u32,

    /// Image height in pixels (defaults to width * 9 / 16)
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 100)]
    pub samples: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value_t = 16)]
    pub max_depth: u32,

    /// Worker threads (defaults to the hardware thread count minus two)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Base random seed
    #[arg(long, default_value_t = 13575)]
    pub seed: u64,

    /// JSON scene file; a built-in scene is rendered when omitted
    #[arg(long, conflicts_with = "demo")]
    pub scene: Option<PathBuf>,

    /// Built-in scene to render
    #[arg(long, value_enum, default_value_t = DemoScene::BookCover)]
    pub demo: DemoScene,

    /// Output file path (.tga is written directly, other extensions via the image crate)
    #[arg(short, long, default_value = "image.tga")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Output height, derived from a 16:9 aspect ratio when not given.
    pub fn height(&self) -> u32 {
        self.height
            .unwrap_or_else(|| ((u64::from(self.width) * 9 / 16) as u32).max(1))
    }
}

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use tricast::controller::Command;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
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

/// Command line arguments structure using clap derive macros
#[derive(Parser, Debug)]
#[command(name = "tricast")]
#[command(about = "Headless triangle raycaster with adaptive distance shading")]
pub struct Args {
    /// Configuration file (TOML); defaults are used when it does not exist
    #[arg(short, long, default_value = "tricast.toml")]
    pub config: String,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Raster width in pixels (overrides the config file)
    #[arg(long)]
    pub width: Option<usize>,

    /// Raster height in pixels (overrides the config file)
    #[arg(long)]
    pub height: Option<usize>,

    /// Sensor grain amplitude, 0-255 (overrides the config file)
    #[arg(long, short = 'n')]
    pub noise: Option<u8>,

    /// Number of frames to render (overrides the config file)
    #[arg(long, short = 'f')]
    pub frames: Option<usize>,

    /// Camera commands applied after each frame, comma separated
    /// (key letters like `w,q,z` or names like `forward,yaw-left`)
    #[arg(long, value_delimiter = ',')]
    pub commands: Vec<Command>,

    /// Output PNG path for the final frame
    #[arg(short, long, default_value = "output.png")]
    pub output: String,

    /// Also write every frame as a numbered PNG next to the output
    #[arg(long)]
    pub save_frames: bool,

    /// Number of random triangles scattered in the demo scene
    #[arg(long, default_value = "24")]
    pub shards: usize,
}

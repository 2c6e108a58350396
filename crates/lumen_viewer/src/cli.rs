use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_tracer::{InputEvent, RenderSettings};

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

/// An input event to replay before a given frame in headless mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedEvent {
    pub frame: u32,
    pub event: InputEvent,
}

/// Parse `FRAME=EVENT`, e.g. `3=w` or `0=move:0.4,0.6`.
fn parse_scripted_event(s: &str) -> Result<ScriptedEvent, String> {
    let (frame, event) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FRAME=EVENT, got {s:?}"))?;
    let frame = frame
        .trim()
        .parse()
        .map_err(|e| format!("invalid frame index {frame:?}: {e}"))?;
    let event = event.parse().map_err(|e| format!("{e}"))?;
    Ok(ScriptedEvent { frame, event })
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Interactive progressive ray tracer")]
pub struct Args {
    /// JSON render settings file; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel per frame
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Ray bounce depth (only 1 is supported)
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub vfov: Option<f32>,

    /// Camera movement step
    #[arg(long)]
    pub step: Option<f32>,

    /// Write every presented frame to DIR/<index>.png
    #[arg(long, value_name = "DIR")]
    pub capture_dir: Option<PathBuf>,

    /// Render without a window
    #[arg(long)]
    pub headless: bool,

    /// Number of frames to render in headless mode
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// Headless input event as FRAME=EVENT (repeatable)
    #[arg(long = "event", value_name = "FRAME=EVENT", value_parser = parse_scripted_event)]
    pub events: Vec<ScriptedEvent>,

    /// Final image written in headless mode
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Set the logging level, overriding RUST_LOG
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

impl Args {
    /// Apply command line overrides on top of loaded settings.
    pub fn apply_overrides(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.image_width = width;
        }
        if let Some(height) = self.height {
            settings.image_height = height;
        }
        if let Some(samples) = self.samples_per_pixel {
            settings.samples_per_pixel = samples;
        }
        if let Some(depth) = self.max_depth {
            settings.max_depth = depth;
        }
        if let Some(vfov) = self.vfov {
            settings.vfov = vfov;
        }
        if let Some(step) = self.step {
            settings.step = step;
        }
    }
}

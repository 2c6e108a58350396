mod app;
mod capture;
mod cli;
mod headless;
mod present;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_tracer::{room_camera, room_scene, RenderSession, RenderSettings};
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::App;
use crate::capture::FrameCapture;
use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    );
    if let Some(level) = args.log_level {
        logger.filter_level(level.into());
    }
    logger.init();

    log::info!("Starting Lumen");

    let mut settings = match &args.config {
        Some(path) => RenderSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };
    args.apply_overrides(&mut settings);
    settings.validate().context("Invalid render settings")?;

    let world = room_scene().context("Failed to build scene")?;
    let camera = room_camera(&settings).context("Failed to build camera")?;
    let mut session = RenderSession::new(settings, world, camera)?;

    let capture = args.capture_dir.clone().map(FrameCapture::new).transpose()?;

    if args.headless {
        return headless::run(&mut session, args.frames, &args.events, capture, &args.output);
    }

    if !args.events.is_empty() {
        log::warn!("Ignoring {} scripted events outside headless mode", args.events.len());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(session, capture);

    log::info!("Running event loop");
    event_loop.run_app(&mut app)?;

    Ok(())
}

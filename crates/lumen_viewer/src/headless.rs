//! Windowless rendering with scripted input.

use std::path::Path;
use std::time::Instant;

use anyhow::{ensure, Result};
use lumen_tracer::{InputEvent, RenderSession};

use crate::capture::{save_png, FrameCapture};
use crate::cli::ScriptedEvent;

/// Render `frames` frames, replaying each scripted event before its frame.
///
/// Every frame goes to `capture` when set; the last one is written to `output`.
pub fn run(
    session: &mut RenderSession,
    frames: u32,
    script: &[ScriptedEvent],
    mut capture: Option<FrameCapture>,
    output: &Path,
) -> Result<()> {
    ensure!(frames > 0, "headless mode needs at least one frame to write an image");

    let start = Instant::now();
    log::info!("Headless render: {} frames, {} scripted events", frames, script.len());

    for frame in 0..frames {
        let events = events_for_frame(script, frame);
        if !events.is_empty() && session.apply_events(&events) {
            log::info!("Frame {}: camera moved, accumulation restarted", frame);
        }

        session.render_frame();

        if let Some(capture) = &mut capture {
            let settings = session.settings();
            capture.save(settings.image_width, settings.image_height, session.image_rgba())?;
        }
    }

    if let Some(capture) = &capture {
        log::info!("Captured {} frames", capture.frames_written());
    }

    let settings = session.settings();
    save_png(output, settings.image_width, settings.image_height, session.image_rgba())?;

    log::info!(
        "Wrote {} after {} frames ({} accumulated) in {:.2?}",
        output.display(),
        frames,
        session.frame_count(),
        start.elapsed()
    );
    Ok(())
}

/// Events scheduled for `frame`, in command line order.
fn events_for_frame(script: &[ScriptedEvent], frame: u32) -> Vec<InputEvent> {
    script
        .iter()
        .filter(|scripted| scripted.frame == frame)
        .map(|scripted| scripted.event)
        .collect()
}

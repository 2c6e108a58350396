//! Render session: the state that lives for the whole interactive run.
//!
//! Owns the scene, the camera, the interaction controller, and the
//! accumulation buffer. The frame loop alternates [`RenderSession::apply_events`]
//! and [`RenderSession::render_frame`]; nothing else mutates the camera or
//! the buffer.

use std::time::Instant;

use crate::{
    renderer, AccumulationBuffer, Camera, CameraController, Color, ConfigError, ControllerState,
    HittableList, InputEvent, RenderSettings,
};

/// Scene, camera, and accumulated image for one interactive run.
pub struct RenderSession {
    settings: RenderSettings,
    world: HittableList,
    camera: Camera,
    controller: CameraController,
    buffer: AccumulationBuffer,
    frames_rendered: u64,
}

impl RenderSession {
    /// Validate settings and set up a session with an empty buffer.
    pub fn new(
        settings: RenderSettings,
        world: HittableList,
        camera: Camera,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let buffer = AccumulationBuffer::new(settings.image_width, settings.image_height);
        let controller = CameraController::new(settings.step);

        log::info!(
            "Render session: {}x{} @ {} spp, {} primitives, {:?} shading",
            settings.image_width,
            settings.image_height,
            settings.samples_per_pixel,
            world.len(),
            settings.shading,
        );

        Ok(Self {
            settings,
            world,
            camera,
            controller,
            buffer,
            frames_rendered: 0,
        })
    }

    /// Apply one frame's input events. Clears the buffer if the camera moved.
    ///
    /// Returns true when a reset happened.
    pub fn apply_events(&mut self, events: &[InputEvent]) -> bool {
        if events.is_empty() {
            return false;
        }

        match self.controller.process_events(&mut self.camera, events) {
            ControllerState::CameraChanged => {
                self.buffer.clear();
                self.controller.acknowledge_reset();
                log::debug!(
                    "Camera moved, accumulation reset (look_from={} look_at={})",
                    self.camera.look_from(),
                    self.camera.look_at()
                );
                true
            }
            ControllerState::Idle => false,
        }
    }

    /// Render one frame and add it to the accumulation.
    pub fn render_frame(&mut self) {
        let start = Instant::now();

        renderer::render_frame(
            &mut self.buffer,
            &self.camera,
            &self.world,
            &self.settings,
            self.frames_rendered,
        );
        self.frames_rendered += 1;

        log::debug!(
            "Frame {} rendered in {:.2?} ({} accumulated)",
            self.frames_rendered,
            start.elapsed(),
            self.buffer.frame_count()
        );
    }

    /// Normalized image, `sqrt(sum / count)` per pixel, row 0 at the top.
    pub fn image(&self) -> Vec<Color> {
        self.buffer.resolve()
    }

    /// Normalized image as 8-bit RGBA, row 0 at the top.
    pub fn image_rgba(&self) -> Vec<u8> {
        self.buffer.to_rgba()
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn world(&self) -> &HittableList {
        &self.world
    }

    pub fn buffer(&self) -> &AccumulationBuffer {
        &self.buffer
    }

    /// Frames accumulated since the last reset.
    pub fn frame_count(&self) -> u32 {
        self.buffer.frame_count()
    }

    /// Frames rendered over the whole session, resets included.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

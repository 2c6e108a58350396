use std::sync::Arc;
use std::time::Instant;

use lumen_tracer::{InputEvent, Key, RenderSession};
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::capture::FrameCapture;
use crate::present::Presenter;

/// Map a pixel position to [0, 1] on both axes with y pointing up.
pub fn normalize_pointer(position: PhysicalPosition<f64>, size: PhysicalSize<u32>) -> (f32, f32) {
    let width = f64::from(size.width.max(1));
    let height = f64::from(size.height.max(1));
    let x = (position.x / width).clamp(0.0, 1.0);
    let y = 1.0 - (position.y / height).clamp(0.0, 1.0);
    (x as f32, y as f32)
}

/// Translate a physical key into a controller key.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        _ => None,
    }
}

/// Translate a mouse button into a controller key.
pub fn map_button(button: MouseButton) -> Option<Key> {
    match button {
        MouseButton::Left => Some(Key::PrimaryButton),
        MouseButton::Right => Some(Key::SecondaryButton),
        _ => None,
    }
}

/// Interactive viewer state
pub struct App {
    session: RenderSession,
    capture: Option<FrameCapture>,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,

    // Events gathered since the last frame
    pending: Vec<InputEvent>,
    last_report: Instant,
}

impl App {
    pub fn new(session: RenderSession, capture: Option<FrameCapture>) -> Self {
        Self {
            session,
            capture,
            window: None,
            presenter: None,
            pending: Vec::new(),
            last_report: Instant::now(),
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let settings = self.session.settings();
        let (width, height) = (settings.image_width, settings.image_height);

        let window_attrs = Window::default_attributes()
            .with_title("Lumen")
            .with_inner_size(PhysicalSize::new(width, height))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let presenter = pollster::block_on(Presenter::new(window.clone(), width, height))?;

        self.window = Some(window);
        self.presenter = Some(presenter);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let events = std::mem::take(&mut self.pending);
        self.session.apply_events(&events);
        self.session.render_frame();

        let rgba = self.session.image_rgba();

        if let Some(presenter) = &mut self.presenter {
            if let Err(e) = presenter.present(&rgba) {
                if let Some(surface_err) = e.downcast_ref::<wgpu::SurfaceError>() {
                    match surface_err {
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                            presenter.resize(presenter.size);
                        }
                        wgpu::SurfaceError::OutOfMemory => {
                            log::error!("Out of memory!");
                            event_loop.exit();
                        }
                        _ => {
                            log::error!("Surface error: {:?}", surface_err);
                        }
                    }
                } else {
                    log::error!("Present error: {:?}", e);
                }
            }
        }

        if let Some(capture) = &mut self.capture {
            let settings = self.session.settings();
            if let Err(e) = capture.save(settings.image_width, settings.image_height, rgba) {
                log::error!("Frame capture failed, disabling capture: {e:#}");
                self.capture = None;
            }
        }

        if self.last_report.elapsed().as_secs() >= 1 {
            log::info!(
                "Accumulated {} frames ({} rendered in total)",
                self.session.frame_count(),
                self.session.frames_rendered()
            );
            self.last_report = Instant::now();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            match self.init_window(event_loop) {
                Ok(()) => log::info!("Window and presenter initialized"),
                Err(e) => {
                    log::error!("Failed to initialize window: {e:#}");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize((physical_size.width, physical_size.height));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(window) = &self.window {
                    let (x, y) = normalize_pointer(position, window.inner_size());
                    self.pending.push(InputEvent::PointerMove { x, y });
                }
            }
            WindowEvent::MouseInput {
                button,
                state: ElementState::Pressed,
                ..
            } => {
                if let Some(key) = map_button(button) {
                    self.pending.push(InputEvent::Press(key));
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(keycode),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if keycode == KeyCode::Escape {
                    event_loop.exit();
                } else if let Some(key) = map_key(keycode) {
                    self.pending.push(InputEvent::Press(key));
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_corners() {
        let size = PhysicalSize::new(200, 100);

        // Top-left pixel maps to (0, 1), bottom-right to (1, 0)
        assert_eq!(normalize_pointer(PhysicalPosition::new(0.0, 0.0), size), (0.0, 1.0));
        assert_eq!(normalize_pointer(PhysicalPosition::new(200.0, 100.0), size), (1.0, 0.0));
        assert_eq!(normalize_pointer(PhysicalPosition::new(100.0, 50.0), size), (0.5, 0.5));
    }

    #[test]
    fn test_pointer_outside_window_is_clamped() {
        let size = PhysicalSize::new(100, 100);
        assert_eq!(normalize_pointer(PhysicalPosition::new(-20.0, 150.0), size), (0.0, 0.0));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::KeyW), Some(Key::W));
        assert_eq!(map_key(KeyCode::ArrowLeft), Some(Key::Left));
        assert_eq!(map_key(KeyCode::KeyQ), None);
        assert_eq!(map_button(MouseButton::Left), Some(Key::PrimaryButton));
        assert_eq!(map_button(MouseButton::Right), Some(Key::SecondaryButton));
        assert_eq!(map_button(MouseButton::Middle), None);
    }
}

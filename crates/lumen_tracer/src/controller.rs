//! Interaction controller.
//!
//! Turns discrete input events into camera moves. Any move flips the
//! controller into [`ControllerState::CameraChanged`]; the render session
//! clears its accumulation buffer before the next frame and acknowledges the
//! change, which returns the controller to [`ControllerState::Idle`].

use std::str::FromStr;

use crate::{Camera, CameraTarget, InputError};
use lumen_math::Vec3;

/// Look-from z offset per button press, as a fraction of the step.
const DOLLY_FRACTION: f32 = 0.1;

/// Depth of the plane the pointer re-aims the camera at.
const POINTER_LOOK_AT_Z: f32 = -1.0;

/// Symbolic key and button names the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    PrimaryButton,
    SecondaryButton,
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
}

impl Key {
    /// Screen-plane movement `(dx, dy)` for the eight directional keys.
    ///
    /// The room is viewed looking down +z, where screen right is world -x.
    pub fn direction(self) -> Option<(f32, f32)> {
        match self {
            Key::W | Key::Up => Some((0.0, 1.0)),
            Key::S | Key::Down => Some((0.0, -1.0)),
            Key::A | Key::Left => Some((1.0, 0.0)),
            Key::D | Key::Right => Some((-1.0, 0.0)),
            Key::PrimaryButton | Key::SecondaryButton => None,
        }
    }
}

impl FromStr for Key {
    type Err = InputError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let key = match name.to_ascii_lowercase().as_str() {
            "primary-button" | "lmb" => Key::PrimaryButton,
            "secondary-button" | "rmb" => Key::SecondaryButton,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "w" => Key::W,
            "a" => Key::A,
            "s" => Key::S,
            "d" => Key::D,
            _ => return Err(InputError::UnknownKey(name.to_string())),
        };
        Ok(key)
    }
}

/// One discrete input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer position, normalized to [0, 1] with (0, 0) at the bottom-left.
    PointerMove { x: f32, y: f32 },
    /// A key or mouse button was pressed.
    Press(Key),
}

impl FromStr for InputEvent {
    type Err = InputError;

    /// Parses `move:x,y` or a key name such as `w`, `left`, or `primary-button`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(coords) = s.strip_prefix("move:") else {
            return Ok(InputEvent::Press(s.parse()?));
        };

        let invalid = || InputError::InvalidPointer(coords.to_string());
        let (x, y) = coords.split_once(',').ok_or_else(invalid)?;
        let x: f32 = x.trim().parse().map_err(|_| invalid())?;
        let y: f32 = y.trim().parse().map_err(|_| invalid())?;

        Ok(InputEvent::PointerMove { x, y })
    }
}

/// Whether the camera moved since the accumulation buffer was last cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    CameraChanged,
}

/// Maps input events to camera moves.
#[derive(Debug, Clone)]
pub struct CameraController {
    step: f32,
    state: ControllerState,
}

impl CameraController {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            state: ControllerState::Idle,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Return to `Idle` once the buffer reset has been applied.
    pub fn acknowledge_reset(&mut self) {
        self.state = ControllerState::Idle;
    }

    /// Apply one frame's worth of events in order.
    pub fn process_events(
        &mut self,
        camera: &mut Camera,
        events: &[InputEvent],
    ) -> ControllerState {
        for event in events {
            self.handle_event(camera, event);
        }
        self.state
    }

    /// Apply a single event. Returns true if the camera moved.
    ///
    /// Events that would leave the camera degenerate are skipped and the
    /// camera is left as it was.
    pub fn handle_event(&mut self, camera: &mut Camera, event: &InputEvent) -> bool {
        let moved = match *event {
            InputEvent::PointerMove { x, y } => {
                if !(x.is_finite() && y.is_finite()) {
                    log::warn!("Ignoring pointer event with non-finite position ({x}, {y})");
                    return false;
                }
                let look_at = Vec3::new(x * camera.right().x, y * camera.up().y, POINTER_LOOK_AT_Z);
                Self::apply(camera, &[(look_at, CameraTarget::LookAt)])
            }
            InputEvent::Press(key) => self.handle_key(camera, key),
        };

        if moved {
            self.state = ControllerState::CameraChanged;
        } else {
            log::warn!("Skipping {event:?}: camera move rejected");
        }
        moved
    }

    fn handle_key(&self, camera: &mut Camera, key: Key) -> bool {
        let from = camera.look_from();

        match key {
            Key::PrimaryButton => {
                let look_from = from + Vec3::new(0.0, 0.0, DOLLY_FRACTION * self.step);
                Self::apply(camera, &[(look_from, CameraTarget::LookFrom)])
            }
            Key::SecondaryButton => {
                let look_from = from - Vec3::new(0.0, 0.0, DOLLY_FRACTION * self.step);
                Self::apply(camera, &[(look_from, CameraTarget::LookFrom)])
            }
            _ => {
                let Some((dx, dy)) = key.direction() else {
                    return false;
                };
                let delta = Vec3::new(dx, dy, 0.0) * self.step;
                Self::apply(
                    camera,
                    &[
                        (from + delta, CameraTarget::LookFrom),
                        (camera.look_at() + delta, CameraTarget::LookAt),
                    ],
                )
            }
        }
    }

    /// Apply resets in order, all or nothing.
    fn apply(camera: &mut Camera, resets: &[(Vec3, CameraTarget)]) -> bool {
        let mut moved = camera.clone();
        for &(point, target) in resets {
            if let Err(e) = moved.reset(point, target) {
                log::debug!("Camera reset rejected: {e}");
                return false;
            }
        }
        *camera = moved;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_camera() -> Camera {
        let look_from = Vec3::new(0.0, 1.0, -5.0);
        Camera::new(look_from, Vec3::new(0.0, 1.0, -1.0), Vec3::Y, 60.0, 1.0).unwrap()
    }

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!("primary-button".parse::<Key>(), Ok(Key::PrimaryButton));
        assert_eq!("RMB".parse::<Key>(), Ok(Key::SecondaryButton));
        assert_eq!("UP".parse::<Key>(), Ok(Key::Up));
        assert_eq!("a".parse::<Key>(), Ok(Key::A));
        assert_eq!("q".parse::<Key>(), Err(InputError::UnknownKey("q".to_string())));
    }

    #[test]
    fn test_parse_events() {
        assert_eq!(
            "move:0.25, 0.75".parse::<InputEvent>(),
            Ok(InputEvent::PointerMove { x: 0.25, y: 0.75 })
        );
        assert_eq!("left".parse::<InputEvent>(), Ok(InputEvent::Press(Key::Left)));
        assert!(matches!("move:0.5".parse::<InputEvent>(), Err(InputError::InvalidPointer(_))));
        assert!(matches!("move:a,b".parse::<InputEvent>(), Err(InputError::InvalidPointer(_))));
    }

    #[test]
    fn test_primary_and_secondary_buttons_dolly() {
        let mut camera = room_camera();
        let mut controller = CameraController::new(0.5);

        assert!(controller.handle_event(&mut camera, &InputEvent::Press(Key::PrimaryButton)));
        assert_close(camera.look_from(), Vec3::new(0.0, 1.0, -4.95));
        assert_eq!(controller.state(), ControllerState::CameraChanged);

        controller.acknowledge_reset();
        assert!(controller.handle_event(&mut camera, &InputEvent::Press(Key::SecondaryButton)));
        assert!(controller.handle_event(&mut camera, &InputEvent::Press(Key::SecondaryButton)));
        assert_close(camera.look_from(), Vec3::new(0.0, 1.0, -5.05));
        // Look-at is untouched by dolly
        assert_eq!(camera.look_at(), Vec3::new(0.0, 1.0, -1.0));
    }

    #[test]
    fn test_directional_keys_translate_both_points() {
        let cases = [
            (Key::W, Vec3::new(0.0, 0.5, 0.0)),
            (Key::Up, Vec3::new(0.0, 0.5, 0.0)),
            (Key::S, Vec3::new(0.0, -0.5, 0.0)),
            (Key::Down, Vec3::new(0.0, -0.5, 0.0)),
            (Key::A, Vec3::new(0.5, 0.0, 0.0)),
            (Key::Left, Vec3::new(0.5, 0.0, 0.0)),
            (Key::D, Vec3::new(-0.5, 0.0, 0.0)),
            (Key::Right, Vec3::new(-0.5, 0.0, 0.0)),
        ];

        for (key, delta) in cases {
            let mut camera = room_camera();
            let mut controller = CameraController::new(0.5);

            assert!(controller.handle_event(&mut camera, &InputEvent::Press(key)));
            assert_close(camera.look_from(), Vec3::new(0.0, 1.0, -5.0) + delta);
            assert_close(camera.look_at(), Vec3::new(0.0, 1.0, -1.0) + delta);
        }
    }

    #[test]
    fn test_left_moves_towards_screen_left() {
        let camera = room_camera();
        let (dx, _) = Key::Left.direction().unwrap();
        // Screen right points along -x for this camera
        assert!(camera.right().x * dx < 0.0);
    }

    #[test]
    fn test_pointer_move_repoints_look_at() {
        let mut camera = room_camera();
        let mut controller = CameraController::new(0.5);
        let (right_x, up_y) = (camera.right().x, camera.up().y);

        assert!(controller.handle_event(&mut camera, &InputEvent::PointerMove { x: 0.5, y: 0.25 }));
        assert_close(camera.look_at(), Vec3::new(0.5 * right_x, 0.25 * up_y, -1.0));
        assert_eq!(camera.look_from(), Vec3::new(0.0, 1.0, -5.0));
    }

    #[test]
    fn test_invalid_pointer_is_skipped() {
        let mut camera = room_camera();
        let before = camera.clone();
        let mut controller = CameraController::new(0.5);

        let nan = InputEvent::PointerMove {
            x: f32::NAN,
            y: 0.0,
        };
        assert!(!controller.handle_event(&mut camera, &nan));
        assert_eq!(camera, before);
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_degenerate_move_is_skipped() {
        // Eye sits just behind the pointer's look-at plane
        let look_from = Vec3::new(0.0, 0.0, -1.0);
        let mut camera = Camera::new(look_from, Vec3::new(0.0, 0.0, 3.0), Vec3::Y, 60.0, 1.0)
            .unwrap();
        let before = camera.clone();
        let mut controller = CameraController::new(0.5);

        // Pointer at the origin aims at (0, 0, -1), the eye itself
        assert!(!controller.handle_event(&mut camera, &InputEvent::PointerMove { x: 0.0, y: 0.0 }));
        assert_eq!(camera, before);
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_batch_sets_changed_once_any_event_moves() {
        let mut camera = room_camera();
        let mut controller = CameraController::new(0.5);

        assert_eq!(controller.process_events(&mut camera, &[]), ControllerState::Idle);

        let events = [InputEvent::Press(Key::W), InputEvent::Press(Key::D)];
        assert_eq!(controller.process_events(&mut camera, &events), ControllerState::CameraChanged);
        assert_close(camera.look_from(), Vec3::new(-0.5, 1.5, -5.0));

        controller.acknowledge_reset();
        assert_eq!(controller.state(), ControllerState::Idle);
    }
}

//! Lumen Tracer - progressive "color-only" ray tracing.
//!
//! Casts jittered rays through a small static scene every frame and
//! accumulates the results so the image refines while the camera is still.
//! Any camera move clears the accumulation and starts over.
//!
//! The pieces, leaves first:
//!
//! - **Primitives**: [`Sphere`] and [`AaBox`], unified by [`Primitive`]
//! - **Scene aggregate**: [`HittableList`], nearest hit across all primitives
//! - **Camera**: [`Camera`], look-from/look-at basis and ray generation
//! - **Renderer**: [`render_frame`] into an [`AccumulationBuffer`]
//! - **Interaction**: [`CameraController`] turning [`InputEvent`]s into moves
//! - **Session**: [`RenderSession`] tying all of the above together

mod aabox;
mod accumulation;
mod camera;
mod controller;
mod error;
mod hittable;
mod material;
mod primitive;
mod renderer;
mod scene;
mod session;
mod settings;
mod shading;
mod sphere;

pub use aabox::AaBox;
pub use accumulation::{color_to_rgba, AccumulationBuffer};
pub use camera::{Camera, CameraTarget};
pub use controller::{CameraController, ControllerState, InputEvent, Key};
pub use error::{ConfigError, InputError, SceneError};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Material};
pub use primitive::Primitive;
pub use renderer::{render_frame, render_pixel};
pub use scene::{room_camera, room_scene};
pub use session::RenderSession;
pub use settings::{RenderSettings, MAX_PIXELS, SUPPORTED_MAX_DEPTH};
pub use shading::{ShadingPolicy, T_MIN};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};

use rand::{Rng, RngCore};

/// Draw a uniform `f32` in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

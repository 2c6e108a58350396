//! Error types for scene setup, configuration, and input decoding.

use lumen_math::Vec3;
use thiserror::Error;

/// Geometry that cannot be ray traced meaningfully.
///
/// Raised while the scene or camera is being built, never during hit testing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("sphere radius must be positive and finite, got {0}")]
    DegenerateSphere(f32),

    #[error("box corners must satisfy low < high on every axis, got low={low} high={high}")]
    DegenerateBox { low: Vec3, high: Vec3 },

    #[error("camera basis is degenerate (look_from={look_from}, look_at={look_at}, vup={vup})")]
    DegenerateCamera {
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
    },
}

/// Startup configuration that the renderer refuses to run with.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("max depth {0} is not supported, color-only shading requires exactly 1")]
    UnsupportedMaxDepth(u32),

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("image resolution must be non-zero, got {width}x{height}")]
    ZeroResolution { width: u32, height: u32 },

    #[error("image resolution {width}x{height} exceeds {max} pixels")]
    ResolutionTooLarge { width: u32, height: u32, max: u64 },

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    #[error("movement step must be positive and finite, got {0}")]
    InvalidStep(f32),

    #[error("settings file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Input the interaction controller cannot decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),

    #[error("invalid pointer position: {0:?}")]
    InvalidPointer(String),
}

//! Startup render settings.
//!
//! Fixed for the life of the process. Loaded from an optional JSON file,
//! overridden from the command line by the viewer, then validated once
//! before anything is rendered.

use std::path::Path;

use crate::{Color, ConfigError, ShadingPolicy};
use serde::{Deserialize, Serialize};

/// The only bounce depth color-only shading supports.
pub const SUPPORTED_MAX_DEPTH: u32 = 1;

/// Largest image the accumulation buffer will allocate, 8192 x 8192.
pub const MAX_PIXELS: u64 = 1 << 26;

/// Image, sampling, and interaction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels
    pub image_width: u32,
    /// Image height in pixels
    pub image_height: u32,
    /// Jittered samples per pixel per frame
    pub samples_per_pixel: u32,
    /// Ray bounce depth, must equal [`SUPPORTED_MAX_DEPTH`]
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Camera movement step for key and button presses
    pub step: f32,
    /// Color returned for rays that hit nothing
    pub background: Color,
    /// How rays are turned into colors
    pub shading: ShadingPolicy,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 800,
            image_height: 800,
            samples_per_pixel: 4,
            max_depth: SUPPORTED_MAX_DEPTH,
            vfov: 60.0,
            step: 0.5,
            background: Color::ONE,
            shading: ShadingPolicy::ColorOnly,
        }
    }
}

impl RenderSettings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&content)?;
        log::info!("Loaded render settings from {}", path.display());

        Ok(settings)
    }

    /// Parse settings from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reject settings the renderer cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth != SUPPORTED_MAX_DEPTH {
            return Err(ConfigError::UnsupportedMaxDepth(self.max_depth));
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(ConfigError::ZeroResolution {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.pixel_count() > MAX_PIXELS {
            return Err(ConfigError::ResolutionTooLarge {
                width: self.image_width,
                height: self.image_height,
                max: MAX_PIXELS,
            });
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(ConfigError::InvalidFov(self.vfov));
        }
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(ConfigError::InvalidStep(self.step));
        }
        Ok(())
    }

    /// Total pixels in the image.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.image_width) * u64::from(self.image_height)
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }
}

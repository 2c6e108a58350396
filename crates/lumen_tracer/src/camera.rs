//! Camera for ray generation.

use crate::{Ray, SceneError};
use lumen_math::Vec3;

/// Which camera point a [`Camera::reset`] overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraTarget {
    /// The eye position
    LookFrom,
    /// The point the camera is aimed at
    LookAt,
}

/// Derived view state, recomputed as a unit whenever look-from or look-at moves.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Basis {
    forward: Vec3, // w, points from look_at back towards the eye
    right: Vec3,   // u
    up: Vec3,      // v
    horizontal: Vec3,
    vertical: Vec3,
    lower_left_corner: Vec3,
}

/// Pinhole camera with a viewport one unit in front of the eye.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32, // Vertical field of view in degrees
    aspect: f32,

    basis: Basis,
}

impl Camera {
    /// Create a camera and compute its basis.
    ///
    /// Fails when `look_from == look_at` or the view direction is parallel to `vup`.
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect: f32,
    ) -> Result<Self, SceneError> {
        let basis = compute_basis(look_from, look_at, vup, vfov, aspect)?;
        Ok(Self {
            look_from,
            look_at,
            vup,
            vfov,
            aspect,
            basis,
        })
    }

    /// Move look-from or look-at to `point` and recompute the basis.
    ///
    /// The new basis is computed before anything is written, so a rejected
    /// point leaves the camera exactly as it was.
    pub fn reset(&mut self, point: Vec3, target: CameraTarget) -> Result<(), SceneError> {
        let (look_from, look_at) = match target {
            CameraTarget::LookFrom => (point, self.look_at),
            CameraTarget::LookAt => (self.look_from, point),
        };

        self.basis = compute_basis(look_from, look_at, self.vup, self.vfov, self.aspect)?;
        self.look_from = look_from;
        self.look_at = look_at;

        log::debug!("Camera reset: look_from={} look_at={}", self.look_from, self.look_at);
        Ok(())
    }

    /// Generate the ray through normalized screen coordinate (u, v).
    ///
    /// (0, 0) is the bottom-left of the viewport, (1, 1) the top-right.
    #[inline]
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        let b = &self.basis;
        let direction = b.lower_left_corner + u * b.horizontal + v * b.vertical - self.look_from;
        Ray::new(self.look_from, direction)
    }

    pub fn look_from(&self) -> Vec3 {
        self.look_from
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn vup(&self) -> Vec3 {
        self.vup
    }

    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Unit vector from look-at back towards the eye.
    pub fn forward(&self) -> Vec3 {
        self.basis.forward
    }

    /// Unit vector pointing to screen right.
    pub fn right(&self) -> Vec3 {
        self.basis.right
    }

    /// Unit vector pointing to screen up.
    pub fn up(&self) -> Vec3 {
        self.basis.up
    }

    /// Full viewport width along `right`.
    pub fn horizontal(&self) -> Vec3 {
        self.basis.horizontal
    }

    /// Full viewport height along `up`.
    pub fn vertical(&self) -> Vec3 {
        self.basis.vertical
    }

    pub fn lower_left_corner(&self) -> Vec3 {
        self.basis.lower_left_corner
    }
}

fn compute_basis(
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
    vfov: f32,
    aspect: f32,
) -> Result<Basis, SceneError> {
    let degenerate = || SceneError::DegenerateCamera {
        look_from,
        look_at,
        vup,
    };

    let half_height = (vfov.to_radians() / 2.0).tan();
    let half_width = aspect * half_height;

    let forward = (look_from - look_at).try_normalize().ok_or_else(degenerate)?;
    let right = vup.cross(forward).try_normalize().ok_or_else(degenerate)?;
    let up = forward.cross(right);

    let horizontal = 2.0 * half_width * right;
    let vertical = 2.0 * half_height * up;
    let lower_left_corner = look_from - horizontal / 2.0 - vertical / 2.0 - forward;

    Ok(Basis {
        forward,
        right,
        up,
        horizontal,
        vertical,
        lower_left_corner,
    })
}

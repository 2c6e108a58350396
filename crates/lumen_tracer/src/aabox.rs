//! Axis-aligned box primitive.
//!
//! Uses the slab method: each axis clips the ray to the parametric range
//! between its two planes, and the box is hit where all three ranges overlap.

use crate::{
    hittable::{HitRecord, Hittable},
    Color, Material, Ray, SceneError,
};
use lumen_math::{Interval, Vec3};

/// An axis-aligned box given by its low and high corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AaBox {
    low: Vec3,
    high: Vec3,
    material: Material,
    color: Color,
}

/// Where the ray crosses the box boundary, with the outward normal of the
/// face crossed at each end.
#[derive(Debug, Clone, Copy)]
struct SlabSpan {
    t: Interval,
    enter_normal: Vec3,
    exit_normal: Vec3,
}

impl AaBox {
    /// Create a new box.
    ///
    /// Fails unless `low < high` on every axis.
    pub fn new(
        low: Vec3,
        high: Vec3,
        material: Material,
        color: Color,
    ) -> Result<Self, SceneError> {
        let valid = low.is_finite() && high.is_finite() && low.cmplt(high).all();
        if !valid {
            return Err(SceneError::DegenerateBox { low, high });
        }

        Ok(Self {
            low,
            high,
            material,
            color,
        })
    }

    pub fn low(&self) -> Vec3 {
        self.low
    }

    pub fn high(&self) -> Vec3 {
        self.high
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn center(&self) -> Vec3 {
        (self.low + self.high) * 0.5
    }

    /// Parametric range `[t_enter, t_exit]` the ray spends inside the box.
    ///
    /// Empty when the ray misses. Ignores any search interval, so `t_enter`
    /// may be negative for a ray that starts inside.
    fn span(&self, ray: &Ray) -> Option<SlabSpan> {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut span = SlabSpan {
            t: Interval::UNIVERSE,
            enter_normal: Vec3::ZERO,
            exit_normal: Vec3::ZERO,
        };

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.low[axis], self.high[axis]);

            // Parallel to this slab: unbounded if inside it, otherwise a miss
            if d == 0.0 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv_d = 1.0 / d;
            let t_lo = (lo - o) * inv_d;
            let t_hi = (hi - o) * inv_d;
            let unit = Vec3::AXES[axis];

            // Travelling towards +axis the ray enters through the low face
            let (near, far, near_normal) = if inv_d > 0.0 {
                (t_lo, t_hi, -unit)
            } else {
                (t_hi, t_lo, unit)
            };

            if near > span.t.min {
                span.enter_normal = near_normal;
            }
            if far < span.t.max {
                span.exit_normal = -near_normal;
            }
            span.t = span.t.intersect(&Interval::new(near, far));
            if span.t.is_empty() {
                return None;
            }
        }

        Some(span)
    }
}

impl Hittable for AaBox {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let span = self.span(ray)?;

        let (t, outward_normal) = if ray_t.surrounds(span.t.min) {
            (span.t.min, span.enter_normal)
        } else if ray_t.surrounds(span.t.max) {
            (span.t.max, span.exit_normal)
        } else {
            return None;
        };

        Some(HitRecord::new(ray, t, outward_normal, self.material, self.color))
    }
}

//! Closed set of scene primitives.

use crate::{AaBox, Color, HitRecord, Hittable, Material, Ray, Sphere};
use lumen_math::Interval;

/// Every shape the scene can hold.
///
/// Adding a shape means adding a variant here plus its `Hittable` impl;
/// `hit` below is the only place that dispatches on the kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Box(AaBox),
}

impl Primitive {
    pub fn material(&self) -> Material {
        match self {
            Primitive::Sphere(s) => s.material(),
            Primitive::Box(b) => b.material(),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Primitive::Sphere(s) => s.color(),
            Primitive::Box(b) => b.color(),
        }
    }
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
            Primitive::Box(aabox) => aabox.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<AaBox> for Primitive {
    fn from(aabox: AaBox) -> Self {
        Primitive::Box(aabox)
    }
}

//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Color, Material, Primitive, Ray};
use lumen_math::{Interval, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material tag of the surface that was hit
    pub material: Material,
    /// Base color of the surface that was hit
    pub color: Color,
}

impl HitRecord {
    /// Build a record for a hit at `t`, orienting `outward_normal` against the ray.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: Material, color: Color) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            t,
            front_face: true,
            material,
            color,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// An ordered list of primitives.
///
/// Append-only while the scene is built, read-only while rendering. The
/// nearest hit wins; on an exact tie the primitive added first wins.
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    objects: Vec<Primitive>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add a primitive to the end of the list.
    pub fn add(&mut self, object: impl Into<Primitive>) {
        self.objects.push(object.into());
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Primitives in insertion order.
    pub fn objects(&self) -> &[Primitive] {
        &self.objects
    }
}

impl FromIterator<Primitive> for HittableList {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            // Later primitives must beat the best distance strictly
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

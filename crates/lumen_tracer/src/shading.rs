//! Ray shading policies.
//!
//! Only the color-only policy exists: one intersection per ray, no bounces.
//! A scattering integrator would become a second `ShadingPolicy` variant.

use crate::{Color, Hittable, Ray};
use lumen_math::Interval;
use serde::{Deserialize, Serialize};

/// Smallest accepted hit distance. Keeps rays from re-hitting their origin surface.
pub const T_MIN: f32 = 0.001;

/// How a ray is turned into a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingPolicy {
    /// First hit returns the surface's base color, a miss the background.
    #[default]
    ColorOnly,
}

impl ShadingPolicy {
    /// Compute the color seen by a ray.
    #[inline]
    pub fn shade(self, ray: &Ray, world: &dyn Hittable, background: Color) -> Color {
        match self {
            ShadingPolicy::ColorOnly => color_only_shading(ray, world, background),
        }
    }
}

/// Base color of the nearest surface in `(T_MIN, inf)`, or `background` on a miss.
///
/// The material tag on the hit is deliberately ignored.
pub fn color_only_shading(ray: &Ray, world: &dyn Hittable, background: Color) -> Color {
    match world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) {
        Some(rec) => rec.color,
        None => background,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Material, Sphere, Vec3};

    #[test]
    fn test_hit_returns_base_color() {
        let mut world = HittableList::new();
        let light = Color::splat(10.0);
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, Material::Light, light).unwrap());

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = ShadingPolicy::ColorOnly.shade(&ray, &world, Color::ONE);

        // Emitters are not clamped
        assert_eq!(color, Color::splat(10.0));
    }

    #[test]
    fn test_miss_returns_background() {
        let world = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let background = Color::new(0.2, 0.3, 0.4);

        assert_eq!(color_only_shading(&ray, &world, background), background);
    }

    #[test]
    fn test_material_does_not_change_color() {
        let color = Color::new(0.6, 0.8, 0.8);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let materials = [
            Material::Light,
            Material::Diffuse,
            Material::Metal,
            Material::Dielectric,
        ];
        for material in materials {
            let mut world = HittableList::new();
            world.add(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, material, color).unwrap());
            assert_eq!(color_only_shading(&ray, &world, Color::ONE), color);
        }
    }

    #[test]
    fn test_hits_closer_than_t_min_ignored() {
        let mut world = HittableList::new();
        // Ray starts on the sphere surface heading outwards
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 1.0), 1.0, Material::Diffuse, Color::ZERO);
        world.add(sphere.unwrap());

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(color_only_shading(&ray, &world, Color::ONE), Color::ONE);
    }
}

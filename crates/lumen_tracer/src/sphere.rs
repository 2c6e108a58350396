//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Color, Material, Ray, SceneError,
};
use lumen_math::{Interval, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
    color: Color,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Fails for a zero, negative, or non-finite radius.
    pub fn new(
        center: Vec3,
        radius: f32,
        material: Material,
        color: Color,
    ) -> Result<Self, SceneError> {
        if !(radius > 0.0 && radius.is_finite()) || !center.is_finite() {
            return Err(SceneError::DegenerateSphere(radius));
        }

        Ok(Self {
            center,
            radius,
            material,
            color,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, self.material, self.color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::ZERO, 1.0, Material::Diffuse, Color::new(1.0, 0.0, 0.0)).unwrap()
    }

    #[test]
    fn test_sphere_hit_returns_nearer_root() {
        let sphere = unit_sphere();
        // Roots at t = 4 and t = 6
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_normal_is_unit_and_radial() {
        let sphere = Sphere::new(Vec3::new(1.0, -2.0, 0.5), 2.5, Material::Metal, Color::ONE)
            .unwrap();
        let ray = Ray::new(Vec3::new(-6.0, 1.0, 3.0), Vec3::new(7.0, -2.6, -2.0));

        let rec = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
        // Front face: normal is outward, so n . (p - c) == r
        assert!((rec.normal.dot(rec.p - sphere.center()) - sphere.radius()).abs() < 1e-3);
        assert_eq!(rec.material, Material::Metal);
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));

        let rec = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-5);
        assert!(!rec.front_face);
        // Normal flipped to face the ray
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
        assert!((rec.normal.dot(rec.p - sphere.center()) + sphere.radius()).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 3.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_sphere_behind_ray_misses() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_sphere_roots_outside_interval() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, 3.9)).is_none());
        // Near root excluded, far root accepted
        let rec = sphere.hit(&ray, Interval::new(4.5, 10.0)).unwrap();
        assert!((rec.t - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_tangent_ray_is_definite() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        // Grazing ray: either outcome is fine, it just must not panic or NaN
        if let Some(rec) = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)) {
            assert!(rec.t.is_finite());
        }
    }

    #[test]
    fn test_degenerate_radius_rejected() {
        assert_eq!(
            Sphere::new(Vec3::ZERO, 0.0, Material::Diffuse, Color::ONE),
            Err(SceneError::DegenerateSphere(0.0))
        );
        assert!(Sphere::new(Vec3::ZERO, -1.0, Material::Diffuse, Color::ONE).is_err());
        assert!(Sphere::new(Vec3::ZERO, f32::INFINITY, Material::Diffuse, Color::ONE).is_err());
    }
}

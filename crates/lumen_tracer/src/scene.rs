//! Built-in room scene.
//!
//! A box-shaped room made of very large spheres: floor, ceiling, back wall,
//! a red wall on the right and a green wall on the left, a bright spherical
//! light poking through the ceiling, and two objects inside (a ball and a
//! box, plus a smaller ball behind them).

use crate::{AaBox, Camera, Color, HittableList, Material, RenderSettings, SceneError, Sphere};
use lumen_math::Vec3;

const WALL_RADIUS: f32 = 100.0;

/// Build the room scene.
pub fn room_scene() -> Result<HittableList, SceneError> {
    let gray = Color::splat(0.8);
    let mut world = HittableList::new();

    // Light source, deliberately brighter than 1.0
    world.add(Sphere::new(Vec3::new(0.0, 5.4, -1.0), 3.0, Material::Light, Color::splat(10.0))?);

    // Floor
    world.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), WALL_RADIUS, Material::Diffuse, gray)?);
    // Ceiling
    world.add(Sphere::new(Vec3::new(0.0, 102.5, -1.0), WALL_RADIUS, Material::Diffuse, gray)?);
    // Back wall
    world.add(Sphere::new(Vec3::new(0.0, 1.0, 101.0), WALL_RADIUS, Material::Diffuse, gray)?);
    // Right wall
    world.add(Sphere::new(
        Vec3::new(-101.5, 0.0, -1.0),
        WALL_RADIUS,
        Material::Diffuse,
        Color::new(0.6, 0.0, 0.0),
    )?);
    // Left wall
    world.add(Sphere::new(
        Vec3::new(101.5, 0.0, -1.0),
        WALL_RADIUS,
        Material::Diffuse,
        Color::new(0.0, 0.6, 0.0),
    )?);

    world.add(Sphere::new(
        Vec3::new(-0.8, 0.2, -1.0),
        0.7,
        Material::Metal,
        Color::new(0.6, 0.8, 0.8),
    )?);
    world.add(Sphere::new(
        Vec3::new(0.0, -0.2, -1.5),
        0.3,
        Material::Diffuse,
        Color::new(0.8, 0.3, 0.3),
    )?);
    world.add(AaBox::new(
        Vec3::new(0.2, -0.5, -0.5),
        Vec3::new(0.7, 1.3, -0.2),
        Material::Metal,
        Color::new(0.8, 0.6, 0.2),
    )?);

    log::info!("Built room scene with {} primitives", world.len());
    Ok(world)
}

/// Starting camera for the room: outside the open front, looking in along +z.
pub fn room_camera(settings: &RenderSettings) -> Result<Camera, SceneError> {
    Camera::new(
        Vec3::new(0.0, 1.0, -5.0),
        Vec3::new(0.0, 1.0, -1.0),
        Vec3::Y,
        settings.vfov,
        settings.aspect_ratio(),
    )
}

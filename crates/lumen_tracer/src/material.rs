//! Material tags for surfaces.
//!
//! Color-only shading never looks at the material: a hit always returns the
//! primitive's base color. The tag is still carried through every hit record
//! so a scattering integrator can branch on it later.

use lumen_math::Vec3;

/// Color type alias (RGB, not clamped; emitters go above 1.0)
pub type Color = Vec3;

/// Surface kind. The discriminant is the material's integer tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Material {
    /// Emitter
    Light = 0,
    /// Lambertian
    #[default]
    Diffuse = 1,
    /// Specular reflector
    Metal = 2,
    /// Refractive
    Dielectric = 3,
}

//! Per-frame progressive renderer.
//!
//! Each call to [`render_frame`] casts `samples_per_pixel` jittered rays per
//! pixel and adds the pixel's average into the accumulation buffer. Rows
//! are rendered in parallel with rayon; every row draws from its own
//! generator seeded from the frame seed and row index, so no random state
//! is shared between workers.

use crate::{gen_f32, AccumulationBuffer, Camera, Color, Hittable, RenderSettings};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Render a single pixel with jittered multi-sampling.
///
/// `j` counts rows from the bottom of the image, matching the camera's
/// (u, v) convention.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    let width = settings.image_width as f32;
    let height = settings.image_height as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..settings.samples_per_pixel {
        let u = (i as f32 + gen_f32(rng)) / width;
        let v = (j as f32 + gen_f32(rng)) / height;
        let ray = camera.get_ray(u, v);
        pixel_color += settings.shading.shade(&ray, world, settings.background);
    }

    // Average the samples
    pixel_color / settings.samples_per_pixel as f32
}

/// Render one frame and accumulate it.
///
/// Returns once every row has been written; the frame count is bumped last.
pub fn render_frame(
    buffer: &mut AccumulationBuffer,
    camera: &Camera,
    world: &dyn Hittable,
    settings: &RenderSettings,
    frame_seed: u64,
) {
    debug_assert_eq!(buffer.width(), settings.image_width);
    debug_assert_eq!(buffer.height(), settings.image_height);

    let width = settings.image_width;
    let height = settings.image_height;

    buffer
        .sums_mut()
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let mut rng = StdRng::seed_from_u64(row_seed(frame_seed, y as u64));
            // Buffer row 0 is the top of the image
            let j = height - 1 - y as u32;
            for (i, sum) in row.iter_mut().enumerate() {
                *sum += render_pixel(camera, world, i as u32, j, settings, &mut rng);
            }
        });

    buffer.finish_frame();
}

#[inline]
fn row_seed(frame_seed: u64, row: u64) -> u64 {
    frame_seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ row
}

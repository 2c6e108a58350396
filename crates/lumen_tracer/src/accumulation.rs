//! Progressive accumulation buffer.
//!
//! Holds a running color sum per pixel and one frame count shared by all
//! pixels. The displayed image is `sqrt(sum / count)` per channel.

use crate::Color;

/// Running per-pixel color sums, stored row-major with row 0 at the top.
#[derive(Debug, Clone)]
pub struct AccumulationBuffer {
    width: u32,
    height: u32,
    sums: Vec<Color>,
    frame_count: u32,
}

impl AccumulationBuffer {
    /// Create a zeroed buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            sums: vec![Color::ZERO; width as usize * height as usize],
            frame_count: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of frames accumulated since the last clear.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Zero every sum and the frame count. Keeps the allocation.
    pub fn clear(&mut self) {
        self.sums.fill(Color::ZERO);
        self.frame_count = 0;
    }

    /// Running sum at (x, y).
    pub fn sum(&self, x: u32, y: u32) -> Color {
        self.sums[self.index(x, y)]
    }

    /// Average color at (x, y) over the accumulated frames, before gamma.
    ///
    /// Zero when nothing has been accumulated yet.
    pub fn mean(&self, x: u32, y: u32) -> Color {
        if self.frame_count == 0 {
            return Color::ZERO;
        }
        self.sum(x, y) / self.frame_count as f32
    }

    /// All sums, row-major. The renderer splits this into rows.
    pub(crate) fn sums_mut(&mut self) -> &mut [Color] {
        &mut self.sums
    }

    /// Mark one more frame as accumulated.
    pub(crate) fn finish_frame(&mut self) {
        self.frame_count += 1;
    }

    /// Normalized image: `sqrt(sum / count)` per channel, not clamped.
    ///
    /// All black when nothing has been accumulated yet.
    pub fn resolve(&self) -> Vec<Color> {
        if self.frame_count == 0 {
            return vec![Color::ZERO; self.sums.len()];
        }

        let scale = 1.0 / self.frame_count as f32;
        self.sums
            .iter()
            .map(|sum| {
                let mean = *sum * scale;
                Color::new(
                    linear_to_gamma(mean.x),
                    linear_to_gamma(mean.y),
                    linear_to_gamma(mean.z),
                )
            })
            .collect()
    }

    /// Normalized image as 8-bit RGBA, clamped to [0, 1] on the way out.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.sums.len() * 4);
        for color in self.resolve() {
            bytes.extend_from_slice(&color_to_rgba(color));
        }
        bytes
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an already gamma-corrected color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * color.x.clamp(0.0, 1.0)) as u8;
    let g = (255.0 * color.y.clamp(0.0, 1.0)) as u8;
    let b = (255.0 * color.z.clamp(0.0, 1.0)) as u8;
    [r, g, b, 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_zeroed() {
        let buffer = AccumulationBuffer::new(4, 3);
        assert_eq!(buffer.frame_count(), 0);
        assert_eq!(buffer.resolve().len(), 12);
        assert!(buffer.resolve().iter().all(|c| *c == Color::ZERO));
        assert_eq!(buffer.mean(3, 2), Color::ZERO);
    }

    #[test]
    fn test_resolve_is_sqrt_of_mean() {
        let mut buffer = AccumulationBuffer::new(2, 1);
        buffer.sums_mut()[0] = Color::new(0.5, 2.0, 0.0);
        buffer.sums_mut()[1] = Color::new(20.0, 20.0, 20.0);
        buffer.finish_frame();
        buffer.finish_frame();

        let image = buffer.resolve();
        assert!((image[0] - Color::new(0.5, 1.0, 0.0)).length() < 1e-6);
        // Emitters pass through above 1.0
        assert!((image[1].x - 10.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_clear_resets_sums_and_count() {
        let mut buffer = AccumulationBuffer::new(3, 3);
        buffer.sums_mut().fill(Color::ONE);
        buffer.finish_frame();

        buffer.clear();

        assert_eq!(buffer.frame_count(), 0);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(buffer.sum(x, y), Color::ZERO);
            }
        }
    }

    #[test]
    fn test_sum_is_row_major() {
        let mut buffer = AccumulationBuffer::new(5, 3);
        buffer.sums_mut()[2 * 5 + 4] = Color::splat(7.0);

        assert_eq!(buffer.sum(4, 2), Color::splat(7.0));
        assert_eq!(buffer.sum(4, 1), Color::ZERO);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(2.0, 0.5, -1.0)), [255, 127, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
    }

    #[test]
    fn test_to_rgba_layout() {
        let mut buffer = AccumulationBuffer::new(2, 2);
        buffer.sums_mut()[3] = Color::new(1.0, 0.0, 0.0);
        buffer.finish_frame();

        let bytes = buffer.to_rgba();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[12..16], &[255, 0, 0, 255]);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 255]);
    }
}

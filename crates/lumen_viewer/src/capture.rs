//! Frame capture to numbered PNG files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Writes frames as `<dir>/<index>.png`, index counting up from 0.
///
/// The index never resets, so a camera move does not overwrite earlier frames.
pub struct FrameCapture {
    dir: PathBuf,
    next_index: u64,
}

impl FrameCapture {
    /// Create the capture directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create capture directory {}", dir.display()))?;
        log::info!("Capturing frames to {}", dir.display());

        Ok(Self { dir, next_index: 0 })
    }

    /// Save one RGBA8 frame. Returns the path written.
    pub fn save(&mut self, width: u32, height: u32, rgba: Vec<u8>) -> Result<PathBuf> {
        let path = self.dir.join(format!("{}.png", self.next_index));
        save_png(&path, width, height, rgba)?;
        self.next_index += 1;
        Ok(path)
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.next_index
    }
}

/// Save an RGBA8 buffer (row 0 at the top) as a PNG.
pub fn save_png(path: &Path, width: u32, height: u32, rgba: Vec<u8>) -> Result<()> {
    let image = image::RgbaImage::from_raw(width, height, rgba)
        .with_context(|| format!("Frame buffer does not match {width}x{height}"))?;
    image
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_numbered() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut capture = FrameCapture::new(dir.path().join("frames")).unwrap();

        let first = capture.save(2, 2, vec![255; 16]).unwrap();
        let second = capture.save(2, 2, vec![0; 16]).unwrap();

        assert_eq!(first.file_name().unwrap(), "0.png");
        assert_eq!(second.file_name().unwrap(), "1.png");
        assert!(first.exists() && second.exists());
        assert_eq!(capture.frames_written(), 2);

        let decoded = image::open(&first).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_mismatched_buffer_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut capture = FrameCapture::new(dir.path()).unwrap();
        assert!(capture.save(4, 4, vec![0; 8]).is_err());
        assert_eq!(capture.frames_written(), 0);
    }
}

//! Owned image buffers and I/O helpers.
//!
//! - [`RgbImageU8`]: canonical-RGB color buffer. Whatever channel order the
//!   decoder emits is normalized to RGB at the loader boundary, before
//!   anything else runs.
//! - [`GrayImageU8`]: 8-bit grayscale buffer fed to feature extraction.
//! - `load_rgb_image` / `save_rgb_image`: PNG/JPEG/etc. round trips.
//! - `write_json_file`: pretty-print a serializable report to disk.

pub mod draw;

pub use draw::{draw_match_markers, draw_mirror_line};

use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned three-channel color buffer, canonical RGB, row-major, 3 bytes per
/// pixel.
#[derive(Clone, Debug)]
pub struct RgbImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbImageU8 {
    /// Construct an owned color buffer given raw RGB bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width * height * 3,
            "RGB buffer size must match dimensions"
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let base = (y * self.width + x) * 3;
        [self.data[base], self.data[base + 1], self.data[base + 2]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let base = (y * self.width + x) * 3;
        self.data[base..base + 3].copy_from_slice(&rgb);
    }

    /// Raw RGB bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Horizontally mirrored copy (the counterpart the original image is
    /// matched against).
    pub fn flip_horizontal(&self) -> RgbImageU8 {
        let mut out = vec![0u8; self.data.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                let src = (y * self.width + x) * 3;
                let dst = (y * self.width + (self.width - 1 - x)) * 3;
                out[dst..dst + 3].copy_from_slice(&self.data[src..src + 3]);
            }
        }
        RgbImageU8 {
            width: self.width,
            height: self.height,
            data: out,
        }
    }

    /// BT.601 luma conversion for feature extraction.
    pub fn to_gray(&self) -> GrayImageU8 {
        let mut gray = Vec::with_capacity(self.width * self.height);
        for px in self.data.chunks_exact(3) {
            let luma = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
            gray.push(luma.round().clamp(0.0, 255.0) as u8);
        }
        GrayImageU8::new(self.width, self.height, gray)
    }
}

/// Owned 8-bit grayscale buffer, row-major.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "grayscale buffer size must match dimensions"
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

/// Load an image from disk, normalizing the decoder's channel order to RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(RgbImageU8::new(width, height, img.into_raw()))
}

/// Save a canonical-RGB buffer to disk, creating parent directories.
pub fn save_rgb_image(buffer: &RgbImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image: image::RgbImage = image::ImageBuffer::from_raw(
        buffer.width as u32,
        buffer.height as u32,
        buffer.data.clone(),
    )
    .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image::DynamicImage::ImageRgb8(image)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_rgb(width: usize, height: usize) -> RgbImageU8 {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, (x + y) as u8]);
            }
        }
        RgbImageU8::new(width, height, data)
    }

    #[test]
    fn flip_mirrors_pixels_across_the_width() {
        let image = gradient_rgb(8, 4);
        let flipped = image.flip_horizontal();
        for y in 0..4 {
            for x in 0..8 {
                assert_eq!(flipped.pixel(x, y), image.pixel(7 - x, y));
            }
        }
    }

    #[test]
    fn double_flip_is_identity() {
        let image = gradient_rgb(9, 5);
        let twice = image.flip_horizontal().flip_horizontal();
        assert_eq!(twice.data(), image.data());
    }

    #[test]
    fn gray_conversion_preserves_extremes() {
        let image = RgbImageU8::new(2, 1, vec![255, 255, 255, 0, 0, 0]);
        let gray = image.to_gray();
        assert_eq!(gray.get(0, 0), 255);
        assert_eq!(gray.get(1, 0), 0);
    }
}

//! PNG import and export for pixel buffers.
//!
//! Buffers of any layout are widened to RGBA on the way out; imports always
//! produce an RGBA buffer.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::buffer::{Channels, PixelBuffer};
use crate::error::{PaintError, Result};

/// Write a buffer to a PNG file.
///
/// # Arguments
///
/// * `buffer` - The pixels to write
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling)
pub fn write_png(buffer: &PixelBuffer, path: &Path, scale: u32) -> Result<()> {
    let scale = scale.max(1);
    let (Some(width), Some(height)) = (
        buffer.width().checked_mul(scale),
        buffer.height().checked_mul(scale),
    ) else {
        return Err(PaintError::Image {
            message: format!(
                "{}x{} at scale {} is too large to write",
                buffer.width(),
                buffer.height(),
                scale
            ),
        });
    };

    let img: RgbaImage = ImageBuffer::from_fn(width, height, |x, y| {
        let pos = ((x / scale) as i32, (y / scale) as i32);
        let colour = buffer.get(pos).unwrap_or_default();
        Rgba(colour.to_array())
    });

    img.save(path).map_err(|e| PaintError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}

/// Read a PNG (or any format `image` recognises) into an RGBA buffer.
pub fn read_png(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .map_err(|e| PaintError::Image {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?
        .to_rgba8();
    let (width, height) = img.dimensions();
    PixelBuffer::from_raw(width, height, Channels::Rgba, img.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Colour;
    use tempfile::tempdir;

    #[test]
    fn test_write_png_simple() {
        let mut buffer = PixelBuffer::filled(2, 2, Channels::Rgba, Colour::WHITE);
        buffer.put((0, 0), Colour::BLACK);

        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");
        write_png(&buffer, &path, 1).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 2);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_write_png_scaled() {
        let mut buffer = PixelBuffer::filled(2, 1, Channels::Rgb, Colour::rgb(0, 255, 0));
        buffer.put((0, 0), Colour::rgb(255, 0, 0));

        let dir = tempdir().unwrap();
        let path = dir.path().join("scaled.png");
        write_png(&buffer, &path, 2).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (4, 2));
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(2, 0).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_read_back_keeps_alpha() {
        let mut buffer = PixelBuffer::new(2, 1, Channels::Rgba);
        buffer.put((1, 0), Colour::new(255, 0, 0, 128));

        let dir = tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        write_png(&buffer, &path, 0).unwrap();

        let loaded = read_png(&path).unwrap();
        assert_eq!(loaded.channels(), Channels::Rgba);
        assert_eq!(loaded.as_bytes(), buffer.as_bytes());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_png(Path::new("/nonexistent/missing.png")).unwrap_err();
        assert!(matches!(err, PaintError::Image { .. }));
    }

    #[test]
    fn test_write_png_rejects_overflowing_scale() {
        let buffer = PixelBuffer::filled(3, 1, Channels::Rgba, Colour::WHITE);
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let err = write_png(&buffer, &path, u32::MAX).unwrap_err();
        assert!(matches!(err, PaintError::Image { .. }));
        assert!(!path.exists());
    }
}

//! RGB8 output buffer and PNG encoding.

use crate::error::Result;
use crate::Color;
use std::path::Path;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let quantize = |c: f32| {
        // NaN fails the comparison in linear_to_gamma and lands on 0
        (256.0 * linear_to_gamma(c).clamp(0.0, 0.999)) as u8
    };
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Row-major RGB8 image, top row first.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Bytes of one output row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * 3
    }

    /// Encode as PNG; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        image::save_buffer(
            path.as_ref(),
            &self.pixels,
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        log::info!(
            "Saved {}x{} image to {}",
            self.width,
            self.height,
            path.as_ref().display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-0.5), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb_quantization() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::splat(100.0)), [255, 255, 255]);
        // sqrt(0.25) = 0.5 -> 128
        assert_eq!(color_to_rgb(Color::splat(0.25)), [128, 128, 128]);
        assert_eq!(color_to_rgb(Color::new(f32::NAN, -1.0, 0.25)), [0, 0, 128]);
    }

    #[test]
    fn test_image_buffer_layout() {
        let image = ImageBuffer::new(4, 2);
        assert_eq!(image.pixels.len(), 24);
        assert_eq!(image.row_stride(), 12);
        assert!(image.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_save_png() {
        let path = std::env::temp_dir().join(format!("lux_image_{}.png", std::process::id()));
        let mut image = ImageBuffer::new(3, 2);
        image.pixels[3..6].copy_from_slice(&color_to_rgb(Color::ONE));

        image.save(&path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(1, 0).0, [255, 255, 255]);

        std::fs::remove_file(&path).ok();
    }
}

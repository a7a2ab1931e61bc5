//! In-memory render target

use crate::color::Color;
use crate::error::{Error, Result};
use rayon::prelude::*;

/// A row-major image of linear colors.
///
/// Row `0` is the **bottom** of the picture, so pixel `(x, y)` grows upward
/// the same way the image plane coordinates of a camera do. [`to_rgb8`]
/// flips back to the usual top-down raster order.
///
/// [`to_rgb8`]: Framebuffer::to_rgb8
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a framebuffer filled with `fill`
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Wrap already computed pixels, bottom row first
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(Error::InvalidData(format!(
                "expected {} pixels for a {}x{} image, got {}",
                width * height,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if the framebuffer has no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Set a pixel; out-of-range coordinates are ignored
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable rows, bottom row first, as a parallel iterator
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksMut<'_, Color> {
        // par_chunks_mut panics on a zero chunk size
        self.pixels.par_chunks_mut(self.width.max(1))
    }

    /// Copy `other` into this buffer with its top-left corner at
    /// `(left, top)` measured in top-down raster coordinates. Pixels that fall
    /// outside are dropped.
    pub fn blit_top_down(&mut self, other: &Framebuffer, left: usize, top: usize) {
        for row in 0..other.height {
            let dst_top = top + row;
            if dst_top >= self.height {
                break;
            }
            let dst_y = self.height - 1 - dst_top;
            let src_y = other.height - 1 - row;
            for col in 0..other.width {
                let dst_x = left + col;
                if dst_x >= self.width {
                    break;
                }
                self.pixels[dst_y * self.width + dst_x] = other.pixels[src_y * other.width + col];
            }
        }
    }

    /// 8-bit RGB bytes in top-down raster order
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for y in (0..self.height).rev() {
            let row = &self.pixels[y * self.width..(y + 1) * self.width];
            for color in row {
                out.extend_from_slice(&color.to_rgb8());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb8_is_flipped_to_top_down() {
        let mut fb = Framebuffer::new(2, 2, Color::BLACK);
        fb.set(0, 0, Color::WHITE);
        let bytes = fb.to_rgb8();
        assert_eq!(bytes.len(), 12);
        // bottom-left pixel ends up in the last row
        assert_eq!(&bytes[0..3], &[0, 0, 0]);
        assert_eq!(&bytes[6..9], &[255, 255, 255]);
    }

    #[test]
    fn test_from_pixels_checks_length() {
        assert!(Framebuffer::from_pixels(2, 2, vec![Color::BLACK; 3]).is_err());
        assert!(Framebuffer::from_pixels(2, 2, vec![Color::BLACK; 4]).is_ok());
    }

    #[test]
    fn test_blit_top_down() {
        let mut sheet = Framebuffer::new(4, 4, Color::BLACK);
        let tile = Framebuffer::new(2, 2, Color::WHITE);
        sheet.blit_top_down(&tile, 2, 0);
        // top-right quadrant is rows 2..4 bottom-up
        assert_eq!(sheet.get(3, 3), Some(Color::WHITE));
        assert_eq!(sheet.get(2, 2), Some(Color::WHITE));
        assert_eq!(sheet.get(1, 3), Some(Color::BLACK));
        assert_eq!(sheet.get(3, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_par_rows_mut_covers_all_pixels() {
        let mut fb = Framebuffer::new(3, 2, Color::BLACK);
        fb.par_rows_mut().enumerate().for_each(|(y, row)| {
            for px in row.iter_mut() {
                *px = Color::gray(y as f32);
            }
        });
        assert_eq!(fb.get(2, 1), Some(Color::gray(1.0)));
        assert_eq!(fb.get(0, 0), Some(Color::gray(0.0)));
    }
}

//! PNG output through the `image` crate

use image::{ImageFormat, RgbImage};
use raykit_core::{Color, Error, Framebuffer, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Write an 8-bit RGB PNG, creating missing parent directories.
///
/// Colors are clamped to `[0, 1]` and row 0 of the framebuffer ends up at the
/// bottom of the image.
pub fn write_png<P: AsRef<Path>>(framebuffer: &Framebuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    if framebuffer.is_empty() {
        return Err(Error::InvalidData(format!(
            "refusing to write an empty {}x{} image to {}",
            framebuffer.width(),
            framebuffer.height(),
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let width = framebuffer.width() as u32;
    let height = framebuffer.height() as u32;
    let image = RgbImage::from_raw(width, height, framebuffer.to_rgb8())
        .ok_or_else(|| Error::Image("pixel buffer does not match image size".to_string()))?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| Error::Image(format!("failed to write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), width, height, "wrote image");
    Ok(())
}

/// Read a PNG back into a framebuffer, with the bottom image row as row 0
pub fn read_png<P: AsRef<Path>>(path: P) -> Result<Framebuffer> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|e| Error::Image(format!("failed to read {}: {}", path.display(), e)))?
        .to_rgb8();
    let (width, height) = (image.width() as usize, image.height() as usize);
    let mut framebuffer = Framebuffer::new(width, height, Color::BLACK);
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let color = Color::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        framebuffer.set(x as usize, height - 1 - y as usize, color);
    }
    Ok(framebuffer)
}

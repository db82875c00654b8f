//! Framebuffer export to image files

use std::path::Path;

use image::RgbaImage;
use tracing::info;

use crate::rasterizer::Framebuffer;
use crate::world::SceneError;

/// Copy the framebuffer into an RGBA image
pub fn to_image(fb: &Framebuffer) -> Result<RgbaImage, SceneError> {
    let (w, h) = (fb.width as u32, fb.height as u32);
    RgbaImage::from_raw(w, h, fb.pixels.clone()).ok_or_else(|| {
        SceneError::InvalidScene(format!(
            "framebuffer holds {} bytes, expected {} for {}x{}",
            fb.pixels.len(),
            fb.width * fb.height * 4,
            fb.width,
            fb.height
        ))
    })
}

/// Write the framebuffer to `path`; the format follows the file extension
pub fn save_image<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<(), SceneError> {
    let path = path.as_ref();
    to_image(fb)?.save(path)?;
    info!(path = %path.display(), width = fb.width, height = fb.height, "saved snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Color;

    #[test]
    fn test_to_image_copies_pixels() {
        let mut fb = Framebuffer::new(3, 2);
        fb.clear(Color::new(1, 2, 3));
        fb.set_pixel_with_depth(2, 1, 1.0, Color::RED);

        let img = to_image(&fb).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 255]);
        assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_to_image_rejects_mismatched_buffer() {
        let mut fb = Framebuffer::new(3, 2);
        fb.pixels.truncate(4);
        assert!(matches!(to_image(&fb), Err(SceneError::InvalidScene(_))));
    }

    #[test]
    fn test_save_image_round_trip() {
        let mut fb = Framebuffer::new(4, 4);
        fb.clear(Color::BLUE);
        let path = std::env::temp_dir().join(format!("zbuffer-snapshot-{}.png", std::process::id()));

        save_image(&fb, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.dimensions(), (4, 4));
        assert_eq!(loaded.get_pixel(3, 3).0, [0, 0, 255, 255]);
    }
}

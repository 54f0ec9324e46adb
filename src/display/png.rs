//! PNG file output.

use image::{ImageFormat, RgbaImage};
use std::path::Path;
use tracing::info;

use super::DisplayError;
use crate::renderer::Canvas;

/// Encode `canvas` as a PNG at `path`.
pub fn write(canvas: &Canvas, path: &Path) -> Result<(), DisplayError> {
    let image = RgbaImage::from_raw(canvas.width as u32, canvas.height as u32, canvas.data.clone())
        .ok_or(DisplayError::BufferSize {
            width: canvas.width,
            height: canvas.height,
        })?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| DisplayError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Wrote {}x{} PNG to {}", canvas.width, canvas.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::renderer::Surface;

    #[test]
    fn written_png_decodes_to_canvas_pixels() {
        let mut canvas = Canvas::new(16, 12);
        canvas.clear(Rgba::TRANSPARENT);
        canvas.blend_pixel(3, 4, Rgba::opaque(0xe7, 0x4c, 0x3c));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triangle.png");
        write(&canvas, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 12));
        assert_eq!(decoded.get_pixel(3, 4).0, [0xe7, 0x4c, 0x3c, 0xff]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let mut canvas = Canvas::new(4, 4);
        canvas.data.truncate(8);
        let dir = tempfile::tempdir().unwrap();
        let err = write(&canvas, &dir.path().join("bad.png")).unwrap_err();
        assert!(matches!(err, DisplayError::BufferSize { width: 4, height: 4 }));
    }

    #[test]
    fn unwritable_path_reports_encode_error() {
        let canvas = Canvas::new(2, 2);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        assert!(matches!(write(&canvas, &path), Err(DisplayError::Encode { .. })));
    }
}

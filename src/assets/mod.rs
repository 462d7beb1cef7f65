use std::path::Path;

use image::{DynamicImage, ImageReader};
use thiserror::Error;

use super::body::TextureId;

/// Turns image files into textures the rasterizer can bind.
pub trait TextureLoader {
    /// Loads the image at `path`.
    ///
    /// Returns `None` on any failure; the caller then draws the surface
    /// without a texture.
    fn load(&mut self, path: &Path) -> Option<TextureId>;
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("could not decode {path}: {source}")]
    Decode {
        path: String,
        source: image::ImageError,
    },
}

/// Decoded RGBA8 pixels, bottom row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    pub data: Vec<[u8; 4]>,
}

pub fn read_pixels(path: &Path) -> Result<Pixels, AssetError> {
    let display = path.display().to_string();
    let image = ImageReader::open(path)
        .map_err(|source| AssetError::Open {
            path: display.clone(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| AssetError::Open {
            path: display.clone(),
            source,
        })?
        .decode()
        .map_err(|source| AssetError::Decode {
            path: display,
            source,
        })?;

    Ok(to_pixels(image))
}

/// Converts an image with its origin at the top left into RGBA pixels
/// with row 0 at the bottom. Images without alpha become fully opaque.
pub fn to_pixels(image: DynamicImage) -> Pixels {
    let rgba = image.flipv().into_rgba8();
    let (width, height) = rgba.dimensions();
    let data = rgba.pixels().map(|p| p.0).collect();
    Pixels {
        width,
        height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn rows_are_flipped_and_alpha_added() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(1, 0, Rgb([0, 255, 0]));
        image.put_pixel(0, 1, Rgb([0, 0, 255]));
        image.put_pixel(1, 1, Rgb([9, 9, 9]));

        let pixels = to_pixels(DynamicImage::ImageRgb8(image));

        assert_eq!((pixels.width, pixels.height), (2, 2));
        assert_eq!(
            pixels.data,
            vec![
                [0, 0, 255, 255],
                [9, 9, 9, 255],
                [255, 0, 0, 255],
                [0, 255, 0, 255],
            ]
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_pixels(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, AssetError::Open { .. }), "{err}");
    }
}

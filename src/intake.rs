//! Image intake
//!
//! Decodes submitted photo bytes once and hands out the encodings the rest of
//! the pipeline needs: base64 JPEG for the classifier and a PNG thumbnail for
//! the meal log.

use std::io::Cursor;

use base64::{engine::general_purpose, Engine};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat};
use thiserror::Error;

const JPEG_QUALITY: u8 = 90;
pub const THUMBNAIL_MAX_SIDE: u32 = 128;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image data is empty")]
    Empty,

    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("could not encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// A decoded food photo
#[derive(Debug, Clone)]
pub struct FoodImage {
    image: DynamicImage,
    format: Option<ImageFormat>,
}

impl FoodImage {
    /// Decode raw bytes, guessing the format from content
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        let format = image::guess_format(bytes).ok();
        let image = image::load_from_memory(bytes).map_err(ImageError::Decode)?;
        Ok(Self { image, format })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Detected source format, when the header was recognizable
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// RGB JPEG at quality 90, base64 encoded
    pub fn to_jpeg_base64(&self) -> Result<String, ImageError> {
        let rgb = DynamicImage::ImageRgb8(self.image.to_rgb8());
        let mut buf = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
        rgb.write_with_encoder(encoder).map_err(ImageError::Encode)?;
        Ok(general_purpose::STANDARD.encode(&buf))
    }

    /// PNG thumbnail whose longest side is at most `max_side` pixels
    pub fn thumbnail_png(&self, max_side: u32) -> Result<Vec<u8>, ImageError> {
        let thumb = self.image.thumbnail(max_side, max_side);
        let mut png_bytes = Vec::new();
        thumb
            .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
            .map_err(ImageError::Encode)?;
        Ok(png_bytes)
    }
}

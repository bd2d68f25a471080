use crate::utils::IdScanError;
use image::DynamicImage;
use log::debug;
use std::path::Path;

/// Decodes card images for the recognition passes. No pixel preprocessing is done here;
/// the engines receive the image as decoded.
pub struct ImageProcessor;

impl ImageProcessor {
    pub fn load(image_path: &Path) -> Result<DynamicImage, IdScanError> {
        let img = image::open(image_path).map_err(|e| {
            IdScanError::ImageLoadError(format!(
                "Failed to open image {}: {}",
                image_path.display(),
                e
            ))
        })?;
        Self::check_dimensions(img)
    }

    pub fn load_from_bytes(bytes: &[u8]) -> Result<DynamicImage, IdScanError> {
        if bytes.is_empty() {
            return Err(IdScanError::ImageLoadError("Image buffer is empty".to_string()));
        }
        let img = image::load_from_memory(bytes)
            .map_err(|e| IdScanError::ImageLoadError(format!("Failed to decode image: {}", e)))?;
        Self::check_dimensions(img)
    }

    fn check_dimensions(img: DynamicImage) -> Result<DynamicImage, IdScanError> {
        if img.width() == 0 || img.height() == 0 {
            return Err(IdScanError::ImageLoadError("Image has zero size".to_string()));
        }
        debug!("Loaded image {}x{}", img.width(), img.height());
        Ok(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_load_from_png_bytes() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 3));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();

        let loaded = ImageProcessor::load_from_bytes(&bytes).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (4, 3));
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let result = ImageProcessor::load_from_bytes(b"not an image");
        assert!(matches!(result, Err(IdScanError::ImageLoadError(_))));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let result = ImageProcessor::load(Path::new("/no/such/card.png"));
        assert!(matches!(result, Err(IdScanError::ImageLoadError(_))));
    }
}

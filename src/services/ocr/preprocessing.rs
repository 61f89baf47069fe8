use crate::models::config::PreprocessingConfig;
use image::{DynamicImage, GenericImageView};

/// Image preprocessing service for OCR optimization
pub struct PreprocessingService {
    config: PreprocessingConfig,
}

impl PreprocessingService {
    pub fn new(config: PreprocessingConfig) -> Self {
        Self { config }
    }

    /// Full pipeline: grayscale → scale
    pub fn preprocess(&self, image: &DynamicImage) -> DynamicImage {
        let image = if self.config.grayscale {
            self.to_grayscale(image)
        } else {
            image.clone()
        };

        if (self.config.scale_factor - 1.0).abs() < f64::EPSILON || self.config.scale_factor <= 0.0 {
            return image;
        }

        self.scale(&image, self.config.scale_factor)
    }

    /// Convert image to grayscale
    pub fn to_grayscale(&self, image: &DynamicImage) -> DynamicImage {
        DynamicImage::ImageLuma8(image.to_luma8())
    }

    /// Scale image by factor
    pub fn scale(&self, image: &DynamicImage, factor: f64) -> DynamicImage {
        let (width, height) = image.dimensions();
        let new_width = ((width as f64 * factor) as u32).max(1);
        let new_height = ((height as f64 * factor) as u32).max(1);

        image.resize_exact(new_width, new_height, image::imageops::FilterType::Lanczos3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, _y| {
            if x % 2 == 0 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_grayscale() {
        let service = PreprocessingService::new(PreprocessingConfig::default());
        let gray = service.to_grayscale(&create_test_image(10, 10));

        assert!(matches!(gray, DynamicImage::ImageLuma8(_)));
        assert_eq!(gray.dimensions(), (10, 10));
    }

    #[test]
    fn test_scale_2x() {
        let service = PreprocessingService::new(PreprocessingConfig::default());
        let scaled = service.scale(&create_test_image(100, 50), 2.0);

        assert_eq!(scaled.dimensions(), (200, 100));
    }

    #[test]
    fn test_default_pipeline_keeps_size() {
        let service = PreprocessingService::new(PreprocessingConfig::default());
        let out = service.preprocess(&create_test_image(40, 20));

        assert_eq!(out.dimensions(), (40, 20));
        assert!(matches!(out, DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn test_pipeline_without_grayscale() {
        let service = PreprocessingService::new(PreprocessingConfig {
            grayscale: false,
            scale_factor: 1.5,
        });
        let out = service.preprocess(&create_test_image(40, 20));

        assert_eq!(out.dimensions(), (60, 30));
        assert!(matches!(out, DynamicImage::ImageRgb8(_)));
    }
}

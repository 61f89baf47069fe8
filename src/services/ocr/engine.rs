use crate::error::ExtractionError;
use crate::models::upload::UploadedImage;
use async_trait::async_trait;

/// OCR engine abstraction - turns a prescription image into one text blob
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Recognize all text in the image
    async fn extract_text(&self, image: &UploadedImage) -> Result<String, ExtractionError>;
}

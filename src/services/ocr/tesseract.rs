use super::engine::TextExtractor;
use super::preprocessing::PreprocessingService;
use crate::error::ExtractionError;
use crate::models::config::OcrConfig;
use crate::models::upload::UploadedImage;
use async_trait::async_trait;
use std::sync::Arc;
use tesseract::{PageSegMode, Tesseract};
use tracing::info;

/// Local Tesseract OCR engine
pub struct TesseractEngine {
    // Tesseract instance is created per call for thread safety
    language: String,
    preprocessing: Arc<PreprocessingService>,
}

impl TesseractEngine {
    pub fn new(config: &OcrConfig) -> Result<Self, ExtractionError> {
        if !Self::is_available(&config.language) {
            return Err(ExtractionError::Engine(format!(
                "Tesseract not available for language '{}'",
                config.language
            )));
        }

        Ok(Self {
            language: config.language.clone(),
            preprocessing: Arc::new(PreprocessingService::new(config.preprocessing.clone())),
        })
    }

    /// Check that libtesseract loads with the given language data
    pub fn is_available(language: &str) -> bool {
        Tesseract::new(None, Some(language)).is_ok()
    }

    fn recognize(
        preprocessing: &PreprocessingService,
        image: &UploadedImage,
        language: &str,
    ) -> Result<String, ExtractionError> {
        let decoded = image::load_from_memory_with_format(&image.bytes, image.kind.image_format())?;
        let processed = preprocessing.preprocess(&decoded);

        let mut img_bytes: Vec<u8> = Vec::new();
        processed.write_to(&mut std::io::Cursor::new(&mut img_bytes), image::ImageFormat::Png)?;

        let mut tesseract = Tesseract::new(None, Some(language))
            .map_err(|e| ExtractionError::Engine(format!("Failed to create Tesseract instance: {}", e)))?;

        // Full page: prescriptions are multi-line documents
        tesseract.set_page_seg_mode(PageSegMode::PsmAuto);

        tesseract
            .set_image_from_mem(&img_bytes)
            .map_err(|e| ExtractionError::Engine(format!("Failed to set image: {}", e)))?
            .get_text()
            .map_err(|e| ExtractionError::Engine(format!("Failed to recognize text: {}", e)))
    }
}

#[async_trait]
impl TextExtractor for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn extract_text(&self, image: &UploadedImage) -> Result<String, ExtractionError> {
        info!(file = %image.file_name, lang = %self.language, "running tesseract");

        let preprocessing = Arc::clone(&self.preprocessing);
        let language = self.language.clone();
        let upload = image.clone();

        tokio::task::spawn_blocking(move || Self::recognize(&preprocessing, &upload, &language))
            .await
            .map_err(|e| ExtractionError::Engine(format!("Tesseract task failed: {}", e)))?
    }
}

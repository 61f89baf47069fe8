pub mod engine;
pub mod http_ocr;
pub mod preprocessing;
#[cfg(feature = "tesseract")]
pub mod tesseract;

// Re-export main types
pub use engine::TextExtractor;
pub use http_ocr::HttpOcrClient;

use crate::error::ExtractionError;
use crate::models::config::{OcrConfig, OcrEngineKind};
use std::sync::Arc;

/// Build the configured OCR engine
pub fn build_extractor(config: &OcrConfig) -> Result<Arc<dyn TextExtractor>, ExtractionError> {
    match config.engine {
        OcrEngineKind::Http => Ok(Arc::new(HttpOcrClient::new(config)?)),
        #[cfg(feature = "tesseract")]
        OcrEngineKind::Tesseract => Ok(Arc::new(tesseract::TesseractEngine::new(config)?)),
        #[cfg(not(feature = "tesseract"))]
        OcrEngineKind::Tesseract => Err(ExtractionError::Engine(
            "built without the `tesseract` feature".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_extractor() {
        let extractor = build_extractor(&OcrConfig::default()).unwrap();
        assert_eq!(extractor.name(), "http");
    }

    #[cfg(not(feature = "tesseract"))]
    #[test]
    fn test_tesseract_needs_feature() {
        let config = OcrConfig {
            engine: OcrEngineKind::Tesseract,
            ..OcrConfig::default()
        };
        assert!(matches!(build_extractor(&config), Err(ExtractionError::Engine(_))));
    }
}

use crate::error::{ExtractionError, LookupError};
use crate::models::analysis::{AnalysisReport, ResultsView};
use crate::models::upload::UploadedImage;
use crate::services::candidates::extract_candidates;
use crate::services::lookup::{lookup_all, MedicineLookup};
use crate::services::ocr::TextExtractor;
use crate::services::session::SessionStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Upload flow and results flow, joined by an explicit session
#[derive(Clone)]
pub struct PrescriptionAnalyzer {
    extractor: Arc<dyn TextExtractor>,
    lookup: Arc<dyn MedicineLookup>,
    session: Arc<SessionStore>,
}

impl PrescriptionAnalyzer {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        lookup: Arc<dyn MedicineLookup>,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            extractor,
            lookup,
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Upload flow: OCR the image and hand the text to the session.
    /// On failure the session is left untouched so the user can retry.
    pub async fn submit(&self, image: &UploadedImage) -> Result<(), ExtractionError> {
        info!(file = %image.file_name, engine = self.extractor.name(), "processing prescription");

        let text = self.extractor.extract_text(image).await.map_err(|e| {
            error!("OCR processing error: {}", e);
            e
        })?;

        let preview = image.preview_data_url();
        self.session.store_extraction(&text, Some(preview.as_str()));
        Ok(())
    }

    /// Results flow: consume the session, guess candidates, fetch records
    pub async fn load_results(&self) -> Result<ResultsView, LookupError> {
        let Some(data) = self.session.take_extraction() else {
            warn!("No prescription data in session, redirecting to entry view");
            return Ok(ResultsView::Redirect);
        };

        let candidates = extract_candidates(&data.ocr_text);
        info!(?candidates, "identified medicine candidates");

        let medicines = lookup_all(self.lookup.as_ref(), &candidates).await?;

        Ok(ResultsView::Ready(AnalysisReport {
            ocr_text: data.ocr_text,
            image_preview: Some(data.image_preview).filter(|p| !p.is_empty()),
            candidates,
            medicines,
            analyzed_at: Utc::now(),
        }))
    }
}

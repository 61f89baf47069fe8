use crate::models::analysis::SessionData;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Key holding the JSON-encoded extracted text
pub const OCR_TEXT_KEY: &str = "ocrText";
/// Key holding the image preview reference
pub const IMAGE_PREVIEW_KEY: &str = "imagePreview";

/// Ephemeral per-run storage shared by the upload and results flows
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.entries.lock().insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.lock().remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Store extraction output for the results flow
    pub fn store_extraction(&self, ocr_text: &str, image_preview: Option<&str>) {
        // serde_json on a &str cannot fail
        let encoded = serde_json::Value::String(ocr_text.to_string()).to_string();

        let mut entries = self.entries.lock();
        entries.insert(OCR_TEXT_KEY.to_string(), encoded);
        entries.insert(
            IMAGE_PREVIEW_KEY.to_string(),
            image_preview.unwrap_or_default().to_string(),
        );
        debug!(text_len = ocr_text.len(), "stored extraction in session");
    }

    /// Consume the extraction output; both keys are cleared.
    /// Returns None when the text key is absent or undecodable.
    pub fn take_extraction(&self) -> Option<SessionData> {
        let (raw_text, image_preview) = {
            let mut entries = self.entries.lock();
            let raw_text = entries.remove(OCR_TEXT_KEY);
            let image_preview = entries.remove(IMAGE_PREVIEW_KEY).unwrap_or_default();
            (raw_text?, image_preview)
        };

        match serde_json::from_str::<String>(&raw_text) {
            Ok(ocr_text) => Some(SessionData {
                ocr_text,
                image_preview,
            }),
            Err(e) => {
                warn!("Discarding undecodable session text: {}", e);
                None
            }
        }
    }
}

use super::medicine::MedicineRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Extraction output handed from the upload flow to the results flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub ocr_text: String,
    /// Empty when the upload produced no preview
    pub image_preview: String,
}

/// Everything the results view shows for one prescription
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub ocr_text: String,
    pub image_preview: Option<String>,
    pub candidates: Vec<String>,
    pub medicines: Vec<MedicineRecord>,
    pub analyzed_at: DateTime<Utc>,
}

/// Outcome of opening the results view
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// No extracted text in the session; go back to the entry view
    Redirect,
    Ready(AnalysisReport),
}

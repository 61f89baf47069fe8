use super::lookup::build_lookup;
use super::render::render_report;
use crate::error::AppError;
use crate::models::analysis::ResultsView;
use crate::models::config::{AppConfig, LookupSource};
use crate::services::ocr::{build_extractor, HttpOcrClient};
use crate::services::pipeline::PrescriptionAnalyzer;
use crate::services::session::SessionStore;
use crate::services::upload::read_upload;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Options for one `analyze` run
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub json: bool,
    pub show_text: bool,
    /// Overrides `lookup.source` from the config
    pub lookup: Option<LookupSource>,
}

/// `medscan analyze <IMAGE>`: upload → OCR → candidates → lookup → report
pub async fn analyze(
    config: &AppConfig,
    image_path: &Path,
    options: &AnalyzeOptions,
) -> Result<String, AppError> {
    let upload = read_upload(image_path, config.upload.max_bytes).await?;

    let source = options.lookup.unwrap_or(config.lookup.source);
    let analyzer = PrescriptionAnalyzer::new(
        build_extractor(&config.ocr)?,
        build_lookup(config, source)?,
        Arc::new(SessionStore::new()),
    );

    analyzer.submit(&upload).await?;

    let report = match analyzer.load_results().await? {
        ResultsView::Ready(report) => report,
        ResultsView::Redirect => return Ok("No prescription data found.".to_string()),
    };
    info!(medicines = report.medicines.len(), "analysis complete");

    if options.json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    Ok(render_report(&report, options.show_text))
}

/// `medscan ocr-health`: is the OCR server reachable
pub async fn check_ocr_health(config: &AppConfig) -> Result<bool, AppError> {
    let client = HttpOcrClient::new(&config.ocr)?;

    match client.health_check().await {
        Ok(_) => Ok(true),
        Err(e) => {
            info!("OCR server unavailable: {}", e);
            Ok(false)
        }
    }
}

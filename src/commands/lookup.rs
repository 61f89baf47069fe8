use super::render::{render_medicine, DISCLAIMER};
use crate::error::AppError;
use crate::models::config::{AppConfig, LookupSource};
use crate::services::ai::GeminiClient;
use crate::services::lookup::{lookup_all, AiLookup, MedicineLookup, StaticLookup};
use std::sync::Arc;
use std::time::Duration;

/// Build the medicine lookup for the chosen source
pub fn build_lookup(
    config: &AppConfig,
    source: LookupSource,
) -> Result<Arc<dyn MedicineLookup>, AppError> {
    match source {
        LookupSource::Static => Ok(Arc::new(StaticLookup::new(Duration::from_millis(
            config.lookup.simulated_delay_ms,
        )))),
        LookupSource::Ai => {
            let client = GeminiClient::from_env(&config.ai)?;
            Ok(Arc::new(AiLookup::new(Arc::new(client))))
        }
    }
}

/// `medscan lookup <NAME>...`: information cards for the given names
pub async fn lookup_medicines(
    config: &AppConfig,
    names: &[String],
    source: LookupSource,
    json: bool,
) -> Result<String, AppError> {
    let lookup = build_lookup(config, source)?;
    let records = lookup_all(lookup.as_ref(), names).await?;

    if json {
        return Ok(serde_json::to_string_pretty(&records)?);
    }

    let mut out: String = records
        .iter()
        .map(render_medicine)
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out.push_str(DISCLAIMER);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::medicine::MedicineRecord;

    fn fast_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.lookup.simulated_delay_ms = 0;
        config
    }

    #[tokio::test]
    async fn test_lookup_text_output() {
        let names = vec!["paracetamol".to_string(), "Xylostatin".to_string()];
        let out = lookup_medicines(&fast_config(), &names, LookupSource::Static, false)
            .await
            .unwrap();

        assert!(out.starts_with("Paracetamol\n"));
        assert!(out.contains("\nXylostatin\n"));
        assert!(out.ends_with(DISCLAIMER));
    }

    #[tokio::test]
    async fn test_lookup_json_output() {
        let names = vec!["Xylostatin".to_string()];
        let out = lookup_medicines(&fast_config(), &names, LookupSource::Static, true)
            .await
            .unwrap();

        let parsed: Vec<MedicineRecord> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, vec![MedicineRecord::generic("Xylostatin")]);
    }

    #[test]
    fn test_ai_lookup_needs_key() {
        let mut config = fast_config();
        config.ai.api_key_env = "MEDSCAN_LOOKUP_TEST_KEY_UNSET".to_string();

        let result = build_lookup(&config, LookupSource::Ai);
        assert!(matches!(result, Err(AppError::Ai(_))));
    }
}

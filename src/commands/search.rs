use super::render::DISCLAIMER;
use crate::error::AppError;
use crate::models::config::AppConfig;
use crate::services::ai::{search_medicine, GeminiClient, TextGenerator};

/// `medscan search <QUERY>`: free-text AI answer about a medicine
pub async fn search(config: &AppConfig, query: &str) -> Result<String, AppError> {
    if query.trim().is_empty() {
        return Ok("Enter a medicine name to search.".to_string());
    }

    let client = GeminiClient::from_env(&config.ai)?;
    search_with(&client, query).await
}

/// Search against any generator
pub async fn search_with(generator: &dyn TextGenerator, query: &str) -> Result<String, AppError> {
    match search_medicine(generator, query).await? {
        Some(answer) => Ok(format!("{}\n\n{}", answer.trim_end(), DISCLAIMER)),
        None => Ok("Enter a medicine name to search.".to_string()),
    }
}

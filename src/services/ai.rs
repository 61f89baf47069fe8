use crate::error::AiError;
use crate::models::config::AiConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Anything that turns a prompt into prose
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

/// Client for the Gemini `generateContent` REST endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &AiConfig, api_key: impl Into<String>) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    /// Build a client with the key from the environment variable the config names
    pub fn from_env(config: &AiConfig) -> Result<Self, AiError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AiError::MissingApiKey(config.api_key_env.clone()))?;

        Self::new(config, api_key)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        debug!(model = %self.model, prompt_len = prompt.len(), "sending generateContent request");

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: GenerateResponse = response.json().await?;

        let text = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }

        Ok(text)
    }
}

/// Prompt for a free-text medicine question
pub fn medicine_search_prompt(query: &str) -> String {
    format!(
        "As a medical information assistant, provide accurate information about the medicine: {}.\n\
         Include:\n\
         1. Common uses and purposes\n\
         2. Typical dosage guidelines\n\
         3. Important safety information and precautions\n\
         4. Common side effects\n\
         \n\
         Format the response in clear, simple language that's easy to understand.\n\
         \n\
         Important: Always include a medical disclaimer at the end.",
        query.trim()
    )
}

/// Free-text AI search. Blank queries are a no-op and return None.
pub async fn search_medicine(
    generator: &dyn TextGenerator,
    query: &str,
) -> Result<Option<String>, AiError> {
    if query.trim().is_empty() {
        return Ok(None);
    }

    info!(query = query.trim(), "AI medicine search");
    match generator.generate(&medicine_search_prompt(query)).await {
        Ok(text) => Ok(Some(text)),
        Err(e) => {
            warn!("AI search error: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{extract::Path, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Generator returning a canned answer and counting calls
    pub(crate) struct CannedGenerator {
        pub answer: Result<String, ()>,
        pub calls: AtomicUsize,
    }

    impl CannedGenerator {
        pub(crate) fn ok(answer: &str) -> Self {
            Self {
                answer: Ok(answer.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                answer: Err(()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone().map_err(|_| AiError::EmptyResponse)
        }
    }

    async fn spawn_fake_gemini(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn test_config(base_url: String) -> AiConfig {
        AiConfig {
            base_url,
            timeout_secs: 5,
            ..AiConfig::default()
        }
    }

    #[tokio::test]
    async fn test_generate_joins_parts() {
        let app = Router::new().route(
            "/v1beta/models/:action",
            post(|Path(action): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(action, "gemini-pro:generateContent");
                assert_eq!(headers["x-goog-api-key"], "test-key");
                assert!(body["contents"][0]["parts"][0]["text"]
                    .as_str()
                    .unwrap()
                    .contains("Ibuprofen"));
                Json(json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": "Ibuprofen is " }, { "text": "an NSAID." }] }
                    }]
                }))
            }),
        );
        let base_url = spawn_fake_gemini(app).await;
        let client = GeminiClient::new(&test_config(base_url), "test-key").unwrap();

        let text = client.generate("Tell me about Ibuprofen").await.unwrap();
        assert_eq!(text, "Ibuprofen is an NSAID.");
    }

    #[tokio::test]
    async fn test_generate_error_status() {
        let app = Router::new().route(
            "/v1beta/models/:action",
            post(|| async { (StatusCode::FORBIDDEN, "API key invalid") }),
        );
        let base_url = spawn_fake_gemini(app).await;
        let client = GeminiClient::new(&test_config(base_url), "bad").unwrap();

        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, AiError::Status { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_generate_empty_candidates() {
        let app = Router::new().route(
            "/v1beta/models/:action",
            post(|| async { Json(json!({ "candidates": [] })) }),
        );
        let base_url = spawn_fake_gemini(app).await;
        let client = GeminiClient::new(&test_config(base_url), "k").unwrap();

        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, AiError::EmptyResponse));
    }

    #[test]
    fn test_from_env_missing_key() {
        let config = AiConfig {
            api_key_env: "MEDSCAN_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..AiConfig::default()
        };
        let result = GeminiClient::from_env(&config);
        assert!(matches!(result, Err(AiError::MissingApiKey(name)) if name == "MEDSCAN_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_search_prompt_mentions_query_and_disclaimer() {
        let prompt = medicine_search_prompt("  Metformin ");
        assert!(prompt.contains("the medicine: Metformin."));
        assert!(prompt.contains("medical disclaimer"));
    }

    #[test]
    fn test_blank_query_is_noop() {
        let generator = CannedGenerator::ok("unused");
        let result = tokio_test::block_on(search_medicine(&generator, "   "));

        tokio_test::assert_ok!(&result);
        assert_eq!(result.unwrap(), None);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_failure_surfaces_generic_message() {
        let generator = Arc::new(CannedGenerator::failing());
        let err = search_medicine(generator.as_ref(), "Aspirin").await.unwrap_err();

        assert_eq!(
            err.user_message(),
            "Failed to get AI-powered information. Please try again."
        );
    }
}

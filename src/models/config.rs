use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub ocr: OcrConfig,
    pub lookup: LookupConfig,
    pub ai: AiConfig,
    pub upload: UploadConfig,
    pub logging: LoggingConfig,
}

/// OCR engine choice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OcrEngineKind {
    /// OCR server reached over HTTP
    Http,
    /// Local libtesseract (needs the `tesseract` feature)
    Tesseract,
}

impl Default for OcrEngineKind {
    fn default() -> Self {
        Self::Http
    }
}

/// Image preprocessing applied before OCR
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreprocessingConfig {
    pub grayscale: bool,
    pub scale_factor: f64,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            grayscale: true,
            scale_factor: 1.0,
        }
    }
}

/// Text extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OcrConfig {
    pub engine: OcrEngineKind,
    pub server_url: String,
    pub timeout_secs: u64,
    pub language: String,
    /// Boxes scored below this are dropped
    pub min_score: f64,
    pub preprocessing: PreprocessingConfig,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: OcrEngineKind::Http,
            server_url: "http://127.0.0.1:39835".to_string(),
            timeout_secs: 30,
            language: "eng".to_string(),
            min_score: 0.0,
            preprocessing: PreprocessingConfig::default(),
        }
    }
}

/// Where medicine information comes from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LookupSource {
    Static,
    Ai,
}

impl Default for LookupSource {
    fn default() -> Self {
        Self::Static
    }
}

/// Medicine lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LookupConfig {
    pub source: LookupSource,
    /// Artificial latency of the static table, 0 disables it
    pub simulated_delay_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            source: LookupSource::Static,
            simulated_delay_ms: 1000,
        }
    }
}

/// Generative AI service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AiConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-pro".to_string(),
            api_key_env: "GOOGLE_AI_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Upload limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UploadConfig {
    pub max_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

use thiserror::Error;

/// Rejections at the upload boundary
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("not an image file: {file_name}")]
    NotAnImage { file_name: String },
    #[error("file is {size} bytes, limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },
    #[error("failed to read upload: {0}")]
    Read(#[from] std::io::Error),
}

impl UploadError {
    /// Message shown to the user for this rejection
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAnImage { .. } => "Please upload an image file (JPEG, PNG, etc.)".to_string(),
            Self::TooLarge { max, .. } => {
                format!("File is too large. Maximum size is {}.", format_limit(*max))
            }
            Self::Read(_) => "Could not read the selected file.".to_string(),
        }
    }
}

/// Size limit in the largest unit that divides it evenly
fn format_limit(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;

    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// OCR failures
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("OCR request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("OCR server error ({status}): {body}")]
    Server { status: u16, body: String },
    #[error("OCR engine error: {0}")]
    Engine(String),
}

impl ExtractionError {
    pub fn user_message(&self) -> &'static str {
        "Error processing the image. Please try again."
    }
}

/// Generative AI client failures
#[derive(Debug, Error)]
pub enum AiError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),
    #[error("AI request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("AI service error ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("AI service returned no text")]
    EmptyResponse,
}

impl AiError {
    pub fn user_message(&self) -> &'static str {
        "Failed to get AI-powered information. Please try again."
    }
}

/// Medicine information lookup failures
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("AI lookup for '{name}' failed: {source}")]
    Ai {
        name: String,
        #[source]
        source: AiError,
    },
}

impl LookupError {
    pub fn user_message(&self) -> &'static str {
        "Failed to fetch medicine information. Please try again."
    }
}

/// Configuration file failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    NoConfigDir,
    #[error("failed to create config directory: {0}")]
    CreateDir(std::io::Error),
    #[error("failed to read config file: {0}")]
    Read(std::io::Error),
    #[error("failed to write config file: {0}")]
    Write(std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(serde_json::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(serde_json::Error),
}

/// Everything the CLI can fail with
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),
}

impl AppError {
    /// User-facing text; detail stays in the logs
    pub fn user_message(&self) -> String {
        match self {
            Self::Upload(e) => e.user_message(),
            Self::Extraction(e) => e.user_message().to_string(),
            Self::Lookup(e) => e.user_message().to_string(),
            Self::Ai(e) => e.user_message().to_string(),
            Self::Config(e) => e.to_string(),
            Self::Output(e) => e.to_string(),
            Self::Runtime(e) => e.to_string(),
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Upload(_) => 2,
            Self::Config(_) => 3,
            _ => 1,
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CartError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::ApiError(e) if e.is_timeout() => {
                "The catalog service did not answer in time".to_string()
            }
            CartError::ApiError(e) if e.is_status() => match e.status() {
                Some(status) => format!("The catalog service answered with {}", status),
                None => "The catalog service rejected the request".to_string(),
            },
            CartError::ApiError(_) => "Could not reach the catalog service".to_string(),
            CartError::UrlError(e) => format!("The catalog address is not a valid URL ({})", e),
            CartError::IoError(e) => format!("Could not access cart storage ({})", e),
            CartError::SerializationError(_) => "Stored or received data is malformed".to_string(),
            CartError::ConfigValidationError { field, message } => {
                format!("Invalid configuration ({}): {}", field, message)
            }
            CartError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CartError::ApiError(_) => "Check that the catalog API is running and reachable",
            CartError::UrlError(_) => "Use an absolute http(s) URL for catalog.base_url",
            CartError::IoError(_) => "Check that the storage directory exists and is writable",
            CartError::SerializationError(_) => {
                "Remove the stored cart file or check the catalog response format"
            }
            CartError::ConfigValidationError { .. } | CartError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or CLI flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;

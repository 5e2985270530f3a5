use thiserror::Error;

#[derive(Error, Debug)]
pub enum DexError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response payload: {0}")]
    Decode(String),

    #[error("'{0}' not found")]
    NotFound(String),

    #[error("invalid category '{0}'")]
    InvalidCategory(String),

    #[error("invalid page {0}: pages start at 1")]
    InvalidPage(u32),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DexError {
    /// Classify a transport-level failure from reqwest.
    ///
    /// `subject` names the resource that was requested and ends up in the
    /// `NotFound` message when the API answered 404.
    pub fn from_http(err: reqwest::Error, subject: &str) -> Self {
        if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            return DexError::NotFound(subject.to_string());
        }
        if err.is_decode() {
            return DexError::Decode(err.to_string());
        }
        DexError::Network(err.to_string())
    }

    /// Short machine-friendly kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            DexError::Network(_) => "network",
            DexError::Decode(_) => "decode",
            DexError::NotFound(_) => "not_found",
            DexError::InvalidCategory(_) => "invalid_category",
            DexError::InvalidPage(_) => "invalid_page",
            DexError::Config(_) => "config",
            DexError::Io(_) => "io",
            DexError::YamlParse(_) => "yaml",
            DexError::Json(_) => "json",
        }
    }
}

pub type Result<T> = std::result::Result<T, DexError>;

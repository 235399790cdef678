use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid path {0}. Path must be a string starting with '/'")]
    MissingLeadingSlash(String),

    #[error("Invalid path '{0}'. Paths must not have more than one '/' in a row.")]
    RepeatedSlash(String),

    #[error("Unknown query filter: {0}")]
    UnknownFilter(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CacheError {
    /// True for both flavours of malformed path.
    pub fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            CacheError::MissingLeadingSlash(_) | CacheError::RepeatedSlash(_)
        )
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;

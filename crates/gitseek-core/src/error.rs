use thiserror::Error;

/// All the ways things can go wrong in gitseek
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Nothing selected to export")]
    EmptySelection,

    #[error("Session time limit reached - sign in to keep searching")]
    SessionExpired,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<gitseek_api::GitHubError> for Error {
    fn from(err: gitseek_api::GitHubError) -> Self {
        match err {
            gitseek_api::GitHubError::NotFound(name) => Error::NotFound(name),
            other => Error::ApiError(other.to_string()),
        }
    }
}

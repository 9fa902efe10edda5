use thiserror::Error;

/// Failure of a backend call, collapsed to a message when shown to the user
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid form: {0}")]
    InvalidForm(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Maps a non-success status and its decoded message
    pub fn from_status(status: u16, message: String) -> Self {
        if status == 401 {
            ApiError::Unauthorized(message)
        } else {
            ApiError::Status { status, message }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(e.to_string())
    }
}

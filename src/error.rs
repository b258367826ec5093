// Error types shared by the client, session and config layers
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Non-2xx response; `message` is the envelope's `error` field when present
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("no auth token available - run `login` first or pass --token")]
    MissingToken,

    #[error("invalid auth token: {0}")]
    InvalidToken(String),

    #[error("API call not approved")]
    NotApproved,

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

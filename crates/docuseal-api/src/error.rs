//! Error types for docuseal-api

/// Result type for docuseal-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the DocuSeal API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No API key configured. Checked on every call, never at startup.
    #[error("DocuSeal API key is required. Set the DOCUSEAL_API_KEY environment variable.")]
    MissingApiKey,

    /// Non-success HTTP status from the remote service
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The request never produced a response (DNS, TLS, connection reset, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// A success status whose body is not JSON
    #[error("invalid response body: {0}")]
    InvalidResponse(String),

    /// Request body could not be encoded
    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status of a remote API failure, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

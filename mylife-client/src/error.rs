use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by `mylife-client`.
pub enum ClientError {
    /// Transport failure or an unreadable response (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something that is not the expected envelope.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Missing, expired or rejected token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to touch the resource (e.g. not the post creator).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The post or profile does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rejected input, conflict, or any other unsuccessful envelope.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result of `mylife-client` operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::InvalidRequest(message),
        }
    }
}

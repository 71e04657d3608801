use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered 401. The session has already been cleared and
    /// `SessionEvent::Expired` emitted by the time this is returned.
    #[error("session expired")]
    SessionExpired,
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Any other non-2xx answer. Displays as the raw response body.
    #[error("{message}")]
    Request { status: StatusCode, message: String },
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("encode error: {0}")]
    Encode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::SessionExpired => Some(StatusCode::UNAUTHORIZED),
            ClientError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

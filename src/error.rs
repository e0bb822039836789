use reqwest::StatusCode;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid query: {0}")]
    InvalidQuery(&'static str),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
    #[error("JSON decode failed: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

/// Coarse failure class, for views that only need to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response reached the client.
    Transport,
    /// The backend answered with a non-2xx status.
    Status,
    /// The body did not have the expected JSON shape.
    Decode,
    /// Rejected before any request was sent.
    Config,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidBaseUrl(_) | Self::InvalidQuery(_) => ErrorKind::Config,
            Self::Request(_) => ErrorKind::Transport,
            Self::HttpStatus { .. } => ErrorKind::Status,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(err) => err.status(),
            _ => None,
        }
    }

    /// Raw response body for status and decode failures.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } | Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }
}

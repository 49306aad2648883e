use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Upstream,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Everything that can go wrong with a remote search. The page treats all of
/// these the same way ("search failed"); the variants only differ in what
/// ends up in the log line.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search transport failed: {0}")]
    Transport(String),
    #[error("search rejected: status={status} message={message}")]
    Rejected { status: String, message: String },
    #[error("search response could not be decoded: {0}")]
    Decode(String),
    #[error("invalid search endpoint: {0}")]
    InvalidEndpoint(String),
}

impl SearchError {
    pub fn rejected(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn status(&self) -> &str {
        match self {
            Self::Rejected { status, .. } => status,
            Self::Transport(_) => "transport_error",
            Self::Decode(_) => "decode_error",
            Self::InvalidEndpoint(_) => "invalid_endpoint",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } => message,
            Self::Transport(message) | Self::Decode(message) | Self::InvalidEndpoint(message) => {
                message
            }
        }
    }
}

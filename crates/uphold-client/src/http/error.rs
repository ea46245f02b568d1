/*
[INPUT]:  Error sources (configuration, payload encoding, transport, decoding, remote status)
[OUTPUT]: Structured error type carrying status codes and raw bodies
[POS]:    Error handling layer - unified error type for entire crate
[UPDATE]: When adding new error sources or changing the status code convention
*/

use serde_json::Value;
use thiserror::Error;

/// Main error type for the Uphold client
#[derive(Error, Debug)]
pub enum UpholdError {
    /// Base URL, request URL or header value is unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request payload could not be encoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Network or connection failure; no usable status code
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body is not valid JSON for the expected shape
    #[error("Failed to decode response (status {status}): {reason}")]
    Decoding {
        status: u16,
        body: Vec<u8>,
        reason: String,
    },

    /// Well-formed response with a status outside the operation's accepted code
    #[error("{operation} failed with status code {status}")]
    Domain {
        operation: &'static str,
        status: u16,
        body: Value,
    },
}

impl UpholdError {
    /// Numeric status in the engine's convention.
    ///
    /// `-1` for failures before any socket activity, `0` for transport failures,
    /// otherwise the status code the server actually returned.
    pub fn status_code(&self) -> i32 {
        match self {
            UpholdError::Configuration(_) | UpholdError::Encoding(_) => -1,
            UpholdError::Transport(_) => 0,
            UpholdError::Decoding { status, .. } | UpholdError::Domain { status, .. } => {
                i32::from(*status)
            }
        }
    }

    /// Raw response bytes, when the failure happened after a body was received
    pub fn raw_body(&self) -> Option<&[u8]> {
        match self {
            UpholdError::Decoding { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if the remote side answered with the given status
    pub fn is_status(&self, status: u16) -> bool {
        self.status_code() == i32::from(status)
    }

    pub(crate) fn decoding(status: u16, body: impl Into<Vec<u8>>, reason: impl ToString) -> Self {
        UpholdError::Decoding {
            status,
            body: body.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for Uphold operations
pub type Result<T> = std::result::Result<T, UpholdError>;

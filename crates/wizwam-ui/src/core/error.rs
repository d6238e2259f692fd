//! Errors raised while talking to the download service.

use thiserror::Error;

/// Message shown to users when a request fails before the server answers.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Request failures surfaced by an API client.
///
/// Server-side rejections are not errors here: they arrive as DTOs carrying an
/// `error` field so the caller can show the server's own wording.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network request failed: {0}")]
    Network(String),
    /// The request body could not be encoded.
    #[error("request encoding failed: {0}")]
    Encode(String),
    /// The response body was not the expected JSON.
    #[error("unexpected response (HTTP {status}): {detail}")]
    Decode {
        /// HTTP status of the response.
        status: u16,
        /// Decoder message.
        detail: String,
    },
}

impl ApiError {
    /// Short text suitable for a message panel.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) | Self::Encode(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Decode { status, .. } => format!("Unexpected response from server (HTTP {status})."),
        }
    }
}

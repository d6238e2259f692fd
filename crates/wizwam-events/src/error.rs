//! Event decoding error primitives.

use thiserror::Error;

/// Error emitted when a push payload cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventDecodeError {
    /// The payload of a known event did not match its shape.
    #[error("invalid `{event}` payload: {detail}")]
    Payload {
        /// Wire name of the event.
        event: String,
        /// Deserializer message.
        detail: String,
    },
}

impl EventDecodeError {
    /// Wire name of the event that failed to decode.
    #[must_use]
    pub fn event(&self) -> &str {
        match self {
            Self::Payload { event, .. } => event,
        }
    }
}

/// Result wrapper for event decoding.
pub type EventDecodeResult<T> = Result<T, EventDecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_exposes_event_name() {
        let err = EventDecodeError::Payload {
            event: "progress".into(),
            detail: "invalid type".into(),
        };
        assert_eq!(err.event(), "progress");
        assert_eq!(err.to_string(), "invalid `progress` payload: invalid type");
    }
}

#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]
//! Push-channel events emitted by the Wizwam download service.
//!
//! The server publishes named events (`progress`, `success`, `error`,
//! `connected`) over a persistent socket. This crate owns the payload shapes
//! and the mapping from an event name plus its JSON payload into a typed
//! [`PushEvent`]. Unknown event names are not an error; they decode to `None`
//! so newer servers can add events without breaking older clients.

mod error;
mod payloads;

pub use error::{EventDecodeError, EventDecodeResult};
pub use payloads::{FailureEvent, Phase, ProgressEvent, ServerHello, SuccessEvent};

use serde_json::Value;

/// Event name carrying download progress.
pub const PROGRESS: &str = "progress";
/// Event name carrying a completed download.
pub const SUCCESS: &str = "success";
/// Event name carrying a failed download.
pub const ERROR: &str = "error";
/// Event name sent by the server right after the socket connects.
pub const CONNECTED: &str = "connected";

/// Typed events surfaced to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    /// Server greeting with its version.
    Connected(ServerHello),
    /// Progress report for the running job.
    Progress(ProgressEvent),
    /// The running job finished and produced a file.
    Success(SuccessEvent),
    /// The running job failed.
    Failure(FailureEvent),
}

impl PushEvent {
    /// Machine-friendly discriminator matching the wire event name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Connected(_) => CONNECTED,
            Self::Progress(_) => PROGRESS,
            Self::Success(_) => SUCCESS,
            Self::Failure(_) => ERROR,
        }
    }

    /// Job identifier carried by the event, when the server supplied one.
    #[must_use]
    pub fn job_id(&self) -> Option<&str> {
        match self {
            Self::Connected(_) => None,
            Self::Progress(event) => event.job_id.as_deref(),
            Self::Success(event) => event.job_id.as_deref(),
            Self::Failure(event) => event.job_id.as_deref(),
        }
    }

    /// Decode a named event and its payload.
    ///
    /// Returns `Ok(None)` for event names this client does not consume.
    ///
    /// # Errors
    ///
    /// Returns [`EventDecodeError::Payload`] when a known event carries a
    /// payload that does not match its shape.
    pub fn from_named(name: &str, payload: Value) -> EventDecodeResult<Option<Self>> {
        let payload = normalise_payload(payload);
        let event = match name {
            PROGRESS => Self::Progress(decode(name, payload)?),
            SUCCESS => Self::Success(decode(name, payload)?),
            ERROR => Self::Failure(decode(name, payload)?),
            CONNECTED => Self::Connected(decode(name, payload)?),
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

fn decode<T: serde::de::DeserializeOwned>(name: &str, payload: Value) -> EventDecodeResult<T> {
    serde_json::from_value(payload).map_err(|source| EventDecodeError::Payload {
        event: name.to_string(),
        detail: source.to_string(),
    })
}

// Events emitted without arguments arrive as `null`.
fn normalise_payload(payload: Value) -> Value {
    if payload.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        payload
    }
}

//! Payload shapes for push-channel events.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Server-reported stage of a download job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    /// Fetching metadata before any bytes move.
    Initializing,
    /// Transferring media.
    #[default]
    Downloading,
    /// Muxing separate video and audio streams.
    Merging,
    /// Post-processing (re-encode, copy to storage).
    Processing,
    /// Any other stage name the server reports.
    Other(String),
}

impl Phase {
    /// Wire label for the phase.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Initializing => "initializing",
            Self::Downloading => "downloading",
            Self::Merging => "merging",
            Self::Processing => "processing",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Phase {
    fn from(value: &str) -> Self {
        match value {
            "" | "downloading" => Self::Downloading,
            "initializing" => Self::Initializing,
            "merging" => Self::Merging,
            "processing" => Self::Processing,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Phase {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Phase> for String {
    fn from(value: Phase) -> Self {
        value.as_str().to_string()
    }
}

/// Progress report for the active download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Job the report belongs to.
    #[serde(default)]
    pub job_id: Option<String>,
    /// Current stage; missing or empty means downloading.
    #[serde(default, deserialize_with = "phase_or_default")]
    pub phase: Phase,
    /// Completion percentage in the range 0–100.
    #[serde(default, deserialize_with = "percent_or_zero")]
    pub percent: f64,
    /// Human-readable status line formatted by the server.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub message: String,
}

/// Completed download announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SuccessEvent {
    /// Job that completed.
    #[serde(default)]
    pub job_id: Option<String>,
    /// File name of the produced media.
    #[serde(default)]
    pub filename: Option<String>,
    /// Server-side path of the produced media.
    #[serde(default)]
    pub filepath: Option<String>,
    /// Size as reported by the server (usually a formatted string).
    #[serde(default)]
    pub filesize: Option<Value>,
    /// Media title.
    #[serde(default)]
    pub title: Option<String>,
}

impl SuccessEvent {
    /// Display text for the reported size.
    #[must_use]
    pub fn filesize_label(&self) -> Option<String> {
        match self.filesize.as_ref()? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }
}

/// Failed download announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FailureEvent {
    /// Job that failed.
    #[serde(default)]
    pub job_id: Option<String>,
    /// Failure description.
    #[serde(default)]
    pub error: Option<String>,
}

/// Greeting sent by the server once the socket is connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServerHello {
    /// Server version string.
    #[serde(default)]
    pub version: Option<String>,
}

fn phase_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Phase, D::Error> {
    Ok(Option::<Phase>::deserialize(deserializer)?.unwrap_or_default())
}

fn percent_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

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
//! Shared HTTP DTOs for the Wizwam download service API.
//!
//! The server is authoritative for every field here; the client treats most
//! of them as optional because older servers omit keys rather than sending
//! `null`. Route builders live next to the DTOs so file names are escaped in
//! exactly one place.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// REST paths exposed by the download service.
pub mod paths {
    /// Start a download job.
    pub const DOWNLOAD: &str = "/api/download";
    /// List downloaded files.
    pub const FILES: &str = "/api/files";
    /// Run the configured macro against a file.
    pub const MACRO_RUN: &str = "/api/macro/run";
    /// Read server options (qualities, codecs, version).
    pub const CONFIG: &str = "/api/config";

    /// Per-file endpoint used for downloads (GET) and deletes (DELETE).
    #[must_use]
    pub fn file(filename: &str) -> String {
        format!("{FILES}/{}", urlencoding::encode(filename))
    }

    /// Player page for a file.
    #[must_use]
    pub fn viewer(filename: &str) -> String {
        format!("/view/{}", urlencoding::encode(filename))
    }
}

/// Status values the server uses to acknowledge a request.
pub mod status {
    /// Generic success acknowledgement.
    pub const SUCCESS: &str = "success";
    /// Download job accepted and running in the background.
    pub const STARTED: &str = "started";
}

/// Body of `POST /api/download`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Media page URL; validated by the server only.
    pub url: String,
    /// Quality preset key (for example `720p`).
    pub quality: String,
    /// Preferred video codec key.
    pub video_codec: String,
    /// Preferred audio codec key.
    pub audio_codec: String,
    /// Extract audio only.
    pub audio_only: bool,
}

/// Response of `POST /api/download`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DownloadResponse {
    /// `started` or `success` when the job was accepted.
    #[serde(default)]
    pub status: Option<String>,
    /// Identifier of the accepted job.
    #[serde(default)]
    pub job_id: Option<String>,
    /// Failure description when the job was rejected.
    #[serde(default)]
    pub error: Option<String>,
    /// Echo of the submitted URL.
    #[serde(default)]
    pub url: Option<String>,
}

impl DownloadResponse {
    /// Whether the server accepted the job.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(
            self.status.as_deref(),
            Some(status::SUCCESS | status::STARTED)
        )
    }
}

/// Response of `GET /api/files`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FileListResponse {
    /// Files in the download directory; absent means none.
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// One downloaded file as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FileRecord {
    /// File name (current servers).
    #[serde(default)]
    pub name: Option<String>,
    /// File name (older servers).
    #[serde(default)]
    pub filename: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Preformatted size label such as `12.3 MB`.
    #[serde(default)]
    pub size_mb: Option<String>,
    /// Modification time as a UNIX timestamp in seconds.
    #[serde(default)]
    pub modified: Option<f64>,
    /// A copy also exists on network storage.
    #[serde(default)]
    pub nas_copy: bool,
}

impl FileRecord {
    /// Name to display and act on: `name`, falling back to `filename`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.filename.as_deref())
            .unwrap_or_default()
    }
}

/// Body of `POST /api/macro/run`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroRunRequest {
    /// File the macro should process.
    pub filename: String,
}

/// Response of `POST /api/macro/run`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MacroRunResponse {
    /// `success` when the macro completed.
    #[serde(default)]
    pub status: Option<String>,
    /// Macro output.
    #[serde(default)]
    pub message: Option<String>,
    /// Shareable link produced by the macro.
    #[serde(default)]
    pub share_link: Option<String>,
    /// Failure description.
    #[serde(default)]
    pub error: Option<String>,
}

impl MacroRunResponse {
    /// Whether the macro completed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(status::SUCCESS)
    }
}

/// Response of `DELETE /api/files/{filename}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DeleteFileResponse {
    /// `success` when the file was removed.
    #[serde(default)]
    pub status: Option<String>,
    /// Confirmation text.
    #[serde(default)]
    pub message: Option<String>,
    /// Failure description.
    #[serde(default)]
    pub error: Option<String>,
}

impl DeleteFileResponse {
    /// Whether the file was removed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(status::SUCCESS)
    }
}

/// A selectable option: wire value plus display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Value sent to the server.
    pub value: String,
    /// Human-readable label.
    pub label: String,
}

impl ChoiceOption {
    /// Build an option from borrowed parts.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Response of `GET /api/config`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct ServerConfig {
    /// Server version.
    #[serde(default)]
    pub version: Option<String>,
    /// Quality preset keys, best first.
    #[serde(default)]
    pub qualities: Vec<String>,
    /// Video codec keys with descriptions, in server order.
    #[serde(default, deserialize_with = "ordered_choices")]
    pub video_codecs: Vec<ChoiceOption>,
    /// Audio codec keys with descriptions, in server order.
    #[serde(default, deserialize_with = "ordered_choices")]
    pub audio_codecs: Vec<ChoiceOption>,
}

// Codec maps are JSON objects; keep the server's key order instead of sorting.
fn ordered_choices<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<ChoiceOption>, D::Error> {
    struct ChoicesVisitor;

    impl<'de> Visitor<'de> for ChoicesVisitor {
        type Value = Vec<ChoiceOption>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("an object mapping option values to labels")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut choices = Vec::new();
            while let Some((value, label)) = map.next_entry::<String, String>()? {
                choices.push(ChoiceOption { value, label });
            }
            Ok(choices)
        }
    }

    deserializer.deserialize_map(ChoicesVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paths_escape_file_names() {
        assert_eq!(paths::file("a b#1.mp4"), "/api/files/a%20b%231.mp4");
        assert_eq!(paths::viewer("x/y.webm"), "/view/x%2Fy.webm");
    }

    #[test]
    fn download_response_accepts_started_and_success() {
        let started: DownloadResponse =
            serde_json::from_value(json!({"status": "started", "job_id": "abc"})).unwrap();
        assert!(started.is_accepted());
        let success: DownloadResponse =
            serde_json::from_value(json!({"status": "success"})).unwrap();
        assert!(success.is_accepted());
        let rejected: DownloadResponse =
            serde_json::from_value(json!({"error": "URL is required"})).unwrap();
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.error.as_deref(), Some("URL is required"));
    }

    #[test]
    fn file_record_prefers_name_then_filename() {
        let both: FileRecord =
            serde_json::from_value(json!({"name": "a.mp4", "filename": "b.mp4"})).unwrap();
        assert_eq!(both.display_name(), "a.mp4");
        let legacy: FileRecord = serde_json::from_value(json!({"filename": "b.mp4"})).unwrap();
        assert_eq!(legacy.display_name(), "b.mp4");
        assert_eq!(FileRecord::default().display_name(), "");
    }

    #[test]
    fn file_list_defaults_to_empty() {
        let list: FileListResponse = serde_json::from_value(json!({})).unwrap();
        assert!(list.files.is_empty());
    }

    #[test]
    fn server_config_keeps_codec_order() {
        let config: ServerConfig = serde_json::from_str(
            r#"{"version":"1.2.0","qualities":["1080p","720p"],
                "video_codecs":{"vp9":"VP9","avc1":"H.264"},
                "audio_codecs":{"opus":"Opus"}}"#,
        )
        .unwrap();
        assert_eq!(config.version.as_deref(), Some("1.2.0"));
        assert_eq!(
            config.video_codecs,
            vec![ChoiceOption::new("vp9", "VP9"), ChoiceOption::new("avc1", "H.264")]
        );
        assert_eq!(config.audio_codecs.len(), 1);
    }

    #[test]
    fn action_responses_check_status() {
        let ok: MacroRunResponse =
            serde_json::from_value(json!({"status": "success", "share_link": "https://x"}))
                .unwrap();
        assert!(ok.is_success());
        let failed: DeleteFileResponse =
            serde_json::from_value(json!({"status": "error", "error": "File not found"})).unwrap();
        assert!(!failed.is_success());
    }
}

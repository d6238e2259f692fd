//! Injectable seams for the service API and the clipboard.
//!
//! # Design
//! - Flows in `features::*::actions` are generic over these traits so they
//!   run against fakes in host tests and against `gloo-net`/`web-sys` in the
//!   browser.
//! - Futures are `?Send`: everything runs on the single browser thread.

use async_trait::async_trait;
use wizwam_api_models::{
    DeleteFileResponse, DownloadRequest, DownloadResponse, FileListResponse, MacroRunResponse,
    ServerConfig,
};

use crate::core::error::ApiError;

/// Operations the UI needs from the download service.
#[async_trait(?Send)]
pub trait WizwamApi {
    /// `POST /api/download`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when no usable response was received.
    async fn start_download(&self, request: &DownloadRequest)
    -> Result<DownloadResponse, ApiError>;

    /// `GET /api/files`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when no usable response was received.
    async fn list_files(&self) -> Result<FileListResponse, ApiError>;

    /// `POST /api/macro/run`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when no usable response was received.
    async fn run_macro(&self, filename: &str) -> Result<MacroRunResponse, ApiError>;

    /// `DELETE /api/files/{filename}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when no usable response was received.
    async fn delete_file(&self, filename: &str) -> Result<DeleteFileResponse, ApiError>;

    /// `GET /api/config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when no usable response was received.
    async fn fetch_config(&self) -> Result<ServerConfig, ApiError>;
}

/// Write access to the system clipboard.
#[async_trait(?Send)]
pub trait ClipboardWriter {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns a description when the browser refuses the write.
    async fn write_text(&self, text: &str) -> Result<(), String>;
}

//! HTTP client for the download service (REST).

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use wizwam_api_models::{
    DeleteFileResponse, DownloadRequest, DownloadResponse, FileListResponse, MacroRunRequest,
    MacroRunResponse, ServerConfig, paths,
};

use crate::core::client::WizwamApi;
use crate::core::error::ApiError;

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub base_url: String,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    // Error bodies carry the same JSON shape as successes, so the status code
    // is only used for diagnostics.
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        response.json::<T>().await.map_err(|err| ApiError::Decode {
            status,
            detail: err.to_string(),
        })
    }

    async fn send(request: Request) -> Result<Response, ApiError> {
        request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))
    }
}

#[async_trait(?Send)]
impl WizwamApi for ApiClient {
    async fn start_download(
        &self,
        request: &DownloadRequest,
    ) -> Result<DownloadResponse, ApiError> {
        let req = Request::post(&self.url(paths::DOWNLOAD))
            .json(request)
            .map_err(|err| ApiError::Encode(err.to_string()))?;
        Self::read_json(Self::send(req).await?).await
    }

    async fn list_files(&self) -> Result<FileListResponse, ApiError> {
        let req = Request::get(&self.url(paths::FILES));
        Self::read_json(Self::send(req).await?).await
    }

    async fn run_macro(&self, filename: &str) -> Result<MacroRunResponse, ApiError> {
        let req = Request::post(&self.url(paths::MACRO_RUN))
            .json(&MacroRunRequest {
                filename: filename.to_string(),
            })
            .map_err(|err| ApiError::Encode(err.to_string()))?;
        Self::read_json(Self::send(req).await?).await
    }

    async fn delete_file(&self, filename: &str) -> Result<DeleteFileResponse, ApiError> {
        let req = Request::delete(&self.url(&paths::file(filename)));
        Self::read_json(Self::send(req).await?).await
    }

    async fn fetch_config(&self) -> Result<ServerConfig, ApiError> {
        let req = Request::get(&self.url(paths::CONFIG));
        Self::read_json(Self::send(req).await?).await
    }
}

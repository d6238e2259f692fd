//! Download submit flow.

use wizwam_api_models::DownloadRequest;

use crate::core::client::WizwamApi;
use crate::core::error::ApiError;
use crate::features::download::state::DEFAULT_FAILURE;

/// Result of `POST /api/download`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Job accepted; progress arrives on the push channel.
    Started {
        /// Job identifier, when the server returned one.
        job_id: Option<String>,
    },
    /// Server answered but refused the job.
    Rejected {
        /// Server-provided reason.
        error: Option<String>,
    },
    /// No usable answer.
    Failed(ApiError),
}

impl SubmitOutcome {
    /// Text for the failure panel; `None` for an accepted job.
    #[must_use]
    pub fn failure_text(&self) -> Option<String> {
        match self {
            Self::Started { .. } => None,
            Self::Rejected { error } => Some(
                error
                    .clone()
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
            ),
            Self::Failed(err) => Some(err.user_message()),
        }
    }
}

/// Send the download request and classify the answer.
pub async fn submit_download<A>(api: &A, request: &DownloadRequest) -> SubmitOutcome
where
    A: WizwamApi + ?Sized,
{
    match api.start_download(request).await {
        Ok(response) if response.is_accepted() => SubmitOutcome::Started {
            job_id: response.job_id,
        },
        Ok(response) => SubmitOutcome::Rejected {
            error: response.error,
        },
        Err(err) => SubmitOutcome::Failed(err),
    }
}

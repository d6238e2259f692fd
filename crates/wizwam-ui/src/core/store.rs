//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Use small, focused slices so reducers stay predictable.
//! - Push events are applied by a pure reducer that reports which timers to
//!   arm and whether the catalog needs a reload; the wasm layer acts on it.

use wizwam_events::PushEvent;
use yewdux::store::Store;

use crate::core::connection::ConnectionStatus;
use crate::core::schedule::Deadline;
use crate::features::download::actions::SubmitOutcome;
use crate::features::download::state::{
    DownloadButtonState, DownloadOptions, apply_failure, apply_progress, apply_success,
    failure_panel, record_job, success_panel, url_edited,
};
use crate::features::files::state::CatalogState;
use crate::features::messages::state::{MessageState, hide_now, show_panel};
use crate::features::modal::state::{ModalId, ModalSpec};

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Download button and progress.
    pub download: DownloadButtonState,
    /// Form option lists and selection.
    pub options: DownloadOptions,
    /// Message panel.
    pub messages: MessageState,
    /// File catalog cache, search and sort.
    pub catalog: CatalogState,
    /// Push channel status.
    pub connection: ConnectionStatus,
    /// Dialog currently on screen.
    pub modal: Option<ModalView>,
}

/// Render snapshot of the open dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalView {
    /// Dialog id for press/dismiss routing.
    pub id: ModalId,
    /// What to draw.
    pub spec: ModalSpec<bool>,
}

/// Follow-up work after a push event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PushOutcome {
    /// Button revert to schedule.
    pub revert: Option<Deadline>,
    /// Panel hide to schedule.
    pub panel: Option<Deadline>,
    /// Catalog must be reloaded.
    pub reload: bool,
}

/// Apply a push event to the store.
pub fn apply_push_event(store: &mut AppStore, event: &PushEvent) -> PushOutcome {
    match event {
        PushEvent::Connected(hello) => {
            if hello.version.is_some() {
                store.options.server_version.clone_from(&hello.version);
            }
            PushOutcome::default()
        }
        PushEvent::Progress(progress) => {
            apply_progress(&mut store.download, progress);
            PushOutcome::default()
        }
        PushEvent::Success(success) => PushOutcome {
            revert: Some(apply_success(&mut store.download, success)),
            panel: Some(show_panel(&mut store.messages, success_panel(success))),
            reload: true,
        },
        PushEvent::Failure(failure) => PushOutcome {
            revert: Some(apply_failure(&mut store.download)),
            panel: Some(show_panel(
                &mut store.messages,
                failure_panel(failure.error.as_deref()),
            )),
            reload: false,
        },
    }
}

/// URL field edited; a finished download clears the button and the panel.
/// Returns whether anything changed.
pub fn apply_url_edit(store: &mut AppStore) -> bool {
    if !url_edited(&mut store.download) {
        return false;
    }
    hide_now(&mut store.messages);
    true
}

/// Apply the answer to a submit.
pub fn apply_submit_outcome(store: &mut AppStore, outcome: &SubmitOutcome) -> PushOutcome {
    if let SubmitOutcome::Started { job_id } = outcome {
        record_job(&mut store.download, job_id.clone());
        return PushOutcome::default();
    }
    let text = outcome.failure_text();
    PushOutcome {
        revert: Some(apply_failure(&mut store.download)),
        panel: Some(show_panel(
            &mut store.messages,
            failure_panel(text.as_deref()),
        )),
        reload: false,
    }
}

/// Whether `event` belongs to a different job than the one last submitted.
#[must_use]
pub fn is_foreign_job(store: &AppStore, event: &PushEvent) -> bool {
    match (store.download.job_id.as_deref(), event.job_id()) {
        (Some(current), Some(incoming)) => current != incoming,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{ApiError, NETWORK_ERROR_MESSAGE};
    use crate::features::download::state::{
        ButtonPhase, DEFAULT_FAILURE, ERROR_LABEL, ERROR_REVERT_MS, SUCCESS_REVERT_MS,
        begin_submit,
    };
    use crate::features::messages::state::{ERROR_PANEL_MS, PanelKind, PanelLine, SUCCESS_PANEL_MS};
    use wizwam_events::{FailureEvent, Phase, ProgressEvent, ServerHello, SuccessEvent};

    #[test]
    fn success_event_arms_both_timers_and_reloads() {
        let mut store = AppStore::default();
        begin_submit(&mut store.download);
        let outcome = apply_push_event(
            &mut store,
            &PushEvent::Success(SuccessEvent {
                filename: Some("a.mp4".into()),
                ..SuccessEvent::default()
            }),
        );
        assert!(outcome.reload);
        assert_eq!(outcome.revert.map(|d| d.after_ms), Some(SUCCESS_REVERT_MS));
        assert_eq!(outcome.panel.map(|d| d.after_ms), Some(SUCCESS_PANEL_MS));
        assert_eq!(store.download.phase, ButtonPhase::Success);
        assert!(store.messages.visible);
    }

    #[test]
    fn failure_event_shows_error_without_reload() {
        let mut store = AppStore::default();
        let outcome = apply_push_event(
            &mut store,
            &PushEvent::Failure(FailureEvent {
                job_id: None,
                error: Some("HTTP Error 403".into()),
            }),
        );
        assert!(!outcome.reload);
        assert_eq!(outcome.revert.map(|d| d.after_ms), Some(ERROR_REVERT_MS));
        assert_eq!(outcome.panel.map(|d| d.after_ms), Some(ERROR_PANEL_MS));
        assert_eq!(
            store.messages.panel.as_ref().map(|panel| panel.kind),
            Some(PanelKind::Error)
        );
    }

    #[test]
    fn progress_and_hello_need_no_timers() {
        let mut store = AppStore::default();
        let outcome = apply_push_event(
            &mut store,
            &PushEvent::Progress(ProgressEvent {
                job_id: None,
                phase: Phase::Merging,
                percent: 99.0,
                message: String::new(),
            }),
        );
        assert_eq!(outcome, PushOutcome::default());
        assert_eq!(store.download.phase, ButtonPhase::Downloading);

        apply_push_event(
            &mut store,
            &PushEvent::Connected(ServerHello {
                version: Some("3.0.1".into()),
            }),
        );
        assert_eq!(store.options.server_version.as_deref(), Some("3.0.1"));
    }

    #[test]
    fn foreign_job_detection_needs_both_ids() {
        let mut store = AppStore::default();
        let event = PushEvent::Progress(ProgressEvent {
            job_id: Some("other".into()),
            phase: Phase::Downloading,
            percent: 1.0,
            message: String::new(),
        });
        assert!(!is_foreign_job(&store, &event));
        record_job(&mut store.download, Some("mine".into()));
        assert!(is_foreign_job(&store, &event));
        record_job(&mut store.download, Some("other".into()));
        assert!(!is_foreign_job(&store, &event));
    }

    #[test]
    fn url_edit_after_finish_hides_panel() {
        let mut store = AppStore::default();
        apply_push_event(
            &mut store,
            &PushEvent::Success(SuccessEvent::default()),
        );
        assert!(store.messages.visible);
        assert!(apply_url_edit(&mut store));
        assert_eq!(store.download.phase, ButtonPhase::Idle);
        assert!(!store.messages.visible);
    }

    #[test]
    fn url_edit_while_downloading_keeps_everything() {
        let mut store = AppStore::default();
        begin_submit(&mut store.download);
        store.messages.visible = true;
        assert!(!apply_url_edit(&mut store));
        assert_eq!(store.download.phase, ButtonPhase::Downloading);
        assert!(store.messages.visible);
    }

    #[test]
    fn accepted_submit_records_job_without_timers() {
        let mut store = AppStore::default();
        begin_submit(&mut store.download);
        let outcome = apply_submit_outcome(
            &mut store,
            &SubmitOutcome::Started {
                job_id: Some("job-7".into()),
            },
        );
        assert_eq!(outcome, PushOutcome::default());
        assert_eq!(store.download.job_id.as_deref(), Some("job-7"));
        assert_eq!(store.download.phase, ButtonPhase::Downloading);
        assert!(!store.messages.visible);
    }

    #[test]
    fn rejected_submit_shows_error_button_and_panel() {
        let mut store = AppStore::default();
        begin_submit(&mut store.download);
        let outcome = apply_submit_outcome(
            &mut store,
            &SubmitOutcome::Rejected { error: None },
        );
        assert_eq!(outcome.revert.map(|d| d.after_ms), Some(ERROR_REVERT_MS));
        assert_eq!(outcome.panel.map(|d| d.after_ms), Some(ERROR_PANEL_MS));
        assert!(!outcome.reload);
        assert_eq!(store.download.phase, ButtonPhase::Error);
        assert_eq!(store.download.label, ERROR_LABEL);
        let panel = store.messages.panel.clone().unwrap();
        assert_eq!(panel.kind, PanelKind::Error);
        assert_eq!(panel.lines, vec![PanelLine::Text(DEFAULT_FAILURE.into())]);
    }

    #[test]
    fn network_failure_on_submit_uses_generic_message() {
        let mut store = AppStore::default();
        begin_submit(&mut store.download);
        let outcome = apply_submit_outcome(
            &mut store,
            &SubmitOutcome::Failed(ApiError::Network("connection refused".into())),
        );
        assert!(outcome.revert.is_some());
        assert!(store.messages.visible);
        let panel = store.messages.panel.clone().unwrap();
        assert_eq!(
            panel.lines,
            vec![PanelLine::Text(NETWORK_ERROR_MESSAGE.into())]
        );
    }
}

//! Download button state machine, form options and result panels.
//!
//! # Design
//! - The button is a single state machine driven by submit, push events and
//!   URL edits. Entering any state bumps `epoch`; timed reverts carry the
//!   epoch they were scheduled for and are ignored once it moves on.
//! - Every push event is applied regardless of `job_id`: the server runs one
//!   job at a time.
//! - Option lists start from built-in defaults and are replaced by the server
//!   config when it arrives; the current selection is reconciled against the
//!   new lists.

use wizwam_api_models::{ChoiceOption, DownloadRequest, ServerConfig};
use wizwam_events::{Phase, ProgressEvent, SuccessEvent};

use crate::core::preferences::FormDefaults;
use crate::core::schedule::Deadline;
use crate::features::messages::state::MessagePanel;

/// Success state lasts this long before the button returns to idle.
pub const SUCCESS_REVERT_MS: u32 = 3_000;
/// Error state lasts this long before the button returns to idle.
pub const ERROR_REVERT_MS: u32 = 4_000;

/// Idle button text.
pub const IDLE_LABEL: &str = "Download";
/// Text shown right after submit and during the initializing phase.
pub const INITIALIZING_LABEL: &str = "Initializing download...";
/// Text for the merging phase.
pub const MERGING_LABEL: &str = "Merging video and audio...";
/// Text for the processing phase.
pub const PROCESSING_LABEL: &str = "Processing...";
/// Error text on the button.
pub const ERROR_LABEL: &str = "✗ Error";
/// Fallback failure text when the server gives none.
pub const DEFAULT_FAILURE: &str = "Download failed";

/// Visual phase of the download button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonPhase {
    /// Ready for a submit.
    #[default]
    Idle,
    /// Job running; button disabled.
    Downloading,
    /// Job finished.
    Success,
    /// Job failed or was rejected.
    Error,
}

impl ButtonPhase {
    /// CSS modifier.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Downloading => "downloading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// The button only refuses clicks while a job runs.
    #[must_use]
    pub const fn is_disabled(self) -> bool {
        matches!(self, Self::Downloading)
    }
}

/// Download button slice of the app store.
#[derive(Clone, Debug, PartialEq)]
pub struct DownloadButtonState {
    /// Visual phase.
    pub phase: ButtonPhase,
    /// Progress fill, 0–100.
    pub percent: f64,
    /// Button text.
    pub label: String,
    /// Bumped on every state entry.
    pub epoch: u64,
    /// Job id returned by the last accepted submit.
    pub job_id: Option<String>,
}

impl Default for DownloadButtonState {
    fn default() -> Self {
        Self {
            phase: ButtonPhase::Idle,
            percent: 0.0,
            label: IDLE_LABEL.to_string(),
            epoch: 0,
            job_id: None,
        }
    }
}

impl DownloadButtonState {
    fn enter(&mut self, phase: ButtonPhase, percent: f64, label: String) -> u64 {
        self.phase = phase;
        self.percent = percent;
        self.label = label;
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }
}

/// Button text for a progress event.
#[must_use]
pub fn progress_label(event: &ProgressEvent) -> String {
    match &event.phase {
        Phase::Downloading if event.message.contains('%') => {
            format!("Downloading: {}", event.message)
        }
        Phase::Initializing => INITIALIZING_LABEL.to_string(),
        Phase::Merging => MERGING_LABEL.to_string(),
        Phase::Processing => PROCESSING_LABEL.to_string(),
        other => format!("{}: {:.1}%", other.as_str(), round_tenths(event.percent)),
    }
}

// Ties round away from zero, as browsers do for `toFixed(1)`.
fn round_tenths(percent: f64) -> f64 {
    (percent * 10.0).round() / 10.0
}

/// Success text on the button.
#[must_use]
pub fn success_label(event: &SuccessEvent) -> String {
    let name = event
        .filename
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or("Complete");
    format!("✓ Downloaded: {name}")
}

/// Submit pressed: show the initializing state at 0%.
pub fn begin_submit(state: &mut DownloadButtonState) -> u64 {
    state.job_id = None;
    state.enter(ButtonPhase::Downloading, 0.0, INITIALIZING_LABEL.to_string())
}

/// Remember the job id of an accepted submit.
pub fn record_job(state: &mut DownloadButtonState, job_id: Option<String>) {
    state.job_id = job_id;
}

/// Apply a progress event. Always lands in `Downloading`.
pub fn apply_progress(state: &mut DownloadButtonState, event: &ProgressEvent) -> u64 {
    state.enter(ButtonPhase::Downloading, event.percent, progress_label(event))
}

/// Apply a success event and return the revert deadline.
pub fn apply_success(state: &mut DownloadButtonState, event: &SuccessEvent) -> Deadline {
    let epoch = state.enter(ButtonPhase::Success, 100.0, success_label(event));
    Deadline::new(epoch, SUCCESS_REVERT_MS)
}

/// Apply a failure (push event, rejection or network error).
pub fn apply_failure(state: &mut DownloadButtonState) -> Deadline {
    let epoch = state.enter(ButtonPhase::Error, 100.0, ERROR_LABEL.to_string());
    Deadline::new(epoch, ERROR_REVERT_MS)
}

/// Timer callback: revert to idle unless the state moved on since `epoch`.
pub fn revert_to_idle(state: &mut DownloadButtonState, epoch: u64) -> bool {
    if state.epoch != epoch || !matches!(state.phase, ButtonPhase::Success | ButtonPhase::Error) {
        return false;
    }
    state.enter(ButtonPhase::Idle, 0.0, IDLE_LABEL.to_string());
    true
}

/// URL field edited. Clears a finished state immediately; returns whether the
/// message panel should be hidden too.
pub fn url_edited(state: &mut DownloadButtonState) -> bool {
    if !matches!(state.phase, ButtonPhase::Success | ButtonPhase::Error) {
        return false;
    }
    state.enter(ButtonPhase::Idle, 0.0, IDLE_LABEL.to_string());
    true
}

/// Panel for a completed download.
#[must_use]
pub fn success_panel(event: &SuccessEvent) -> MessagePanel {
    let name = event
        .filename
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or("Unknown");
    let size = event.filesize_label().unwrap_or_else(|| "Unknown".to_string());
    MessagePanel::success("✓ Download Complete!")
        .text(format!("File: {name}"))
        .text(format!("Size: {size}"))
}

/// Panel for a failed or rejected download.
#[must_use]
pub fn failure_panel(error: Option<&str>) -> MessagePanel {
    let error = error.filter(|text| !text.is_empty()).unwrap_or(DEFAULT_FAILURE);
    MessagePanel::error("✗ Download Failed").text(error)
}

/// Quality presets offered before the server config loads.
pub const BUILTIN_QUALITIES: [&str; 5] = ["4k", "1080p", "720p", "480p", "360p"];
/// Default quality preset.
pub const DEFAULT_QUALITY: &str = "720p";
/// Default video codec.
pub const DEFAULT_VIDEO_CODEC: &str = "avc1";
/// Default audio codec.
pub const DEFAULT_AUDIO_CODEC: &str = "m4a";

/// Current form selection (URL lives in the view).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSelection {
    /// Quality preset.
    pub quality: String,
    /// Video codec.
    pub video_codec: String,
    /// Audio codec.
    pub audio_codec: String,
    /// Audio-only flag.
    pub audio_only: bool,
}

impl Default for FormSelection {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY.to_string(),
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            audio_only: false,
        }
    }
}

impl FormSelection {
    /// Build the request body for `url`. Returns `None` for a blank URL.
    #[must_use]
    pub fn to_request(&self, url: &str) -> Option<DownloadRequest> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        Some(DownloadRequest {
            url: url.to_string(),
            quality: self.quality.clone(),
            video_codec: self.video_codec.clone(),
            audio_codec: self.audio_codec.clone(),
            audio_only: self.audio_only,
        })
    }
}

/// Option lists and selection for the download form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Quality presets.
    pub qualities: Vec<ChoiceOption>,
    /// Video codecs.
    pub video_codecs: Vec<ChoiceOption>,
    /// Audio codecs.
    pub audio_codecs: Vec<ChoiceOption>,
    /// Server version from config or the `connected` event.
    pub server_version: Option<String>,
    /// Current selection.
    pub selection: FormSelection,
    /// Saved defaults, re-applied after the option lists change.
    pub preferred: FormDefaults,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            qualities: BUILTIN_QUALITIES
                .iter()
                .map(|quality| ChoiceOption::new(quality, &quality_label(quality)))
                .collect(),
            video_codecs: vec![
                ChoiceOption::new("avc1", "H.264 (best compatibility)"),
                ChoiceOption::new("av1", "AV1 (best compression)"),
                ChoiceOption::new("vp9", "VP9"),
            ],
            audio_codecs: vec![
                ChoiceOption::new("m4a", "AAC / M4A"),
                ChoiceOption::new("opus", "Opus"),
                ChoiceOption::new("mp3", "MP3"),
            ],
            server_version: None,
            selection: FormSelection::default(),
            preferred: FormDefaults::default(),
        }
    }
}

/// Display label for a quality key (`4k` → `4K`).
#[must_use]
pub fn quality_label(quality: &str) -> String {
    if quality.eq_ignore_ascii_case("4k") {
        "4K".to_string()
    } else {
        quality.to_string()
    }
}

fn pick(options: &[ChoiceOption], current: &str, preferred: Option<&str>, fallback: &str) -> String {
    let has = |value: &str| options.iter().any(|option| option.value == value);
    [preferred, Some(current), Some(fallback)]
        .into_iter()
        .flatten()
        .find(|value| has(*value))
        .map(ToString::to_string)
        .or_else(|| options.first().map(|option| option.value.clone()))
        .unwrap_or_else(|| current.to_string())
}

fn reconcile(options: &mut DownloadOptions, prefer_saved: bool) {
    let saved = |value: &Option<String>| {
        if prefer_saved {
            value.clone()
        } else {
            None
        }
    };
    let quality = saved(&options.preferred.quality);
    let video = saved(&options.preferred.video_codec);
    let audio = saved(&options.preferred.audio_codec);
    options.selection.quality = pick(
        &options.qualities,
        &options.selection.quality,
        quality.as_deref(),
        DEFAULT_QUALITY,
    );
    options.selection.video_codec = pick(
        &options.video_codecs,
        &options.selection.video_codec,
        video.as_deref(),
        DEFAULT_VIDEO_CODEC,
    );
    options.selection.audio_codec = pick(
        &options.audio_codecs,
        &options.selection.audio_codec,
        audio.as_deref(),
        DEFAULT_AUDIO_CODEC,
    );
}

/// Apply saved defaults to the selection.
pub fn apply_preferences(options: &mut DownloadOptions, defaults: FormDefaults) {
    options.preferred = defaults;
    reconcile(options, true);
}

/// Replace option lists from the server config. Empty lists keep the
/// built-ins; the selection keeps the user's choice when it still exists.
pub fn apply_server_config(options: &mut DownloadOptions, config: ServerConfig) {
    if !config.qualities.is_empty() {
        options.qualities = config
            .qualities
            .iter()
            .map(|quality| ChoiceOption::new(quality, &quality_label(quality)))
            .collect();
    }
    if !config.video_codecs.is_empty() {
        options.video_codecs = config.video_codecs;
    }
    if !config.audio_codecs.is_empty() {
        options.audio_codecs = config.audio_codecs;
    }
    if config.version.is_some() {
        options.server_version = config.version;
    }
    reconcile(options, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::messages::state::PanelLine;
    use serde_json::json;

    fn progress(phase: Phase, percent: f64, message: &str) -> ProgressEvent {
        ProgressEvent {
            job_id: None,
            phase,
            percent,
            message: message.to_string(),
        }
    }

    #[test]
    fn progress_labels_follow_phase() {
        assert_eq!(
            progress_label(&progress(Phase::Downloading, 49.2, "49.2% of 40.94MiB")),
            "Downloading: 49.2% of 40.94MiB"
        );
        assert_eq!(
            progress_label(&progress(Phase::Downloading, 3.0, "")),
            "downloading: 3.0%"
        );
        assert_eq!(
            progress_label(&progress(Phase::Initializing, 0.0, "")),
            INITIALIZING_LABEL
        );
        assert_eq!(progress_label(&progress(Phase::Merging, 99.0, "")), MERGING_LABEL);
        assert_eq!(
            progress_label(&progress(Phase::Processing, 99.0, "x%")),
            PROCESSING_LABEL
        );
        assert_eq!(
            progress_label(&progress(Phase::Other("extracting".into()), 12.34, "")),
            "extracting: 12.3%"
        );
    }

    #[test]
    fn percent_ties_round_up() {
        assert_eq!(
            progress_label(&progress(Phase::Other("extracting".into()), 12.25, "")),
            "extracting: 12.3%"
        );
        assert_eq!(
            progress_label(&progress(Phase::Other("extracting".into()), 0.05, "")),
            "extracting: 0.1%"
        );
    }

    #[test]
    fn each_phase_has_one_class_and_only_downloading_disables() {
        let table = [
            (ButtonPhase::Idle, "idle", false),
            (ButtonPhase::Downloading, "downloading", true),
            (ButtonPhase::Success, "success", false),
            (ButtonPhase::Error, "error", false),
        ];
        for (phase, class, disabled) in table {
            assert_eq!(phase.css_class(), class);
            assert_eq!(phase.is_disabled(), disabled, "{phase:?}");
        }
        let classes: std::collections::HashSet<_> =
            table.iter().map(|(phase, _, _)| phase.css_class()).collect();
        assert_eq!(classes.len(), table.len());
    }

    #[test]
    fn submit_then_success_then_revert() {
        let mut state = DownloadButtonState::default();
        begin_submit(&mut state);
        assert_eq!(state.phase, ButtonPhase::Downloading);
        assert!(state.phase.is_disabled());
        assert_eq!(state.label, INITIALIZING_LABEL);
        assert!(state.percent.abs() < f64::EPSILON);

        let deadline = apply_success(
            &mut state,
            &SuccessEvent {
                filename: Some("clip.mp4".into()),
                ..SuccessEvent::default()
            },
        );
        assert_eq!(deadline.after_ms, SUCCESS_REVERT_MS);
        assert_eq!(state.label, "✓ Downloaded: clip.mp4");
        assert!(!state.phase.is_disabled());

        assert!(revert_to_idle(&mut state, deadline.epoch));
        assert_eq!(state.phase, ButtonPhase::Idle);
        assert_eq!(state.label, IDLE_LABEL);
        assert!(state.percent.abs() < f64::EPSILON);
    }

    #[test]
    fn stale_revert_is_ignored_after_new_submit() {
        let mut state = DownloadButtonState::default();
        let deadline = apply_failure(&mut state);
        assert_eq!(deadline.after_ms, ERROR_REVERT_MS);
        assert_eq!(state.label, ERROR_LABEL);
        begin_submit(&mut state);
        assert!(!revert_to_idle(&mut state, deadline.epoch));
        assert_eq!(state.phase, ButtonPhase::Downloading);
    }

    #[test]
    fn progress_after_success_returns_to_downloading() {
        let mut state = DownloadButtonState::default();
        let deadline = apply_success(&mut state, &SuccessEvent::default());
        assert_eq!(state.label, "✓ Downloaded: Complete");
        apply_progress(&mut state, &progress(Phase::Downloading, 10.0, "10%"));
        assert_eq!(state.phase, ButtonPhase::Downloading);
        assert!(!revert_to_idle(&mut state, deadline.epoch));
    }

    #[test]
    fn url_edit_only_clears_finished_states() {
        let mut state = DownloadButtonState::default();
        assert!(!url_edited(&mut state));
        begin_submit(&mut state);
        assert!(!url_edited(&mut state));
        assert_eq!(state.phase, ButtonPhase::Downloading);
        let deadline = apply_failure(&mut state);
        assert!(url_edited(&mut state));
        assert_eq!(state.phase, ButtonPhase::Idle);
        assert!(!revert_to_idle(&mut state, deadline.epoch));
    }

    #[test]
    fn result_panels_fill_fallbacks() {
        let panel = success_panel(&SuccessEvent {
            filename: Some("a.mp4".into()),
            filesize: Some(json!("12.0 MB")),
            ..SuccessEvent::default()
        });
        assert_eq!(panel.title, "✓ Download Complete!");
        assert_eq!(
            panel.lines,
            vec![
                PanelLine::Text("File: a.mp4".into()),
                PanelLine::Text("Size: 12.0 MB".into())
            ]
        );
        let unknown = success_panel(&SuccessEvent::default());
        assert_eq!(unknown.lines[0], PanelLine::Text("File: Unknown".into()));
        assert_eq!(unknown.lines[1], PanelLine::Text("Size: Unknown".into()));

        let failed = failure_panel(None);
        assert_eq!(failed.title, "✗ Download Failed");
        assert_eq!(failed.lines, vec![PanelLine::Text(DEFAULT_FAILURE.into())]);
        let explained = failure_panel(Some("Unsupported URL"));
        assert_eq!(explained.lines, vec![PanelLine::Text("Unsupported URL".into())]);
    }

    #[test]
    fn blank_url_builds_no_request() {
        let selection = FormSelection::default();
        assert!(selection.to_request("   ").is_none());
        let request = selection.to_request(" https://v.example/x ").unwrap();
        assert_eq!(request.url, "https://v.example/x");
        assert_eq!(request.quality, DEFAULT_QUALITY);
        assert!(!request.audio_only);
    }

    #[test]
    fn saved_defaults_apply_when_offered() {
        let mut options = DownloadOptions::default();
        apply_preferences(
            &mut options,
            FormDefaults {
                quality: Some("1080p".into()),
                video_codec: Some("h265".into()),
                audio_codec: Some("opus".into()),
            },
        );
        assert_eq!(options.selection.quality, "1080p");
        assert_eq!(options.selection.video_codec, DEFAULT_VIDEO_CODEC);
        assert_eq!(options.selection.audio_codec, "opus");
    }

    #[test]
    fn server_config_replaces_lists_and_keeps_valid_choice() {
        let mut options = DownloadOptions::default();
        options.selection.quality = "480p".into();
        apply_server_config(
            &mut options,
            ServerConfig {
                version: Some("2.1.0".into()),
                qualities: vec!["1080p".into(), "480p".into()],
                video_codecs: vec![ChoiceOption::new("vp9", "VP9")],
                audio_codecs: Vec::new(),
            },
        );
        assert_eq!(options.qualities.len(), 2);
        assert_eq!(options.selection.quality, "480p");
        assert_eq!(options.selection.video_codec, "vp9");
        assert_eq!(options.selection.audio_codec, DEFAULT_AUDIO_CODEC);
        assert_eq!(options.audio_codecs.len(), 3);
        assert_eq!(options.server_version.as_deref(), Some("2.1.0"));
    }

    #[test]
    fn quality_labels_uppercase_4k() {
        assert_eq!(quality_label("4k"), "4K");
        assert_eq!(quality_label("720p"), "720p");
    }
}

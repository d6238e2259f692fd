//! Per-file action flows.
//!
//! # Design
//! - Each action is confirm → request → outcome. Flows never touch the DOM or
//!   the store; they return an [`ActionOutcome`] the app layer applies.
//! - View and download are plain navigations and need no request.

use wizwam_api_models::paths;

use crate::core::client::{ClipboardWriter, WizwamApi};
use crate::features::messages::state::MessagePanel;
use crate::features::modal::state::{ButtonTone, CONFIRM_TITLE, Dialogs, ModalButton, ModalSpec};

/// Macro success text when the server sends none.
pub const MACRO_DEFAULT_MESSAGE: &str = "File processed successfully";
/// Macro failure text when the server sends none.
pub const MACRO_DEFAULT_ERROR: &str = "Macro execution failed";
/// Delete failure text when the server sends none.
pub const DELETE_DEFAULT_ERROR: &str = "Failed to delete file.";

/// User action on a catalog row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileAction {
    /// Open the player page in a new tab.
    View(String),
    /// Run the server macro.
    RunMacro(String),
    /// Navigate to the raw file.
    Download(String),
    /// Delete after confirmation.
    Delete(String),
}

impl FileAction {
    /// File the action targets.
    #[must_use]
    pub fn filename(&self) -> &str {
        match self {
            Self::View(name) | Self::RunMacro(name) | Self::Download(name) | Self::Delete(name) => {
                name
            }
        }
    }

    /// Navigation target for actions that are plain links.
    #[must_use]
    pub fn navigation(&self) -> Option<Navigation> {
        match self {
            Self::View(name) => Some(Navigation::NewTab(paths::viewer(name))),
            Self::Download(name) => Some(Navigation::SameTab(paths::file(name))),
            Self::RunMacro(_) | Self::Delete(_) => None,
        }
    }
}

/// Browser navigation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// `window.open(url, "_blank")`.
    NewTab(String),
    /// `location.href = url`.
    SameTab(String),
}

/// What the app should do after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// User declined; nothing was sent.
    Cancelled,
    /// Request finished.
    Done {
        /// Panel to show, if any.
        panel: Option<MessagePanel>,
        /// Whether the catalog must be reloaded.
        reload: bool,
    },
}

impl ActionOutcome {
    fn panel(panel: MessagePanel, reload: bool) -> Self {
        Self::Done {
            panel: Some(panel),
            reload,
        }
    }
}

/// Confirmation text for the macro action.
#[must_use]
pub fn macro_prompt(filename: &str) -> String {
    format!("Run macro on {filename}?")
}

/// Delete confirmation dialog.
#[must_use]
pub fn delete_prompt(filename: &str) -> ModalSpec<bool> {
    ModalSpec {
        title: "🗑️ Delete File".to_string(),
        message: format!(
            "Are you sure you want to delete \"{filename}\"?\n\nThis action cannot be undone."
        ),
        buttons: vec![
            ModalButton::new("Cancel", false, ButtonTone::Neutral),
            ModalButton::new("Delete", true, ButtonTone::Danger),
        ],
    }
}

fn non_empty(text: Option<String>, fallback: &str) -> String {
    text.filter(|text| !text.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Confirm, run the macro, and copy any share link.
pub async fn run_macro<A, D, C>(api: &A, dialogs: &D, clipboard: &C, filename: &str) -> ActionOutcome
where
    A: WizwamApi + ?Sized,
    D: Dialogs + ?Sized,
    C: ClipboardWriter + ?Sized,
{
    if !dialogs.show_confirm(&macro_prompt(filename), CONFIRM_TITLE).await {
        return ActionOutcome::Cancelled;
    }
    let response = match api.run_macro(filename).await {
        Ok(response) => response,
        Err(err) => {
            return ActionOutcome::panel(
                MessagePanel::error("✗ Network Error").text(err.to_string()),
                false,
            );
        }
    };
    if !response.is_success() {
        return ActionOutcome::panel(
            MessagePanel::error("✗ Macro Failed").text(non_empty(response.error, MACRO_DEFAULT_ERROR)),
            false,
        );
    }

    let mut panel = MessagePanel::success("✓ Macro Complete!")
        .text(non_empty(response.message, MACRO_DEFAULT_MESSAGE));
    if let Some(link) = response.share_link.filter(|link| !link.is_empty()) {
        panel = match clipboard.write_text(&link).await {
            Ok(()) => panel.text("📋 Share link copied to clipboard:"),
            Err(_) => panel.text("Share link:"),
        }
        .code(link);
    }
    ActionOutcome::panel(panel, true)
}

/// Confirm and delete a file.
pub async fn delete_file<A, D>(api: &A, dialogs: &D, filename: &str) -> ActionOutcome
where
    A: WizwamApi + ?Sized,
    D: Dialogs + ?Sized,
{
    if dialogs.show_modal(delete_prompt(filename)).await != Some(true) {
        return ActionOutcome::Cancelled;
    }
    match api.delete_file(filename).await {
        Ok(response) if response.is_success() => {
            dialogs
                .show_success(&format!("File \"{filename}\" has been deleted."))
                .await;
            ActionOutcome::Done {
                panel: None,
                reload: true,
            }
        }
        Ok(response) => ActionOutcome::panel(
            MessagePanel::error("✗ Delete Failed")
                .text(non_empty(response.error, DELETE_DEFAULT_ERROR)),
            false,
        ),
        Err(err) => ActionOutcome::panel(
            MessagePanel::error("✗ Network Error").text(err.to_string()),
            false,
        ),
    }
}

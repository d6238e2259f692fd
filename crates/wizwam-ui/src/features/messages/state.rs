//! Message panel state.
//!
//! # Design
//! - One panel at a time; showing a new one replaces the old and bumps the
//!   epoch so the old hide timer becomes stale.
//! - Lines are typed (`Text`/`Code`) so views never splice markup.

use crate::core::schedule::Deadline;

/// How long a success panel stays visible.
pub const SUCCESS_PANEL_MS: u32 = 10_000;
/// How long an error panel stays visible.
pub const ERROR_PANEL_MS: u32 = 15_000;

/// Panel tone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelKind {
    /// Green confirmation.
    Success,
    /// Red failure.
    Error,
}

impl PanelKind {
    /// CSS modifier.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Auto-hide delay.
    #[must_use]
    pub const fn hide_after_ms(self) -> u32 {
        match self {
            Self::Success => SUCCESS_PANEL_MS,
            Self::Error => ERROR_PANEL_MS,
        }
    }
}

/// One body line of a panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelLine {
    /// Plain text.
    Text(String),
    /// Monospace text such as a link or path.
    Code(String),
}

/// Title plus body lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessagePanel {
    /// Tone.
    pub kind: PanelKind,
    /// Bold heading.
    pub title: String,
    /// Body lines in display order.
    pub lines: Vec<PanelLine>,
}

impl MessagePanel {
    /// Empty success panel.
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: PanelKind::Success,
            title: title.into(),
            lines: Vec::new(),
        }
    }

    /// Empty error panel.
    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self {
            kind: PanelKind::Error,
            title: title.into(),
            lines: Vec::new(),
        }
    }

    /// Append a text line.
    #[must_use]
    pub fn text(mut self, line: impl Into<String>) -> Self {
        self.lines.push(PanelLine::Text(line.into()));
        self
    }

    /// Append a code line.
    #[must_use]
    pub fn code(mut self, line: impl Into<String>) -> Self {
        self.lines.push(PanelLine::Code(line.into()));
        self
    }
}

/// Panel slice of the app store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageState {
    /// Last panel shown; kept after hiding so the fade-out has content.
    pub panel: Option<MessagePanel>,
    /// Whether the panel is on screen.
    pub visible: bool,
    /// Bumped on every show or hide.
    pub epoch: u64,
}

/// Show `panel` and return when to hide it.
pub fn show_panel(state: &mut MessageState, panel: MessagePanel) -> Deadline {
    let after_ms = panel.kind.hide_after_ms();
    state.panel = Some(panel);
    state.visible = true;
    state.epoch = state.epoch.wrapping_add(1);
    Deadline::new(state.epoch, after_ms)
}

/// Timer callback: hide only if nothing newer was shown since `epoch`.
pub fn hide_panel(state: &mut MessageState, epoch: u64) -> bool {
    if state.epoch != epoch || !state.visible {
        return false;
    }
    state.visible = false;
    true
}

/// Hide immediately, invalidating any pending timer.
pub fn hide_now(state: &mut MessageState) {
    state.visible = false;
    state.epoch = state.epoch.wrapping_add(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_returns_kind_specific_deadline() {
        let mut state = MessageState::default();
        let ok = show_panel(&mut state, MessagePanel::success("✓ Done").text("a"));
        assert_eq!(ok.after_ms, SUCCESS_PANEL_MS);
        assert!(state.visible);
        let err = show_panel(&mut state, MessagePanel::error("✗ Failed"));
        assert_eq!(err.after_ms, ERROR_PANEL_MS);
        assert_eq!(err.epoch, ok.epoch + 1);
        assert_eq!(state.panel.as_ref().map(|p| p.kind), Some(PanelKind::Error));
    }

    #[test]
    fn stale_hide_is_ignored() {
        let mut state = MessageState::default();
        let first = show_panel(&mut state, MessagePanel::success("one"));
        let second = show_panel(&mut state, MessagePanel::success("two"));
        assert!(!hide_panel(&mut state, first.epoch));
        assert!(state.visible);
        assert!(hide_panel(&mut state, second.epoch));
        assert!(!state.visible);
        assert!(!hide_panel(&mut state, second.epoch));
    }

    #[test]
    fn hide_now_invalidates_pending_timer() {
        let mut state = MessageState::default();
        let deadline = show_panel(&mut state, MessagePanel::error("x"));
        hide_now(&mut state);
        assert!(!state.visible);
        assert!(!hide_panel(&mut state, deadline.epoch));
    }

    #[test]
    fn builders_keep_line_order() {
        let panel = MessagePanel::success("t").text("first").code("https://x");
        assert_eq!(
            panel.lines,
            vec![
                PanelLine::Text("first".into()),
                PanelLine::Code("https://x".into())
            ]
        );
    }
}

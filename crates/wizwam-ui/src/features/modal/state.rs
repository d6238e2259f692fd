//! Modal dialog model.
//!
//! # Design
//! - A dialog is a spec (title, message, buttons) plus a one-shot channel the
//!   caller awaits. Button presses resolve with the button's value; Escape and
//!   overlay clicks resolve with `None`.
//! - [`ModalSlot`] holds at most one open dialog. Opening another cancels the
//!   current one with `None`, so every caller is answered exactly once.
//! - The slot also owns a guard (the Escape key listener in the browser) and
//!   drops it before sending the result.

use async_trait::async_trait;
use futures::channel::oneshot;

/// Default title for [`Dialogs::show_alert`].
pub const ALERT_TITLE: &str = "Notice";
/// Default title for [`Dialogs::show_confirm`].
pub const CONFIRM_TITLE: &str = "Confirm";
/// Title for [`Dialogs::show_success`].
pub const SUCCESS_TITLE: &str = "✓ Success";
/// Title for [`Dialogs::show_error`].
pub const ERROR_TITLE: &str = "✗ Error";

/// Visual emphasis of a modal button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonTone {
    /// Plain secondary button.
    #[default]
    Neutral,
    /// Default action.
    Primary,
    /// Destructive action.
    Danger,
}

impl ButtonTone {
    /// CSS modifier.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Neutral => "modal-btn-secondary",
            Self::Primary => "modal-btn-primary",
            Self::Danger => "modal-btn-danger",
        }
    }
}

/// One modal button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalButton<T> {
    /// Caption.
    pub label: String,
    /// Value the dialog resolves with when pressed.
    pub value: T,
    /// Emphasis.
    pub tone: ButtonTone,
}

impl<T> ModalButton<T> {
    /// Build a button.
    #[must_use]
    pub fn new(label: impl Into<String>, value: T, tone: ButtonTone) -> Self {
        Self {
            label: label.into(),
            value,
            tone,
        }
    }
}

/// Everything needed to render a dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalSpec<T> {
    /// Heading.
    pub title: String,
    /// Body; newlines are preserved.
    pub message: String,
    /// Buttons in display order.
    pub buttons: Vec<ModalButton<T>>,
}

impl ModalSpec<bool> {
    /// Single OK button resolving to `true`.
    #[must_use]
    pub fn alert(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            buttons: vec![ModalButton::new("OK", true, ButtonTone::Primary)],
        }
    }

    /// Cancel (`false`) and OK (`true`).
    #[must_use]
    pub fn confirm(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            buttons: vec![
                ModalButton::new("Cancel", false, ButtonTone::Neutral),
                ModalButton::new("OK", true, ButtonTone::Primary),
            ],
        }
    }
}

/// Identifier of an opened dialog.
pub type ModalId = u64;

/// Handle returned by [`ModalSlot::open`].
#[derive(Debug)]
pub struct PendingModal<T> {
    /// Dialog id; pass it back on press or dismiss.
    pub id: ModalId,
    /// Resolves once with the chosen value, or `None` when dismissed.
    pub result: oneshot::Receiver<Option<T>>,
}

impl<T> PendingModal<T> {
    /// Wait for the answer. A dropped slot counts as a dismissal.
    pub async fn outcome(self) -> Option<T> {
        self.result.await.ok().flatten()
    }
}

struct ActiveModal<T, G> {
    id: ModalId,
    spec: ModalSpec<T>,
    guard: Option<G>,
    resolver: oneshot::Sender<Option<T>>,
}

/// Holder for the single open dialog.
pub struct ModalSlot<T, G> {
    active: Option<ActiveModal<T, G>>,
    next_id: ModalId,
}

impl<T, G> Default for ModalSlot<T, G> {
    fn default() -> Self {
        Self {
            active: None,
            next_id: 1,
        }
    }
}

impl<T: Clone, G> ModalSlot<T, G> {
    /// Open `spec`, cancelling any dialog that is still open.
    pub fn open(&mut self, spec: ModalSpec<T>) -> PendingModal<T> {
        if let Some(current) = self.active.as_ref().map(|active| active.id) {
            self.resolve(current, None);
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        let (resolver, result) = oneshot::channel();
        self.active = Some(ActiveModal {
            id,
            spec,
            guard: None,
            resolver,
        });
        PendingModal { id, result }
    }

    /// Attach a guard to dialog `id`. A guard for a closed dialog is dropped
    /// immediately and `false` is returned.
    pub fn attach_guard(&mut self, id: ModalId, guard: G) -> bool {
        match self.active.as_mut() {
            Some(active) if active.id == id => {
                active.guard = Some(guard);
                true
            }
            _ => false,
        }
    }

    /// Currently open dialog.
    #[must_use]
    pub fn active(&self) -> Option<(ModalId, &ModalSpec<T>)> {
        self.active.as_ref().map(|active| (active.id, &active.spec))
    }

    /// Whether `id` is still open.
    #[must_use]
    pub fn is_open(&self, id: ModalId) -> bool {
        self.active.as_ref().is_some_and(|active| active.id == id)
    }

    /// Button `index` of dialog `id` pressed.
    pub fn press(&mut self, id: ModalId, index: usize) -> bool {
        let value = self
            .active
            .as_ref()
            .filter(|active| active.id == id)
            .and_then(|active| active.spec.buttons.get(index))
            .map(|button| button.value.clone());
        match value {
            Some(value) => self.resolve(id, Some(value)),
            None => false,
        }
    }

    /// Escape or overlay click on dialog `id`.
    pub fn dismiss(&mut self, id: ModalId) -> bool {
        self.resolve(id, None)
    }

    /// Key pressed while dialog `id` is open; only Escape dismisses.
    pub fn key(&mut self, id: ModalId, key: &str) -> bool {
        key == "Escape" && self.dismiss(id)
    }

    fn resolve(&mut self, id: ModalId, outcome: Option<T>) -> bool {
        if !self.is_open(id) {
            return false;
        }
        let Some(ActiveModal {
            guard, resolver, ..
        }) = self.active.take()
        else {
            return false;
        };
        drop(guard);
        // The caller may have stopped waiting; nothing to report then.
        let _ = resolver.send(outcome);
        true
    }
}

/// Dialog service used by the action flows.
#[async_trait(?Send)]
pub trait Dialogs {
    /// Show `spec` and wait for the answer.
    async fn show_modal(&self, spec: ModalSpec<bool>) -> Option<bool>;

    /// Informational dialog with a single OK button.
    async fn show_alert(&self, message: &str, title: &str) {
        let _ = self.show_modal(ModalSpec::alert(message, title)).await;
    }

    /// Cancel/OK dialog; only OK counts as consent.
    async fn show_confirm(&self, message: &str, title: &str) -> bool {
        self.show_modal(ModalSpec::confirm(message, title)).await == Some(true)
    }

    /// Alert titled as a success.
    async fn show_success(&self, message: &str) {
        self.show_alert(message, SUCCESS_TITLE).await;
    }

    /// Alert titled as an error.
    async fn show_error(&self, message: &str) {
        self.show_alert(message, ERROR_TITLE).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingGuard(Rc<Cell<u32>>);

    impl Drop for CountingGuard {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn delete_spec() -> ModalSpec<bool> {
        ModalSpec {
            title: "Delete".into(),
            message: "Sure?".into(),
            buttons: vec![
                ModalButton::new("Cancel", false, ButtonTone::Neutral),
                ModalButton::new("Delete", true, ButtonTone::Danger),
            ],
        }
    }

    #[test]
    fn press_resolves_with_button_value_and_drops_guard() {
        let drops = Rc::new(Cell::new(0));
        let mut slot = ModalSlot::<bool, CountingGuard>::default();
        let pending = slot.open(delete_spec());
        assert!(slot.attach_guard(pending.id, CountingGuard(Rc::clone(&drops))));
        assert_eq!(slot.active().map(|(id, _)| id), Some(pending.id));

        assert!(slot.press(pending.id, 1));
        assert_eq!(drops.get(), 1);
        assert!(slot.active().is_none());
        assert_eq!(block_on(pending.outcome()), Some(true));
    }

    #[test]
    fn escape_and_dismiss_resolve_none_once() {
        let mut slot = ModalSlot::<bool, ()>::default();
        let pending = slot.open(ModalSpec::confirm("Go?", CONFIRM_TITLE));
        assert!(!slot.key(pending.id, "Enter"));
        assert!(slot.is_open(pending.id));
        assert!(slot.key(pending.id, "Escape"));
        assert!(!slot.dismiss(pending.id));
        assert!(!slot.press(pending.id, 0));
        assert_eq!(block_on(pending.outcome()), None);
    }

    #[test]
    fn opening_a_second_modal_cancels_the_first() {
        let drops = Rc::new(Cell::new(0));
        let mut slot = ModalSlot::<bool, CountingGuard>::default();
        let first = slot.open(ModalSpec::alert("one", ALERT_TITLE));
        slot.attach_guard(first.id, CountingGuard(Rc::clone(&drops)));
        let second = slot.open(ModalSpec::alert("two", ALERT_TITLE));
        assert_ne!(first.id, second.id);
        assert_eq!(drops.get(), 1);
        assert_eq!(block_on(first.outcome()), None);
        assert!(slot.press(second.id, 0));
        assert_eq!(block_on(second.outcome()), Some(true));
    }

    #[test]
    fn late_guard_for_closed_modal_is_dropped() {
        let drops = Rc::new(Cell::new(0));
        let mut slot = ModalSlot::<bool, CountingGuard>::default();
        let pending = slot.open(ModalSpec::alert("x", ALERT_TITLE));
        slot.dismiss(pending.id);
        assert!(!slot.attach_guard(pending.id, CountingGuard(Rc::clone(&drops))));
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn out_of_range_press_is_ignored() {
        let mut slot = ModalSlot::<bool, ()>::default();
        let pending = slot.open(ModalSpec::alert("x", ALERT_TITLE));
        assert!(!slot.press(pending.id, 5));
        assert!(slot.is_open(pending.id));
    }

    #[test]
    fn dropped_slot_counts_as_dismissal() {
        let mut slot = ModalSlot::<bool, ()>::default();
        let pending = slot.open(ModalSpec::alert("x", ALERT_TITLE));
        drop(slot);
        assert_eq!(block_on(pending.outcome()), None);
    }

    struct Scripted(Option<bool>, std::cell::RefCell<Vec<ModalSpec<bool>>>);

    #[async_trait(?Send)]
    impl Dialogs for Scripted {
        async fn show_modal(&self, spec: ModalSpec<bool>) -> Option<bool> {
            self.1.borrow_mut().push(spec);
            self.0
        }
    }

    #[test]
    fn wrappers_build_expected_specs() {
        let dialogs = Scripted(Some(true), std::cell::RefCell::default());
        assert!(block_on(dialogs.show_confirm("Run?", CONFIRM_TITLE)));
        block_on(dialogs.show_success("Saved"));
        block_on(dialogs.show_error("Nope"));
        let seen = dialogs.1.borrow();
        assert_eq!(seen[0].buttons.len(), 2);
        assert_eq!(seen[0].buttons[0].label, "Cancel");
        assert_eq!(seen[1].title, SUCCESS_TITLE);
        assert_eq!(seen[1].buttons[0].label, "OK");
        assert_eq!(seen[2].title, ERROR_TITLE);

        let dismissed = Scripted(None, std::cell::RefCell::default());
        assert!(!block_on(dismissed.show_confirm("Run?", CONFIRM_TITLE)));
    }
}

//! Modal host and the browser-side dialog service.
//!
//! # Design
//! - `ModalCtx` owns the single [`ModalSlot`] and mirrors the open dialog into
//!   the store so `ModalHost` can render it.
//! - The Escape listener lives in the slot as the dialog's guard; it is
//!   dropped before the awaiting flow resumes.
//! - Store snapshot is cleared before the slot resolves.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo::events::EventListener;
use gloo::utils::document;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::core::store::{AppStore, ModalView};
use crate::features::modal::state::{Dialogs, ModalId, ModalSlot, ModalSpec};

/// Browser dialog service.
#[derive(Clone)]
pub(crate) struct ModalCtx {
    slot: Rc<RefCell<ModalSlot<bool, EventListener>>>,
    dispatch: Dispatch<AppStore>,
}

impl ModalCtx {
    pub(crate) fn new(dispatch: Dispatch<AppStore>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(ModalSlot::default())),
            dispatch,
        }
    }

    pub(crate) fn press(&self, id: ModalId, index: usize) {
        self.settle(id, |slot| slot.press(id, index));
    }

    pub(crate) fn dismiss(&self, id: ModalId) {
        self.settle(id, |slot| slot.dismiss(id));
    }

    fn settle(&self, id: ModalId, resolve: impl FnOnce(&mut ModalSlot<bool, EventListener>) -> bool) {
        if !self.slot.borrow().is_open(id) {
            return;
        }
        self.dispatch.reduce_mut(|store| {
            if store.modal.as_ref().is_some_and(|modal| modal.id == id) {
                store.modal = None;
            }
        });
        resolve(&mut self.slot.borrow_mut());
    }

    fn escape_listener(&self, id: ModalId) -> EventListener {
        let ctx = self.clone();
        EventListener::new(&document(), "keydown", move |event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Escape");
            if is_escape {
                // Dismissing drops this listener; leave the callback first.
                let ctx = ctx.clone();
                spawn_local(async move { ctx.dismiss(id) });
            }
        })
    }
}

impl PartialEq for ModalCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

#[async_trait(?Send)]
impl Dialogs for ModalCtx {
    async fn show_modal(&self, spec: ModalSpec<bool>) -> Option<bool> {
        let pending = self.slot.borrow_mut().open(spec.clone());
        let id = pending.id;
        let listener = self.escape_listener(id);
        self.slot.borrow_mut().attach_guard(id, listener);
        self.dispatch
            .reduce_mut(|store| store.modal = Some(ModalView { id, spec }));
        pending.outcome().await
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalHostProps {
    pub ctx: ModalCtx,
}

#[function_component(ModalHost)]
pub(crate) fn modal_host(props: &ModalHostProps) -> Html {
    let modal = use_selector(|store: &AppStore| store.modal.clone());
    let Some(view) = (*modal).clone() else {
        return html! {};
    };
    let id = view.id;

    let on_overlay = {
        let ctx = props.ctx.clone();
        Callback::from(move |event: MouseEvent| {
            if event.target() == event.current_target() {
                ctx.dismiss(id);
            }
        })
    };

    html! {
        <div class="modal-overlay" onclick={on_overlay}>
            <div class="modal-dialog" role="dialog" aria-modal="true">
                <div class="modal-title">{view.spec.title.clone()}</div>
                <div class="modal-message">{view.spec.message.clone()}</div>
                <div class="modal-buttons">
                    { for view.spec.buttons.iter().enumerate().map(|(index, button)| {
                        let ctx = props.ctx.clone();
                        let onclick = Callback::from(move |_: MouseEvent| ctx.press(id, index));
                        html! {
                            <button
                                type="button"
                                class={classes!("modal-btn", button.tone.css_class())}
                                {onclick}>
                                {button.label.clone()}
                            </button>
                        }
                    }) }
                </div>
            </div>
        </div>
    }
}

//! UI controller shared through context.
//!
//! # Design
//! - Create exactly one controller per app boot; it owns the API client, the
//!   dialog service and the two display timers.
//! - Reducers stay pure; this layer spawns requests, applies their results
//!   through the store and arms timers for the deadlines reducers return.
//! - Arming a timer replaces (and so cancels) the previous one in its slot.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::utils::window;
use gloo_timers::callback::Timeout;
use wizwam_events::PushEvent;
use yew::platform::spawn_local;
use yewdux::prelude::Dispatch;

use crate::app::preferences::LocalPreferences;
use crate::core::client::WizwamApi;
use crate::core::connection::ConnectionStatus;
use crate::core::preferences::FormDefaults;
use crate::core::schedule::Deadline;
use crate::core::store::{
    AppStore, apply_push_event, apply_submit_outcome, apply_url_edit, is_foreign_job,
};
use crate::features::download::actions::{SubmitOutcome, submit_download};
use crate::features::download::state::{
    apply_preferences, apply_server_config, begin_submit, revert_to_idle,
};
use crate::features::files::actions::{
    ActionOutcome, FileAction, Navigation, delete_file, run_macro,
};
use crate::features::files::state::{mark_failed, set_files};
use crate::features::messages::state::{MessagePanel, hide_panel, show_panel};
use crate::features::modal::state::Dialogs;
use crate::features::modal::view::ModalCtx;
use crate::services::api::ApiClient;
use crate::services::clipboard::BrowserClipboard;

type TimerSlot = Rc<RefCell<Option<Timeout>>>;

#[derive(Clone)]
pub(crate) struct UiController {
    api: Rc<ApiClient>,
    modals: ModalCtx,
    dispatch: Dispatch<AppStore>,
    revert_timer: TimerSlot,
    panel_timer: TimerSlot,
}

impl PartialEq for UiController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api)
    }
}

impl UiController {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        let dispatch = Dispatch::<AppStore>::new();
        Self {
            api: Rc::new(ApiClient::new(base_url)),
            modals: ModalCtx::new(dispatch.clone()),
            dispatch,
            revert_timer: Rc::default(),
            panel_timer: Rc::default(),
        }
    }

    pub(crate) fn modals(&self) -> ModalCtx {
        self.modals.clone()
    }

    fn arm_revert(&self, deadline: Option<Deadline>) {
        let Some(deadline) = deadline else {
            return;
        };
        let dispatch = self.dispatch.clone();
        *self.revert_timer.borrow_mut() = Some(Timeout::new(deadline.after_ms, move || {
            dispatch.reduce_mut(|store| {
                revert_to_idle(&mut store.download, deadline.epoch);
            });
        }));
    }

    fn arm_panel(&self, deadline: Option<Deadline>) {
        let Some(deadline) = deadline else {
            return;
        };
        let dispatch = self.dispatch.clone();
        *self.panel_timer.borrow_mut() = Some(Timeout::new(deadline.after_ms, move || {
            dispatch.reduce_mut(|store| {
                hide_panel(&mut store.messages, deadline.epoch);
            });
        }));
    }

    fn show_panel(&self, panel: MessagePanel) {
        let mut deadline = None;
        let mut panel = Some(panel);
        self.dispatch.reduce_mut(|store| {
            if let Some(panel) = panel.take() {
                deadline = Some(show_panel(&mut store.messages, panel));
            }
        });
        self.arm_panel(deadline);
    }

    /// Apply saved form defaults.
    pub(crate) fn load_preferences(&self) {
        let defaults = FormDefaults::load(&LocalPreferences);
        self.dispatch
            .reduce_mut(|store| apply_preferences(&mut store.options, defaults.clone()));
    }

    /// Fetch option lists; built-ins stay on failure.
    pub(crate) fn load_options(&self) {
        let api = Rc::clone(&self.api);
        let dispatch = self.dispatch.clone();
        spawn_local(async move {
            match api.fetch_config().await {
                Ok(config) => {
                    dispatch.reduce_mut(|store| apply_server_config(&mut store.options, config.clone()));
                }
                Err(err) => console::warn!("server config unavailable", err.to_string()),
            }
        });
    }

    /// Re-fetch the catalog.
    pub(crate) fn reload_files(&self) {
        let api = Rc::clone(&self.api);
        let dispatch = self.dispatch.clone();
        spawn_local(async move {
            match api.list_files().await {
                Ok(list) => {
                    dispatch.reduce_mut(|store| set_files(&mut store.catalog, list.files.clone()));
                }
                Err(err) => {
                    console::error!("error loading files", err.to_string());
                    dispatch.reduce_mut(|store| mark_failed(&mut store.catalog, err.to_string()));
                }
            }
        });
    }

    /// Submit the form for `url` with the current selection.
    pub(crate) fn submit(&self, url: &str) {
        let Some(request) = self.dispatch.get().options.selection.to_request(url) else {
            return;
        };
        self.dispatch.reduce_mut(|store| {
            begin_submit(&mut store.download);
        });
        // Pending revert belongs to the previous job.
        self.revert_timer.borrow_mut().take();

        let ctrl = self.clone();
        spawn_local(async move {
            let outcome = submit_download(ctrl.api.as_ref(), &request).await;
            match &outcome {
                SubmitOutcome::Started { job_id } => {
                    console::log!("download started", job_id.clone().unwrap_or_default());
                }
                SubmitOutcome::Failed(err) => {
                    console::error!("download request failed", err.to_string());
                }
                SubmitOutcome::Rejected { .. } => {}
            }
            let mut follow_up = None;
            ctrl.dispatch
                .reduce_mut(|store| follow_up = Some(apply_submit_outcome(store, &outcome)));
            if let Some(follow_up) = follow_up {
                ctrl.arm_revert(follow_up.revert);
                ctrl.arm_panel(follow_up.panel);
            }
        });
    }

    /// URL field edited.
    pub(crate) fn url_edited(&self) {
        self.dispatch.reduce_mut(|store| {
            apply_url_edit(store);
        });
    }

    /// Apply a push event and arm whatever it scheduled.
    pub(crate) fn on_push(&self, event: &PushEvent) {
        if is_foreign_job(&self.dispatch.get(), event) {
            console::warn!("event for another job", event.job_id().unwrap_or_default());
        }
        let mut outcome = None;
        self.dispatch
            .reduce_mut(|store| outcome = Some(apply_push_event(store, event)));
        let Some(outcome) = outcome else {
            return;
        };
        self.arm_revert(outcome.revert);
        self.arm_panel(outcome.panel);
        if outcome.reload {
            self.reload_files();
        }
    }

    /// Record socket status.
    pub(crate) fn on_connection(&self, status: ConnectionStatus) {
        self.dispatch
            .reduce_mut(|store| store.connection = status.clone());
    }

    /// Run a row action.
    pub(crate) fn run_action(&self, action: FileAction) {
        if let Some(navigation) = action.navigation() {
            self.navigate(navigation);
            return;
        }
        let ctrl = self.clone();
        spawn_local(async move {
            let outcome = match &action {
                FileAction::RunMacro(name) => {
                    run_macro(ctrl.api.as_ref(), &ctrl.modals, &BrowserClipboard, name).await
                }
                FileAction::Delete(name) => {
                    delete_file(ctrl.api.as_ref(), &ctrl.modals, name).await
                }
                FileAction::View(_) | FileAction::Download(_) => ActionOutcome::Cancelled,
            };
            if let ActionOutcome::Done { panel, reload } = outcome {
                if let Some(panel) = panel {
                    ctrl.show_panel(panel);
                }
                if reload {
                    ctrl.reload_files();
                }
            }
        });
    }

    fn navigate(&self, navigation: Navigation) {
        match navigation {
            Navigation::NewTab(url) => {
                let opened = window().open_with_url_and_target(&url, "_blank");
                if !matches!(opened, Ok(Some(_))) {
                    let modals = self.modals.clone();
                    spawn_local(async move {
                        modals
                            .show_error("Could not open a new tab. Allow pop-ups for this site.")
                            .await;
                    });
                }
            }
            Navigation::SameTab(url) => {
                if let Err(err) = window().location().set_href(&url) {
                    console::error!("navigation failed", err);
                }
            }
        }
    }
}

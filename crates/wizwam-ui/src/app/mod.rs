//! App shell: wiring, startup effects and the wasm entry point.

use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::components::connection::ConnectionBadge;
use crate::core::store::AppStore;
use crate::features::download::view::DownloadPanel;
use crate::features::files::view::FileCatalog;
use crate::features::messages::view::MessagePanelView;
use crate::features::modal::view::ModalHost;
use controller::UiController;
use preferences::api_base_url;
use socket::{SocketHandle, connect_socket};

pub(crate) mod controller;
mod preferences;
mod socket;

#[function_component(WizwamApp)]
pub(crate) fn wizwam_app() -> Html {
    let controller = use_memo(|_| UiController::new(api_base_url()), ());
    let socket = use_mut_ref(|| None as Option<SocketHandle>);
    let version = use_selector(|store: &AppStore| store.options.server_version.clone());

    {
        let controller = (*controller).clone();
        let socket = socket.clone();
        use_effect_with_deps(
            move |_| {
                controller.load_preferences();
                controller.load_options();
                controller.reload_files();
                let on_event = {
                    let controller = controller.clone();
                    Callback::from(move |event| controller.on_push(&event))
                };
                let on_status = {
                    let controller = controller.clone();
                    Callback::from(move |status| controller.on_connection(status))
                };
                *socket.borrow_mut() = Some(connect_socket(&api_base_url(), on_event, on_status));
                move || {
                    socket.borrow_mut().take();
                }
            },
            (),
        );
    }

    html! {
        <ContextProvider<UiController> context={(*controller).clone()}>
            <div class="container">
                <header class="app-header">
                    <h1>{"yt-dlp Wizwam"}</h1>
                    <div class="header-meta">
                        {(*version).clone().map(|version| html! {
                            <span class="version">{format!("v{version}")}</span>
                        }).unwrap_or_default()}
                        <ConnectionBadge />
                    </div>
                </header>
                <DownloadPanel />
                <MessagePanelView />
                <FileCatalog />
            </div>
            <ModalHost ctx={controller.modals()} />
        </ContextProvider<UiController>>
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<WizwamApp>::with_root(root).render();
    } else {
        yew::Renderer::<WizwamApp>::new().render();
    }
}

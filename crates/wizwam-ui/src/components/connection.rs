use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::core::store::AppStore;

#[function_component(ConnectionBadge)]
pub(crate) fn connection_badge() -> Html {
    let status = use_selector(|store: &AppStore| store.connection.clone());
    html! {
        <span
            class={classes!("pill", "connection", status.css_class())}
            title={status.detail()}
            role="status">
            {status.label()}
        </span>
    }
}

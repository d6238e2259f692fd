//! Message panel view.

use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::core::store::AppStore;
use crate::features::messages::state::PanelLine;

#[function_component(MessagePanelView)]
pub(crate) fn message_panel_view() -> Html {
    let state = use_selector(|store: &AppStore| store.messages.clone());
    let Some(panel) = state.panel.clone() else {
        return html! {};
    };
    let classes = classes!(
        "message-box",
        panel.kind.css_class(),
        (!state.visible).then_some("hidden")
    );

    html! {
        <div class={classes} role="status" aria-live="polite">
            <strong>{panel.title.clone()}</strong>
            { for panel.lines.iter().map(|line| match line {
                PanelLine::Text(text) => html! { <p class="message-line">{text.clone()}</p> },
                PanelLine::Code(text) => html! { <p class="message-line"><code>{text.clone()}</code></p> },
            }) }
        </div>
    }
}

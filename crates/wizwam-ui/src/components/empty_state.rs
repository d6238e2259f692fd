//! Placeholder line for list-like views.
//!
//! # Design
//! - Keep copy entirely prop-driven.
//! - Render the optional tone class only when provided.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct EmptyStateProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub tone: Option<&'static str>,
}

#[function_component(EmptyState)]
pub(crate) fn empty_state(props: &EmptyStateProps) -> Html {
    html! {
        <p class={classes!("empty-state", props.tone)}>{props.message.clone()}</p>
    }
}

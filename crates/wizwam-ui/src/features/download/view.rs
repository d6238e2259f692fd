//! Download form with the progress button.
//!
//! # Design
//! - Keep the URL in local state for immediate typing feedback; option
//!   selections live in the store so server config can reconcile them.
//! - The button renders straight from the store's state machine.

use wizwam_api_models::ChoiceOption;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::app::controller::UiController;
use crate::core::logic::clamp_percent;
use crate::core::store::AppStore;
use crate::features::download::state::FormSelection;

#[derive(Properties, PartialEq)]
struct ChoiceSelectProps {
    id: AttrValue,
    label: AttrValue,
    options: Vec<ChoiceOption>,
    selected: AttrValue,
    on_change: Callback<String>,
}

#[function_component(ChoiceSelect)]
fn choice_select(props: &ChoiceSelectProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                on_change.emit(select.value());
            }
        })
    };
    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{props.label.clone()}</label>
            <select id={props.id.clone()} {onchange}>
                { for props.options.iter().map(|option| html! {
                    <option
                        value={option.value.clone()}
                        selected={option.value == props.selected.as_str()}>
                        {option.label.clone()}
                    </option>
                }) }
            </select>
        </div>
    }
}

fn update_selection(apply: impl Fn(&mut FormSelection, String) + 'static) -> Callback<String> {
    let dispatch = Dispatch::<AppStore>::new();
    Callback::from(move |value: String| {
        dispatch.reduce_mut(|store| apply(&mut store.options.selection, value.clone()));
    })
}

#[function_component(DownloadPanel)]
pub(crate) fn download_panel() -> Html {
    let url = use_state(String::new);
    let button = use_selector(|store: &AppStore| store.download.clone());
    let options = use_selector(|store: &AppStore| store.options.clone());
    let Some(controller) = use_context::<UiController>() else {
        return html! {};
    };

    let oninput = {
        let url = url.clone();
        let controller = controller.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                url.set(input.value());
                controller.url_edited();
            }
        })
    };

    let onsubmit = {
        let url = url.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            controller.submit(&url);
        })
    };

    let on_audio_only = {
        let dispatch = Dispatch::<AppStore>::new();
        Callback::from(move |event: Event| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                let checked = input.checked();
                dispatch.reduce_mut(|store| store.options.selection.audio_only = checked);
            }
        })
    };

    let selection = &options.selection;
    let phase = button.phase;

    html! {
        <section class="download-section">
            <form id="download-form" {onsubmit}>
                <div class="form-group">
                    <label for="url">{"Video URL"}</label>
                    <input
                        id="url"
                        type="url"
                        required=true
                        placeholder="https://www.youtube.com/watch?v=..."
                        value={(*url).clone()}
                        {oninput} />
                </div>
                <div class="form-row">
                    <ChoiceSelect
                        id="quality"
                        label="Quality"
                        options={options.qualities.clone()}
                        selected={selection.quality.clone()}
                        on_change={update_selection(|selection, value| selection.quality = value)} />
                    <ChoiceSelect
                        id="video_codec"
                        label="Video codec"
                        options={options.video_codecs.clone()}
                        selected={selection.video_codec.clone()}
                        on_change={update_selection(|selection, value| selection.video_codec = value)} />
                    <ChoiceSelect
                        id="audio_codec"
                        label="Audio codec"
                        options={options.audio_codecs.clone()}
                        selected={selection.audio_codec.clone()}
                        on_change={update_selection(|selection, value| selection.audio_codec = value)} />
                </div>
                <label class="checkbox">
                    <input
                        id="audio_only"
                        type="checkbox"
                        checked={selection.audio_only}
                        onchange={on_audio_only} />
                    {"Audio only"}
                </label>
                <button
                    type="submit"
                    id="download-btn"
                    class={classes!("download-btn", phase.css_class())}
                    disabled={phase.is_disabled()}>
                    <span
                        class="btn-progress-bg"
                        style={format!("width: {}%", clamp_percent(button.percent))}>
                    </span>
                    <span class="btn-text">{button.label.clone()}</span>
                </button>
            </form>
        </section>
    }
}

//! File catalog list with search, sort and row actions.

use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::app::controller::UiController;
use crate::components::empty_state::EmptyState;
use crate::core::store::AppStore;
use crate::features::files::actions::FileAction;
use crate::features::files::state::{
    EmptyReason, FileEntry, SortKey, select_placeholder, select_view,
};

#[derive(Properties, PartialEq)]
struct FileRowProps {
    entry: FileEntry,
    on_action: Callback<FileAction>,
}

#[function_component(FileRow)]
fn file_row(props: &FileRowProps) -> Html {
    let entry = &props.entry;
    let button = |label: &'static str, class: &'static str, make: fn(String) -> FileAction| {
        let on_action = props.on_action.clone();
        let name = entry.name.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_action.emit(make(name.clone())));
        html! {
            <button type="button" class={classes!("file-btn", class)} {onclick}>{label}</button>
        }
    };

    html! {
        <li class="file-item">
            <div class="file-info">
                <span class="file-name" title={entry.name.clone()}>{entry.name.clone()}</span>
                <span class="file-size">{entry.size_text()}</span>
                if entry.has_remote_copy {
                    <span class="badge nas-badge">{"📦 NAS Copy"}</span>
                }
            </div>
            <div class="file-actions">
                {button("👁️ View", "view-btn", FileAction::View)}
                {button("⚡ Macro", "macro-btn", FileAction::RunMacro)}
                {button("💾 Download", "download-file-btn", FileAction::Download)}
                {button("🗑️ Delete", "delete-btn", FileAction::Delete)}
            </div>
        </li>
    }
}

#[function_component(FileCatalog)]
pub(crate) fn file_catalog() -> Html {
    let catalog = use_selector(|store: &AppStore| store.catalog.clone());
    let Some(controller) = use_context::<UiController>() else {
        return html! {};
    };
    let view = select_view(&catalog);
    let placeholder = select_placeholder(&catalog, &view);

    let on_search = {
        let dispatch = Dispatch::<AppStore>::new();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                let search = input.value();
                dispatch.reduce_mut(|store| store.catalog.search = search);
            }
        })
    };

    let on_sort = {
        let dispatch = Dispatch::<AppStore>::new();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                let sort = SortKey::from_value(&select.value());
                dispatch.reduce_mut(|store| store.catalog.sort = sort);
            }
        })
    };

    let on_refresh = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| controller.reload_files())
    };

    let on_action = Callback::from(move |action: FileAction| controller.run_action(action));

    let body = match placeholder {
        Some(reason) => html! {
            <EmptyState
                message={reason.message()}
                tone={(reason == EmptyReason::LoadFailed).then_some("error")} />
        },
        None => html! {
            <ul class="file-list">
                { for view.entries.iter().map(|entry| html! {
                    <FileRow
                        key={entry.name.clone()}
                        entry={entry.clone()}
                        on_action={on_action.clone()} />
                }) }
            </ul>
        },
    };

    html! {
        <section class="files-section">
            <div class="files-header">
                <h2>{"Downloaded Files"}</h2>
                <span class="file-count">{view.count_label.clone()}</span>
                <button type="button" class="refresh-btn" onclick={on_refresh}>{"🔄 Refresh"}</button>
            </div>
            <div class="files-controls">
                <input
                    id="file-search"
                    type="search"
                    placeholder="Search files..."
                    value={catalog.search.clone()}
                    oninput={on_search} />
                <select id="file-sort" onchange={on_sort}>
                    { for SortKey::ALL.iter().map(|key| html! {
                        <option value={key.as_value()} selected={*key == catalog.sort}>
                            {key.label()}
                        </option>
                    }) }
                </select>
            </div>
            {body}
        </section>
    }
}

//! Async clipboard access.

use async_trait::async_trait;
use gloo::utils::window;
use wasm_bindgen_futures::JsFuture;

use crate::core::client::ClipboardWriter;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserClipboard;

#[async_trait(?Send)]
impl ClipboardWriter for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        let promise = window().navigator().clipboard().write_text(text);
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|err| format!("{err:?}"))
    }
}

//! Persistence and environment helpers for the app shell.

use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;

use crate::core::preferences::PreferenceStore;

/// Saved form defaults in `localStorage`.
///
/// Values are raw strings written by the settings page, not JSON, so they are
/// read through the raw `Storage` handle.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalPreferences;

impl PreferenceStore for LocalPreferences {
    fn read(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                console::warn!("preference read failed", key, err);
                None
            }
        }
    }
}

/// Origin the page was served from; the API and socket share it.
pub(crate) fn api_base_url() -> String {
    window()
        .location()
        .origin()
        .unwrap_or_else(|_| "http://localhost:8080".to_string())
}

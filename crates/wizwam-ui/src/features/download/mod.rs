//! Download form, progress button and push-event handling.
pub mod actions;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

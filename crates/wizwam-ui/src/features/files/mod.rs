//! Downloaded-file catalog: search, sort and per-file actions.
pub mod actions;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

//! Feature slices: each owns its DOM-free state and flows, plus a wasm view.
pub mod download;
pub mod files;
pub mod messages;
pub mod modal;

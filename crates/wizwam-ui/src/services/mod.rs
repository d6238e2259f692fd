//! Browser-bound service adapters (HTTP, clipboard).
pub(crate) mod api;
pub(crate) mod clipboard;

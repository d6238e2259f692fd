//! Core, DOM-free primitives and helpers for the Web UI.
pub mod client;
pub mod connection;
pub mod error;
pub mod escape;
pub mod logic;
pub mod preferences;
pub mod schedule;
pub mod socketio;
pub mod store;

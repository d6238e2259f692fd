//! Shared presentational components.
pub(crate) mod connection;
pub(crate) mod empty_state;

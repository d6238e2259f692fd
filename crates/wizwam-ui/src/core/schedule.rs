//! Deferred state changes keyed by an epoch.
//!
//! Reducers that start a timed display return a [`Deadline`]; the wasm layer
//! arms a timer for it and, when it fires, passes the epoch back. A reducer
//! that sees a newer epoch treats the callback as stale and does nothing.

/// A pending revert for the state that was current at `epoch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline {
    /// Epoch of the state that scheduled the revert.
    pub epoch: u64,
    /// Delay before the revert applies.
    pub after_ms: u32,
}

impl Deadline {
    /// Build a deadline.
    #[must_use]
    pub const fn new(epoch: u64, after_ms: u32) -> Self {
        Self { epoch, after_ms }
    }
}

//! Error types for Mast core systems.

/// Errors raised by the cooperative event loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventLoopError {
    /// Tasks kept re-posting work past the configured turn limit.
    #[error("event loop still had {pending} pending task(s) after {turns} turns")]
    Stalled {
        /// Number of turns that ran.
        turns: usize,
        /// Tasks still queued when the loop gave up.
        pending: usize,
    },
}

/// A specialized Result type for Mast core operations.
pub type Result<T> = std::result::Result<T, EventLoopError>;

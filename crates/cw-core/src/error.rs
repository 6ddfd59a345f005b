//! Error taxonomy for clipboard monitoring.
//!
//! The first four kinds are surfaced synchronously to callers (construction,
//! `start()`, monitor creation). `ListenerFailure` and `TransientRead` only
//! ever occur inside a running detection loop; they are recovered locally and
//! at most forwarded to the configured error handler.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonitorError {
    #[error("invalid monitor configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to acquire detection resource: {0}")]
    ResourceAcquisition(String),

    #[error("no clipboard monitoring strategy is available for this runtime")]
    NoStrategyAvailable,

    #[error("host environment not initialized: {0}")]
    NotInitialized(String),

    #[error("clipboard listener failed: {0}")]
    ListenerFailure(String),

    #[error("clipboard read failed: {0}")]
    TransientRead(String),
}

impl MonitorError {
    /// Whether this error is surfaced to the caller rather than recovered
    /// inside the detection loop.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            MonitorError::ListenerFailure(_) | MonitorError::TransientRead(_)
        )
    }
}

//! Clipboard change listener port
//!
//! Implemented by library users. The monitor calls it once per detected
//! change. Implementations are not trusted: returned errors and panics are
//! caught by the monitor, routed to the configured error handler, and never
//! stop detection.
use anyhow::Result;

use crate::ClipboardContent;

#[async_trait::async_trait]
pub trait ClipboardChangeListener: Send + Sync {
    /// Called when clipboard content changes.
    async fn on_change(&self, content: ClipboardContent) -> Result<()>;
}

/// Adapts a synchronous closure into a [`ClipboardChangeListener`].
pub struct FnListener<F>(pub F);

#[async_trait::async_trait]
impl<F> ClipboardChangeListener for FnListener<F>
where
    F: Fn(ClipboardContent) -> Result<()> + Send + Sync,
{
    async fn on_change(&self, content: ClipboardContent) -> Result<()> {
        (self.0)(content)
    }
}

//! Raw clipboard reader port.
use anyhow::Result;

use crate::clipboard::SystemClipboardSnapshot;

/// Reads the raw system clipboard.
///
/// Implementations wrap one platform API. They should return an empty
/// snapshot (not an error) when the clipboard is empty or a format cannot
/// be read, and reserve `Err` for failures of the platform call itself.
/// Calls are blocking and may be issued from a blocking worker thread.
pub trait SystemClipboardPort: Send + Sync {
    fn read_snapshot(&self) -> Result<SystemClipboardSnapshot>;
}

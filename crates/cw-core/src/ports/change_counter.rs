use anyhow::Result;

/// A host-provided clipboard change counter.
///
/// The value changes (typically increments) every time the clipboard owner
/// changes, and reading it is much cheaper than reading the clipboard itself
/// (`NSPasteboard.changeCount`, `GetClipboardSequenceNumber`).
pub trait ChangeCounterPort: Send + Sync {
    fn change_count(&self) -> Result<u64>;
}

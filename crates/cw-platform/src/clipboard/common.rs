use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use tracing::{debug, debug_span};

use cw_core::ports::SystemClipboardPort;
use cw_core::SystemClipboardSnapshot;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

/// Cross-platform clipboard reader backed by `clipboard-rs`.
///
/// Reads text, HTML, RTF and file lists. Images are only probed for
/// availability; encoding them on every poll tick would dominate the cycle.
pub struct ClipboardRsReader {
    inner: Mutex<ClipboardContext>,
}

impl ClipboardRsReader {
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new()
            .map_err(|e| anyhow!("Failed to create clipboard context: {}", e))?;
        Ok(Self {
            inner: Mutex::new(context),
        })
    }

    fn context(&self) -> MutexGuard<'_, ClipboardContext> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn read_from(ctx: &ClipboardContext) -> Result<SystemClipboardSnapshot> {
        // Fails only when the platform call itself fails; an empty
        // clipboard yields an empty format list.
        let available = map_clipboard_err(ctx.available_formats())?;

        let mut snapshot = SystemClipboardSnapshot::empty_now();
        if available.is_empty() {
            return Ok(snapshot);
        }

        if ctx.has(ContentFormat::Text) {
            if let Ok(text) = ctx.get_text() {
                snapshot = snapshot.with_text(text);
            }
        }

        if ctx.has(ContentFormat::Html) {
            if let Ok(html) = ctx.get_html() {
                snapshot = snapshot.with_html(html);
            }
        }

        if ctx.has(ContentFormat::Rtf) {
            if let Ok(rtf) = ctx.get_rich_text() {
                snapshot = snapshot.with_rtf(rtf);
            }
        }

        if ctx.has(ContentFormat::Files) {
            if let Ok(files) = ctx.get_files() {
                snapshot = snapshot.with_files(files);
            }
        }

        if ctx.has(ContentFormat::Image) {
            snapshot = snapshot.with_image(Vec::new());
        }

        Ok(snapshot)
    }
}

impl SystemClipboardPort for ClipboardRsReader {
    fn read_snapshot(&self) -> Result<SystemClipboardSnapshot> {
        let span = debug_span!("platform.read_clipboard");
        span.in_scope(|| {
            let ctx = self.context();
            let snapshot = Self::read_from(&ctx)?;

            debug!(
                formats = snapshot.representation_count(),
                total_size_bytes = snapshot.total_size_bytes(),
                "Captured system clipboard snapshot"
            );

            Ok(snapshot)
        })
    }
}

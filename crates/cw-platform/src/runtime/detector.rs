//! Read -> normalize -> signature -> dispatch cycle shared by all modes.
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

use cw_core::ports::{ChangeCounterPort, SystemClipboardPort};
use cw_core::{normalize, ClipboardContent, ContentSignature, MonitorConfig, MonitorError};

use super::monitor::MonitorState;
use super::source::ChangeSource;

/// Last-seen values; reset on every start and stop.
#[derive(Debug, Default)]
pub(super) struct DetectorState {
    last_signature: Option<ContentSignature>,
    last_count: Option<u64>,
}

impl DetectorState {
    pub(super) fn reset(&mut self) {
        self.last_signature = None;
        self.last_count = None;
    }
}

pub(crate) struct MonitorInner {
    pub(super) reader: Arc<dyn SystemClipboardPort>,
    pub(super) source: ChangeSource,
    pub(super) config: MonitorConfig,
    pub(super) state: AtomicU8,
    /// Bumped on every start and stop. A cycle only dispatches while the
    /// epoch it was started under is still current.
    pub(super) epoch: AtomicU64,
    /// Held for a whole cycle, which serializes listener invocations.
    pub(super) detector: Mutex<DetectorState>,
}

impl MonitorInner {
    pub(super) fn new(
        reader: Arc<dyn SystemClipboardPort>,
        source: ChangeSource,
        config: MonitorConfig,
    ) -> Self {
        Self {
            reader,
            source,
            config,
            state: AtomicU8::new(MonitorState::Stopped as u8),
            epoch: AtomicU64::new(0),
            detector: Mutex::new(DetectorState::default()),
        }
    }

    pub(super) fn state(&self) -> MonitorState {
        MonitorState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(super) fn set_state(&self, state: MonitorState) {
        self.state.store(state as u8, Ordering::Release);
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::Acquire) == epoch
    }

    /// One full cycle, used by the timed-poll and push-callback modes.
    pub(super) async fn tick(&self, epoch: u64) {
        let mut state = self.detector.lock().await;
        self.detect(&mut state, epoch).await;
    }

    /// Counter-gated cycle: the clipboard is only read when the counter moved.
    pub(super) async fn tick_counter(&self, counter: &dyn ChangeCounterPort, epoch: u64) {
        let count = match counter.change_count() {
            Ok(count) => count,
            Err(err) => {
                let error = MonitorError::TransientRead(format!("change counter: {err:#}"));
                if self.is_current(epoch) {
                    warn!(error = %error, "Failed to poll clipboard change counter");
                    self.config.report_error(&error);
                }
                return;
            }
        };

        let mut state = self.detector.lock().await;
        if state.last_count == Some(count) {
            return;
        }

        trace!(old = ?state.last_count, new = count, "Clipboard change counter moved");
        // Only commit the counter once the content behind it was observed,
        // so a failed read is retried on the next tick.
        if self.detect(&mut state, epoch).await {
            state.last_count = Some(count);
        }
    }

    /// Returns `true` when the clipboard was read successfully.
    async fn detect(&self, state: &mut DetectorState, epoch: u64) -> bool {
        if !self.is_current(epoch) {
            return false;
        }

        let content = match self.read_content().await {
            Ok(content) => content,
            Err(error) => {
                if !self.is_current(epoch) {
                    debug!(error = %error, "Clipboard read failed after monitor stopped");
                    return false;
                }
                warn!(
                    error = %error,
                    mode = %self.source.mode(),
                    "Clipboard read failed; retrying on next tick"
                );
                self.config.report_error(&error);
                return false;
            }
        };

        if !self.is_current(epoch) {
            debug!("Monitor stopped during clipboard read; discarding result");
            return false;
        }

        let signature = content.signature();
        if self.config.duplicate_filtering() && state.last_signature == Some(signature) {
            trace!(%signature, "Clipboard content unchanged");
            return true;
        }

        // Committed before dispatch: the content did change even if the
        // listener fails on it.
        state.last_signature = Some(signature);
        debug!(
            signature = ?signature,
            mode = %self.source.mode(),
            has_text = content.text.is_some(),
            files = content.file_count(),
            has_image = content.has_image,
            "Clipboard changed"
        );

        self.dispatch(content).await;
        true
    }

    pub(super) async fn read_content(&self) -> Result<ClipboardContent, MonitorError> {
        let reader = self.reader.clone();
        let snapshot = tokio::task::spawn_blocking(move || reader.read_snapshot())
            .await
            .map_err(|err| MonitorError::TransientRead(format!("reader task failed: {err}")))?
            .map_err(|err| MonitorError::TransientRead(format!("{err:#}")))?;

        Ok(normalize(&snapshot))
    }

    async fn dispatch(&self, content: ClipboardContent) {
        let listener = self.config.listener().clone();
        let outcome = AssertUnwindSafe(listener.on_change(content))
            .catch_unwind()
            .await;

        let failure = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(err)) => format!("{err:#}"),
            Err(panic) => format!("listener panicked: {}", panic_message(&*panic)),
        };

        let error = MonitorError::ListenerFailure(failure);
        warn!(error = %error, "Clipboard listener failed");
        self.config.report_error(&error);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

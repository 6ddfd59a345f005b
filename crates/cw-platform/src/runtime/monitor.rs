use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use cw_core::ports::{ChangeNotifierPort, ChangeSignal, NotifierSubscription, SystemClipboardPort};
use cw_core::{normalize, ClipboardContent, MonitorConfig, MonitorError};

use super::detector::MonitorInner;
use super::source::{self, ChangeSource, DetectionMode};

/// Upper bound `stop()` waits for the background task before aborting it.
pub const STOP_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MonitorState {
    Stopped = 0,
    Starting = 1,
    Running = 2,
}

impl MonitorState {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            1 => MonitorState::Starting,
            2 => MonitorState::Running,
            _ => MonitorState::Stopped,
        }
    }
}

/// Resources held while running.
struct Session {
    cancel: CancellationToken,
    task: JoinHandle<()>,
    subscription: Option<NotifierSubscription>,
}

/// Holds the state at `Starting` and falls back to `Stopped` unless the
/// session was stored.
struct StartingGuard<'a> {
    inner: &'a MonitorInner,
    committed: bool,
}

impl<'a> StartingGuard<'a> {
    fn enter(inner: &'a MonitorInner) -> Self {
        inner.set_state(MonitorState::Starting);
        Self {
            inner,
            committed: false,
        }
    }

    fn commit(mut self) {
        self.inner.set_state(MonitorState::Running);
        self.committed = true;
    }
}

impl Drop for StartingGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.inner.set_state(MonitorState::Stopped);
        }
    }
}

/// Native notifiers may block while their hook comes up.
async fn subscribe_notifier(
    notifier: Arc<dyn ChangeNotifierPort>,
) -> Result<(NotifierSubscription, mpsc::UnboundedReceiver<()>), MonitorError> {
    let (signal, rx) = ChangeSignal::channel();
    let subscription = tokio::task::spawn_blocking(move || notifier.subscribe(signal))
        .await
        .map_err(|err| {
            MonitorError::ResourceAcquisition(format!("notifier registration task failed: {err}"))
        })??;
    Ok((subscription, rx))
}

/// Clipboard change monitor.
///
/// Cloning yields another handle to the same monitor.
///
/// ## Lifecycle
///
/// ```text
/// Stopped --start()--> Starting --resource acquired--> Running
///    ^                     |                               |
///    +----acquisition failed                               |
///    +-----------------------------stop()------------------+
/// ```
///
/// `start()` and `stop()` are idempotent and serialized against each other.
/// Listener invocations of one monitor never overlap and are delivered in
/// detection order. Once `stop()` returns no further listener call starts.
#[derive(Clone)]
pub struct ClipboardMonitor {
    inner: Arc<MonitorInner>,
    session: Arc<Mutex<Option<Session>>>,
}

impl ClipboardMonitor {
    pub fn new(
        reader: Arc<dyn SystemClipboardPort>,
        source: ChangeSource,
        config: MonitorConfig,
    ) -> Self {
        Self {
            inner: Arc::new(MonitorInner::new(reader, source, config)),
            session: Arc::new(Mutex::new(None)),
        }
    }

    pub fn mode(&self) -> DetectionMode {
        self.inner.source.mode()
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    pub fn state(&self) -> MonitorState {
        self.inner.state()
    }

    pub fn is_running(&self) -> bool {
        self.state() == MonitorState::Running
    }

    /// Start detecting changes.
    ///
    /// Acquires the mode-specific resource, hands over to a background task,
    /// then reports the current clipboard once. A no-op when already running.
    /// On failure, or when the returned future is dropped before the
    /// resource is held, the monitor stays `Stopped`.
    ///
    /// The initial report runs after the session lock is released, so the
    /// listener may call [`stop`](Self::stop) from it.
    pub async fn start(&self) -> Result<(), MonitorError> {
        let epoch = {
            let mut session = self.session.lock().await;
            if session.is_some() {
                debug!("Clipboard monitor already running, skipping start");
                return Ok(());
            }

            let inner = &self.inner;
            let starting = StartingGuard::enter(inner);
            let epoch = inner.epoch.fetch_add(1, Ordering::AcqRel) + 1;
            inner.detector.lock().await.reset();

            let (subscription, notifications) = match &inner.source {
                ChangeSource::PushCallback(notifier) => {
                    match subscribe_notifier(notifier.clone()).await {
                        Ok((subscription, rx)) => (Some(subscription), Some(rx)),
                        Err(err) => {
                            warn!(error = %err, "Failed to register clipboard change notifier");
                            return Err(err);
                        }
                    }
                }
                _ => (None, None),
            };

            let cancel = CancellationToken::new();
            let task = match (&inner.source, notifications) {
                (ChangeSource::PushCallback(_), Some(rx)) => tokio::spawn(
                    source::run_push_callback(inner.clone(), rx, epoch, cancel.clone()),
                ),
                (ChangeSource::PolledCounter(counter), _) => {
                    tokio::spawn(source::run_polled_counter(
                        inner.clone(),
                        counter.clone(),
                        epoch,
                        cancel.clone(),
                    ))
                }
                _ => tokio::spawn(source::run_timed_poll(inner.clone(), epoch, cancel.clone())),
            };

            *session = Some(Session {
                cancel,
                task,
                subscription,
            });
            starting.commit();
            info!(mode = %self.mode(), "Clipboard monitor started");
            epoch
        };

        // Immediate snapshot so the listener does not wait for the first
        // interval or event. Discarded if a stop() lands in between.
        let inner = &self.inner;
        match &inner.source {
            ChangeSource::PolledCounter(counter) => inner.tick_counter(counter.as_ref(), epoch).await,
            _ => inner.tick(epoch).await,
        }

        Ok(())
    }

    /// Stop detecting changes. Never fails; a no-op when already stopped.
    ///
    /// Clears the last-seen signature so the first read after a restart is
    /// always reported. Waits for the background task at most
    /// [`STOP_JOIN_TIMEOUT`]; awaiting it from a listener call made by that
    /// task therefore stalls for that long.
    pub async fn stop(&self) {
        let mut session = self.session.lock().await;
        let inner = &self.inner;
        let Some(active) = session.take() else {
            inner.set_state(MonitorState::Stopped);
            debug!("Clipboard monitor already stopped");
            return;
        };

        // Invalidate in-flight cycles before anything else.
        inner.epoch.fetch_add(1, Ordering::AcqRel);
        inner.set_state(MonitorState::Stopped);

        active.cancel.cancel();
        if let Some(subscription) = active.subscription {
            subscription.cancel();
        }

        let mut task = active.task;
        if tokio::time::timeout(STOP_JOIN_TIMEOUT, &mut task).await.is_err() {
            warn!(
                timeout_ms = STOP_JOIN_TIMEOUT.as_millis() as u64,
                "Clipboard monitor task did not exit in time; aborting"
            );
            task.abort();
        }

        // A cycle still holding the state is stale; start() resets again
        // before the next session.
        if let Ok(mut state) = inner.detector.try_lock() {
            state.reset();
        }

        info!(mode = %self.mode(), "Clipboard monitor stopped");
    }

    /// Read and normalize the clipboard right now.
    ///
    /// Works in any state and never touches the duplicate-suppression state.
    /// Blocks the calling thread for the duration of the platform read. A
    /// failed read yields an empty record.
    pub fn current_content(&self) -> ClipboardContent {
        match self.inner.reader.read_snapshot() {
            Ok(snapshot) => normalize(&snapshot),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "Failed to read clipboard snapshot");
                ClipboardContent::empty_now()
            }
        }
    }

    /// Async variant of [`current_content`](Self::current_content) that
    /// reads on a blocking worker thread.
    pub async fn read_current(&self) -> Result<ClipboardContent, MonitorError> {
        self.inner.read_content().await
    }
}

impl std::fmt::Debug for ClipboardMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardMonitor")
            .field("mode", &self.mode())
            .field("state", &self.state())
            .field("config", &self.inner.config)
            .finish()
    }
}

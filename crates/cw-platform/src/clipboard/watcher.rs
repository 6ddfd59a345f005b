//! Push notifications from the OS clipboard via `clipboard-rs`.
//!
//! `clipboard-rs` drives its watcher loop on a blocking thread
//! (XFixes on X11, `AddClipboardFormatListener` on Windows, change-count
//! polling on macOS). The watcher context is created on that thread, which
//! reports back once registration succeeded so `subscribe` can fail fast.
use std::sync::mpsc as std_mpsc;
use std::time::Duration;

use clipboard_rs::{ClipboardHandler, ClipboardWatcher, ClipboardWatcherContext, WatcherShutdown};
use tracing::{debug, info};

use cw_core::ports::{ChangeNotifierPort, ChangeSignal, NotifierSubscription};
use cw_core::MonitorError;

/// How long `subscribe` waits for the watcher thread to register its hook.
pub const WATCHER_STARTUP_TIMEOUT: Duration = Duration::from_secs(2);

struct SignalHandler {
    signal: ChangeSignal,
}

impl ClipboardHandler for SignalHandler {
    fn on_clipboard_change(&mut self) {
        if !self.signal.notify() {
            debug!("Clipboard change observed after monitor went away");
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ClipboardRsNotifier;

impl ClipboardRsNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl ChangeNotifierPort for ClipboardRsNotifier {
    fn subscribe(&self, signal: ChangeSignal) -> Result<NotifierSubscription, MonitorError> {
        let (ready_tx, ready_rx) = std_mpsc::sync_channel::<Result<WatcherShutdown, String>>(0);

        std::thread::Builder::new()
            .name("clipboard-watcher".into())
            .spawn(move || {
                let mut watcher_ctx = match ClipboardWatcherContext::<SignalHandler>::new() {
                    Ok(ctx) => ctx,
                    Err(e) => {
                        let _ = ready_tx.send(Err(format!("Failed to create watcher context: {e}")));
                        return;
                    }
                };

                let shutdown = watcher_ctx
                    .add_handler(SignalHandler { signal })
                    .get_shutdown_channel();

                // subscribe() gave up waiting; nobody would stop us
                if ready_tx.send(Ok(shutdown)).is_err() {
                    return;
                }

                info!("start clipboard watch");
                watcher_ctx.start_watch();
                info!("clipboard watch stopped");
            })
            .map_err(|e| {
                MonitorError::ResourceAcquisition(format!("failed to spawn watcher thread: {e}"))
            })?;

        let shutdown = await_ready(&ready_rx, WATCHER_STARTUP_TIMEOUT, |late: WatcherShutdown| {
            late.stop()
        })?;
        Ok(NotifierSubscription::new(move || shutdown.stop()))
    }
}

/// Waits for the watcher thread's handshake.
///
/// The channel is a rendezvous, so a thread still blocked in `send` when we
/// give up either hands its handle to the drain below or fails its send once
/// the receiver drops. Either way no watch loop is left running unowned.
fn await_ready<T>(
    ready_rx: &std_mpsc::Receiver<Result<T, String>>,
    timeout: Duration,
    release: impl FnOnce(T),
) -> Result<T, MonitorError> {
    match ready_rx.recv_timeout(timeout) {
        Ok(Ok(handle)) => Ok(handle),
        Ok(Err(message)) => Err(MonitorError::ResourceAcquisition(message)),
        Err(_) => {
            if let Ok(Ok(late)) = ready_rx.try_recv() {
                release(late);
            }
            Err(MonitorError::ResourceAcquisition(format!(
                "clipboard watcher did not start within {} ms",
                timeout.as_millis()
            )))
        }
    }
}

//! Stream adapter over a clipboard monitor.
//!
//! The monitor starts when the stream is first polled and stops when the
//! stream is dropped.
use std::sync::Arc;

use anyhow::Result;
use futures::stream::{self, Stream};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use cw_core::ports::ClipboardChangeListener;
use cw_core::{ClipboardContent, MonitorError};

use crate::runtime::ClipboardMonitor;

struct ChannelListener {
    tx: mpsc::UnboundedSender<ClipboardContent>,
}

#[async_trait::async_trait]
impl ClipboardChangeListener for ChannelListener {
    async fn on_change(&self, content: ClipboardContent) -> Result<()> {
        if self.tx.send(content).is_err() {
            debug!("Clipboard stream dropped, discarding change");
        }
        Ok(())
    }
}

/// Stops the monitor when the stream goes away.
struct MonitorGuard(Option<ClipboardMonitor>);

impl Drop for MonitorGuard {
    fn drop(&mut self) {
        let Some(monitor) = self.0.take() else {
            return;
        };
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { monitor.stop().await });
            }
            Err(_) => debug!("No tokio runtime while dropping clipboard stream"),
        }
    }
}

enum StreamState<F> {
    Pending(F),
    Active {
        rx: mpsc::UnboundedReceiver<ClipboardContent>,
        guard: MonitorGuard,
    },
}

/// Expose clipboard changes as a [`Stream`].
///
/// `factory` receives the listener that feeds the stream and returns the
/// monitor to drive, typically via
/// [`StrategyRegistry::create_monitor`](crate::strategy::StrategyRegistry::create_monitor).
/// If building or starting the monitor fails, the error is logged and the
/// stream ends without yielding.
pub fn clipboard_stream<F>(factory: F) -> impl Stream<Item = ClipboardContent> + Send + 'static
where
    F: FnOnce(Arc<dyn ClipboardChangeListener>) -> Result<ClipboardMonitor, MonitorError>
        + Send
        + 'static,
{
    stream::unfold(StreamState::Pending(factory), |state| async move {
        let (mut rx, guard) = match state {
            StreamState::Pending(factory) => {
                let (tx, rx) = mpsc::unbounded_channel();
                let monitor = match factory(Arc::new(ChannelListener { tx })) {
                    Ok(monitor) => monitor,
                    Err(err) => {
                        warn!(error = %err, "Failed to create clipboard monitor for stream");
                        return None;
                    }
                };
                if let Err(err) = monitor.start().await {
                    warn!(error = %err, "Failed to start clipboard monitor for stream");
                    return None;
                }
                (rx, MonitorGuard(Some(monitor)))
            }
            StreamState::Active { rx, guard } => (rx, guard),
        };

        let content = rx.recv().await?;
        Some((content, StreamState::Active { rx, guard }))
    })
}

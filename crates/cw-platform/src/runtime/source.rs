use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use cw_core::ports::{ChangeCounterPort, ChangeNotifierPort};

use super::detector::MonitorInner;

/// How a monitor learns that the clipboard may have changed.
#[derive(Clone)]
pub enum ChangeSource {
    /// The host calls back on every raw change. Bursts are debounced.
    PushCallback(Arc<dyn ChangeNotifierPort>),
    /// The host exposes a change counter; the clipboard is only read when
    /// the counter moves.
    PolledCounter(Arc<dyn ChangeCounterPort>),
    /// No signal at all: full read + signature compare every poll interval.
    TimedPoll,
}

impl ChangeSource {
    pub fn mode(&self) -> DetectionMode {
        match self {
            ChangeSource::PushCallback(_) => DetectionMode::PushCallback,
            ChangeSource::PolledCounter(_) => DetectionMode::PolledCounter,
            ChangeSource::TimedPoll => DetectionMode::TimedPoll,
        }
    }
}

impl fmt::Debug for ChangeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChangeSource").field(&self.mode()).finish()
    }
}

/// Signal quality of a detection mode, most efficient first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionMode {
    PushCallback,
    PolledCounter,
    TimedPoll,
}

impl DetectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMode::PushCallback => "push-callback",
            DetectionMode::PolledCounter => "polled-counter",
            DetectionMode::TimedPoll => "timed-poll",
        }
    }
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn poll_ticker(period: Duration) -> tokio::time::Interval {
    // The start-up cycle already read the clipboard; skip the immediate tick.
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

pub(super) async fn run_timed_poll(
    inner: Arc<MonitorInner>,
    epoch: u64,
    cancel: CancellationToken,
) {
    let mut ticker = poll_ticker(inner.config.poll_interval());

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => inner.tick(epoch).await,
        }
    }
}

pub(super) async fn run_polled_counter(
    inner: Arc<MonitorInner>,
    counter: Arc<dyn ChangeCounterPort>,
    epoch: u64,
    cancel: CancellationToken,
) {
    let mut ticker = poll_ticker(inner.config.poll_interval());

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => inner.tick_counter(counter.as_ref(), epoch).await,
        }
    }
}

pub(super) async fn run_push_callback(
    inner: Arc<MonitorInner>,
    mut notifications: mpsc::UnboundedReceiver<()>,
    epoch: u64,
    cancel: CancellationToken,
) {
    let debounce = inner.config.debounce_delay();

    'outer: loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            received = notifications.recv() => {
                if received.is_none() {
                    break 'outer;
                }
            }
        }

        // Every notification in a burst restarts the delay; only the last
        // one leads to a read.
        let mut coalesced = 1usize;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                received = notifications.recv() => {
                    if received.is_none() {
                        // the burst still gets its read
                        inner.tick(epoch).await;
                        break 'outer;
                    }
                    coalesced += 1;
                }
                _ = tokio::time::sleep(debounce) => break,
            }
        }

        debug!(coalesced, "Clipboard notification burst settled");
        inner.tick(epoch).await;
    }

    // The notifier dropped its signal. Stay alive until stopped so the
    // monitor state keeps reflecting the caller's intent.
    warn!("Clipboard change notifier closed; waiting for stop");
    cancel.cancelled().await;
}

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;

use cw_core::ports::{
    ChangeCounterPort, ChangeNotifierPort, ChangeSignal, NotifierSubscription, SystemClipboardPort,
};
use cw_core::{MonitorError, SystemClipboardSnapshot};

/// In-memory clipboard implementation.
///
/// Serves as reader, change counter and push notifier at once, which makes
/// it usable as the host clipboard for headless embedding and tests. Every
/// [`set`](Self::set) bumps the counter and fires all subscribers.
#[derive(Clone, Default)]
pub struct InMemoryClipboard {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    snapshot: Option<SystemClipboardSnapshot>,
    change_count: u64,
    reads: usize,
    next_subscriber: u64,
    subscribers: Vec<(u64, ChangeSignal)>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: SystemClipboardSnapshot) -> Self {
        let clipboard = Self::new();
        clipboard.lock().snapshot = Some(snapshot);
        clipboard
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the clipboard content, bump the counter and notify subscribers.
    pub fn set(&self, snapshot: SystemClipboardSnapshot) {
        let subscribers = {
            let mut state = self.lock();
            state.snapshot = Some(snapshot);
            state.change_count += 1;
            state.subscribers.clone()
        };

        for (_, signal) in subscribers {
            signal.notify();
        }
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.set(SystemClipboardSnapshot::empty_now().with_text(text));
    }

    pub fn clear(&self) {
        self.set(SystemClipboardSnapshot::empty_now());
    }

    /// Fire subscribers without changing content, like a host that reports
    /// spurious or repeated notifications.
    pub fn notify_only(&self) {
        let subscribers = self.lock().subscribers.clone();
        for (_, signal) in subscribers {
            signal.notify();
        }
    }

    pub fn read_count(&self) -> usize {
        self.lock().reads
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl SystemClipboardPort for InMemoryClipboard {
    fn read_snapshot(&self) -> Result<SystemClipboardSnapshot> {
        let mut state = self.lock();
        state.reads += 1;
        let mut snapshot = state
            .snapshot
            .clone()
            .unwrap_or_else(SystemClipboardSnapshot::empty_now);
        snapshot.ts_ms = chrono::Utc::now().timestamp_millis();
        Ok(snapshot)
    }
}

impl ChangeCounterPort for InMemoryClipboard {
    fn change_count(&self) -> Result<u64> {
        Ok(self.lock().change_count)
    }
}

impl ChangeNotifierPort for InMemoryClipboard {
    fn subscribe(&self, signal: ChangeSignal) -> Result<NotifierSubscription, MonitorError> {
        let id = {
            let mut state = self.lock();
            let id = state.next_subscriber;
            state.next_subscriber += 1;
            state.subscribers.push((id, signal));
            id
        };

        let state = Arc::downgrade(&self.state);
        Ok(NotifierSubscription::new(move || {
            if let Some(state) = state.upgrade() {
                let mut state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                state.subscribers.retain(|(sub_id, _)| *sub_id != id);
            }
        }))
    }
}

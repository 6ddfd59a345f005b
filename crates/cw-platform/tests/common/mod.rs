//! Shared fixtures for the monitor integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::time::Instant;

use cw_core::ports::{ClipboardChangeListener, SystemClipboardPort};
use cw_core::{ClipboardContent, MonitorConfig, MonitorConfigBuilder, MonitorError, SystemClipboardSnapshot};

/// Listener that records every call and can be told to misbehave.
#[derive(Default)]
pub struct RecordingListener {
    calls: Mutex<Vec<(Instant, ClipboardContent)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Option<Duration>,
}

impl RecordingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Each call sleeps for `delay` before returning.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, content)| content.text.clone().unwrap_or_default())
            .collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ClipboardChangeListener for RecordingListener {
    async fn on_change(&self, content: ClipboardContent) -> Result<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let text = content.text.clone().unwrap_or_default();
        self.calls.lock().unwrap().push((Instant::now(), content));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match text.as_str() {
            "boom" => Err(anyhow!("listener rejected content")),
            "panic" => panic!("listener blew up"),
            _ => Ok(()),
        }
    }
}

/// Reader that replays a fixed sequence of texts, then repeats the last one.
pub struct ScriptedReader {
    script: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
    reads: AtomicUsize,
}

impl ScriptedReader {
    pub fn new<I, S>(texts: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            script: Mutex::new(texts.into_iter().map(Into::into).collect()),
            last: Mutex::new(None),
            reads: AtomicUsize::new(0),
        })
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl SystemClipboardPort for ScriptedReader {
    fn read_snapshot(&self) -> Result<SystemClipboardSnapshot> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = Some(next);
        }
        match last.as_ref() {
            Some(text) => Ok(SystemClipboardSnapshot::empty_now().with_text(text.clone())),
            None => Ok(SystemClipboardSnapshot::empty_now()),
        }
    }
}

/// Collects everything routed to the error handler.
#[derive(Clone, Default)]
pub struct ErrorSink(Arc<Mutex<Vec<MonitorError>>>);

impl ErrorSink {
    pub fn install(&self, builder: MonitorConfigBuilder) -> MonitorConfigBuilder {
        let sink = self.0.clone();
        builder.error_handler(move |err| sink.lock().unwrap().push(err.clone()))
    }

    pub fn errors(&self) -> Vec<MonitorError> {
        self.0.lock().unwrap().clone()
    }
}

pub fn config_with(
    builder: MonitorConfigBuilder,
    listener: &Arc<RecordingListener>,
) -> MonitorConfig {
    builder.build(listener.clone()).unwrap()
}

/// Poll `condition` until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

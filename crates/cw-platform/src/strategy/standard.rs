use std::sync::Arc;

use tracing::debug;

use cw_core::{MonitorConfig, MonitorError};

use super::MonitorStrategy;
use crate::host::HostContext;
use crate::runtime::{ChangeSource, ClipboardMonitor, DetectionMode};

pub const PUSH_CALLBACK_PRIORITY: i32 = 300;
pub const POLLED_COUNTER_PRIORITY: i32 = 200;
pub const TIMED_POLL_PRIORITY: i32 = 100;

/// One of the three standard strategies, bound to a host context.
#[derive(Debug, Clone)]
pub struct HostStrategy {
    mode: DetectionMode,
    host: Arc<HostContext>,
}

impl HostStrategy {
    pub fn new(mode: DetectionMode, host: Arc<HostContext>) -> Self {
        Self { mode, host }
    }

    /// All standard strategies for `host`, most efficient first.
    pub fn all(host: Arc<HostContext>) -> Vec<HostStrategy> {
        [
            DetectionMode::PushCallback,
            DetectionMode::PolledCounter,
            DetectionMode::TimedPoll,
        ]
        .into_iter()
        .map(|mode| HostStrategy::new(mode, host.clone()))
        .collect()
    }

    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    fn change_source(&self) -> Result<ChangeSource, MonitorError> {
        match self.mode {
            DetectionMode::PushCallback => self
                .host
                .notifier()
                .cloned()
                .map(ChangeSource::PushCallback)
                .ok_or_else(|| MonitorError::NotInitialized("change notifier".into())),
            DetectionMode::PolledCounter => self
                .host
                .change_counter()
                .cloned()
                .map(ChangeSource::PolledCounter)
                .ok_or_else(|| MonitorError::NotInitialized("change counter".into())),
            DetectionMode::TimedPoll => Ok(ChangeSource::TimedPoll),
        }
    }
}

impl MonitorStrategy for HostStrategy {
    fn name(&self) -> &str {
        self.mode.as_str()
    }

    fn priority(&self) -> i32 {
        match self.mode {
            DetectionMode::PushCallback => PUSH_CALLBACK_PRIORITY,
            DetectionMode::PolledCounter => POLLED_COUNTER_PRIORITY,
            DetectionMode::TimedPoll => TIMED_POLL_PRIORITY,
        }
    }

    fn is_applicable(&self) -> bool {
        match self.mode {
            DetectionMode::PushCallback => self
                .host
                .notifier()
                .map_or(false, |notifier| notifier.is_available()),
            DetectionMode::PolledCounter => self.host.change_counter().is_some(),
            DetectionMode::TimedPoll => self.host.reader().is_some(),
        }
    }

    fn create(&self, config: MonitorConfig) -> Result<ClipboardMonitor, MonitorError> {
        let reader = self
            .host
            .reader()
            .cloned()
            .ok_or_else(|| MonitorError::NotInitialized("clipboard reader".into()))?;
        let source = self.change_source()?;

        debug!(strategy = self.name(), "Creating clipboard monitor");
        Ok(ClipboardMonitor::new(reader, source, config))
    }
}

//! Capability-checked, prioritized monitor factories.
mod registry;
mod standard;

use std::fmt;
use std::sync::Arc;

use cw_core::{MonitorConfig, MonitorError};

use crate::runtime::ClipboardMonitor;

pub use registry::StrategyRegistry;
pub use standard::{
    HostStrategy, POLLED_COUNTER_PRIORITY, PUSH_CALLBACK_PRIORITY, TIMED_POLL_PRIORITY,
};

/// A way of monitoring the clipboard on some runtime.
///
/// `is_applicable` must be cheap and side-effect free; it is evaluated on
/// every selection.
pub trait MonitorStrategy: fmt::Debug + Send + Sync {
    /// Unique name within a registry.
    fn name(&self) -> &str;

    /// Higher wins.
    fn priority(&self) -> i32;

    fn is_applicable(&self) -> bool;

    fn create(&self, config: MonitorConfig) -> Result<ClipboardMonitor, MonitorError>;
}

type Predicate = Arc<dyn Fn() -> bool + Send + Sync>;
type Factory = Arc<dyn Fn(MonitorConfig) -> Result<ClipboardMonitor, MonitorError> + Send + Sync>;

/// Strategy assembled from a predicate and a factory closure.
#[derive(Clone)]
pub struct FnStrategy {
    name: String,
    priority: i32,
    applicable: Predicate,
    factory: Factory,
}

impl FnStrategy {
    pub fn new(
        name: impl Into<String>,
        priority: i32,
        applicable: impl Fn() -> bool + Send + Sync + 'static,
        factory: impl Fn(MonitorConfig) -> Result<ClipboardMonitor, MonitorError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            priority,
            applicable: Arc::new(applicable),
            factory: Arc::new(factory),
        }
    }
}

impl MonitorStrategy for FnStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn is_applicable(&self) -> bool {
        (self.applicable)()
    }

    fn create(&self, config: MonitorConfig) -> Result<ClipboardMonitor, MonitorError> {
        (self.factory)(config)
    }
}

impl fmt::Debug for FnStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStrategy")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

//! Priority-ordered strategy registry.
//!
//! Registration and selection may happen from different threads during
//! process start-up, so the list lives behind a mutex. Selection takes a
//! snapshot of the list and evaluates applicability outside the lock.
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use cw_core::{MonitorConfig, MonitorError};

use super::{HostStrategy, MonitorStrategy};
use crate::host::HostContext;
use crate::runtime::ClipboardMonitor;

#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Mutex<Vec<Arc<dyn MonitorStrategy>>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the push-callback, polled-counter and
    /// timed-poll strategies for `host`.
    pub fn with_standard_strategies(host: HostContext) -> Self {
        let registry = Self::new();
        for strategy in HostStrategy::all(Arc::new(host)) {
            registry.register(Arc::new(strategy));
        }
        registry
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn MonitorStrategy>>> {
        self.strategies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a strategy, replacing any strategy with the same name.
    ///
    /// The list stays sorted by descending priority; among equal priorities
    /// insertion order is kept.
    pub fn register(&self, strategy: Arc<dyn MonitorStrategy>) {
        let mut strategies = self.lock();
        strategies.retain(|existing| existing.name() != strategy.name());
        debug!(
            strategy = strategy.name(),
            priority = strategy.priority(),
            "Registering clipboard monitor strategy"
        );
        strategies.push(strategy);
        // stable sort
        strategies.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Remove the strategy named `name`. Returns whether one was removed.
    pub fn unregister(&self, name: &str) -> bool {
        let mut strategies = self.lock();
        let before = strategies.len();
        strategies.retain(|existing| existing.name() != name);
        strategies.len() != before
    }

    /// Highest-priority applicable strategy.
    pub fn select(&self) -> Option<Arc<dyn MonitorStrategy>> {
        let snapshot = self.list();
        let selected = snapshot
            .into_iter()
            .find(|strategy| strategy.is_applicable());

        if let Some(strategy) = &selected {
            info!(
                strategy = strategy.name(),
                priority = strategy.priority(),
                "Selected clipboard monitor strategy"
            );
        }
        selected
    }

    /// Strategies in selection order.
    pub fn list(&self) -> Vec<Arc<dyn MonitorStrategy>> {
        self.lock().clone()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn MonitorStrategy>> {
        self.lock()
            .iter()
            .find(|strategy| strategy.name() == name)
            .cloned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Build a monitor with the best applicable strategy.
    pub fn create_monitor(&self, config: MonitorConfig) -> Result<ClipboardMonitor, MonitorError> {
        let strategy = self.select().ok_or(MonitorError::NoStrategyAvailable)?;
        strategy.create(config)
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .list()
            .iter()
            .map(|strategy| format!("{}({})", strategy.name(), strategy.priority()))
            .collect();
        f.debug_struct("StrategyRegistry")
            .field("strategies", &names)
            .finish()
    }
}

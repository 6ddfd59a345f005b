//! Host context: the platform handles a host environment hands to the
//! strategies.
//!
//! The host builds one `HostContext` at setup time and passes it to
//! [`StrategyRegistry::with_standard_strategies`](crate::strategy::StrategyRegistry::with_standard_strategies).
//! Missing pieces simply make the corresponding strategies inapplicable; a
//! missing reader makes monitor creation fail with
//! [`MonitorError::NotInitialized`](cw_core::MonitorError::NotInitialized).
use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use cw_core::ports::{ChangeCounterPort, ChangeNotifierPort, SystemClipboardPort};

use crate::adapters::InMemoryClipboard;
use crate::capability::{detect_clipboard_capability, ClipboardCapability};
use crate::clipboard::{native_change_counter, ClipboardRsNotifier, ClipboardRsReader};

#[derive(Clone, Default)]
pub struct HostContext {
    reader: Option<Arc<dyn SystemClipboardPort>>,
    counter: Option<Arc<dyn ChangeCounterPort>>,
    notifier: Option<Arc<dyn ChangeNotifierPort>>,
}

impl HostContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe the current OS and wire the native adapters it supports.
    pub fn native() -> Self {
        let capability = detect_clipboard_capability();
        let mut host = HostContext::new();

        if !capability.is_readable() {
            warn!(?capability, "System clipboard unavailable");
            return host;
        }

        match ClipboardRsReader::new() {
            Ok(reader) => host = host.with_reader(Arc::new(reader)),
            Err(err) => {
                warn!(error = %err, "Failed to open system clipboard");
                return host;
            }
        }

        if capability == ClipboardCapability::NativeEvents {
            host = host.with_notifier(Arc::new(ClipboardRsNotifier::new()));
        }

        if let Some(counter) = native_change_counter() {
            host = host.with_change_counter(counter);
        }

        info!(
            ?capability,
            notifier = host.notifier.is_some(),
            counter = host.counter.is_some(),
            "Native clipboard host initialized"
        );
        host
    }

    /// Every capability backed by one in-memory clipboard.
    pub fn in_memory(clipboard: &InMemoryClipboard) -> Self {
        let shared = Arc::new(clipboard.clone());
        HostContext::new()
            .with_reader(shared.clone())
            .with_change_counter(shared.clone())
            .with_notifier(shared)
    }

    pub fn with_reader(mut self, reader: Arc<dyn SystemClipboardPort>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn with_change_counter(mut self, counter: Arc<dyn ChangeCounterPort>) -> Self {
        self.counter = Some(counter);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn ChangeNotifierPort>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn reader(&self) -> Option<&Arc<dyn SystemClipboardPort>> {
        self.reader.as_ref()
    }

    pub fn change_counter(&self) -> Option<&Arc<dyn ChangeCounterPort>> {
        self.counter.as_ref()
    }

    pub fn notifier(&self) -> Option<&Arc<dyn ChangeNotifierPort>> {
        self.notifier.as_ref()
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostContext")
            .field("reader", &self.reader.is_some())
            .field("counter", &self.counter.is_some())
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

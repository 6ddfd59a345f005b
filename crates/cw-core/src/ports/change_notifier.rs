//! Push notification port.
//!
//! A [`ChangeNotifierPort`] invokes a callback whenever the host reports a
//! raw clipboard change. The monitor hands the notifier a [`ChangeSignal`];
//! the notifier keeps firing it until the returned [`NotifierSubscription`]
//! is cancelled or dropped.
use std::fmt;

use tokio::sync::mpsc;

use crate::MonitorError;

/// Cheap, cloneable handle a notifier fires on every raw change notification.
///
/// Firing never blocks, so it is safe from native callback threads.
#[derive(Clone)]
pub struct ChangeSignal {
    tx: mpsc::UnboundedSender<()>,
}

impl ChangeSignal {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns `false` once the receiving monitor is gone.
    pub fn notify(&self) -> bool {
        self.tx.send(()).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl fmt::Debug for ChangeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSignal")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Registration handle; releases the native resource when cancelled or dropped.
#[must_use = "dropping the subscription unregisters the notifier"]
pub struct NotifierSubscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl NotifierSubscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription that holds no resource.
    pub fn noop() -> Self {
        Self { release: None }
    }

    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for NotifierSubscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for NotifierSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

pub trait ChangeNotifierPort: Send + Sync {
    /// Cheap capability probe used by strategy selection.
    fn is_available(&self) -> bool {
        true
    }

    /// Register `signal` with the host. Must either return a live
    /// subscription or fail with [`MonitorError::ResourceAcquisition`]; it must
    /// not block indefinitely.
    fn subscribe(&self, signal: ChangeSignal) -> Result<NotifierSubscription, MonitorError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn subscription_releases_once_on_cancel() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = released.clone();
        let sub = NotifierSubscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sub.cancel();

        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subscription_releases_on_drop() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = released.clone();
        {
            let _sub = NotifierSubscription::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn signal_reports_closed_receiver() {
        let (signal, rx) = ChangeSignal::channel();
        assert!(signal.notify());
        drop(rx);
        assert!(!signal.notify());
        assert!(signal.is_closed());
    }
}

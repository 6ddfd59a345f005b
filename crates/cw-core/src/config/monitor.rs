use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::settings::{MonitorSettings, DEFAULT_DEBOUNCE_MS, DEFAULT_POLL_INTERVAL_MS};
use crate::ports::ClipboardChangeListener;
use crate::MonitorError;

pub const DEBOUNCE_DELAY_MIN_MS: i64 = 0;
pub const DEBOUNCE_DELAY_MAX_MS: i64 = 1000;
pub const POLL_INTERVAL_MIN_MS: i64 = 50;
pub const POLL_INTERVAL_MAX_MS: i64 = 5000;

/// Receives errors recovered inside the detection loop.
pub type ErrorHandler = Arc<dyn Fn(&MonitorError) + Send + Sync>;

/// Validated, immutable monitor configuration.
///
/// Cloning is cheap (listener and error handler are shared). Reconfiguring a
/// monitor means building a new one.
#[derive(Clone)]
pub struct MonitorConfig {
    debounce_delay: Duration,
    poll_interval: Duration,
    duplicate_filtering: bool,
    error_handler: Option<ErrorHandler>,
    listener: Arc<dyn ClipboardChangeListener>,
}

impl MonitorConfig {
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debounce_delay
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn duplicate_filtering(&self) -> bool {
        self.duplicate_filtering
    }

    pub fn listener(&self) -> &Arc<dyn ClipboardChangeListener> {
        &self.listener
    }

    pub fn has_error_handler(&self) -> bool {
        self.error_handler.is_some()
    }

    /// Forward a recovered error to the error handler, if any.
    ///
    /// A panicking handler is contained here as well.
    pub fn report_error(&self, error: &MonitorError) {
        if let Some(handler) = &self.error_handler {
            let handler = handler.clone();
            let outcome =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler(error)));
            if outcome.is_err() {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %error, "Monitor error handler panicked");
            }
        }
    }
}

impl fmt::Debug for MonitorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorConfig")
            .field("debounce_delay", &self.debounce_delay)
            .field("poll_interval", &self.poll_interval)
            .field("duplicate_filtering", &self.duplicate_filtering)
            .field("error_handler", &self.error_handler.is_some())
            .finish_non_exhaustive()
    }
}

/// Fluent builder for [`MonitorConfig`]. Durations are given in signed
/// milliseconds so out-of-range input (including negatives) is reported as
/// [`MonitorError::InvalidConfiguration`] instead of being unrepresentable.
#[derive(Clone)]
pub struct MonitorConfigBuilder {
    debounce_ms: i64,
    poll_interval_ms: i64,
    duplicate_filtering: bool,
    error_handler: Option<ErrorHandler>,
}

impl Default for MonitorConfigBuilder {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            duplicate_filtering: true,
            error_handler: None,
        }
    }
}

impl MonitorConfigBuilder {
    pub fn from_settings(settings: &MonitorSettings) -> Self {
        Self::default()
            .debounce_delay_ms(settings.debounce_ms)
            .poll_interval_ms(settings.poll_interval_ms)
            .duplicate_filtering(settings.duplicate_filtering)
    }

    pub fn debounce_delay_ms(mut self, ms: i64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn poll_interval_ms(mut self, ms: i64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    pub fn duplicate_filtering(mut self, enabled: bool) -> Self {
        self.duplicate_filtering = enabled;
        self
    }

    pub fn error_handler(mut self, handler: impl Fn(&MonitorError) + Send + Sync + 'static) -> Self {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    pub fn build(
        self,
        listener: Arc<dyn ClipboardChangeListener>,
    ) -> Result<MonitorConfig, MonitorError> {
        let debounce_delay = bounded_ms(
            "debounce delay",
            self.debounce_ms,
            DEBOUNCE_DELAY_MIN_MS,
            DEBOUNCE_DELAY_MAX_MS,
        )?;
        let poll_interval = bounded_ms(
            "poll interval",
            self.poll_interval_ms,
            POLL_INTERVAL_MIN_MS,
            POLL_INTERVAL_MAX_MS,
        )?;

        Ok(MonitorConfig {
            debounce_delay,
            poll_interval,
            duplicate_filtering: self.duplicate_filtering,
            error_handler: self.error_handler,
            listener,
        })
    }
}

fn bounded_ms(name: &str, value: i64, min: i64, max: i64) -> Result<Duration, MonitorError> {
    if !(min..=max).contains(&value) {
        return Err(MonitorError::InvalidConfiguration(format!(
            "{name} must be within {min}..={max} ms, got {value} ms"
        )));
    }
    // non-negative after the bound check
    Ok(Duration::from_millis(value as u64))
}

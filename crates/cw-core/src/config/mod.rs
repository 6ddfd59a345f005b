//! Monitor configuration.
//!
//! - [`MonitorSettings`] is pure data as read from a file or CLI flags. It is
//!   never validated.
//! - [`MonitorConfig`] is the validated, immutable configuration a monitor is
//!   constructed with. The only way to obtain one is
//!   [`MonitorConfigBuilder::build`], which enforces the bounds.
mod monitor;
mod settings;

pub use monitor::{
    ErrorHandler, MonitorConfig, MonitorConfigBuilder, DEBOUNCE_DELAY_MAX_MS,
    DEBOUNCE_DELAY_MIN_MS, POLL_INTERVAL_MAX_MS, POLL_INTERVAL_MIN_MS,
};
pub use settings::MonitorSettings;

use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_DEBOUNCE_MS: i64 = 100;
pub(crate) const DEFAULT_POLL_INTERVAL_MS: i64 = 500;

/// Tunables as written by a user (`[monitor]` table of the config file).
///
/// Values are accepted as-is; bounds are enforced when the settings are fed
/// into [`MonitorConfigBuilder`](super::MonitorConfigBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    pub debounce_ms: i64,
    pub poll_interval_ms: i64,
    pub duplicate_filtering: bool,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            duplicate_filtering: true,
        }
    }
}

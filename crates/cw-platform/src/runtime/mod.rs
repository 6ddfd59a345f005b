//! Clipboard monitor runtime.
//!
//! [`ClipboardMonitor`] owns the start/stop lifecycle and one background
//! tokio task per running instance. The task learns about changes through a
//! [`ChangeSource`] and feeds every raw read through the same
//! normalize -> signature -> dispatch cycle, so duplicate suppression and
//! listener fault isolation do not depend on the detection mode.
mod detector;
mod monitor;
mod source;

pub use monitor::{ClipboardMonitor, MonitorState, STOP_JOIN_TIMEOUT};
pub use source::{ChangeSource, DetectionMode};

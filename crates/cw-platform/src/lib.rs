//! # cw-platform
//!
//! Clipboard change-detection engine and platform adapters for clipwatch.
//!
//! This crate drives the ports defined in `cw-core`: it runs the monitor
//! lifecycle, picks a detection strategy for the host, and talks to the
//! operating system clipboard.

pub mod adapters;
pub mod capability;
pub mod clipboard;
pub mod host;
pub mod runtime;
pub mod strategy;
pub mod stream;

pub use capability::{detect_clipboard_capability, ClipboardCapability};
pub use host::HostContext;
pub use runtime::{ChangeSource, ClipboardMonitor, DetectionMode, MonitorState};
pub use strategy::{FnStrategy, MonitorStrategy, StrategyRegistry};
pub use stream::clipboard_stream;

//! # cw-core
//!
//! Core domain models and ports for clipwatch.
//!
//! This crate contains the platform-independent half of the clipboard
//! change-detection engine: the normalized content record, its signature,
//! the validated monitor configuration, the error taxonomy, and the ports
//! that platform adapters implement.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod ports;

// Re-export commonly used types at the crate root
pub use clipboard::{
    normalize, ClipboardContent, ContentSignature, MimeType, ObservedClipboardRepresentation,
    SystemClipboardSnapshot,
};
pub use config::{MonitorConfig, MonitorConfigBuilder, MonitorSettings};
pub use error::MonitorError;

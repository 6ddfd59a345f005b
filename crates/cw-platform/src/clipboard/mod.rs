//! Native clipboard adapters.
pub mod common;
pub mod platform;
pub mod watcher;

pub use common::ClipboardRsReader;
pub use platform::native_change_counter;
pub use watcher::ClipboardRsNotifier;

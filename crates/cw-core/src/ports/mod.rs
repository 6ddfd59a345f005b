//! Ports implemented by platform adapters and by library users.
pub mod change_counter;
pub mod change_notifier;
pub mod clipboard;
pub mod clipboard_listener;

pub use change_counter::ChangeCounterPort;
pub use change_notifier::{ChangeNotifierPort, ChangeSignal, NotifierSubscription};
pub use clipboard::SystemClipboardPort;
pub use clipboard_listener::{ClipboardChangeListener, FnListener};

use std::sync::Arc;

use cw_core::ports::ChangeCounterPort;

#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub use macos::PasteboardChangeCounter;
#[cfg(target_os = "windows")]
pub use windows::SequenceNumberCounter;

/// The OS clipboard change counter, where the platform has one.
pub fn native_change_counter() -> Option<Arc<dyn ChangeCounterPort>> {
    #[cfg(target_os = "macos")]
    {
        return Some(Arc::new(PasteboardChangeCounter));
    }

    #[cfg(target_os = "windows")]
    {
        return Some(Arc::new(SequenceNumberCounter));
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        None
    }
}

//! Platform capability detection for clipboard monitoring.
//!
//! Detects which change signal the current runtime can offer, so the host
//! context only advertises mechanisms that can actually work.

/// Best change signal available on the current platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardCapability {
    /// OS pushes change notifications (Windows format listener, X11 XFixes)
    NativeEvents,
    /// OS exposes a cheap change counter (macOS pasteboard change count)
    ChangeCounter,
    /// Clipboard is readable but offers no change signal
    PollingOnly,
    /// No clipboard reachable (headless Linux, WSL without WSLg)
    Unavailable,
}

impl ClipboardCapability {
    pub fn is_readable(&self) -> bool {
        !matches!(self, ClipboardCapability::Unavailable)
    }
}

/// Detect the clipboard capability of the current platform.
///
/// # Detection Logic
///
/// - **macOS**: Always `ChangeCounter`
/// - **Windows**: Always `NativeEvents`
/// - **Linux**:
///   - If an X11 display is reachable (`DISPLAY`) → `NativeEvents`
///     (XWayland included)
///   - Otherwise → `Unavailable`
/// - **Other**: `PollingOnly`
pub fn detect_clipboard_capability() -> ClipboardCapability {
    #[cfg(target_os = "macos")]
    {
        return ClipboardCapability::ChangeCounter;
    }

    #[cfg(target_os = "windows")]
    {
        return ClipboardCapability::NativeEvents;
    }

    #[cfg(target_os = "linux")]
    {
        if has_x11_display() {
            tracing::info!("X11 display detected. Using native clipboard events.");
            return ClipboardCapability::NativeEvents;
        }

        if is_wsl() {
            tracing::warn!("WSL environment without display server; clipboard unavailable");
        } else {
            tracing::warn!("No X11 display detected; clipboard unavailable");
        }
        ClipboardCapability::Unavailable
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        ClipboardCapability::PollingOnly
    }
}

/// Detect if running under WSL (Windows Subsystem for Linux).
///
/// # Detection Methods
///
/// 1. Check `/proc/version` for "Microsoft" or "WSL" strings
/// 2. Check for WSL-specific environment variables:
///    - `WSL_DISTRO_NAME`
///    - `WSL_INTEROP`
#[cfg(target_os = "linux")]
fn is_wsl() -> bool {
    if let Ok(version) = std::fs::read_to_string("/proc/version") {
        if version.contains("Microsoft") || version.contains("WSL") {
            return true;
        }
    }

    std::env::var("WSL_DISTRO_NAME").is_ok() || std::env::var("WSL_INTEROP").is_ok()
}

/// `clipboard-rs` talks X11 on Linux; a non-empty `DISPLAY` is required.
#[cfg(target_os = "linux")]
fn has_x11_display() -> bool {
    std::env::var("DISPLAY").map_or(false, |display| !display.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unavailable_is_unreadable() {
        assert!(ClipboardCapability::NativeEvents.is_readable());
        assert!(ClipboardCapability::ChangeCounter.is_readable());
        assert!(ClipboardCapability::PollingOnly.is_readable());
        assert!(!ClipboardCapability::Unavailable.is_readable());
    }

    #[cfg(target_os = "linux")]
    mod linux {
        use super::super::*;
        use std::sync::{Mutex, OnceLock};

        fn env_lock() -> std::sync::MutexGuard<'static, ()> {
            static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
            ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
        }

        #[test]
        fn test_display_detection() {
            let _lock = env_lock();
            let original = std::env::var("DISPLAY");

            std::env::set_var("DISPLAY", ":0");
            assert!(has_x11_display());
            assert_eq!(
                detect_clipboard_capability(),
                ClipboardCapability::NativeEvents
            );

            std::env::set_var("DISPLAY", "");
            assert!(!has_x11_display());

            std::env::remove_var("DISPLAY");
            assert!(!has_x11_display());
            assert_eq!(
                detect_clipboard_capability(),
                ClipboardCapability::Unavailable
            );

            match original {
                Ok(val) => std::env::set_var("DISPLAY", val),
                Err(_) => std::env::remove_var("DISPLAY"),
            }
        }
    }
}

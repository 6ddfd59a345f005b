use anyhow::{bail, Result};
use cocoa::appkit::NSPasteboard;
use cocoa::base::nil;
use objc::runtime::Object;
use objc::{msg_send, sel, sel_impl};

use cw_core::ports::ChangeCounterPort;

/// `NSPasteboard.generalPasteboard.changeCount`: a cheap integer read that
/// increments on every pasteboard ownership change.
#[derive(Debug, Default, Clone, Copy)]
pub struct PasteboardChangeCounter;

impl ChangeCounterPort for PasteboardChangeCounter {
    fn change_count(&self) -> Result<u64> {
        unsafe {
            let pasteboard: *mut Object = NSPasteboard::generalPasteboard(nil);
            if pasteboard.is_null() {
                bail!("general pasteboard unavailable");
            }

            // NSInteger, i64 on 64-bit
            let change_count: i64 = msg_send![pasteboard, changeCount];
            Ok(change_count as u64)
        }
    }
}

use anyhow::{bail, Result};
use winapi::um::winuser::GetClipboardSequenceNumber;

use cw_core::ports::ChangeCounterPort;

/// Win32 clipboard sequence number, incremented on every clipboard change.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequenceNumberCounter;

impl ChangeCounterPort for SequenceNumberCounter {
    fn change_count(&self) -> Result<u64> {
        let sequence = unsafe { GetClipboardSequenceNumber() };
        if sequence == 0 {
            // returned when the process has no access to the window station
            bail!("GetClipboardSequenceNumber returned 0");
        }
        Ok(u64::from(sequence))
    }
}

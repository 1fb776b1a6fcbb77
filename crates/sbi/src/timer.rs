//! Function to access the SBI timer extension functionality.

use crate::{Firmware, SbiResult};

/// The unique id of the timer extension.
pub const EXTENSION_ID: u32 = 0x54494D45;

/// Programs the clock for the next event after `stime`.
///
/// This also clears the pending timer interrupt bit. To only clear the pending
/// bit without scheduling another event, pass `u64::MAX`.
pub fn set_timer(fw: &impl Firmware, stime: u64) -> SbiResult<()> {
    fw.call1(EXTENSION_ID, 0x00, stime as usize)
        .into_result()
        .map(|_| ())
}

//! Function to access the SBI FWFT (Firmware Features) extension functionality.

use crate::{Firmware, SbiResult};

/// The unique id of the Firmware Features extension.
pub const EXTENSION_ID: u32 = 0x46574654;

/// Flag for [`set`] that prevents any further change of the feature.
pub const LOCK: usize = 1 << 0;

/// Sets the firmware feature `feature` to `value`.
pub fn set(fw: &impl Firmware, feature: u32, value: usize, flags: usize) -> SbiResult<()> {
    fw.call3(EXTENSION_ID, 0x00, feature as usize, value, flags)
        .into_result()
        .map(|_| ())
}

/// Returns the current value of the firmware feature `feature`.
pub fn get(fw: &impl Firmware, feature: u32) -> SbiResult<usize> {
    fw.call1(EXTENSION_ID, 0x01, feature as usize).into_result()
}

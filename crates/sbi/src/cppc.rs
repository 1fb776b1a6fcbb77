//! Function to access the SBI CPPC (Collaborative Processor Performance Control)
//! extension functionality.

use crate::{Firmware, SbiResult};

/// The unique id of the CPPC extension.
pub const EXTENSION_ID: u32 = 0x43505043;

/// Checks if the register `reg_id` is implemented.
///
/// Returns the width of the register in bits, or `0` if it's not implemented.
pub fn probe(fw: &impl Firmware, reg_id: u32) -> SbiResult<usize> {
    fw.call1(EXTENSION_ID, 0x00, reg_id as usize).into_result()
}

/// Reads the register `reg_id`.
pub fn read(fw: &impl Firmware, reg_id: u32) -> SbiResult<usize> {
    fw.call1(EXTENSION_ID, 0x01, reg_id as usize).into_result()
}

/// Reads the upper 32 bits of the register `reg_id`.
///
/// Always `0` on 64 bit harts.
pub fn read_hi(fw: &impl Firmware, reg_id: u32) -> SbiResult<usize> {
    fw.call1(EXTENSION_ID, 0x02, reg_id as usize).into_result()
}

/// Writes `value` into the register `reg_id`.
pub fn write(fw: &impl Firmware, reg_id: u32, value: u64) -> SbiResult<()> {
    fw.call2(EXTENSION_ID, 0x03, reg_id as usize, value as usize)
        .into_result()
        .map(|_| ())
}

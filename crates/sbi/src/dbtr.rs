//! Function to access the SBI DBTR (Debug Triggers) extension functionality.
//!
//! Triggers are described in a shared memory region, which has to be set with
//! [`set_shmem`] before any function that reads or writes trigger state.

use crate::{addr::shmem_parts, Firmware, PhysAddr, SbiResult};

/// The unique id of the Debug Triggers extension.
pub const EXTENSION_ID: u32 = 0x44425452;

/// Returns the number of triggers that match the `tdata1` value,
/// or the total number of triggers if it is `0`.
pub fn num_triggers(fw: &impl Firmware, trig_tdata1: usize) -> SbiResult<usize> {
    fw.call1(EXTENSION_ID, 0x00, trig_tdata1).into_result()
}

/// Sets the shared memory of the calling hart, or disables it if `shmem` is `None`.
pub fn set_shmem(fw: &impl Firmware, shmem: Option<PhysAddr>, flags: usize) -> SbiResult<()> {
    let (lo, hi) = shmem_parts(shmem);
    fw.call3(EXTENSION_ID, 0x01, lo, hi, flags)
        .into_result()
        .map(|_| ())
}

/// Reads `trig_count` triggers, starting at `trig_idx_base`, into the shared memory.
pub fn read_triggers(fw: &impl Firmware, trig_idx_base: usize, trig_count: usize) -> SbiResult<()> {
    fw.call2(EXTENSION_ID, 0x02, trig_idx_base, trig_count)
        .into_result()
        .map(|_| ())
}

/// Installs `trig_count` triggers described in the shared memory.
pub fn install_triggers(fw: &impl Firmware, trig_count: usize) -> SbiResult<()> {
    fw.call1(EXTENSION_ID, 0x03, trig_count)
        .into_result()
        .map(|_| ())
}

/// Updates `trig_count` already installed triggers from the shared memory.
pub fn update_triggers(fw: &impl Firmware, trig_count: usize) -> SbiResult<()> {
    fw.call1(EXTENSION_ID, 0x04, trig_count)
        .into_result()
        .map(|_| ())
}

/// Uninstalls the given set of triggers.
pub fn uninstall_triggers(
    fw: &impl Firmware,
    trig_idx_base: usize,
    trig_idx_mask: usize,
) -> SbiResult<()> {
    fw.call2(EXTENSION_ID, 0x05, trig_idx_base, trig_idx_mask)
        .into_result()
        .map(|_| ())
}

/// Enables the given set of triggers.
pub fn enable_triggers(
    fw: &impl Firmware,
    trig_idx_base: usize,
    trig_idx_mask: usize,
) -> SbiResult<()> {
    fw.call2(EXTENSION_ID, 0x06, trig_idx_base, trig_idx_mask)
        .into_result()
        .map(|_| ())
}

/// Disables the given set of triggers.
pub fn disable_triggers(
    fw: &impl Firmware,
    trig_idx_base: usize,
    trig_idx_mask: usize,
) -> SbiResult<()> {
    fw.call2(EXTENSION_ID, 0x07, trig_idx_base, trig_idx_mask)
        .into_result()
        .map(|_| ())
}

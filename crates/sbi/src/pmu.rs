//! Function to access the SBI PMU (Performance Monitoring Unit) extension functionality.
//!
//! Counters are addressed by a base index and a mask, in the same shape as a
//! [`HartMask`](crate::HartMask).

use crate::{addr::shmem_parts, Firmware, PhysAddr, SbiResult};

/// The unique id of the PMU extension.
pub const EXTENSION_ID: u32 = 0x504D55;

/// Returns the number of hardware and firmware counters.
pub fn num_counters(fw: &impl Firmware) -> SbiResult<usize> {
    fw.call0(EXTENSION_ID, 0x00).into_result()
}

/// Returns the raw information word about the counter `counter_idx`.
pub fn counter_get_info(fw: &impl Firmware, counter_idx: usize) -> SbiResult<usize> {
    fw.call1(EXTENSION_ID, 0x01, counter_idx).into_result()
}

/// Finds and configures a counter out of the given set, that can monitor
/// the event `event_idx`.
///
/// Returns the index of the configured counter.
pub fn counter_config_matching(
    fw: &impl Firmware,
    counter_idx_base: usize,
    counter_idx_mask: usize,
    config_flags: usize,
    event_idx: usize,
    event_data: u64,
) -> SbiResult<usize> {
    fw.call5(
        EXTENSION_ID,
        0x02,
        counter_idx_base,
        counter_idx_mask,
        config_flags,
        event_idx,
        event_data as usize,
    )
    .into_result()
}

/// Starts or enables the given set of counters.
pub fn counter_start(
    fw: &impl Firmware,
    counter_idx_base: usize,
    counter_idx_mask: usize,
    start_flags: usize,
    initial_value: u64,
) -> SbiResult<()> {
    fw.call4(
        EXTENSION_ID,
        0x03,
        counter_idx_base,
        counter_idx_mask,
        start_flags,
        initial_value as usize,
    )
    .into_result()
    .map(|_| ())
}

/// Stops or disables the given set of counters.
pub fn counter_stop(
    fw: &impl Firmware,
    counter_idx_base: usize,
    counter_idx_mask: usize,
    stop_flags: usize,
) -> SbiResult<()> {
    fw.call3(EXTENSION_ID, 0x04, counter_idx_base, counter_idx_mask, stop_flags)
        .into_result()
        .map(|_| ())
}

/// Reads the current value of a firmware counter.
pub fn counter_fw_read(fw: &impl Firmware, counter_idx: usize) -> SbiResult<usize> {
    fw.call1(EXTENSION_ID, 0x05, counter_idx).into_result()
}

/// Reads the upper 32 bits of a firmware counter.
///
/// Always `0` on 64 bit harts.
pub fn counter_fw_read_hi(fw: &impl Firmware, counter_idx: usize) -> SbiResult<usize> {
    fw.call1(EXTENSION_ID, 0x06, counter_idx).into_result()
}

/// Sets the shared memory used for counter snapshots, or disables it if `shmem` is `None`.
pub fn snapshot_set_shmem(
    fw: &impl Firmware,
    shmem: Option<PhysAddr>,
    flags: usize,
) -> SbiResult<()> {
    let (lo, hi) = shmem_parts(shmem);
    fw.call3(EXTENSION_ID, 0x07, lo, hi, flags)
        .into_result()
        .map(|_| ())
}

/// Fills the `num_entries` event info entries at `shmem` with information
/// about the listed events.
pub fn event_get_info(
    fw: &impl Firmware,
    shmem: PhysAddr,
    num_entries: usize,
    flags: usize,
) -> SbiResult<()> {
    let (lo, hi) = shmem.split();
    fw.call4(EXTENSION_ID, 0x08, lo, hi, num_entries, flags)
        .into_result()
        .map(|_| ())
}

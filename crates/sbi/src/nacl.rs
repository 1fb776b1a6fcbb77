//! Function to access the SBI NACL (Nested Acceleration) extension functionality.

use crate::{addr::shmem_parts, Firmware, PhysAddr, SbiResult};

/// The unique id of the Nested Acceleration extension.
pub const EXTENSION_ID: u32 = 0x4E41434C;

/// Checks if the nested acceleration feature `feature_id` is available.
pub fn probe_feature(fw: &impl Firmware, feature_id: u32) -> SbiResult<bool> {
    fw.call1(EXTENSION_ID, 0x00, feature_id as usize)
        .into_result()
        .map(|value| value != 0)
}

/// Sets the shared memory of the calling hart, or disables it if `shmem` is `None`.
pub fn set_shmem(fw: &impl Firmware, shmem: Option<PhysAddr>, flags: usize) -> SbiResult<()> {
    let (lo, hi) = shmem_parts(shmem);
    fw.call3(EXTENSION_ID, 0x01, lo, hi, flags)
        .into_result()
        .map(|_| ())
}

/// Synchronizes the CSR `csr_num`, or all CSRs if `csr_num` is `usize::MAX`.
pub fn sync_csr(fw: &impl Firmware, csr_num: usize) -> SbiResult<()> {
    fw.call1(EXTENSION_ID, 0x02, csr_num)
        .into_result()
        .map(|_| ())
}

/// Synchronizes the HFENCE entry `entry_index`, or all entries if it is `usize::MAX`.
pub fn sync_hfence(fw: &impl Firmware, entry_index: usize) -> SbiResult<()> {
    fw.call1(EXTENSION_ID, 0x03, entry_index)
        .into_result()
        .map(|_| ())
}

/// Synchronizes CSRs and HFENCEs and emulates the `SRET` instruction.
///
/// Only returns on failure.
pub fn sync_sret(fw: &impl Firmware) -> SbiResult<()> {
    fw.call0(EXTENSION_ID, 0x04).into_result().map(|_| ())
}

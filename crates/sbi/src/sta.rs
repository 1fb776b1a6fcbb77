//! Function to access the SBI STA (Steal-time Accounting) extension functionality.

use crate::{addr::shmem_parts, Firmware, PhysAddr, SbiResult};

/// The unique id of the Steal-time Accounting extension.
pub const EXTENSION_ID: u32 = 0x535441;

/// Sets the shared memory where the steal time of the calling hart is reported,
/// or disables reporting if `shmem` is `None`.
pub fn set_shmem(fw: &impl Firmware, shmem: Option<PhysAddr>, flags: usize) -> SbiResult<()> {
    let (lo, hi) = shmem_parts(shmem);
    fw.call3(EXTENSION_ID, 0x00, lo, hi, flags)
        .into_result()
        .map(|_| ())
}

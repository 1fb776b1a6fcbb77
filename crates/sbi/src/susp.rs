//! Function to access the SBI SUSP (System Suspend) extension functionality.

use crate::{Firmware, SbiResult};

/// The unique id of the System Suspend extension.
pub const EXTENSION_ID: u32 = 0x53555350;

/// The sleep state the system should enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepType {
    /// Suspend to RAM.
    SuspendToRam,
    /// Raw number that will be passed to the type argument.
    Custom(u32),
}

/// Suspends the whole system.
///
/// On success, the system resumes in S-mode at the physical address `resume_addr`
/// with `opaque` in `a1`, so this function only returns on failure.
pub fn system_suspend(
    fw: &impl Firmware,
    sleep_type: SleepType,
    resume_addr: usize,
    opaque: usize,
) -> SbiResult<()> {
    let sleep_type = match sleep_type {
        SleepType::SuspendToRam => 0x00,
        SleepType::Custom(val) => val,
    };

    fw.call3(EXTENSION_ID, 0x00, sleep_type as usize, resume_addr, opaque)
        .into_result()
        .map(|_| ())
}

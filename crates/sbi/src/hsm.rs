//! Function to access the SBI HSM (Hart State Management) extension functionality.

use crate::{Firmware, SbiResult};

/// The unique id of the HSM extension.
pub const EXTENSION_ID: u32 = 0x48534D;

/// Informs the SBI implementation to asynchronously start the hart with `hart_id`.
///
/// The hart will start execution in S-mode at the physical address `start_addr`,
/// with `hart_id` in `a0` and the raw value of `opaque` in `a1`.
pub fn start(fw: &impl Firmware, hart_id: usize, start_addr: usize, opaque: usize) -> SbiResult<()> {
    fw.call3(EXTENSION_ID, 0x00, hart_id, start_addr, opaque)
        .into_result()
        .map(|_| ())
}

/// Stops the current hart.
///
/// This method must be called with Supervisor and User interrupts disabled.
/// It only returns if stopping the hart failed.
pub fn stop(fw: &impl Firmware) -> SbiResult<()> {
    fw.call0(EXTENSION_ID, 0x01).into_result().map(|_| ())
}

/// Represents the status of a hart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Hart has started and is currently running.
    Started,
    /// Hart is stopped.
    Stopped,
    /// Hart was requested to start, and waits until it can start.
    StartRequestPending,
    /// Hart was requested to stop.
    StopRequestPending,
    /// Hart is in a platform specific suspend state.
    Suspended,
    /// Hart was requested to suspend.
    SuspendPending,
    /// Hart was requested to resume from a suspend state.
    ResumePending,
    /// Unknown status code.
    Unknown(usize),
}

impl Status {
    fn from_raw(value: usize) -> Self {
        match value {
            0 => Status::Started,
            1 => Status::Stopped,
            2 => Status::StartRequestPending,
            3 => Status::StopRequestPending,
            4 => Status::Suspended,
            5 => Status::SuspendPending,
            6 => Status::ResumePending,
            status => Status::Unknown(status),
        }
    }
}

/// Returns the current status of the hart with id `hart_id`.
pub fn status(fw: &impl Firmware, hart_id: usize) -> SbiResult<Status> {
    fw.call1(EXTENSION_ID, 0x02, hart_id)
        .into_result()
        .map(Status::from_raw)
}

/// The kind of suspend a hart should enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspendType {
    /// Default retentive suspend, the hart continues after the call.
    Retentive,
    /// Default non-retentive suspend, the hart resumes at `resume_addr`.
    NonRetentive,
    /// Raw number that will be passed to the type argument.
    Custom(u32),
}

/// Requests the current hart to enter the given suspend state.
///
/// For non-retentive suspends, the hart resumes in S-mode at the physical
/// address `resume_addr` with `opaque` in `a1`.
pub fn suspend(
    fw: &impl Firmware,
    type_: SuspendType,
    resume_addr: usize,
    opaque: usize,
) -> SbiResult<()> {
    let type_ = match type_ {
        SuspendType::Retentive => 0x0000_0000,
        SuspendType::NonRetentive => 0x8000_0000,
        SuspendType::Custom(val) => val,
    };

    fw.call3(EXTENSION_ID, 0x03, type_ as usize, resume_addr, opaque)
        .into_result()
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFirmware;

    #[test]
    fn status_values() {
        assert_eq!(Status::from_raw(0), Status::Started);
        assert_eq!(Status::from_raw(4), Status::Suspended);
        assert_eq!(Status::from_raw(6), Status::ResumePending);
        assert_eq!(Status::from_raw(9), Status::Unknown(9));
    }

    #[test]
    fn start_forwards_arguments() {
        let fw = MockFirmware::new();
        start(&fw, 1, 0x8020_0000, 0xAB).unwrap();
        suspend(&fw, SuspendType::NonRetentive, 0x8030_0000, 1).unwrap();

        let calls = fw.calls_to(EXTENSION_ID);
        assert_eq!(calls[0].args(), &[1, 0x8020_0000, 0xAB]);
        assert_eq!(calls[1].fid, 0x03);
        assert_eq!(calls[1].args(), &[0x8000_0000, 0x8030_0000, 1]);
    }
}

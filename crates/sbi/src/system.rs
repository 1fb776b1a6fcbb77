//! Function to access the SBI System Reset extension functionality.

use crate::{Firmware, SbiResult};

/// The unique id of the System Reset extension.
pub const EXTENSION_ID: u32 = 0x53525354;

/// Specifies the reset type in a `reset` SBI call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Shutdown,
    ColdReboot,
    WarmReboot,
    /// Raw number that will be passed to the type argument.
    Custom(u32),
}

/// The reason a system reset is happening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    NoReason,
    SystemFailure,
    /// Raw number that will be passed to the reason argument.
    Custom(u32),
}

/// Reset the system based on the provided arguments.
///
/// A successful reset never returns, so this function only returns
/// if the firmware didn't reset the system.
pub fn reset(fw: &impl Firmware, type_: Type, reason: Reason) -> SbiResult<()> {
    let type_ = match type_ {
        Type::Shutdown => 0x00,
        Type::ColdReboot => 0x01,
        Type::WarmReboot => 0x02,
        Type::Custom(val) => val,
    };

    let reason = match reason {
        Reason::NoReason => 0x00,
        Reason::SystemFailure => 0x01,
        Reason::Custom(val) => val,
    };

    fw.call2(EXTENSION_ID, 0x00, type_ as usize, reason as usize)
        .into_result()
        .map(|_| ())
}

/// Shuts down the system with no reason.
pub fn shutdown(fw: &impl Firmware) -> SbiResult<()> {
    reset(fw, Type::Shutdown, Reason::NoReason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFirmware;

    #[test]
    fn shutdown_without_reason() {
        let fw = MockFirmware::new();
        shutdown(&fw).unwrap();

        let call = fw.calls()[0];
        assert_eq!((call.eid, call.fid), (EXTENSION_ID, 0x00));
        assert_eq!(call.args(), &[0, 0]);
    }

    #[test]
    fn cold_reboot_on_failure() {
        let fw = MockFirmware::new();
        reset(&fw, Type::ColdReboot, Reason::SystemFailure).unwrap();
        assert_eq!(fw.calls()[0].args(), &[1, 1]);
    }
}

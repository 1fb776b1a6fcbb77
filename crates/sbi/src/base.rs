//! Function to access the SBI base extension functionality.

use crate::{Firmware, SbiResult, Version};

/// The unique id of the base extension.
pub const EXTENSION_ID: u32 = 0x10;

/// Makes an `ecall` that will get the version
/// of the SBI spec that is used.
pub fn spec_version(fw: &impl Firmware) -> SbiResult<Version> {
    fw.call0(EXTENSION_ID, 0x00)
        .into_result()
        .map(Version::from_raw)
}

/// Returns the current SBI implementation ID.
pub fn impl_id(fw: &impl Firmware) -> SbiResult<usize> {
    fw.call0(EXTENSION_ID, 0x01).into_result()
}

/// Returns the current SBI implementation version.
pub fn impl_version(fw: &impl Firmware) -> SbiResult<usize> {
    fw.call0(EXTENSION_ID, 0x02).into_result()
}

/// Checks if the given extension id is available.
pub fn probe_extension(fw: &impl Firmware, ext: u32) -> SbiResult<bool> {
    fw.call1(EXTENSION_ID, 0x03, ext as usize)
        .into_result()
        .map(|value| value != 0)
}

/// Returns the value of the `mvendorid` CSR.
pub fn mvendorid(fw: &impl Firmware) -> SbiResult<usize> {
    fw.call0(EXTENSION_ID, 0x04).into_result()
}

/// Returns the value of the `marchid` CSR.
pub fn marchid(fw: &impl Firmware) -> SbiResult<usize> {
    fw.call0(EXTENSION_ID, 0x05).into_result()
}

/// Returns the value of the `mimpid` CSR.
pub fn mimpid(fw: &impl Firmware) -> SbiResult<usize> {
    fw.call0(EXTENSION_ID, 0x06).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFirmware;

    #[test]
    fn probe_uses_one_argument() {
        let fw = MockFirmware::new().with_extension(crate::dbcn::EXTENSION_ID);

        assert_eq!(probe_extension(&fw, crate::dbcn::EXTENSION_ID), Ok(true));
        assert_eq!(probe_extension(&fw, crate::pmu::EXTENSION_ID), Ok(false));

        let calls = fw.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].eid, EXTENSION_ID);
        assert_eq!(calls[0].fid, 0x03);
        assert_eq!(calls[0].args(), &[crate::dbcn::EXTENSION_ID as usize]);
    }

    #[test]
    fn spec_version_is_decoded() {
        let fw = MockFirmware::new().with_spec_version(2, 0);
        assert_eq!(spec_version(&fw), Ok(Version::new(2, 0)));
    }
}

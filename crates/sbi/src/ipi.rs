//! Function to access the SBI IPI extension functionality.

use crate::{Firmware, HartMask, SbiResult};

/// The unique id of the IPI extension.
pub const EXTENSION_ID: u32 = 0x735049;

/// Send an inter-processor interrupt to all harts defined by the mask.
pub fn send_ipi(fw: &impl Firmware, harts: HartMask) -> SbiResult<()> {
    let (mask, base) = harts.into_raw();
    fw.call2(EXTENSION_ID, 0x00, mask, base)
        .into_result()
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFirmware;

    #[test]
    fn mask_goes_into_a0_and_base_into_a1() {
        let fw = MockFirmware::new();
        let mut harts = HartMask::new(2);
        harts.add(3).unwrap();

        send_ipi(&fw, harts).unwrap();

        let calls = fw.calls_to(EXTENSION_ID);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].fid, 0x00);
        assert_eq!(calls[0].args(), &[0b10, 2]);
    }
}

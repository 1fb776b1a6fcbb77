//! Function to access the SBI DBCN (Debug Console) extension functionality.
//!
//! The buffers passed to the firmware are given as physical addresses, split into
//! the lower and upper 32 bits.

use crate::{Firmware, PhysAddr, SbiResult};

/// The unique id of the Debug Console extension.
pub const EXTENSION_ID: u32 = 0x4442434E;

/// Writes `num_bytes` bytes, starting at the physical address `base`, to the
/// debug console.
///
/// Returns the number of bytes that were actually written, which might be less
/// than `num_bytes`.
pub fn write(fw: &impl Firmware, num_bytes: usize, base: PhysAddr) -> SbiResult<usize> {
    let (lo, hi) = base.split();
    fw.call3(EXTENSION_ID, 0x00, num_bytes, lo, hi).into_result()
}

/// Reads at most `num_bytes` bytes from the debug console into the buffer at
/// the physical address `base`.
///
/// Returns the number of bytes that were read.
pub fn read(fw: &impl Firmware, num_bytes: usize, base: PhysAddr) -> SbiResult<usize> {
    let (lo, hi) = base.split();
    fw.call3(EXTENSION_ID, 0x01, num_bytes, lo, hi).into_result()
}

/// Writes a single byte to the debug console.
///
/// This blocks until the byte was written.
pub fn write_byte(fw: &impl Firmware, byte: u8) -> SbiResult<()> {
    fw.call1(EXTENSION_ID, 0x02, byte as usize)
        .into_result()
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFirmware;

    #[test]
    fn write_splits_the_address() {
        let fw = MockFirmware::new();
        write(&fw, 14, PhysAddr::new(0x0000_0001_8000_2000)).unwrap();

        let call = fw.calls()[0];
        assert_eq!((call.eid, call.fid, call.arity), (EXTENSION_ID, 0x00, 3));
        assert_eq!(call.args(), &[14, 0x8000_2000, 0x1]);
    }

    #[test]
    fn write_byte_has_one_argument() {
        let fw = MockFirmware::new();
        write_byte(&fw, b'x').unwrap();
        assert_eq!(fw.calls()[0].args(), &[b'x' as usize]);
    }
}

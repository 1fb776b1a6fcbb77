//! Function to access the SBI RFENCE extension functionality.
//!
//! Every function takes the harts that should execute the fence, and most of them
//! take the virtual address range that is affected. A `start` and `size` of `0`,
//! or a `size` of `usize::MAX`, cover the whole address space.

use crate::{Firmware, HartMask, SbiResult};

/// The unique id of the RFENCE extension.
pub const EXTENSION_ID: u32 = 0x52464E43;

/// Instructs the remote harts to execute a `FENCE.I` instruction.
pub fn remote_fence_i(fw: &impl Firmware, harts: HartMask) -> SbiResult<()> {
    let (mask, base) = harts.into_raw();
    fw.call2(EXTENSION_ID, 0x00, mask, base)
        .into_result()
        .map(|_| ())
}

/// Instructs the remote harts to execute `SFENCE.VMA` for the given range.
pub fn remote_sfence_vma(
    fw: &impl Firmware,
    harts: HartMask,
    start: usize,
    size: usize,
) -> SbiResult<()> {
    let (mask, base) = harts.into_raw();
    fw.call4(EXTENSION_ID, 0x01, mask, base, start, size)
        .into_result()
        .map(|_| ())
}

/// Instructs the remote harts to execute `SFENCE.VMA` for the given range,
/// only covering the given `asid`.
pub fn remote_sfence_vma_asid(
    fw: &impl Firmware,
    harts: HartMask,
    start: usize,
    size: usize,
    asid: usize,
) -> SbiResult<()> {
    let (mask, base) = harts.into_raw();
    fw.call5(EXTENSION_ID, 0x02, mask, base, start, size, asid)
        .into_result()
        .map(|_| ())
}

/// Instructs the remote harts to execute `HFENCE.GVMA` for the given
/// guest physical range, only covering the given `vmid`.
pub fn remote_hfence_gvma_vmid(
    fw: &impl Firmware,
    harts: HartMask,
    start: usize,
    size: usize,
    vmid: usize,
) -> SbiResult<()> {
    let (mask, base) = harts.into_raw();
    fw.call5(EXTENSION_ID, 0x03, mask, base, start, size, vmid)
        .into_result()
        .map(|_| ())
}

/// Instructs the remote harts to execute `HFENCE.GVMA` for the given
/// guest physical range.
pub fn remote_hfence_gvma(
    fw: &impl Firmware,
    harts: HartMask,
    start: usize,
    size: usize,
) -> SbiResult<()> {
    let (mask, base) = harts.into_raw();
    fw.call4(EXTENSION_ID, 0x04, mask, base, start, size)
        .into_result()
        .map(|_| ())
}

/// Instructs the remote harts to execute `HFENCE.VVMA` for the given
/// guest virtual range, only covering the given `asid`.
pub fn remote_hfence_vvma_asid(
    fw: &impl Firmware,
    harts: HartMask,
    start: usize,
    size: usize,
    asid: usize,
) -> SbiResult<()> {
    let (mask, base) = harts.into_raw();
    fw.call5(EXTENSION_ID, 0x05, mask, base, start, size, asid)
        .into_result()
        .map(|_| ())
}

/// Instructs the remote harts to execute `HFENCE.VVMA` for the given
/// guest virtual range.
pub fn remote_hfence_vvma(
    fw: &impl Firmware,
    harts: HartMask,
    start: usize,
    size: usize,
) -> SbiResult<()> {
    let (mask, base) = harts.into_raw();
    fw.call4(EXTENSION_ID, 0x06, mask, base, start, size)
        .into_result()
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFirmware;

    #[test]
    fn asid_variant_uses_five_registers() {
        let fw = MockFirmware::new();
        remote_sfence_vma_asid(&fw, HartMask::all(), 0x1000, 0x2000, 7).unwrap();

        let call = fw.calls()[0];
        assert_eq!((call.eid, call.fid, call.arity), (EXTENSION_ID, 0x02, 5));
        assert_eq!(call.args(), &[0, usize::MAX, 0x1000, 0x2000, 7]);
    }
}

//! Function to access the SBI SSE (Supervisor Software Events) extension functionality.

use crate::{Firmware, PhysAddr, SbiResult};

/// The unique id of the Supervisor Software Events extension.
pub const EXTENSION_ID: u32 = 0x535345;

/// Reads `attr_count` attributes of the event `event_id`, starting at
/// `base_attr_id`, into the buffer at `output`.
pub fn read_attrs(
    fw: &impl Firmware,
    event_id: u32,
    base_attr_id: u32,
    attr_count: u32,
    output: PhysAddr,
) -> SbiResult<()> {
    let (lo, hi) = output.split();
    fw.call5(
        EXTENSION_ID,
        0x00,
        event_id as usize,
        base_attr_id as usize,
        attr_count as usize,
        lo,
        hi,
    )
    .into_result()
    .map(|_| ())
}

/// Writes `attr_count` attributes of the event `event_id`, starting at
/// `base_attr_id`, from the buffer at `input`.
pub fn write_attrs(
    fw: &impl Firmware,
    event_id: u32,
    base_attr_id: u32,
    attr_count: u32,
    input: PhysAddr,
) -> SbiResult<()> {
    let (lo, hi) = input.split();
    fw.call5(
        EXTENSION_ID,
        0x01,
        event_id as usize,
        base_attr_id as usize,
        attr_count as usize,
        lo,
        hi,
    )
    .into_result()
    .map(|_| ())
}

/// Registers a handler for the event `event_id`.
pub fn register(
    fw: &impl Firmware,
    event_id: u32,
    handler_entry_pc: usize,
    handler_entry_arg: usize,
) -> SbiResult<()> {
    fw.call3(
        EXTENSION_ID,
        0x02,
        event_id as usize,
        handler_entry_pc,
        handler_entry_arg,
    )
    .into_result()
    .map(|_| ())
}

/// Removes the handler of the event `event_id`.
pub fn unregister(fw: &impl Firmware, event_id: u32) -> SbiResult<()> {
    fw.call1(EXTENSION_ID, 0x03, event_id as usize)
        .into_result()
        .map(|_| ())
}

/// Enables delivery of the event `event_id`.
pub fn enable(fw: &impl Firmware, event_id: u32) -> SbiResult<()> {
    fw.call1(EXTENSION_ID, 0x04, event_id as usize)
        .into_result()
        .map(|_| ())
}

/// Disables delivery of the event `event_id`.
pub fn disable(fw: &impl Firmware, event_id: u32) -> SbiResult<()> {
    fw.call1(EXTENSION_ID, 0x05, event_id as usize)
        .into_result()
        .map(|_| ())
}

/// Completes the handling of the current event.
pub fn complete(fw: &impl Firmware) -> SbiResult<()> {
    fw.call0(EXTENSION_ID, 0x06).into_result().map(|_| ())
}

/// Injects the event `event_id` into the hart `hart_id`.
pub fn inject(fw: &impl Firmware, event_id: u32, hart_id: usize) -> SbiResult<()> {
    fw.call2(EXTENSION_ID, 0x07, event_id as usize, hart_id)
        .into_result()
        .map(|_| ())
}

/// Starts delivering events to the calling hart.
pub fn hart_unmask(fw: &impl Firmware) -> SbiResult<()> {
    fw.call0(EXTENSION_ID, 0x08).into_result().map(|_| ())
}

/// Stops delivering events to the calling hart.
pub fn hart_mask(fw: &impl Firmware) -> SbiResult<()> {
    fw.call0(EXTENSION_ID, 0x09).into_result().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFirmware;

    #[test]
    fn attributes_buffer_is_split() {
        let fw = MockFirmware::new();
        read_attrs(&fw, 0x10, 2, 3, PhysAddr::new(0x2_0000_1000)).unwrap();

        let call = fw.calls()[0];
        assert_eq!(call.arity, 5);
        assert_eq!(call.args(), &[0x10, 2, 3, 0x1000, 0x2]);
    }
}

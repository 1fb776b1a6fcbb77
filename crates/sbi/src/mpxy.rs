//! Function to access the SBI MPXY (Message Proxy) extension functionality.
//!
//! Message data and attributes are exchanged through a per-hart shared memory
//! region, whose size is returned by [`get_shmem_size`].

use crate::{addr::shmem_parts, Firmware, PhysAddr, SbiResult};

/// The unique id of the Message Proxy extension.
pub const EXTENSION_ID: u32 = 0x4D505859;

/// Returns the size of the shared memory region in bytes.
pub fn get_shmem_size(fw: &impl Firmware) -> SbiResult<usize> {
    fw.call0(EXTENSION_ID, 0x00).into_result()
}

/// Sets the shared memory of the calling hart, or disables it if `shmem` is `None`.
pub fn set_shmem(fw: &impl Firmware, shmem: Option<PhysAddr>, flags: usize) -> SbiResult<()> {
    let (lo, hi) = shmem_parts(shmem);
    fw.call3(EXTENSION_ID, 0x01, lo, hi, flags)
        .into_result()
        .map(|_| ())
}

/// Writes the channel ids, starting at `start_index`, into the shared memory.
pub fn get_channel_ids(fw: &impl Firmware, start_index: u32) -> SbiResult<()> {
    fw.call1(EXTENSION_ID, 0x02, start_index as usize)
        .into_result()
        .map(|_| ())
}

/// Reads `attribute_count` attributes of `channel_id` into the shared memory.
pub fn read_attributes(
    fw: &impl Firmware,
    channel_id: u32,
    base_attribute_id: u32,
    attribute_count: u32,
) -> SbiResult<()> {
    fw.call3(
        EXTENSION_ID,
        0x03,
        channel_id as usize,
        base_attribute_id as usize,
        attribute_count as usize,
    )
    .into_result()
    .map(|_| ())
}

/// Writes `attribute_count` attributes of `channel_id` from the shared memory.
pub fn write_attributes(
    fw: &impl Firmware,
    channel_id: u32,
    base_attribute_id: u32,
    attribute_count: u32,
) -> SbiResult<()> {
    fw.call3(
        EXTENSION_ID,
        0x04,
        channel_id as usize,
        base_attribute_id as usize,
        attribute_count as usize,
    )
    .into_result()
    .map(|_| ())
}

/// Sends the message in the shared memory and waits for the response.
///
/// Returns the length of the response, which was written into the shared memory.
pub fn send_message_with_response(
    fw: &impl Firmware,
    channel_id: u32,
    message_id: u32,
    message_data_len: usize,
) -> SbiResult<usize> {
    fw.call3(
        EXTENSION_ID,
        0x05,
        channel_id as usize,
        message_id as usize,
        message_data_len,
    )
    .into_result()
}

/// Sends the message in the shared memory without waiting for a response.
pub fn send_message_without_response(
    fw: &impl Firmware,
    channel_id: u32,
    message_id: u32,
    message_data_len: usize,
) -> SbiResult<()> {
    fw.call3(
        EXTENSION_ID,
        0x06,
        channel_id as usize,
        message_id as usize,
        message_data_len,
    )
    .into_result()
    .map(|_| ())
}

/// Writes the pending notification events of `channel_id` into the shared memory.
pub fn get_notification_events(fw: &impl Firmware, channel_id: u32) -> SbiResult<()> {
    fw.call1(EXTENSION_ID, 0x07, channel_id as usize)
        .into_result()
        .map(|_| ())
}

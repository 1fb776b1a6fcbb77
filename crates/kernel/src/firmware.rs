//! The firmware the kernel runs on, and what it can do.

use sbi::{Capabilities, Ecall};
use spin::Once;

static FIRMWARE: Ecall = Ecall;
static CAPABILITIES: Once<Capabilities> = Once::new();
static NONE: Capabilities = Capabilities::NONE;

/// The firmware of this machine.
pub fn firmware() -> &'static Ecall {
    &FIRMWARE
}

/// Probe the firmware and store the result.
///
/// The firmware is only probed on the first call.
pub fn init() -> &'static Capabilities {
    CAPABILITIES.call_once(|| Capabilities::probe(&FIRMWARE))
}

/// The stored capabilities, or a snapshot without any extension if
/// [`init`] wasn't called yet.
pub fn snapshot() -> &'static Capabilities {
    CAPABILITIES.get().unwrap_or(&NONE)
}

//! Constants for the QEMU `virt` machine.

use core::time::Duration;

/// The frequency of the `time` CSR.
pub const TIMEBASE_FREQUENCY: u64 = 10_000_000;

/// The time that passed since the machine was reset.
#[cfg(target_arch = "riscv64")]
pub fn time() -> Duration {
    let ticks: u64;
    unsafe {
        core::arch::asm!("rdtime {}", out(reg) ticks, options(nomem, nostack));
    }
    ticks_to_duration(ticks)
}

/// There is no `time` CSR on the host, so the clock never moves.
#[cfg(not(target_arch = "riscv64"))]
pub fn time() -> Duration {
    Duration::ZERO
}

#[cfg_attr(not(target_arch = "riscv64"), allow(dead_code))]
fn ticks_to_duration(ticks: u64) -> Duration {
    let secs = ticks / TIMEBASE_FREQUENCY;
    let nanos = (ticks % TIMEBASE_FREQUENCY) * (1_000_000_000 / TIMEBASE_FREQUENCY);
    Duration::new(secs, nanos as u32)
}

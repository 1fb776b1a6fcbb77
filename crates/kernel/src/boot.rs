//! The entrypoint for the whole kernel.
//!
//! Limine enters the kernel in supervisor mode with a valid stack, paging
//! enabled and the `.bss` section already zeroed, so there is very little left
//! to do before Rust code can run.

core::arch::global_asm!(
    ".section .text.init",
    ".global _boot",
    "_boot:",
    // ---------------------------------
    // Load the global pointer into
    // the `gp` register
    // ---------------------------------
    ".option push",
    ".option norelax",
    "    la gp, __global_pointer",
    ".option pop",
    // ---------------------------------
    // Disable interrupts
    // ---------------------------------
    "    csrw sie, zero",
    // ---------------------------------
    // Jump into rust code
    // ---------------------------------
    "    call kinit",
    "1:",
    "    wfi",
    "    j 1b",
);

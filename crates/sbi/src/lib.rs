//! Supervisor-side bindings for the RISC-V [SBI] specification.
//!
//! Every firmware service is reached through the [`Firmware`] trait, which
//! exposes one call shape per argument count. The real implementation is
//! [`Ecall`], but every extension module takes the firmware as an argument,
//! so tests can swap in a recording stand-in.
//!
//! The wrappers target version 3.0 of the specification.
//!
//! [SBI]: https://github.com/riscv-non-isa/riscv-sbi-doc
#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![no_std]

#[cfg(not(target_pointer_width = "64"))]
compile_error!("Brisa can only run on 64 bit systems");

#[cfg(any(test, feature = "mock"))]
extern crate std;

mod addr;
pub use addr::PhysAddr;

mod ecall;
pub use ecall::{Ecall, Firmware, SbiRet};

pub mod hart_mask;
pub use hart_mask::HartMask;

mod capabilities;
pub use capabilities::{Capabilities, Extensions, Version};

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub mod base;
pub mod cppc;
pub mod dbcn;
pub mod dbtr;
pub mod fwft;
pub mod hsm;
pub mod ipi;
pub mod mpxy;
pub mod nacl;
pub mod pmu;
pub mod rfence;
pub mod sse;
pub mod sta;
pub mod susp;
pub mod system;
pub mod timer;

/// The result of a SBI call.
pub type SbiResult<T> = core::result::Result<T, Error>;

displaydoc_lite::displaydoc! {
    /// Standard SBI errors that can occurr while executing a
    /// SBI call.
    ///
    /// An [`Error`] is retrieved by reading the `a0` register after making
    /// a SBI call. If the register is `0`, the call was successful and there's
    /// probably a value available in `a1`, otherwise the SBI call failed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Error {
        /// the SBI call failed
        Failed,
        /// the SBI call is not supported
        NotSupported,
        /// an invalid parameter was passed
        InvalidParam,
        /// the SBI call was denied
        Denied,
        /// an invalid address was passed
        InvalidAddress,
        /// the resource is already available
        AlreadyAvailable,
        /// the hart is already started
        AlreadyStarted,
        /// the hart is already stopped
        AlreadyStopped,
        /// shared memory is not available
        NoSharedMemory,
        /// the resource is in an invalid state
        InvalidState,
        /// the given range is bad
        BadRange,
        /// the SBI call timed out
        Timeout,
        /// an I/O error occurred
        Io,
        /// the SBI call was denied and the resource is locked
        DeniedLocked,
        /// unknown SBI error code {_0}
        Unknown(isize),
    }
}

impl Error {
    /// Converts a raw, non-zero error code into an [`Error`].
    ///
    /// Codes outside of the standard range are kept as [`Error::Unknown`].
    pub fn from_code(code: isize) -> Self {
        match code {
            -1 => Error::Failed,
            -2 => Error::NotSupported,
            -3 => Error::InvalidParam,
            -4 => Error::Denied,
            -5 => Error::InvalidAddress,
            -6 => Error::AlreadyAvailable,
            -7 => Error::AlreadyStarted,
            -8 => Error::AlreadyStopped,
            -9 => Error::NoSharedMemory,
            -10 => Error::InvalidState,
            -11 => Error::BadRange,
            -12 => Error::Timeout,
            -13 => Error::Io,
            -14 => Error::DeniedLocked,
            code => Error::Unknown(code),
        }
    }

    /// Converts this `Error` into it's specific error code.
    pub fn code(&self) -> isize {
        match *self {
            Error::Failed => -1,
            Error::NotSupported => -2,
            Error::InvalidParam => -3,
            Error::Denied => -4,
            Error::InvalidAddress => -5,
            Error::AlreadyAvailable => -6,
            Error::AlreadyStarted => -7,
            Error::AlreadyStopped => -8,
            Error::NoSharedMemory => -9,
            Error::InvalidState => -10,
            Error::BadRange => -11,
            Error::Timeout => -12,
            Error::Io => -13,
            Error::DeniedLocked => -14,
            Error::Unknown(code) => code,
        }
    }
}

//! The raw calling convention used to reach the firmware.
//!
//! A SBI call places the extension id in `a7`, the function id in `a6` and up to
//! five arguments in `a0..a4`. After the `ecall` returns, `a0` holds the error code
//! and `a1` holds the value. Because the result registers are also the first two
//! argument registers, every call shape below declares them as `inlateout` when
//! they carry an argument, and as `lateout` otherwise.

use crate::{Error, SbiResult};

/// The two registers returned by every SBI call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SbiRet {
    /// The raw error code read from `a0`. `0` means success.
    pub error: isize,
    /// The raw value read from `a1`.
    pub value: usize,
}

impl SbiRet {
    /// A successful result carrying `value`.
    pub const fn success(value: usize) -> Self {
        Self { error: 0, value }
    }

    /// A failed result carrying the code of `err`.
    pub fn failure(err: Error) -> Self {
        Self {
            error: err.code(),
            value: 0,
        }
    }

    /// Interprets the value register as a signed number.
    pub fn value_signed(&self) -> isize {
        self.value as isize
    }

    /// Checks if the error code is `0`, which is successful and thus returns `Ok(value)`,
    /// otherwise the specified error will be returned.
    pub fn into_result(self) -> SbiResult<usize> {
        match self.error {
            0 => Ok(self.value),
            code => Err(Error::from_code(code)),
        }
    }
}

/// Something that can execute SBI calls.
///
/// There is one method per argument count, so the set of registers taking part in
/// the trap is always exact. None of them validate arguments or interpret the
/// result.
///
/// Implementations are not required to be safe to call from multiple harts at once.
/// Extensions that work on caller provided shared memory need an external locking
/// discipline for that.
pub trait Firmware {
    fn call0(&self, eid: u32, fid: u32) -> SbiRet;

    fn call1(&self, eid: u32, fid: u32, a0: usize) -> SbiRet;

    fn call2(&self, eid: u32, fid: u32, a0: usize, a1: usize) -> SbiRet;

    fn call3(&self, eid: u32, fid: u32, a0: usize, a1: usize, a2: usize) -> SbiRet;

    fn call4(&self, eid: u32, fid: u32, a0: usize, a1: usize, a2: usize, a3: usize) -> SbiRet;

    #[allow(clippy::too_many_arguments)]
    fn call5(
        &self,
        eid: u32,
        fid: u32,
        a0: usize,
        a1: usize,
        a2: usize,
        a3: usize,
        a4: usize,
    ) -> SbiRet;
}

/// The firmware running below us, reached with the `ecall` instruction.
///
/// On anything that is not a RISC-V machine, there is no firmware and every call
/// reports [`Error::NotSupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Ecall;

// No call uses `nomem`: the firmware may read and write any memory handed to it.
#[cfg(target_arch = "riscv64")]
impl Firmware for Ecall {
    #[inline]
    fn call0(&self, eid: u32, fid: u32) -> SbiRet {
        let (error, value): (isize, usize);
        unsafe {
            core::arch::asm!("ecall",
                in("a7") eid as usize,
                in("a6") fid as usize,
                lateout("a0") error,
                lateout("a1") value,
                options(nostack)
            );
        }
        SbiRet { error, value }
    }

    #[inline]
    fn call1(&self, eid: u32, fid: u32, a0: usize) -> SbiRet {
        let (error, value): (isize, usize);
        unsafe {
            core::arch::asm!("ecall",
                in("a7") eid as usize,
                in("a6") fid as usize,
                inlateout("a0") a0 => error,
                lateout("a1") value,
                options(nostack)
            );
        }
        SbiRet { error, value }
    }

    #[inline]
    fn call2(&self, eid: u32, fid: u32, a0: usize, a1: usize) -> SbiRet {
        let (error, value): (isize, usize);
        unsafe {
            core::arch::asm!("ecall",
                in("a7") eid as usize,
                in("a6") fid as usize,
                inlateout("a0") a0 => error,
                inlateout("a1") a1 => value,
                options(nostack)
            );
        }
        SbiRet { error, value }
    }

    #[inline]
    fn call3(&self, eid: u32, fid: u32, a0: usize, a1: usize, a2: usize) -> SbiRet {
        let (error, value): (isize, usize);
        unsafe {
            core::arch::asm!("ecall",
                in("a7") eid as usize,
                in("a6") fid as usize,
                inlateout("a0") a0 => error,
                inlateout("a1") a1 => value,
                in("a2") a2,
                options(nostack)
            );
        }
        SbiRet { error, value }
    }

    #[inline]
    fn call4(&self, eid: u32, fid: u32, a0: usize, a1: usize, a2: usize, a3: usize) -> SbiRet {
        let (error, value): (isize, usize);
        unsafe {
            core::arch::asm!("ecall",
                in("a7") eid as usize,
                in("a6") fid as usize,
                inlateout("a0") a0 => error,
                inlateout("a1") a1 => value,
                in("a2") a2,
                in("a3") a3,
                options(nostack)
            );
        }
        SbiRet { error, value }
    }

    #[inline]
    fn call5(
        &self,
        eid: u32,
        fid: u32,
        a0: usize,
        a1: usize,
        a2: usize,
        a3: usize,
        a4: usize,
    ) -> SbiRet {
        let (error, value): (isize, usize);
        unsafe {
            core::arch::asm!("ecall",
                in("a7") eid as usize,
                in("a6") fid as usize,
                inlateout("a0") a0 => error,
                inlateout("a1") a1 => value,
                in("a2") a2,
                in("a3") a3,
                in("a4") a4,
                options(nostack)
            );
        }
        SbiRet { error, value }
    }
}

#[cfg(not(target_arch = "riscv64"))]
impl Firmware for Ecall {
    fn call0(&self, _eid: u32, _fid: u32) -> SbiRet {
        SbiRet::failure(Error::NotSupported)
    }

    fn call1(&self, _eid: u32, _fid: u32, _a0: usize) -> SbiRet {
        SbiRet::failure(Error::NotSupported)
    }

    fn call2(&self, _eid: u32, _fid: u32, _a0: usize, _a1: usize) -> SbiRet {
        SbiRet::failure(Error::NotSupported)
    }

    fn call3(&self, _eid: u32, _fid: u32, _a0: usize, _a1: usize, _a2: usize) -> SbiRet {
        SbiRet::failure(Error::NotSupported)
    }

    fn call4(&self, _eid: u32, _fid: u32, _: usize, _: usize, _: usize, _: usize) -> SbiRet {
        SbiRet::failure(Error::NotSupported)
    }

    fn call5(&self, _: u32, _: u32, _: usize, _: usize, _: usize, _: usize, _: usize) -> SbiRet {
        SbiRet::failure(Error::NotSupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_error_is_success() {
        assert_eq!(SbiRet::success(42).into_result(), Ok(42));
        assert_eq!(SbiRet { error: 0, value: 0 }.into_result(), Ok(0));
    }

    #[test]
    fn negative_error_is_decoded() {
        let ret = SbiRet {
            error: -9,
            value: 0xdead,
        };
        assert_eq!(ret.into_result(), Err(Error::NoSharedMemory));
        assert_eq!(SbiRet::failure(Error::Denied).error, -4);
    }

    #[test]
    fn value_has_signed_view() {
        let ret = SbiRet::success(usize::MAX);
        assert_eq!(ret.value_signed(), -1);
    }

    #[test]
    #[cfg(not(target_arch = "riscv64"))]
    fn host_has_no_firmware() {
        assert_eq!(
            Ecall.call1(crate::base::EXTENSION_ID, 3, 0x10).into_result(),
            Err(Error::NotSupported)
        );
        assert_eq!(
            Ecall.call5(0, 0, 1, 2, 3, 4, 5).into_result(),
            Err(Error::NotSupported)
        );
    }
}

//! Output through the SBI debug console.

use crate::firmware;
use core::fmt;
use sbi::{dbcn, Capabilities, Ecall, Firmware};

/// A byte sink on top of the DBCN extension.
///
/// If the debug console can't be used, every write is silently dropped.
pub struct Console<'a, F> {
    fw: &'a F,
    caps: &'a Capabilities,
}

impl<'a, F: Firmware> Console<'a, F> {
    pub fn new(fw: &'a F, caps: &'a Capabilities) -> Self {
        Self { fw, caps }
    }

    /// Check if anything written to this console will show up.
    pub fn is_enabled(&self) -> bool {
        self.caps.debug_console()
    }

    /// Write the given bytes one at a time.
    ///
    /// Stops at the first byte the firmware refuses.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if !self.is_enabled() {
            return;
        }

        for &byte in bytes {
            if dbcn::write_byte(self.fw, byte).is_err() {
                break;
            }
        }
    }
}

impl<F: Firmware> fmt::Write for Console<'_, F> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

/// The console of the running kernel.
///
/// Before the firmware was probed, this console is disabled.
pub fn get() -> Console<'static, Ecall> {
    Console::new(firmware::firmware(), firmware::snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use sbi::{mock::MockFirmware, Extensions, Version};

    #[test]
    fn absent_console_makes_no_calls() {
        let fw = MockFirmware::new();
        let caps = Capabilities::NONE;
        let mut console = Console::new(&fw, &caps);

        write!(console, "nobody listens").unwrap();
        assert!(!console.is_enabled());
        assert!(fw.calls().is_empty());
    }

    #[test]
    fn one_call_per_byte() {
        let fw = MockFirmware::new();
        let caps = Capabilities::with_extensions(Version::new(2, 0), Extensions::DBCN);
        let mut console = Console::new(&fw, &caps);

        write!(console, "ok{}", 1).unwrap();

        let bytes = fw
            .calls_to(dbcn::EXTENSION_ID)
            .iter()
            .map(|call| {
                assert_eq!(call.fid, 0x02);
                call.args()[0] as u8
            })
            .collect::<Vec<_>>();
        assert_eq!(bytes, b"ok1");
    }

    #[test]
    fn stops_after_refused_byte() {
        let fw = MockFirmware::new().failing(dbcn::EXTENSION_ID, 0x02);
        let caps = Capabilities::with_extensions(Version::new(2, 0), Extensions::DBCN);
        let mut console = Console::new(&fw, &caps);

        console.write_bytes(b"abc");
        assert_eq!(fw.calls().len(), 1);
    }
}

//! Output and termination for the earliest stage of the boot.
//!
//! [`EarlyDebug`] hands strings of the kernel image directly to the firmware,
//! without going through the [console](crate::console). The firmware expects
//! physical addresses, so every string is translated through the image mapping
//! first.

use crate::{
    addr::{Offsets, VirtAddr},
    arch,
};
use sbi::{dbcn, system, Capabilities, Firmware};

/// The steps of [`EarlyDebug::early_panic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicState {
    /// Print the message.
    Reporting,
    /// Ask the firmware to shut the machine down.
    Resetting,
    /// Nothing is left to try.
    Halted,
}

/// Best-effort debug output through the DBCN extension.
pub struct EarlyDebug<'a, F> {
    fw: &'a F,
    caps: &'a Capabilities,
    offsets: &'a Offsets,
}

impl<'a, F: Firmware> EarlyDebug<'a, F> {
    pub fn new(fw: &'a F, caps: &'a Capabilities, offsets: &'a Offsets) -> Self {
        Self { fw, caps, offsets }
    }

    /// Print a string that is part of the kernel image.
    ///
    /// Does nothing if the debug console is not available. The string is
    /// handed to the firmware in a single call; if the firmware writes only a
    /// part of it, the rest is lost.
    pub fn print(&self, s: &'static str) {
        self.print_raw(VirtAddr::from_ptr(s.as_ptr()), s.len());
    }

    /// Print `len` bytes starting at `addr`, which must be inside the image.
    pub fn print_raw(&self, addr: VirtAddr, len: usize) {
        if !self.caps.debug_console() {
            return;
        }

        let phys = self.offsets.image_to_phys(addr);
        let _ = dbcn::write(self.fw, len, phys);
    }

    /// Print a message and keep going.
    pub fn log(&self, s: &'static str) {
        self.print(s);
    }

    /// Run a single step of the panic sequence and return the next one.
    pub fn advance(&self, state: PanicState, msg: &'static str) -> PanicState {
        match state {
            PanicState::Reporting => {
                self.print(msg);
                PanicState::Resetting
            }
            PanicState::Resetting => {
                shutdown(self.fw, self.caps);
                PanicState::Halted
            }
            PanicState::Halted => PanicState::Halted,
        }
    }

    /// Print the message, then shut the machine down, or hang if that fails.
    pub fn early_panic(&self, msg: &'static str) -> ! {
        let mut state = PanicState::Reporting;
        while state != PanicState::Halted {
            state = self.advance(state, msg);
        }

        arch::wait_forever()
    }
}

/// Shut the machine down if the firmware allows it, otherwise hang.
pub fn terminate(fw: &impl Firmware, caps: &Capabilities) -> ! {
    shutdown(fw, caps);
    arch::wait_forever()
}

fn shutdown(fw: &impl Firmware, caps: &Capabilities) {
    if caps.system_reset() {
        // a reset that returns failed, and the only thing left is to halt
        let _ = system::shutdown(fw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbi::{mock::MockFirmware, Extensions, Version};
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn caps(extensions: Extensions) -> Capabilities {
        Capabilities::with_extensions(Version::new(3, 0), extensions)
    }

    #[test]
    fn print_without_console_is_silent() {
        let fw = MockFirmware::new();
        let caps = caps(Extensions::SRST);
        let offsets = Offsets::new(0, 0, 0);

        let debug = EarlyDebug::new(&fw, &caps, &offsets);
        debug.print("hello");
        debug.print("");
        debug.print_raw(VirtAddr::new(0x1000_2000), 0);
        assert!(fw.calls().is_empty());
    }

    #[test]
    fn console_of_old_firmware_is_used() {
        let fw = MockFirmware::new()
            .with_spec_version(1, 0)
            .with_extension(dbcn::EXTENSION_ID)
            .with_extension(system::EXTENSION_ID);
        let caps = Capabilities::probe(&fw);
        fw.clear();
        let offsets = Offsets::new(0, 0, 0);
        let debug = EarlyDebug::new(&fw, &caps, &offsets);

        assert!(!caps.has(Extensions::DBCN));
        debug.print("hello");
        assert_eq!(fw.calls_to(dbcn::EXTENSION_ID).len(), 1);

        let state = debug.advance(PanicState::Resetting, "hello");
        assert_eq!(state, PanicState::Halted);
        assert_eq!(fw.calls_to(system::EXTENSION_ID).len(), 1);
    }

    #[test]
    fn print_translates_through_the_image_mapping() {
        let fw = MockFirmware::new();
        let caps = caps(Extensions::DBCN);
        let offsets = Offsets::new(0x1000, 0x1000_2000, 0x1000);
        let debug = EarlyDebug::new(&fw, &caps, &offsets);

        debug.print_raw(VirtAddr::new(0x1000_2000), 5);

        let calls = fw.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!((calls[0].eid, calls[0].fid), (dbcn::EXTENSION_ID, 0x00));
        assert_eq!(calls[0].args(), &[5, 0x1000, 0]);
    }

    #[test]
    fn print_passes_length_and_split_address() {
        static MSG: &str = "Hello, world!\n";

        let fw = MockFirmware::new();
        let caps = caps(Extensions::DBCN);
        let offsets = Offsets::new(0, MSG.as_ptr() as u64, 0x0000_0002_8000_0000);

        EarlyDebug::new(&fw, &caps, &offsets).log(MSG);

        let call = fw.calls()[0];
        assert_eq!(call.args(), &[14, 0x8000_0000, 0x2]);
    }

    #[test]
    fn panic_sequence_with_reset() {
        let fw = MockFirmware::new();
        let caps = caps(Extensions::DBCN | Extensions::SRST);
        let offsets = Offsets::new(0, 0, 0);
        let debug = EarlyDebug::new(&fw, &caps, &offsets);

        let state = debug.advance(PanicState::Reporting, "boom");
        assert_eq!(state, PanicState::Resetting);
        assert_eq!(fw.calls_to(dbcn::EXTENSION_ID).len(), 1);

        let state = debug.advance(state, "boom");
        assert_eq!(state, PanicState::Halted);
        let resets = fw.calls_to(system::EXTENSION_ID);
        assert_eq!(resets.len(), 1);
        assert_eq!(resets[0].args(), &[0, 0]);

        assert_eq!(debug.advance(state, "boom"), PanicState::Halted);
        assert_eq!(fw.calls().len(), 2);
    }

    #[test]
    fn panic_sequence_without_reset_halts() {
        let fw = MockFirmware::new();
        let caps = caps(Extensions::DBCN);
        let offsets = Offsets::new(0, 0, 0);
        let debug = EarlyDebug::new(&fw, &caps, &offsets);

        let state = debug.advance(PanicState::Reporting, "boom");
        assert_eq!(debug.advance(state, "boom"), PanicState::Halted);
        assert!(fw.calls_to(system::EXTENSION_ID).is_empty());
    }

    #[test]
    fn early_panic_reaches_the_reset() {
        let fw = MockFirmware::new().unwind_on_reset();
        let caps = caps(Extensions::DBCN | Extensions::SRST);
        let offsets = Offsets::new(0, 0, 0);
        let debug = EarlyDebug::new(&fw, &caps, &offsets);

        let result = catch_unwind(AssertUnwindSafe(|| {
            debug.early_panic("Limine failed to provide base revision 3\n");
        }));
        assert!(result.is_err());

        let calls = fw.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].eid, dbcn::EXTENSION_ID);
        assert_eq!(calls[1].eid, system::EXTENSION_ID);
    }

    #[test]
    fn terminate_resets_without_console() {
        let fw = MockFirmware::new().unwind_on_reset();
        let caps = caps(Extensions::SRST);

        let result = catch_unwind(AssertUnwindSafe(|| {
            terminate(&fw, &caps);
        }));
        assert!(result.is_err());
        assert_eq!(fw.calls_to(system::EXTENSION_ID).len(), 1);
    }
}

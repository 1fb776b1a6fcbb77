//! Detection of the extensions implemented by the firmware.

use crate::{base, Firmware};
use core::fmt;

/// A version of the SBI specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: usize,
    pub minor: usize,
}

impl Version {
    pub const fn new(major: usize, minor: usize) -> Self {
        Self { major, minor }
    }

    /// Decode the raw value returned by [`base::spec_version`].
    ///
    /// The minor number lives in bits `0..24`, the major number in bits `24..31`.
    pub const fn from_raw(raw: usize) -> Self {
        Self {
            major: (raw >> 24) & 0x7F,
            minor: raw & 0xFF_FFFF,
        }
    }

    /// Encodes this version back into the raw register layout.
    pub const fn into_raw(self) -> usize {
        ((self.major & 0x7F) << 24) | (self.minor & 0xFF_FFFF)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

bitflags::bitflags! {
    /// The set of optional extensions this crate knows about.
    pub struct Extensions: u32 {
        const TIMER = 1 << 0;
        const IPI = 1 << 1;
        const RFENCE = 1 << 2;
        const HSM = 1 << 3;
        const SRST = 1 << 4;
        const PMU = 1 << 5;
        const DBCN = 1 << 6;
        const SUSP = 1 << 7;
        const CPPC = 1 << 8;
        const NACL = 1 << 9;
        const STA = 1 << 10;
        const SSE = 1 << 11;
        const FWFT = 1 << 12;
        const DBTR = 1 << 13;
        const MPXY = 1 << 14;
    }
}

/// Every probed extension, with its id and the spec version that introduced it.
const PROBED: &[(Extensions, u32, Version)] = &[
    (Extensions::TIMER, crate::timer::EXTENSION_ID, Version::new(0, 2)),
    (Extensions::IPI, crate::ipi::EXTENSION_ID, Version::new(0, 2)),
    (Extensions::RFENCE, crate::rfence::EXTENSION_ID, Version::new(0, 2)),
    (Extensions::HSM, crate::hsm::EXTENSION_ID, Version::new(0, 2)),
    (Extensions::SRST, crate::system::EXTENSION_ID, Version::new(0, 3)),
    (Extensions::PMU, crate::pmu::EXTENSION_ID, Version::new(0, 3)),
    (Extensions::DBCN, crate::dbcn::EXTENSION_ID, Version::new(2, 0)),
    (Extensions::SUSP, crate::susp::EXTENSION_ID, Version::new(2, 0)),
    (Extensions::CPPC, crate::cppc::EXTENSION_ID, Version::new(2, 0)),
    (Extensions::NACL, crate::nacl::EXTENSION_ID, Version::new(2, 0)),
    (Extensions::STA, crate::sta::EXTENSION_ID, Version::new(2, 0)),
    (Extensions::SSE, crate::sse::EXTENSION_ID, Version::new(3, 0)),
    (Extensions::FWFT, crate::fwft::EXTENSION_ID, Version::new(3, 0)),
    (Extensions::DBTR, crate::dbtr::EXTENSION_ID, Version::new(3, 0)),
    (Extensions::MPXY, crate::mpxy::EXTENSION_ID, Version::new(3, 0)),
];

/// A snapshot of what the firmware is able to do.
///
/// The snapshot is taken once by [`Capabilities::probe`] and never changes
/// afterwards. An extension is *present* if the firmware answered the probe
/// with a non-zero value, and it is *usable* if it is present and the firmware
/// implements a spec version that defines the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    spec_version: Option<Version>,
    impl_id: Option<usize>,
    present: Extensions,
    usable: Extensions,
}

impl Capabilities {
    /// A snapshot where no extension is available.
    pub const NONE: Capabilities = Capabilities {
        spec_version: None,
        impl_id: None,
        present: Extensions::empty(),
        usable: Extensions::empty(),
    };

    /// Create a snapshot with a fixed set of usable extensions, without asking
    /// any firmware.
    pub const fn with_extensions(spec_version: Version, extensions: Extensions) -> Self {
        Self {
            spec_version: Some(spec_version),
            impl_id: None,
            present: extensions,
            usable: extensions,
        }
    }

    /// Ask the firmware which extensions it implements.
    ///
    /// Firmware that doesn't answer the spec version query predates the base
    /// extension, so every extension is reported as absent without probing.
    pub fn probe(fw: &impl Firmware) -> Self {
        let spec_version = match base::spec_version(fw) {
            Ok(version) => version,
            Err(_) => return Self::NONE,
        };

        let mut caps = Self {
            spec_version: Some(spec_version),
            impl_id: base::impl_id(fw).ok(),
            ..Self::NONE
        };

        for &(flag, eid, since) in PROBED {
            if let Ok(true) = base::probe_extension(fw, eid) {
                caps.present.insert(flag);
                if spec_version >= since {
                    caps.usable.insert(flag);
                }
            }
        }

        caps
    }

    /// The version of the SBI specification the firmware implements.
    pub fn spec_version(&self) -> Option<Version> {
        self.spec_version
    }

    /// The implementation id of the firmware.
    pub fn impl_id(&self) -> Option<usize> {
        self.impl_id
    }

    /// Every extension the firmware claimed to implement.
    pub fn present(&self) -> Extensions {
        self.present
    }

    /// Every extension that can be called.
    pub fn usable(&self) -> Extensions {
        self.usable
    }

    /// Check if all of the given extensions can be called.
    pub fn has(&self, ext: Extensions) -> bool {
        self.usable.contains(ext)
    }

    /// Check if the firmware claimed all of the given extensions, regardless
    /// of its spec version.
    pub fn is_present(&self, ext: Extensions) -> bool {
        self.present.contains(ext)
    }

    /// Check if the firmware implements the debug console extension.
    ///
    /// Only presence counts here, so firmware that implements the extension
    /// but reports an older spec version still gets its console used.
    pub fn debug_console(&self) -> bool {
        self.is_present(Extensions::DBCN)
    }

    /// Check if the firmware implements the system reset extension.
    pub fn system_reset(&self) -> bool {
        self.is_present(Extensions::SRST)
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFirmware;

    #[test]
    fn version_layout() {
        let version = Version::from_raw(0x0200_0000);
        assert_eq!(version, Version::new(2, 0));
        assert_eq!(Version::from_raw(0x8100_0003), Version::new(1, 3));
        assert_eq!(Version::new(3, 0).into_raw(), 0x0300_0000);
        assert!(Version::new(0, 3) < Version::new(2, 0));
    }

    #[test]
    fn legacy_firmware_has_nothing() {
        let fw = MockFirmware::new().without_base();
        let caps = Capabilities::probe(&fw);

        assert_eq!(caps, Capabilities::NONE);
        assert!(!caps.debug_console());
        assert!(!caps.system_reset());
        // only the spec version was asked for
        assert_eq!(fw.calls().len(), 1);
    }

    #[test]
    fn probes_every_extension_once() {
        let fw = MockFirmware::new()
            .with_spec_version(3, 0)
            .with_extension(crate::dbcn::EXTENSION_ID)
            .with_extension(crate::system::EXTENSION_ID);
        let caps = Capabilities::probe(&fw);

        let probes = fw
            .calls()
            .into_iter()
            .filter(|call| call.eid == base::EXTENSION_ID && call.fid == 0x03)
            .count();
        assert_eq!(probes, PROBED.len());

        assert!(caps.debug_console());
        assert!(caps.system_reset());
        assert!(!caps.has(Extensions::PMU));
        assert_eq!(caps.usable(), Extensions::DBCN | Extensions::SRST);
        assert_eq!(caps.spec_version(), Some(Version::new(3, 0)));
    }

    #[test]
    fn extension_newer_than_spec_is_not_usable() {
        let fw = MockFirmware::new()
            .with_spec_version(1, 0)
            .with_extension(crate::dbcn::EXTENSION_ID)
            .with_extension(crate::system::EXTENSION_ID);
        let caps = Capabilities::probe(&fw);

        assert!(caps.present().contains(Extensions::DBCN));
        assert!(!caps.has(Extensions::DBCN));
        assert!(caps.has(Extensions::SRST));
        // the console and the reset only ask for presence
        assert!(caps.debug_console());
        assert!(caps.system_reset());
    }

    #[test]
    fn failed_probe_counts_as_absent() {
        let fw = MockFirmware::new()
            .with_spec_version(2, 0)
            .with_extension(crate::dbcn::EXTENSION_ID)
            .failing(base::EXTENSION_ID, 0x03);
        let caps = Capabilities::probe(&fw);

        assert_eq!(caps.present(), Extensions::empty());
        assert!(!caps.debug_console());
    }
}

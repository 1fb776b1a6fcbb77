//! A recording stand-in for the firmware.
//!
//! [`MockFirmware`] answers the base extension from its configuration, records
//! every call it receives and returns success with a value of `0` for anything
//! else. It is meant for unit tests running on the host.

use crate::{base, system, Error, Firmware, SbiRet, Version};
use core::cell::RefCell;
use std::vec::Vec;

/// A single call received by [`MockFirmware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    pub eid: u32,
    pub fid: u32,
    /// The number of arguments the call was made with.
    pub arity: usize,
    raw: [usize; 5],
}

impl Call {
    /// The arguments the call was made with.
    pub fn args(&self) -> &[usize] {
        &self.raw[..self.arity]
    }
}

/// Firmware that records calls instead of trapping.
#[derive(Debug)]
pub struct MockFirmware {
    spec_version: Option<Version>,
    extensions: Vec<u32>,
    failing: Vec<(u32, u32)>,
    unwind_on_reset: bool,
    calls: RefCell<Vec<Call>>,
}

impl MockFirmware {
    /// Firmware implementing spec version 3.0 and no optional extension.
    pub fn new() -> Self {
        Self {
            spec_version: Some(Version::new(3, 0)),
            extensions: Vec::new(),
            failing: Vec::new(),
            unwind_on_reset: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Report `major.minor` as the implemented spec version.
    pub fn with_spec_version(mut self, major: usize, minor: usize) -> Self {
        self.spec_version = Some(Version::new(major, minor));
        self
    }

    /// Behave like legacy firmware, which doesn't implement the base extension.
    pub fn without_base(mut self) -> Self {
        self.spec_version = None;
        self
    }

    /// Answer probes for `eid` with `1`.
    pub fn with_extension(mut self, eid: u32) -> Self {
        self.extensions.push(eid);
        self
    }

    /// Make every call to function `fid` of extension `eid` fail.
    pub fn failing(mut self, eid: u32, fid: u32) -> Self {
        self.failing.push((eid, fid));
        self
    }

    /// Unwind instead of returning when a system reset is requested.
    ///
    /// This models a reset call that never comes back.
    pub fn unwind_on_reset(mut self) -> Self {
        self.unwind_on_reset = true;
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Every call received so far to the extension `eid`.
    pub fn calls_to(&self, eid: u32) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.eid == eid)
            .copied()
            .collect()
    }

    /// Forget every recorded call.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn handle(&self, eid: u32, fid: u32, arity: usize, raw: [usize; 5]) -> SbiRet {
        self.calls.borrow_mut().push(Call {
            eid,
            fid,
            arity,
            raw,
        });

        if self.failing.contains(&(eid, fid)) {
            return SbiRet::failure(Error::Failed);
        }

        match (eid, fid) {
            (base::EXTENSION_ID, _) if self.spec_version.is_none() => {
                SbiRet::failure(Error::NotSupported)
            }
            (base::EXTENSION_ID, 0x00) => {
                let version = self.spec_version.map_or(0, Version::into_raw);
                SbiRet::success(version)
            }
            (base::EXTENSION_ID, 0x03) => {
                let present = self.extensions.contains(&(raw[0] as u32));
                SbiRet::success(present as usize)
            }
            (system::EXTENSION_ID, 0x00) if self.unwind_on_reset => {
                panic!("system reset requested (type {}, reason {})", raw[0], raw[1])
            }
            _ => SbiRet::success(0),
        }
    }
}

impl Default for MockFirmware {
    fn default() -> Self {
        Self::new()
    }
}

impl Firmware for MockFirmware {
    fn call0(&self, eid: u32, fid: u32) -> SbiRet {
        self.handle(eid, fid, 0, [0; 5])
    }

    fn call1(&self, eid: u32, fid: u32, a0: usize) -> SbiRet {
        self.handle(eid, fid, 1, [a0, 0, 0, 0, 0])
    }

    fn call2(&self, eid: u32, fid: u32, a0: usize, a1: usize) -> SbiRet {
        self.handle(eid, fid, 2, [a0, a1, 0, 0, 0])
    }

    fn call3(&self, eid: u32, fid: u32, a0: usize, a1: usize, a2: usize) -> SbiRet {
        self.handle(eid, fid, 3, [a0, a1, a2, 0, 0])
    }

    fn call4(&self, eid: u32, fid: u32, a0: usize, a1: usize, a2: usize, a3: usize) -> SbiRet {
        self.handle(eid, fid, 4, [a0, a1, a2, a3, 0])
    }

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
        self.handle(eid, fid, 5, [a0, a1, a2, a3, a4])
    }
}

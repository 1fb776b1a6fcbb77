//! Requests to the [Limine] boot loader.
//!
//! The boot loader scans the `.limine_requests` section of the image for the
//! request blocks below and fills in their response pointers before jumping
//! to the kernel. Everything the kernel learns about its own placement in
//! memory comes from here.
//!
//! [Limine]: https://github.com/limine-bootloader/limine/blob/trunk/PROTOCOL.md
#![allow(clippy::unreadable_literal)]

use crate::{addr::Offsets, static_cell::StaticCell, FatalError};
use core::{fmt, ptr};

const COMMON_MAGIC: [u64; 2] = [0xc7b1dd30df4c8b88, 0x0a82e883a194f07b];

const fn request_id(a: u64, b: u64) -> [u64; 4] {
    [COMMON_MAGIC[0], COMMON_MAGIC[1], a, b]
}

const HHDM_ID: [u64; 4] = request_id(0x48dcf1cb8ad2b852, 0x63984e959a98244b);
const EXECUTABLE_ADDRESS_ID: [u64; 4] = request_id(0x71ba76863cc55f63, 0xb2644a48c516a487);
const PAGING_MODE_ID: [u64; 4] = request_id(0x95c1a0edab0944cb, 0xa4e5cb3842f7488a);

/// The revision of the boot protocol the kernel is written against.
pub const REVISION: u64 = 3;

#[used]
#[cfg_attr(target_os = "none", link_section = ".limine_requests_start")]
#[allow(dead_code)]
static REQUESTS_START: [u64; 4] = [
    0xf6b8f4b39de7d1ae,
    0xfab91a6940fcb9cf,
    0x785c6ed015d3e316,
    0x181e920a7852b9d9,
];

#[used]
#[cfg_attr(target_os = "none", link_section = ".limine_requests")]
pub static BASE_REVISION: BaseRevision = BaseRevision::new(REVISION);

#[used]
#[cfg_attr(target_os = "none", link_section = ".limine_requests")]
pub static HHDM: HhdmRequest = Request::new(HHDM_ID, 0, ());

#[used]
#[cfg_attr(target_os = "none", link_section = ".limine_requests")]
pub static EXECUTABLE_ADDRESS: ExecutableAddressRequest =
    Request::new(EXECUTABLE_ADDRESS_ID, 0, ());

#[used]
#[cfg_attr(target_os = "none", link_section = ".limine_requests")]
pub static PAGING_MODE: PagingModeRequest = Request::new(
    PAGING_MODE_ID,
    1,
    PagingModeSelection {
        mode: PagingMode::Sv39 as u64,
        max_mode: PagingMode::Sv39 as u64,
        min_mode: PagingMode::Sv39 as u64,
    },
);

#[used]
#[cfg_attr(target_os = "none", link_section = ".limine_requests_end")]
#[allow(dead_code)]
static REQUESTS_END: [u64; 2] = [0xadc0e0531bb10d03, 0x9572709f31764c62];

/// The base revision tag.
///
/// The boot loader clears the last word if it supports the requested revision.
#[repr(transparent)]
pub struct BaseRevision {
    tag: StaticCell<[u64; 3]>,
}

impl BaseRevision {
    pub const fn new(revision: u64) -> Self {
        Self {
            tag: StaticCell::new([0xf9562b2d5c95a6c8, 0x6a7b384944536bdc, revision]),
        }
    }

    /// Check if the boot loader agreed to use the requested revision.
    pub fn is_supported(&self) -> bool {
        self.tag.read_volatile()[2] == 0
    }
}

/// A single request block, with the request specific trailing fields `E`.
#[allow(dead_code)]
#[repr(C)]
pub struct Request<R, E = ()> {
    id: [u64; 4],
    revision: u64,
    response: StaticCell<*const R>,
    extra: E,
}

impl<R, E> Request<R, E> {
    pub const fn new(id: [u64; 4], revision: u64, extra: E) -> Self {
        Self {
            id,
            revision,
            response: StaticCell::new(ptr::null()),
            extra,
        }
    }

    /// The response of the boot loader, if it answered this request.
    pub fn response(&self) -> Option<&'static R> {
        let response = self.response.read_volatile();
        // SAFETY: the boot loader only stores pointers to responses that live
        // in memory it hands over to the kernel
        unsafe { response.as_ref() }
    }
}

pub type HhdmRequest = Request<HhdmResponse>;
pub type ExecutableAddressRequest = Request<ExecutableAddressResponse>;
pub type PagingModeRequest = Request<PagingModeResponse, PagingModeSelection>;

/// The response to the higher half direct map request.
#[allow(dead_code)]
#[repr(C)]
#[derive(Debug)]
pub struct HhdmResponse {
    revision: u64,
    offset: u64,
}

impl HhdmResponse {
    /// The virtual address at which physical address `0` is mapped.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// Where the kernel image was placed.
#[allow(dead_code)]
#[repr(C)]
#[derive(Debug)]
pub struct ExecutableAddressResponse {
    revision: u64,
    physical_base: u64,
    virtual_base: u64,
}

impl ExecutableAddressResponse {
    pub fn physical_base(&self) -> u64 {
        self.physical_base
    }

    pub fn virtual_base(&self) -> u64 {
        self.virtual_base
    }
}

/// The paging modes a RISC-V kernel can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum PagingMode {
    Sv39 = 0,
    Sv48 = 1,
    Sv57 = 2,
}

impl PagingMode {
    pub fn from_raw(raw: u64) -> Option<Self> {
        match raw {
            0 => Some(PagingMode::Sv39),
            1 => Some(PagingMode::Sv48),
            2 => Some(PagingMode::Sv57),
            _ => None,
        }
    }
}

impl fmt::Display for PagingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PagingMode::Sv39 => "Sv39",
            PagingMode::Sv48 => "Sv48",
            PagingMode::Sv57 => "Sv57",
        };
        f.write_str(name)
    }
}

/// The trailing fields of the paging mode request.
#[allow(dead_code)]
#[repr(C)]
pub struct PagingModeSelection {
    mode: u64,
    max_mode: u64,
    min_mode: u64,
}

/// The paging mode the boot loader enabled.
#[allow(dead_code)]
#[repr(C)]
#[derive(Debug)]
pub struct PagingModeResponse {
    revision: u64,
    mode: u64,
}

impl PagingModeResponse {
    pub fn mode(&self) -> Option<PagingMode> {
        PagingMode::from_raw(self.mode)
    }
}

/// Collect the address offsets from the responses of the boot loader.
pub fn offsets() -> Result<Offsets, FatalError> {
    offsets_from(&HHDM, &EXECUTABLE_ADDRESS)
}

fn offsets_from(
    hhdm: &HhdmRequest,
    executable: &ExecutableAddressRequest,
) -> Result<Offsets, FatalError> {
    let hhdm = hhdm.response().ok_or(FatalError::MissingDirectMap)?;
    let executable = executable
        .response()
        .ok_or(FatalError::MissingExecutableAddress)?;

    Ok(Offsets::new(
        hhdm.offset(),
        executable.virtual_base(),
        executable.physical_base(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::boxed::Box;

    fn answer<R: 'static, E>(request: &Request<R, E>, response: R) {
        let response: &'static R = Box::leak(Box::new(response));
        unsafe { request.response.write_volatile(response) };
    }

    #[test]
    fn revision_is_unsupported_until_cleared() {
        let revision = BaseRevision::new(REVISION);
        assert!(!revision.is_supported());

        unsafe { revision.tag.write_volatile([0xf9562b2d5c95a6c8, 0x6a7b384944536bdc, 0]) };
        assert!(revision.is_supported());
    }

    #[test]
    fn unanswered_request_has_no_response() {
        let request: HhdmRequest = Request::new(HHDM_ID, 0, ());
        assert!(request.response().is_none());
    }

    #[test]
    fn request_layout() {
        use core::mem::size_of;

        assert_eq!(size_of::<HhdmRequest>(), 6 * 8);
        assert_eq!(size_of::<PagingModeRequest>(), 9 * 8);
        assert_eq!(size_of::<BaseRevision>(), 3 * 8);
        assert_eq!(HHDM_ID[..2], COMMON_MAGIC);
    }

    #[test]
    fn offsets_need_both_responses() {
        let hhdm: HhdmRequest = Request::new(HHDM_ID, 0, ());
        let executable: ExecutableAddressRequest = Request::new(EXECUTABLE_ADDRESS_ID, 0, ());
        assert_eq!(
            offsets_from(&hhdm, &executable),
            Err(FatalError::MissingDirectMap)
        );

        answer(
            &hhdm,
            HhdmResponse {
                revision: 0,
                offset: 0xffff_ffc0_0000_0000,
            },
        );
        assert_eq!(
            offsets_from(&hhdm, &executable),
            Err(FatalError::MissingExecutableAddress)
        );

        answer(
            &executable,
            ExecutableAddressResponse {
                revision: 0,
                physical_base: 0x8020_0000,
                virtual_base: 0xffff_ffff_8000_0000,
            },
        );
        let offsets = offsets_from(&hhdm, &executable).unwrap();
        assert_eq!(offsets.direct_map_offset(), 0xffff_ffc0_0000_0000);
        assert_eq!(offsets.link_virtual_base(), 0xffff_ffff_8000_0000);
        assert_eq!(offsets.load_physical_base(), 0x8020_0000);
    }

    #[test]
    fn paging_modes() {
        assert_eq!(PagingMode::from_raw(0), Some(PagingMode::Sv39));
        assert_eq!(PagingMode::from_raw(3), None);
        assert_eq!(std::format!("{}", PagingMode::Sv48), "Sv48");
    }
}

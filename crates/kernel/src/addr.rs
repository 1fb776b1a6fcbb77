//! Translation between kernel virtual addresses and physical addresses.
//!
//! The kernel is reachable through two mappings set up by the boot loader: the
//! higher half direct map, which maps all of physical memory at a fixed offset,
//! and the mapping of the kernel image itself, which was linked at one address
//! and loaded at another.

use core::fmt;
use sbi::PhysAddr;
use spin::Once;

/// A virtual address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct VirtAddr(u64);

impl VirtAddr {
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// The address the given pointer points to.
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize as u64)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Calculates the wrapping offset from this virtual address.
    pub const fn offset(self, off: u64) -> Self {
        Self(self.0.wrapping_add(off))
    }
}

impl From<u64> for VirtAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl<T> From<*const T> for VirtAddr {
    fn from(ptr: *const T) -> Self {
        Self::from_ptr(ptr)
    }
}

impl fmt::Debug for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VirtAddr({:#x})", self.0)
    }
}

impl fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// The offsets of the two boot loader mappings.
///
/// All conversions use wrapping arithmetic and never fail; the caller is
/// responsible for only translating addresses that are inside the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offsets {
    direct_map_offset: u64,
    link_virtual_base: u64,
    load_physical_base: u64,
}

impl Offsets {
    pub const fn new(direct_map_offset: u64, link_virtual_base: u64, load_physical_base: u64) -> Self {
        Self {
            direct_map_offset,
            link_virtual_base,
            load_physical_base,
        }
    }

    /// The virtual address of physical address `0` inside the direct map.
    pub fn direct_map_offset(&self) -> u64 {
        self.direct_map_offset
    }

    /// The virtual address the kernel image was linked at.
    pub fn link_virtual_base(&self) -> u64 {
        self.link_virtual_base
    }

    /// The physical address the kernel image was loaded at.
    pub fn load_physical_base(&self) -> u64 {
        self.load_physical_base
    }

    pub fn direct_map_to_phys(&self, addr: VirtAddr) -> PhysAddr {
        PhysAddr::new(addr.as_u64().wrapping_sub(self.direct_map_offset))
    }

    pub fn phys_to_direct_map(&self, addr: PhysAddr) -> VirtAddr {
        VirtAddr::new(addr.as_u64().wrapping_add(self.direct_map_offset))
    }

    /// Translate an address inside the kernel image.
    pub fn image_to_phys(&self, addr: VirtAddr) -> PhysAddr {
        let offset = addr.as_u64().wrapping_sub(self.link_virtual_base);
        PhysAddr::new(self.load_physical_base).offset(offset)
    }

    /// Inverse of [`Offsets::image_to_phys`].
    pub fn phys_to_image(&self, addr: PhysAddr) -> VirtAddr {
        let offset = addr.as_u64().wrapping_sub(self.load_physical_base);
        VirtAddr::new(self.link_virtual_base).offset(offset)
    }
}

static OFFSETS: Once<Offsets> = Once::new();

/// Store the offsets for the rest of the kernel's lifetime.
///
/// Only the first call stores anything, later calls return the stored offsets.
pub fn init(offsets: Offsets) -> &'static Offsets {
    OFFSETS.call_once(|| offsets)
}

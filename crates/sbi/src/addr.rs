use core::fmt;

/// A physical address, as it is handed to the firmware.
///
/// Several SBI functions take a physical address as two separate words,
/// so the same ABI also works on 32 bit harts.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PhysAddr(u64);

impl PhysAddr {
    /// Create a new physical address from the raw value.
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Reassemble an address from the two halves produced by [`PhysAddr::split`].
    pub const fn from_parts(lo: usize, hi: usize) -> Self {
        Self((lo as u64 & 0xFFFF_FFFF) | ((hi as u64) << 32))
    }

    /// Returns the raw address.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Split this address into the `(lo, hi)` register pair.
    ///
    /// `lo` contains the lower 32 bits and `hi` the upper 32 bits.
    pub const fn split(self) -> (usize, usize) {
        ((self.0 & 0xFFFF_FFFF) as usize, (self.0 >> 32) as usize)
    }

    /// Calculates the wrapping offset from this physical address.
    pub const fn offset(self, off: u64) -> Self {
        Self(self.0.wrapping_add(off))
    }
}

impl From<u64> for PhysAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl From<PhysAddr> for u64 {
    fn from(addr: PhysAddr) -> u64 {
        addr.0
    }
}

impl fmt::Debug for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhysAddr({:#x})", self.0)
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Encodes an optional shared memory region into the `(lo, hi)` pair.
///
/// `None` is encoded as all ones in both words, which tells the firmware to stop
/// using the previously registered region.
pub(crate) fn shmem_parts(shmem: Option<PhysAddr>) -> (usize, usize) {
    match shmem {
        Some(addr) => addr.split(),
        None => (usize::MAX, usize::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_low_address() {
        assert_eq!(PhysAddr::new(0x1000).split(), (0x1000, 0));
    }

    #[test]
    fn split_high_address() {
        let addr = PhysAddr::new(0x0000_0012_8000_0400);
        assert_eq!(addr.split(), (0x8000_0400, 0x12));
    }

    #[test]
    fn halves_reassemble() {
        for &raw in &[0, 1, 0xFFFF_FFFF, 0x1_0000_0000, 0xDEAD_BEEF_CAFE_F00D, u64::MAX] {
            let addr = PhysAddr::new(raw);
            let (lo, hi) = addr.split();
            assert_eq!(lo as u64, raw % (1 << 32));
            assert_eq!(hi as u64, raw >> 32);
            assert_eq!(PhysAddr::from_parts(lo, hi), addr);
        }
    }

    #[test]
    fn from_parts_ignores_upper_bits_of_lo() {
        assert_eq!(PhysAddr::from_parts(0x1_0000_0001, 0), PhysAddr::new(1));
    }

    #[test]
    fn disabled_shmem_is_all_ones() {
        assert_eq!(shmem_parts(None), (usize::MAX, usize::MAX));
        assert_eq!(
            shmem_parts(Some(PhysAddr::new(0x8020_0000))),
            (0x8020_0000, 0)
        );
    }
}

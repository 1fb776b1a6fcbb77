//! The hart mask argument used by the IPI and RFENCE extensions.

/// The number of harts a single [`HartMask`] window can cover.
pub const WINDOW: usize = usize::BITS as usize;

/// The mask base that selects every hart in the system.
const ALL_HARTS: usize = usize::MAX;

displaydoc_lite::displaydoc! {
    /// Errors that can occur while building a [`HartMask`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum RangeError {
        /// hart {_0} is outside of the window covered by the mask
        OutOfWindow(usize),
    }
}

/// A Hart mask is a list of harts that is given to a SBI
/// call using a bit-vector.
///
/// The mask represents the set `{ base + i | bit i is set }`. A mask with no
/// bits set is the empty set. Selecting every hart is a separate state and
/// never depends on the value of `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HartMask {
    mask: usize,
    base: usize,
    all: bool,
}

impl HartMask {
    /// Create an empty [`HartMask`] whose window starts at `base`.
    pub const fn new(base: usize) -> Self {
        Self {
            mask: 0,
            base,
            all: false,
        }
    }

    /// Create a [`HartMask`] from the raw `(mask, base)` register pair.
    ///
    /// A `base` of all ones is the register encoding for every hart.
    pub const fn from_raw(mask: usize, base: usize) -> Self {
        if base == ALL_HARTS {
            Self::all()
        } else {
            Self {
                mask,
                base,
                all: false,
            }
        }
    }

    /// Create a [`HartMask`] that selects every hart, regardless of the mask bits.
    pub const fn all() -> Self {
        Self {
            mask: 0,
            base: ALL_HARTS,
            all: true,
        }
    }

    /// Add the hart with id `hart_id` to this mask.
    ///
    /// Fails if the hart is not inside `base..base + 64`. Adding a hart to a
    /// mask created by [`HartMask::all`] always succeeds and changes nothing.
    pub fn add(&mut self, hart_id: usize) -> Result<(), RangeError> {
        if self.all {
            return Ok(());
        }

        match hart_id.checked_sub(self.base) {
            Some(bit) if bit < WINDOW => {
                self.mask |= 1 << bit;
                Ok(())
            }
            _ => Err(RangeError::OutOfWindow(hart_id)),
        }
    }

    /// Check if the hart with id `hart_id` is part of this mask.
    pub fn contains(&self, hart_id: usize) -> bool {
        if self.all {
            return true;
        }

        match hart_id.checked_sub(self.base) {
            Some(bit) if bit < WINDOW => self.mask & (1 << bit) != 0,
            _ => false,
        }
    }

    /// Check if this mask selects no hart at all.
    pub fn is_empty(&self) -> bool {
        !self.all && self.mask == 0
    }

    /// Check if this mask selects every hart of the system.
    pub fn selects_all(&self) -> bool {
        self.all
    }

    /// The raw bit-vector.
    pub fn mask(&self) -> usize {
        self.mask
    }

    /// The hart id of bit `0`.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Returns the `(mask, base)` register pair.
    ///
    /// A window starting at the last hart id would read as "every hart" to
    /// the firmware, so it is moved down until that hart sits in bit `63`.
    pub fn into_raw(self) -> (usize, usize) {
        match (self.all, self.base) {
            (true, _) => (0, ALL_HARTS),
            (false, ALL_HARTS) => (self.mask << (WINDOW - 1), ALL_HARTS - (WINDOW - 1)),
            (false, base) => (self.mask, base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_bit_of_first_window() {
        let mut mask = HartMask::new(0);
        mask.add(63).unwrap();
        assert_eq!(mask.mask(), 0x8000_0000_0000_0000);
    }

    #[test]
    fn hart_past_window_is_rejected() {
        let mut mask = HartMask::new(0);
        assert_eq!(mask.add(64), Err(RangeError::OutOfWindow(64)));
        assert_eq!(mask.mask(), 0);
    }

    #[test]
    fn hart_below_base_is_rejected() {
        let mut mask = HartMask::new(8);
        assert_eq!(mask.add(7), Err(RangeError::OutOfWindow(7)));
        assert!(mask.is_empty());
    }

    #[test]
    fn add_succeeds_exactly_inside_window() {
        for &base in &[0usize, 1, 64, 1000, usize::MAX - 64] {
            for offset in 0..WINDOW {
                let mut mask = HartMask::from_raw(0, base);
                mask.add(base + offset).unwrap();
                assert_eq!(mask.mask(), 1 << offset);
                assert_eq!(mask.mask().count_ones(), 1);
            }

            let mut mask = HartMask::new(base);
            if let Some(below) = base.checked_sub(1) {
                assert!(mask.add(below).is_err());
            }
            if let Some(past) = base.checked_add(WINDOW) {
                assert!(mask.add(past).is_err());
            }
        }
    }

    #[test]
    fn adding_keeps_previous_bits() {
        let mut mask = HartMask::new(4);
        mask.add(4).unwrap();
        mask.add(6).unwrap();
        mask.add(6).unwrap();
        assert_eq!(mask.into_raw(), (0b101, 4));
        assert!(mask.contains(4));
        assert!(!mask.contains(5));
        assert!(mask.contains(6));
        assert!(!mask.contains(3));
    }

    #[test]
    fn window_at_last_hart_id() {
        let mut mask = HartMask::new(usize::MAX);
        assert!(!mask.selects_all());
        assert_eq!(mask.add(0), Err(RangeError::OutOfWindow(0)));
        assert!(mask.is_empty());

        mask.add(usize::MAX).unwrap();
        assert_eq!(mask.mask(), 1);
        assert!(mask.contains(usize::MAX));
        assert!(!mask.contains(0));
        assert_eq!(mask.into_raw(), (1 << 63, usize::MAX - 63));
        assert!(HartMask::from_raw(1 << 63, usize::MAX - 63).contains(usize::MAX));
    }

    #[test]
    fn raw_all_ones_base_selects_every_hart() {
        assert_eq!(HartMask::from_raw(0b11, usize::MAX), HartMask::all());
    }

    #[test]
    fn all_harts_mask() {
        let mut mask = HartMask::all();
        assert!(mask.selects_all());
        assert!(!mask.is_empty());
        assert!(mask.add(12345).is_ok());
        assert_eq!(mask.into_raw(), (0, usize::MAX));
        assert!(mask.contains(0));
    }
}

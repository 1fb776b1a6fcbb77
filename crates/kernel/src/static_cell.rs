use core::{cell::UnsafeCell, ptr};

/// A cell around a `T`, which implements `Send` + `Sync` and can be
/// access using `unsafe`.
///
/// Used for memory that is written by someone outside of the kernel,
/// like the responses of the boot loader.
#[repr(transparent)]
pub struct StaticCell<T> {
    inner: UnsafeCell<T>,
}

impl<T> StaticCell<T> {
    pub const fn new(inner: T) -> Self {
        Self {
            inner: UnsafeCell::new(inner),
        }
    }

    /// Read the current value without letting the compiler assume it never
    /// changed since the initialization.
    pub fn read_volatile(&self) -> T
    where
        T: Copy,
    {
        // SAFETY: the pointer comes from a live `UnsafeCell`
        unsafe { ptr::read_volatile(self.inner.get()) }
    }

    /// # Safety
    ///
    /// No reference to the inner value may be alive while writing.
    pub unsafe fn write_volatile(&self, value: T) {
        ptr::write_volatile(self.inner.get(), value)
    }
}

unsafe impl<T> Send for StaticCell<T> {}
unsafe impl<T> Sync for StaticCell<T> {}

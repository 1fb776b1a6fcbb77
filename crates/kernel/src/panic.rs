//! Custom Rust panic handler

use crate::{debug, firmware};
use core::panic::PanicInfo;

#[panic_handler]
fn panic_handler(info: &PanicInfo<'_>) -> ! {
    crate::error!("============");
    crate::error!("KERNEL PANIC");
    crate::error!("============");

    match info.location() {
        Some(loc) => crate::error!("line {}, file {}: {}", loc.line(), loc.file(), info.message()),
        None => crate::error!("{}", info.message()),
    }

    debug::terminate(firmware::firmware(), firmware::snapshot())
}

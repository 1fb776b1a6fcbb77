//! The early boot stage of the Brisa kernel.
//!
//! The kernel is entered by the Limine boot loader, probes the SBI firmware
//! for the extensions it implements, prints a greeting through the debug
//! console and idles. Every failure before that point ends in a shutdown.
#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![allow(clippy::missing_safety_doc)]
#![cfg_attr(target_os = "none", no_std, no_main)]

#[cfg(not(target_pointer_width = "64"))]
compile_error!("Brisa can only run on 64 bit systems");

pub mod logging;

pub mod addr;
pub mod arch;
pub mod console;
pub mod debug;
pub mod firmware;
pub mod limine;
pub mod static_cell;

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
mod boot;
#[cfg(target_os = "none")]
mod panic;

use debug::EarlyDebug;
use displaydoc_lite::displaydoc;
use sbi::{Capabilities, Firmware};

/// The entry point for the booting hart.
#[no_mangle]
#[cfg_attr(not(target_os = "none"), allow(dead_code))]
extern "C" fn kinit() -> ! {
    let fw = firmware::firmware();
    let caps = firmware::init();

    match kmain(fw, caps) {
        Ok(()) => {
            info!("Nothing left to do, {}", "idling".green());
            arch::wait_forever()
        }
        Err(err) => {
            error!("Failed to initialize kernel: {}", err.red());
            error!(
                "{} error happened while starting the kernel, exiting...",
                "Fatal".red()
            );
            debug::terminate(fw, caps)
        }
    }
}

/// The "safe" entry point for the kernel.
fn kmain<F: Firmware>(fw: &F, caps: &Capabilities) -> Result<(), FatalError> {
    let offsets = addr::init(limine::offsets()?);
    let early = EarlyDebug::new(fw, caps, offsets);

    if !limine::BASE_REVISION.is_supported() {
        early.early_panic("Limine failed to provide base revision 3\n");
    }

    early.log("Hello, world from kernel!\n");

    match caps.spec_version() {
        Some(version) => info!(
            "SBI {} (implementation {:#x})",
            version,
            caps.impl_id().unwrap_or(0)
        ),
        None => warn!("Legacy SBI firmware without the base extension"),
    }
    debug!("Usable SBI extensions: {:?}", caps.usable());

    match limine::PAGING_MODE.response().map(|res| res.mode()) {
        Some(Some(limine::PagingMode::Sv39)) => info!("Running with {} paging", "Sv39".green()),
        Some(Some(mode)) => warn!("Boot loader enabled {} instead of Sv39", mode),
        Some(None) | None => warn!("Boot loader didn't report the paging mode"),
    }

    Ok(())
}

displaydoc! {
    /// Any error that will cause the kernel to exit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FatalError {
        /// the boot loader didn't provide the direct map offset
        MissingDirectMap,
        /// the boot loader didn't provide the address of the kernel image
        MissingExecutableAddress,
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("the kernel must be built for `riscv64gc-unknown-none-elf`");
    std::process::exit(1);
}

use std::{env, error::Error, fs::read_dir, path::PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    for file in read_dir("lds")?.filter_map(Result::ok) {
        if file.file_type()?.is_file() {
            println!("cargo:rerun-if-changed=lds/{}", file.file_name().to_string_lossy());
        }
    }

    // the linker script only applies to the bare-metal image, host builds link normally
    let arch = env::var("CARGO_CFG_TARGET_ARCH")?;
    let os = env::var("CARGO_CFG_TARGET_OS")?;
    if arch == "riscv64" && os == "none" {
        let script = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?).join("lds/virt.lds");
        println!("cargo:rustc-link-arg-bins=-T{}", script.display());
    }

    Ok(())
}

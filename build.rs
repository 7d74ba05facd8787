//! This build script copies the `memory.x` file from the crate root into a directory where
//! the linker can always find it at build time. It also records the build machine's clock,
//! which seeds the watch until a time source is available.

use chrono::{Local, Offset};
use std::{env, fs::File, io::Write, path::PathBuf};

fn main() {
    // Put memory layout in the output directory and ensure it's on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    // create rs file with current UTC time and the local offset in seconds
    let now = Local::now();
    File::create(out.join("utc.rs"))
        .unwrap()
        .write_fmt(format_args!(
            "const UTC_TIME: i64 = {:?};\nconst UTC_OFFSET: i32 = {:?};\n",
            now.timestamp(),
            now.offset().fix().local_minus_utc(),
        ))
        .unwrap();

    // By default, Cargo will re-run a build script whenever any file in the project changes,
    // which keeps the recorded time reasonably fresh. Don't narrow it down to `memory.x`.
}

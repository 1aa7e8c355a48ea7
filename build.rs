// build.rs - stamps the binary with its build time

use chrono::Utc;
use std::{env, fs, path::Path};

fn main() {
    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    let dest_path = Path::new(&out_dir).join("build_info.rs");

    let build_date = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    // picked up by main.rs via include!
    fs::write(
        &dest_path,
        format!("pub const BUILD_DATE: &str = \"{}\";\n", build_date),
    )
    .expect("write build_info.rs");

    println!("cargo:rerun-if-changed=build.rs");
}

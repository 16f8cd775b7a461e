use std::{env, fs, path::PathBuf};

const DEFAULT_MAX_CURRENT_MA: u32 = 250;

fn main() {
    // 1) Handle memory.x and linker scripts for the Pico
    let target = env::var("TARGET").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    if target.starts_with("thumbv6m") {
        // Pico 1: copy our custom memory-pico1.x to OUT_DIR as memory.x
        let memory_x = fs::read_to_string("memory-pico1.x").expect("Failed to read memory-pico1.x");
        let dest = out_dir.join("memory.x");
        fs::write(&dest, memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed=memory-pico1.x");

        println!("cargo:rustc-link-arg-examples=--nmagic");
        println!("cargo:rustc-link-arg-examples=-Tlink.x");
        println!("cargo:rustc-link-arg-examples=-Tlink-rp.x");
        println!("cargo:rustc-link-arg-examples=-Tdefmt.x");
    }

    // 2) Load optional env files
    let _ = dotenvy::from_filename(".env");
    load_home_env(".pico.env");

    // 3) Current budget for the ring, with a fallback so the crate builds without .env
    let max_current = env_or_default("RING_MAX_CURRENT_MA", &DEFAULT_MAX_CURRENT_MA.to_string());
    let max_current = match max_current.trim().parse::<u32>() {
        Ok(milliamps) => milliamps,
        Err(_) => {
            println!(
                "cargo:warning=RING_MAX_CURRENT_MA={max_current:?} is not a whole number of milliamps; using {DEFAULT_MAX_CURRENT_MA}"
            );
            DEFAULT_MAX_CURRENT_MA
        }
    };

    // 4) Expose as a compile-time constant, both as an env var and as Rust source
    println!("cargo:rustc-env=RING_MAX_CURRENT_MA={max_current}");
    let ring_config = format!(
        "/// Current budget for the ring in milliamps, from `RING_MAX_CURRENT_MA` at build time.\n\
         pub const MAX_CURRENT_MA: u32 = {max_current};\n"
    );
    fs::write(out_dir.join("ring_config.rs"), ring_config).expect("Failed to write ring_config.rs");

    println!("cargo:rerun-if-env-changed=RING_MAX_CURRENT_MA");
    println!("cargo:rerun-if-changed=.env");
}

fn load_home_env(file: &str) {
    let home = match env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) {
        Some(path) => PathBuf::from(path),
        None => return,
    };
    let path = home.join(file);
    let _ = dotenvy::from_path(&path);
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

//! Build script for ne-engine-sys
//!
//! Links against the native neural-engine model library when the `ffi`
//! feature is enabled. Fails fast if the library cannot be located.

use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_LIB: &str = "llama";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=NE_ENGINE_DIR");
    println!("cargo:rerun-if-env-changed=NE_ENGINE_LIB");

    // Without `--features ne-engine-sys/ffi` the crate builds its stub
    // and nothing native is required.
    if env::var("CARGO_FEATURE_FFI").is_err() {
        return;
    }

    let engine_dir = env::var("NE_ENGINE_DIR").map(PathBuf::from).unwrap_or_else(|_| {
        panic!(
            "ne-engine-sys: NE_ENGINE_DIR not set.\n\
             Point it at the neural-engine graph build directory or disable the 'ffi' feature."
        )
    });

    if !engine_dir.exists() {
        panic!("ne-engine-sys: engine directory not found: {}", engine_dir.display());
    }

    let lib_name = env::var("NE_ENGINE_LIB").unwrap_or_else(|_| DEFAULT_LIB.to_string());

    if let Err(e) = link_engine(&engine_dir, &lib_name) {
        panic!("ne-engine-sys: failed to link '{}': {}", lib_name, e);
    }

    eprintln!("ne-engine-sys: linking lib{} from {}", lib_name, engine_dir.display());
}

fn link_engine(engine_dir: &Path, lib_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Search order matters: the model libraries shadow anything in lib/.
    let search_paths = [
        engine_dir.join("lib"),
        engine_dir.join("models/llama"),
        engine_dir.join("models"),
        engine_dir.to_path_buf(),
    ];

    let mut found = false;
    for path in search_paths.iter().filter(|p| p.exists()) {
        println!("cargo:rustc-link-search=native={}", path.display());

        #[cfg(any(target_os = "linux", target_os = "macos"))]
        println!("cargo:rustc-link-arg=-Wl,-rpath,{}", path.display());

        if lib_present(path, lib_name) {
            found = true;
        }
    }

    if !found {
        return Err(format!("no lib{lib_name}.{{so,dylib,a}} under {}", engine_dir.display()).into());
    }

    println!("cargo:rustc-link-lib={}", lib_name);

    #[cfg(target_os = "linux")]
    {
        println!("cargo:rustc-link-lib=dylib=stdc++");
        println!("cargo:rustc-link-lib=dylib=pthread");
        println!("cargo:rustc-link-lib=dylib=m");
    }

    #[cfg(target_os = "macos")]
    println!("cargo:rustc-link-lib=dylib=c++");

    Ok(())
}

fn lib_present(dir: &Path, name: &str) -> bool {
    ["so", "dylib", "a"].iter().any(|ext| dir.join(format!("lib{name}.{ext}")).exists())
}

//! Smoke tests against the built `quantize` binary.
//!
//! The engine is not linked in a default build, so every successful parse
//! ends in an engine failure; that still exercises the full error path.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn help_works() {
    cargo_bin_cmd!("quantize")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("q4_j_bf16_b32"));
}

#[test]
fn version_works() {
    cargo_bin_cmd!("quantize")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("quantize "));
}

#[test]
fn short_help_is_an_input_path() {
    cargo_bin_cmd!("quantize")
        .arg("-h")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("usage: "))
        .stderr(predicate::str::contains("  type = \"q4_0\" or 2"));
}

#[test]
fn help_with_operands_is_not_help() {
    cargo_bin_cmd!("quantize")
        .args(["--help", "out.bin"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("main: missing ftype"));
}

#[cfg(not(feature = "ffi"))]
#[test]
fn double_dash_is_parsed_literally() {
    cargo_bin_cmd!("quantize")
        .args(["--", "in.bin", "q4_0"])
        .env_remove("RUST_LOG")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("main: quantizing '--' to 'in.bin' as q4_0\n"))
        .stderr(predicate::str::contains("main: failed to quantize model from '--'"));
}

#[cfg(not(feature = "ffi"))]
#[test]
fn short_version_is_an_input_path() {
    cargo_bin_cmd!("quantize")
        .args(["-V", "q4_0"])
        .env_remove("RUST_LOG")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("main: quantizing '-V' to 'ne-model-q4_0.bin' as q4_0"));
}

#[cfg(unix)]
#[test]
fn non_utf8_operand_fails_cleanly() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    cargo_bin_cmd!("quantize")
        .arg("in.bin")
        .arg(OsString::from_vec(b"out\xff.bin".to_vec()))
        .arg("q4_0")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("main: operand 2 is not valid UTF-8"))
        .stderr(predicate::str::contains("quantizing").not());
}

#[test]
fn too_few_arguments_prints_usage() {
    cargo_bin_cmd!("quantize")
        .arg("in.bin")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("model-f32.bin [model-quant.bin] type [nthreads]"))
        .stderr(predicate::str::contains("  type = \"q4_0\" or 2"))
        .stderr(predicate::str::contains("  type = \"q8_0\" or 7"));
}

#[test]
fn no_arguments_prints_usage() {
    cargo_bin_cmd!("quantize")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("usage: "));
}

#[test]
fn invalid_type_after_output() {
    cargo_bin_cmd!("quantize")
        .args(["in.bin", "out.bin", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid ftype 'nope'"))
        .stderr(predicate::str::contains("quantizing").not());
}

#[test]
fn missing_type() {
    cargo_bin_cmd!("quantize")
        .args(["in.bin", "out.bin"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing ftype"));
}

#[test]
fn invalid_thread_count() {
    cargo_bin_cmd!("quantize")
        .args(["in.bin", "q4_0", "lots"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid nthread 'lots' (invalid digit found in string)"));
}

#[cfg(not(feature = "ffi"))]
#[test]
fn engine_failure_quotes_input() {
    cargo_bin_cmd!("quantize")
        .args(["models/in.bin", "q4_1", "4"])
        .env_remove("RUST_LOG")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "main: quantizing 'models/in.bin' to 'models/ne-model-q4_1.bin' as q4_1 using 4 threads",
        ))
        .stderr(predicate::str::contains("main: failed to quantize model from 'models/in.bin'"));
}

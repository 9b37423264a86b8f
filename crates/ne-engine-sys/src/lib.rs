//! Raw bindings to the neural-engine model quantization library.
//!
//! Only the three entry points the quantize tool needs are bound:
//! backend initialisation, the engine's microsecond clock, and the
//! file-to-file quantizer. With the `ffi` feature disabled the crate
//! exposes a stub with the same surface so dependents build without the
//! native library.

use libc::{c_char, c_int};

/// Engine-side `model_ftype` value.
pub type ModelFtype = c_int;

pub const MODEL_FTYPE_ALL_F32: ModelFtype = 0;
pub const MODEL_FTYPE_MOSTLY_F16: ModelFtype = 1;
pub const MODEL_FTYPE_MOSTLY_Q4_0: ModelFtype = 2;
pub const MODEL_FTYPE_MOSTLY_Q4_1: ModelFtype = 3;
pub const MODEL_FTYPE_MOSTLY_Q8_0: ModelFtype = 7;
pub const MODEL_FTYPE_MOSTLY_Q5_0: ModelFtype = 8;
pub const MODEL_FTYPE_MOSTLY_Q5_1: ModelFtype = 9;
pub const MODEL_FTYPE_MOSTLY_Q4_JBLAS_B32: ModelFtype = 10;
pub const MODEL_FTYPE_MOSTLY_Q4_JBLAS_B128: ModelFtype = 11;
pub const MODEL_FTYPE_MOSTLY_Q4_JBLAS_B1024: ModelFtype = 12;
pub const MODEL_FTYPE_MOSTLY_Q4_JBLAS_BF16_B32: ModelFtype = 13;

/// Return code the stub quantizer reports when the engine is not linked.
pub const STUB_UNAVAILABLE: c_int = -1;

#[cfg(feature = "ffi")]
unsafe extern "C" {
    fn model_init_backend();
    fn model_time_us() -> i64;
    fn model_model_quantize(
        fname_inp: *const c_char,
        fname_out: *const c_char,
        ftype: ModelFtype,
        nthread: c_int,
    ) -> c_int;
}

/// Returns true if the native engine is linked in via the `ffi` feature.
#[inline]
pub const fn has_engine() -> bool {
    cfg!(feature = "ffi")
}

/// Initialise the engine backend. Call once per process.
#[cfg(feature = "ffi")]
pub fn init_backend() {
    unsafe { model_init_backend() }
}

/// Initialise the engine backend. No-op without the `ffi` feature.
#[cfg(not(feature = "ffi"))]
pub fn init_backend() {}

/// Monotonic clock in microseconds, as reported by the engine.
#[cfg(feature = "ffi")]
pub fn time_us() -> i64 {
    unsafe { model_time_us() }
}

/// Monotonic clock in microseconds since first use.
#[cfg(not(feature = "ffi"))]
pub fn time_us() -> i64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = EPOCH.get_or_init(Instant::now);
    i64::try_from(epoch.elapsed().as_micros()).unwrap_or(i64::MAX)
}

/// Quantize the model at `fname_inp` into `fname_out`.
///
/// Returns zero on success and a non-zero engine code on failure.
///
/// # Safety
/// - `fname_inp` and `fname_out` must be valid NUL-terminated C strings
/// - both pointers must stay valid for the duration of the call
#[cfg(feature = "ffi")]
pub unsafe fn model_quantize(
    fname_inp: *const c_char,
    fname_out: *const c_char,
    ftype: ModelFtype,
    nthread: c_int,
) -> c_int {
    unsafe { model_model_quantize(fname_inp, fname_out, ftype, nthread) }
}

/// Quantize the model at `fname_inp` into `fname_out`.
///
/// Always returns [`STUB_UNAVAILABLE`] when the `ffi` feature is not enabled.
///
/// # Safety
/// Pointers are never dereferenced by the stub.
#[cfg(not(feature = "ffi"))]
pub unsafe fn model_quantize(
    _fname_inp: *const c_char,
    _fname_out: *const c_char,
    _ftype: ModelFtype,
    _nthread: c_int,
) -> c_int {
    STUB_UNAVAILABLE
}

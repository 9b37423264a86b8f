//! Quantization engine seam
//!
//! The driver only talks to [`QuantizeEngine`]; [`NativeEngine`] forwards
//! to the linked neural-engine library through `ne-engine-sys`.

use std::ffi::CString;

use tracing::debug;

use crate::error::EngineError;
use crate::ftype::QuantType;

/// Operations the tool needs from a quantization engine.
pub trait QuantizeEngine {
    /// Initialise the backend. Called once, before anything else.
    fn init_backend(&mut self);

    /// Monotonic clock in microseconds.
    fn time_us(&self) -> i64;

    /// Quantize `input` into `output`. Blocks until the engine is done.
    fn quantize_file(
        &mut self,
        input: &str,
        output: &str,
        qtype: QuantType,
        nthread: i32,
    ) -> Result<(), EngineError>;
}

/// The native engine linked through `ne-engine-sys`.
#[derive(Debug, Default)]
pub struct NativeEngine {
    _private: (),
}

impl NativeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the native library is compiled in.
    pub fn is_available() -> bool {
        ne_engine_sys::has_engine()
    }
}

impl QuantizeEngine for NativeEngine {
    fn init_backend(&mut self) {
        ne_engine_sys::init_backend();
    }

    fn time_us(&self) -> i64 {
        ne_engine_sys::time_us()
    }

    fn quantize_file(
        &mut self,
        input: &str,
        output: &str,
        qtype: QuantType,
        nthread: i32,
    ) -> Result<(), EngineError> {
        let c_input = CString::new(input)?;
        let c_output = CString::new(output)?;

        let code = unsafe {
            ne_engine_sys::model_quantize(c_input.as_ptr(), c_output.as_ptr(), qtype.id(), nthread)
        };
        debug!(code, "model_quantize returned");

        match code {
            0 => Ok(()),
            ne_engine_sys::STUB_UNAVAILABLE if !Self::is_available() => Err(EngineError::Unavailable),
            code => Err(EngineError::Failed { code }),
        }
    }
}

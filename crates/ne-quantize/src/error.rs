//! Error types for the quantize tool.

use std::ffi::NulError;
use std::num::ParseIntError;

use crate::exit::EXIT_GENERIC_FAIL;

/// Command-line errors. Each one stops the tool before the engine runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    #[error("too few arguments")]
    Usage { program: String },

    #[error("missing ftype")]
    MissingType,

    #[error("invalid ftype '{token}'")]
    InvalidType { token: String },

    #[error("invalid nthread '{token}' ({source})")]
    InvalidThreadCount {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("operand {index} is not valid UTF-8: '{lossy}'")]
    NonUtf8Operand { index: usize, lossy: String },
}

/// Errors reported by a [`QuantizeEngine`](crate::engine::QuantizeEngine).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("path cannot be passed to the engine: {0}")]
    InvalidPath(#[from] NulError),

    #[error("engine returned code {code}")]
    Failed { code: i32 },

    #[error("quantization engine not compiled in (enable the `ffi` feature)")]
    Unavailable,
}

/// Top-level error for one invocation.
#[derive(Debug, thiserror::Error)]
pub enum QuantizeError {
    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error("failed to quantize model from '{input}'")]
    Engine {
        input: String,
        #[source]
        source: EngineError,
    },

    #[error("failed to write to terminal: {0}")]
    Io(#[from] std::io::Error),
}

impl QuantizeError {
    /// Process exit code for this error. Every failure path exits with 1.
    pub fn exit_code(&self) -> i32 {
        EXIT_GENERIC_FAIL
    }
}

pub type Result<T> = std::result::Result<T, QuantizeError>;

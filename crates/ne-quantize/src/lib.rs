//! Neural-engine model quantize tool
//!
//! Library half of the `quantize` binary: the type table, the positional
//! argument parser, the engine seam and the driver. Exposed for testing.

pub mod args;
pub mod cli;
pub mod driver;
pub mod engine;
pub mod error;
pub mod exit;
pub mod ftype;
pub mod logging;

pub use args::{InvocationConfig, parse_args};
pub use cli::{Request, build_cli, parse_request};
pub use driver::{QuantizeReport, execute, run};
pub use engine::{NativeEngine, QuantizeEngine};
pub use error::{ArgsError, EngineError, QuantizeError};
pub use ftype::QuantType;

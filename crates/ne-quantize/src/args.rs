//! Positional argument parsing
//!
//! ```text
//! quantize <input> [<output>] <type> [<nthread>]
//! ```
//!
//! The second operand is either the type or the output path: if it
//! resolves as a type the output path is derived from the input path,
//! otherwise it is taken as the output path and the type must follow.

use tracing::debug;

use crate::error::ArgsError;
use crate::ftype::{self, QuantType};

/// Resolved invocation, built once from argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationConfig {
    pub input_path: String,
    pub output_path: String,
    pub qtype: QuantType,
    pub qtype_name: &'static str,
    /// `0` lets the engine choose.
    pub nthread: i32,
}

/// Parse a full argv (program name first).
pub fn parse_args<S: AsRef<str>>(argv: &[S]) -> Result<InvocationConfig, ArgsError> {
    let argv: Vec<&str> = argv.iter().map(AsRef::as_ref).collect();

    if argv.len() < 3 {
        let program = argv.first().copied().unwrap_or(DEFAULT_PROGRAM).to_string();
        return Err(ArgsError::Usage { program });
    }

    let input_path = argv[1].to_string();
    let mut idx = 2;

    let (qtype, qtype_name, output_path) = match ftype::resolve(argv[idx]) {
        Some((qtype, name)) => {
            idx += 1;
            let output = derive_output_path(&input_path, name);
            debug!(output = %output, "derived output path");
            (qtype, name, output)
        }
        None => {
            let output = argv[idx].to_string();
            idx += 1;

            let token = *argv.get(idx).ok_or(ArgsError::MissingType)?;
            let (qtype, name) = ftype::resolve(token)
                .ok_or_else(|| ArgsError::InvalidType { token: token.to_string() })?;
            idx += 1;
            (qtype, name, output)
        }
    };

    let nthread = match argv.get(idx) {
        Some(token) => token.parse::<i32>().map_err(|source| {
            ArgsError::InvalidThreadCount { token: token.to_string(), source }
        })?,
        None => 0,
    };

    debug!(
        input = %input_path,
        qtype = qtype_name,
        id = qtype.id(),
        kind = qtype.description(),
        bits = qtype.bits(),
        block_size = qtype.block_size(),
        nthread,
        "parsed arguments"
    );

    Ok(InvocationConfig { input_path, output_path, qtype, qtype_name, nthread })
}

pub(crate) const DEFAULT_PROGRAM: &str = "quantize";

/// Operand synopsis shared by the usage listing and `--help`.
pub(crate) const USAGE_OPERANDS: &str = "model-f32.bin [model-quant.bin] type [nthreads]";

/// `<dir of input>/ne-model-<name>.bin`, splitting on `/` only.
///
/// The directory part is everything up to and including the last `/`; an
/// input without a slash yields a bare filename.
pub fn derive_output_path(input_path: &str, qtype_name: &str) -> String {
    let prefix = input_path.rfind('/').map_or("", |pos| &input_path[..=pos]);
    format!("{prefix}ne-model-{qtype_name}.bin")
}

/// Usage text printed when too few arguments are given.
pub fn usage(program: &str) -> String {
    format!("usage: {program} {USAGE_OPERANDS}\n{}", ftype::listing())
}

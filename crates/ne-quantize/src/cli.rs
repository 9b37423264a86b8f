//! Command-line surface
//!
//! The operands are positional and may look like flags (`--`, `-h`, `-V`,
//! negative thread counts), so argv is never run through clap's parser.
//! clap renders `--help` and `--version`, and only when the flag is the sole
//! argument; every other argv reaches [`crate::args::parse_args`] verbatim.

use std::ffi::OsString;

use clap::{Arg, ArgAction, Command};

use crate::args::{DEFAULT_PROGRAM, USAGE_OPERANDS};
use crate::error::ArgsError;
use crate::ftype;

/// What one process invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Help,
    Version,
    /// Full argv, program name first, operands untouched.
    Quantize(Vec<String>),
}

/// The clap command, with the type listing appended to `--help`.
///
/// Short `-h` / `-V` are disabled; both are valid input paths.
pub fn build_cli() -> Command {
    Command::new(DEFAULT_PROGRAM)
        .about("Quantize a floating-point neural-engine model file")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage(format!("{DEFAULT_PROGRAM} {USAGE_OPERANDS}"))
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("operands")
                .value_name("ARGS")
                .num_args(0..)
                .allow_hyphen_values(true)
                .trailing_var_arg(true)
                .value_parser(clap::value_parser!(OsString))
                .help("<input> [<output>] <type> [<nthreads>]")
                .long_help(
                    "<input> [<output>] <type> [<nthreads>]\n\n\
                     When the second operand names a type, the output is written next to \
                     the input as ne-model-<type>.bin.",
                ),
        )
        .arg(Arg::new("help").long("help").action(ArgAction::Help).help("Print help"))
        .arg(Arg::new("version").long("version").action(ArgAction::Version).help("Print version"))
        .after_help(format!("Types:\n{}", ftype::listing()))
}

/// Classify process arguments.
///
/// `--help` and `--version` count only as the single argument after the
/// program name. Operands must be valid UTF-8; the program name is converted
/// lossily since it is only ever displayed.
pub fn parse_request<I, T>(args: I) -> Result<Request, ArgsError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    match args.as_slice() {
        [_, flag] if flag == "--help" => return Ok(Request::Help),
        [_, flag] if flag == "--version" => return Ok(Request::Version),
        _ => {}
    }

    let mut args = args.into_iter();
    let program = args
        .next()
        .map_or_else(|| DEFAULT_PROGRAM.to_string(), |arg| arg.to_string_lossy().into_owned());

    let mut argv = vec![program];
    for (index, arg) in args.enumerate() {
        let operand = arg.into_string().map_err(|raw| ArgsError::NonUtf8Operand {
            index: index + 1,
            lossy: raw.to_string_lossy().into_owned(),
        })?;
        argv.push(operand);
    }
    Ok(Request::Quantize(argv))
}

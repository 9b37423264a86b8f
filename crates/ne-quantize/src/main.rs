//! `quantize`: convert a floating-point model file to a quantized one
//!
//! ```bash
//! # output derived as models/llama/ne-model-q4_0.bin
//! quantize models/llama/ne-model.bin q4_0
//!
//! # explicit output, 8 engine threads
//! quantize in.bin out.bin q5_1 8
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use ne_quantize::exit::EXIT_SUCCESS;
use ne_quantize::{NativeEngine, QuantizeError, Request, cli, driver, logging};

fn main() -> Result<ExitCode> {
    logging::init()?;

    let argv = match cli::parse_request(std::env::args_os()) {
        Ok(Request::Quantize(argv)) => argv,
        Ok(Request::Help) => {
            let help = cli::build_cli().render_long_help();
            writeln!(io::stdout().lock(), "{help}").context("failed to print help")?;
            return Ok(exit_code(EXIT_SUCCESS));
        }
        Ok(Request::Version) => {
            let version = cli::build_cli().render_version();
            write!(io::stdout().lock(), "{version}").context("failed to print version")?;
            return Ok(exit_code(EXIT_SUCCESS));
        }
        Err(err) => {
            let err = QuantizeError::from(err);
            driver::report_error(&err, &mut io::stderr().lock());
            return Ok(exit_code(err.exit_code()));
        }
    };

    let mut engine = NativeEngine::new();
    let code = driver::execute(&argv, &mut engine, &mut io::stderr().lock(), &mut io::stdout().lock());

    Ok(exit_code(code))
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}

//! Quantization driver
//!
//! Runs one invocation against an engine: initialise, announce, quantize,
//! report. The status line goes to the diagnostic stream before the engine
//! is called; timing goes to the output stream afterwards.

use std::io::Write;

use tracing::{debug, info};

use crate::args::{self, InvocationConfig};
use crate::engine::QuantizeEngine;
use crate::error::{ArgsError, QuantizeError, Result};
use crate::exit::EXIT_SUCCESS;

/// Prefix on every contract line, kept stable for log scrapers.
const PREFIX: &str = "main";

/// Wall-clock timings of a successful run, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizeReport {
    pub quantize_us: i64,
    pub total_us: i64,
}

impl QuantizeReport {
    pub fn quantize_ms(&self) -> f64 {
        self.quantize_us as f64 / 1000.0
    }

    pub fn total_ms(&self) -> f64 {
        self.total_us as f64 / 1000.0
    }
}

/// Status line announcing the quantization about to run.
pub fn status_line(config: &InvocationConfig) -> String {
    let mut line = format!(
        "{PREFIX}: quantizing '{}' to '{}' as {}",
        config.input_path, config.output_path, config.qtype_name
    );
    if config.nthread > 0 {
        line.push_str(&format!(" using {} threads", config.nthread));
    }
    line
}

/// Write the blank separator and the two timing lines.
pub fn write_report<W: Write>(out: &mut W, report: &QuantizeReport) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{PREFIX}: quantize time = {:8.2} ms", report.quantize_ms())?;
    writeln!(out, "{PREFIX}:    total time = {:8.2} ms", report.total_ms())?;
    Ok(())
}

/// Quantize per `config`.
///
/// On engine failure the failure line is written to `diag` and nothing is
/// written to `out`.
pub fn run<E, D, O>(
    config: &InvocationConfig,
    engine: &mut E,
    diag: &mut D,
    out: &mut O,
) -> Result<QuantizeReport>
where
    E: QuantizeEngine,
    D: Write,
    O: Write,
{
    engine.init_backend();

    writeln!(diag, "{}", status_line(config))?;
    diag.flush()?;

    let t_main_start_us = engine.time_us();

    let t_start_us = engine.time_us();
    if let Err(source) =
        engine.quantize_file(&config.input_path, &config.output_path, config.qtype, config.nthread)
    {
        let err = QuantizeError::Engine { input: config.input_path.clone(), source };
        writeln!(diag, "{PREFIX}: {err}")?;
        return Err(err);
    }
    let quantize_us = engine.time_us() - t_start_us;

    let total_us = engine.time_us() - t_main_start_us;
    let report = QuantizeReport { quantize_us, total_us };
    info!(quantize_us, total_us, output = %config.output_path, "quantization finished");

    write_report(out, &report)?;
    out.flush()?;

    Ok(report)
}

/// Parse `argv` and run it, writing every message to the given streams.
///
/// Returns the process exit code.
pub fn execute<S, E, D, O>(argv: &[S], engine: &mut E, diag: &mut D, out: &mut O) -> i32
where
    S: AsRef<str>,
    E: QuantizeEngine,
    D: Write,
    O: Write,
{
    let result = args::parse_args(argv)
        .map_err(QuantizeError::from)
        .and_then(|config| run(&config, engine, diag, out));

    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(err) => {
            report_error(&err, diag);
            err.exit_code()
        }
    }
}

/// Write the diagnostic for a failed invocation.
pub fn report_error<D: Write>(err: &QuantizeError, diag: &mut D) {
    debug!(error = ?err, "invocation failed");
    // Engine failures were already reported inline by `run`.
    let written = match err {
        QuantizeError::Args(ArgsError::Usage { program }) => {
            write!(diag, "{}", args::usage(program))
        }
        QuantizeError::Args(args_err) => writeln!(diag, "{PREFIX}: {args_err}"),
        QuantizeError::Engine { .. } => Ok(()),
        QuantizeError::Io(io_err) => writeln!(diag, "{PREFIX}: {io_err}"),
    };
    // Nowhere left to report a failing diagnostic stream.
    let _ = written.and_then(|()| diag.flush());
}

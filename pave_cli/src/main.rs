//! # Pavecalc CLI Application
//!
//! Reads a rigid pavement design file, runs the AASHTO 1993 design stages
//! and prints the inputs, each intermediate value and the required slab
//! thickness.
//!
//! ## Usage
//!
//! ```text
//! pave_cli [INPUT] [--reliability 90] [--zr -1.645] [--so 0.39] [--cd 1.0]
//!          [--delta-psi 2.0] [--method literal|converging] [--json] [-v]
//! ```
//!
//! Reliability constants resolve as built-in defaults, then the input file's
//! optional `"Reliability"` object, then these flags.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use pave_core::errors::CalcResult;
use pave_core::pipeline;
use pave_core::report;
use pave_core::{
    effective_settings, load_design_input, CalcError, DesignInput, DesignReport, DesignSettings,
    ReliabilityParameters, ThicknessMethod,
};

/// Default input file, resolved against the working directory.
const DEFAULT_INPUT: &str = "design_input.json";

/// Rigid pavement slab thickness per AASHTO 1993
#[derive(Parser, Debug)]
#[command(name = "pave_cli")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON design input
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Design reliability in percent; sets ZR from the AASHTO table
    #[arg(long, conflicts_with = "zr")]
    reliability: Option<f64>,

    /// Standard normal deviate ZR
    #[arg(long, allow_hyphen_values = true)]
    zr: Option<f64>,

    /// Combined standard error So
    #[arg(long)]
    so: Option<f64>,

    /// Load transfer coefficient Cd
    #[arg(long)]
    cd: Option<f64>,

    /// Design serviceability loss
    #[arg(long = "delta-psi")]
    delta_psi: Option<f64>,

    /// Slab thickness method
    #[arg(long, value_enum, default_value_t = MethodArg::Literal)]
    method: MethodArg,

    /// Print the full design report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    /// Fixed passes of the closed-form expression
    Literal,
    /// Full design equation solved by bisection
    Converging,
}

impl From<MethodArg> for ThicknessMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Literal => ThicknessMethod::Literal,
            MethodArg::Converging => ThicknessMethod::Converging,
        }
    }
}

impl Args {
    /// Apply the command line overrides on top of `settings`.
    fn apply_overrides(&self, settings: DesignSettings) -> CalcResult<DesignSettings> {
        let mut reliability = settings.reliability;
        if let Some(percent) = self.reliability {
            reliability.zr = ReliabilityParameters::from_reliability_percent(percent)?.zr;
        }
        if let Some(zr) = self.zr {
            reliability.zr = zr;
        }
        if let Some(so) = self.so {
            reliability.so = so;
        }
        if let Some(cd) = self.cd {
            reliability.cd = cd;
        }
        if let Some(delta_psi) = self.delta_psi {
            reliability.delta_psi = delta_psi;
        }

        Ok(settings
            .with_reliability(reliability)
            .with_method(self.method.into()))
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the design and hand each text block to `emit` as soon as it exists.
///
/// Stage blocks come out one by one, so a failing stage still leaves the
/// results of the stages before it on screen.
fn design_text(input: &DesignInput, settings: &DesignSettings, emit: &mut dyn FnMut(&str)) -> CalcResult<DesignReport> {
    emit(&report::format_inputs(input, settings));
    let design = pipeline::run_with(input, settings, |stage| emit(&report::format_stage(&stage)))?;
    emit(&report::format_equations(&design));
    emit(&report::format_summary(&design));
    Ok(design)
}

/// Error text with the remediation hint when there is one.
fn format_error(e: &CalcError) -> String {
    let mut out = format!("Error: {}\n", e);
    if let Some(hint) = e.remediation() {
        out.push_str(&hint);
        out.push('\n');
    }
    out
}

fn run(args: &Args) -> CalcResult<()> {
    if !args.json {
        println!("Reading design data from: {}", args.input.display());
        println!();
    }

    let input = load_design_input(&args.input)?;
    let settings = args.apply_overrides(effective_settings(&input, &DesignSettings::default()))?;
    debug!(?settings, "effective settings");

    if args.json {
        let report = pipeline::run(&input, &settings)?;
        let json = serde_json::to_string_pretty(&report).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        println!("{}", json);
        return Ok(());
    }

    let design = design_text(&input, &settings, &mut |block: &str| println!("{}", block))?;
    info!(thickness_in = design.slab.thickness_in, "design finished");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Text mode keeps errors with the report; JSON mode keeps stdout parseable.
            if !args.json {
                print!("{}", format_error(&e));
                return ExitCode::FAILURE;
            }
            eprint!("{}", format_error(&e));
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

//! CLI argument definitions for valforge.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use valforge_cli::pipeline::InputSource;

#[derive(Parser)]
#[command(
    name = "valforge",
    version,
    about = "Compile field validation annotations into Rust validation code",
    long_about = "Compile declarative per-field validation annotations into generated\n\
                  `validate` methods.\n\n\
                  Input is a JSON IR document listing records, field types and\n\
                  validation tags, or Rust source whose struct fields carry\n\
                  #[validate(\"...\")] attributes. Every rule is type-checked before\n\
                  any code is written."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Type-check annotated records and write the generated validation code.
    Generate(GenerateArgs),

    /// Type-check annotated records without generating code.
    Check(CheckArgs),

    /// List the registered validation rules.
    Rules,

    /// Print the version and exit.
    Version,
}

/// Exactly one source of annotated records.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Path to a JSON IR document.
    #[arg(value_name = "INPUT")]
    pub ir: Option<PathBuf>,

    /// Rust source file to scan for #[validate] fields.
    #[arg(long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Directory of Rust source files to scan for #[validate] fields.
    #[arg(long = "package", value_name = "DIR")]
    pub package: Option<PathBuf>,
}

impl InputArgs {
    pub fn source(&self) -> Option<InputSource> {
        let ir = self.ir.clone().map(InputSource::Ir);
        let file = self.file.clone().map(InputSource::File);
        let package = self.package.clone().map(InputSource::Package);
        ir.or(file).or(package)
    }
}

#[derive(Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file (single namespace only).
    #[arg(long = "output", short = 'o', value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Directory for generated files (default: beside the input).
    #[arg(long = "out-dir", value_name = "DIR", conflicts_with = "stdout")]
    pub out_dir: Option<PathBuf>,

    /// Crate path generated code uses for runtime helpers.
    #[arg(long = "runtime-crate", value_name = "PATH", default_value = "valforge_runtime")]
    pub runtime_crate: String,

    /// Name of the generated validation method.
    #[arg(long = "method-name", value_name = "NAME", default_value = "validate")]
    pub method_name: String,

    /// Print generated code to stdout instead of writing files.
    #[arg(long = "stdout")]
    pub stdout: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// jnigen - generate JNI dispatch-table bindings
#[derive(Parser)]
#[command(name = "jnigen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Module name for the generated host bindings
    #[arg(short = 'p', long = "package", default_value = "jni")]
    pub package: String,

    /// Parse declarations from a file instead of the embedded dispatch table
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Which artifact to print
    #[arg(long, value_enum, default_value_t = Emit::All)]
    pub emit: Emit,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the parsed method list as JSON and exit
    #[arg(long)]
    pub dump_ir: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    pub no_color: bool,
}

/// Artifact selection for `--emit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// Normalized C wrapper block only
    C,
    /// Host bindings only
    Host,
    /// Combined document: C wrappers followed by host bindings
    All,
}

//! jnigen CLI - generate JNI dispatch-table bindings

use std::fs;
use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jnigen::bindings::{parse_method_table, Generator, JNIENV_TABLE};
use jnigen::util::diagnostic;

mod cli;

use cli::{Cli, Emit};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging. Diagnostics are printed separately, so tracing stays
    // quiet unless asked for.
    let filter = if cli.verbose {
        EnvFilter::new("jnigen=debug")
    } else {
        EnvFilter::new("jnigen=error")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    let text = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read declarations: {}", path.display()))?,
        None => JNIENV_TABLE.to_string(),
    };

    if cli.dump_ir {
        let table = parse_method_table(&text);
        let json = serde_json::to_string_pretty(&table.methods)?;
        return write_output(&cli, json + "\n");
    }

    let generator = Generator::new().with_namespace(&cli.package);
    let out = generator.generate(&text);

    let color = !cli.no_color && io::stderr().is_terminal();
    for diag in &out.diagnostics {
        diagnostic::emit(diag, color);
    }

    let document = match cli.emit {
        Emit::C => out.c_wrappers,
        Emit::Host => out.host_bindings,
        Emit::All => out.combined(),
    };

    write_output(&cli, document)
}

fn write_output(cli: &Cli, document: String) -> Result<()> {
    match &cli.output {
        Some(path) => fs::write(path, document)
            .with_context(|| format!("failed to write output: {}", path.display())),
        None => io::stdout()
            .write_all(document.as_bytes())
            .context("failed to write to stdout"),
    }
}

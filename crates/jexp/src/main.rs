//! jexp command-line interface.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jexp::EvalConfig;

#[derive(Debug, Parser)]
#[command(
    name = "jexp",
    about = "Runs a JSON-encoded jexp program and prints its final value.",
    version
)]
struct Args {
    /// Path to the program: a single JSON value.
    program: PathBuf,
}

fn main() -> Result<()> {
    jexp::init_tracing();
    let args = Args::parse();
    let config = EvalConfig::from_env();

    let mut stdout = io::stdout().lock();
    let value = jexp::run_file(&args.program, &mut stdout, config)
        .with_context(|| format!("failed to run {}", args.program.display()))?;
    writeln!(stdout, "=> {value}")?;
    Ok(())
}

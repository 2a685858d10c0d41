//! jexp: an interpreter for JSON-encoded expression programs.
//!
//! ```text
//! program.json → serde_json → Expr (jexp-types) → Evaluator (jexp-eval) → Value
//! ```
//!
//! A program is one JSON value. Integers, strings and booleans evaluate to
//! themselves; an array `["op", arg, ...]` applies a built-in operation to
//! its raw operands. All state lives in one flat variable environment.
//!
//! ```json
//! ["seq", ["set", "x", 10], ["print", ["add", ["get", "x"], 5]]]
//! ```

mod logging;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use jexp_eval::{EvalConfig, EvalError, Value};
pub use jexp_types::{DecodeError, SourceFile};
pub use logging::init_tracing;

use jexp_eval::{Evaluator, OpRegistry};

/// Anything that stops a program from producing a final value.
#[derive(Debug, Error)]
pub enum JexpError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, JexpError>;

/// Decode and evaluate a program from an empty environment with default
/// settings, writing `print` output to `out`.
pub fn run_source(file: &SourceFile, out: &mut dyn Write) -> Result<Value> {
    run_source_with(file, out, EvalConfig::default())
}

/// Like [`run_source`], with explicit evaluator settings.
pub fn run_source_with(file: &SourceFile, out: &mut dyn Write, config: EvalConfig) -> Result<Value> {
    let program = jexp_types::parse_program(file)?;
    tracing::debug!(file = %file.name, "program decoded");

    let registry = OpRegistry::global();
    tracing::trace!(operations = registry.len(), "registry ready");
    let mut evaluator = Evaluator::new(registry, out).with_config(config);
    let value = evaluator.evaluate(&program)?;
    tracing::debug!(%value, bindings = evaluator.env().len(), "evaluation finished");
    Ok(value)
}

/// Read a UTF-8 program file and run it.
pub fn run_file(path: &Path, out: &mut dyn Write, config: EvalConfig) -> Result<Value> {
    let source = fs::read_to_string(path).map_err(|source| JexpError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file = SourceFile::new(path.display().to_string(), source);
    run_source_with(&file, out, config)
}

//! jexp tree-walking evaluator.
//!
//! Walks a decoded [`Expr`](jexp_types::Expr) tree against a single mutable
//! [`Environment`]. Compound forms are dispatched through the
//! [`OpRegistry`]; each handler receives its operands unevaluated and
//! decides which of them to evaluate, in what order, and how often.

mod config;
mod env;
mod error;
mod evaluator;
mod ops;
mod registry;
mod value;

pub use config::{EvalConfig, DEFAULT_MAX_DEPTH, MAX_DEPTH_ENV};
pub use env::Environment;
pub use error::{EvalError, EvalResult};
pub use evaluator::{evaluate, Evaluator};
pub use registry::{Arity, OpHandler, OpRegistry, OpSpec};
pub use value::Value;

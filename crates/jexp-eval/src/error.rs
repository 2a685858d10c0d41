//! Runtime error types for the jexp evaluator.

use crate::registry::Arity;
use thiserror::Error;

/// Evaluation error. Every variant aborts the whole evaluation.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Compound form headed by a name with no registered operation.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// `get` of a name that was never `set`.
    #[error("unknown variable: {0}")]
    UndefinedVariable(String),

    /// Operand count outside the operation's arity.
    #[error("'{op}' expects {expected} operand(s), got {found}")]
    Arity {
        op: String,
        expected: Arity,
        found: usize,
    },

    /// An operand that must be written literally had some other shape.
    #[error("'{op}' operand {position} must be {expected}, got {found}")]
    ExpectedLiteral {
        op: String,
        position: usize,
        expected: &'static str,
        found: String,
    },

    /// Operand values of the wrong kind for the operation.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Integer overflow.
    #[error("arithmetic trap: {0}")]
    ArithmeticTrap(String),

    /// A list that is not a compound form (empty, or non-string head).
    #[error("malformed expression: {0}")]
    MalformedExpression(String),

    /// Memory for a value could not be reserved.
    #[error("'{op}' cannot allocate {len} slots")]
    Allocation { op: String, len: usize },

    /// Nesting deeper than [`EvalConfig::max_depth`](crate::EvalConfig).
    #[error("evaluation depth limit of {limit} exceeded")]
    DepthExceeded { limit: usize },

    /// Writing `print` output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

//! Operation registry: the fixed name → handler table.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use jexp_types::Expr;

use crate::error::{EvalError, EvalResult};
use crate::evaluator::Evaluator;
use crate::ops;
use crate::Value;

/// An operation handler. Receives the raw, unevaluated operands.
pub type OpHandler = fn(&mut Evaluator<'_>, &[Expr]) -> EvalResult<Value>;

/// How many operands an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Inclusive on both ends.
    Range(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::Range(lo, hi) => (lo..=hi).contains(&count),
            Arity::AtLeast(n) => count >= n,
        }
    }

    pub(crate) fn check(self, op: &str, count: usize) -> EvalResult<()> {
        if self.accepts(count) {
            Ok(())
        } else {
            Err(EvalError::Arity {
                op: op.to_string(),
                expected: self,
                found: count,
            })
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::Range(lo, hi) => write!(f, "{lo} or {hi}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// One registered operation.
#[derive(Debug, Clone, Copy)]
pub struct OpSpec {
    pub name: &'static str,
    pub arity: Arity,
    pub handler: OpHandler,
}

/// Registry mapping operation name → [`OpSpec`].
///
/// Immutable once built, so one registry can back any number of
/// evaluators, including evaluators on other threads.
#[derive(Debug)]
pub struct OpRegistry {
    ops: HashMap<&'static str, OpSpec>,
}

impl OpRegistry {
    /// The registry holding every built-in operation.
    pub fn standard() -> Self {
        let mut reg = Self {
            ops: HashMap::with_capacity(ops::OPERATIONS.len()),
        };
        for spec in ops::OPERATIONS {
            reg.add(*spec);
        }
        reg
    }

    /// The standard registry, built on first use and shared by the process.
    pub fn global() -> &'static OpRegistry {
        static STANDARD: LazyLock<OpRegistry> = LazyLock::new(OpRegistry::standard);
        &STANDARD
    }

    fn add(&mut self, spec: OpSpec) {
        self.ops.insert(spec.name, spec);
    }

    /// Look up an operation by name.
    pub fn get(&self, name: &str) -> Option<&OpSpec> {
        self.ops.get(name)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.ops.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

impl Default for OpRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

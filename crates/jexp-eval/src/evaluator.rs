//! The recursive dispatcher.

use std::io::{self, Write};

use jexp_types::Expr;

use crate::config::EvalConfig;
use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::registry::OpRegistry;
use crate::Value;

/// Grow the native stack when less than this much remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each additional stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Walks expressions against one mutable [`Environment`].
///
/// The registry and the `print` output writer are borrowed, so several
/// evaluators can share a registry while each keeps its own variables.
pub struct Evaluator<'a> {
    registry: &'a OpRegistry,
    out: &'a mut dyn Write,
    env: Environment,
    config: EvalConfig,
    /// Compound forms currently being evaluated.
    depth: usize,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator with an empty environment and default config.
    pub fn new(registry: &'a OpRegistry, out: &'a mut dyn Write) -> Self {
        Self {
            registry,
            out,
            env: Environment::new(),
            config: EvalConfig::default(),
            depth: 0,
        }
    }

    /// Start from an existing environment instead of an empty one.
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Finish evaluating and hand back the variables.
    pub fn into_env(self) -> Environment {
        self.env
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Evaluate an expression to a [`Value`].
    ///
    /// Scalars are returned unchanged, string tokens included: only `get`
    /// and `set` treat a string as a variable name. A list must be a
    /// compound form whose head names a registered operation; its operands
    /// are handed to that operation's handler unevaluated.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        let items = match expr {
            Expr::Int(n) => return Ok(Value::Int(*n)),
            Expr::Str(s) => return Ok(Value::Str(s.clone())),
            Expr::Bool(b) => return Ok(Value::Bool(*b)),
            Expr::List(items) => items,
        };

        if self.depth >= self.config.max_depth {
            return Err(EvalError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        let result = stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || self.dispatch(items));
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, items: &[Expr]) -> EvalResult<Value> {
        let (name, args) = match items.split_first() {
            Some((Expr::Str(name), args)) => (name, args),
            Some((head, _)) => {
                return Err(EvalError::MalformedExpression(format!(
                    "operation name must be a string, got {} {head}",
                    head.kind_name()
                )));
            }
            None => {
                return Err(EvalError::MalformedExpression(
                    "empty list has no operation".into(),
                ));
            }
        };

        let registry = self.registry;
        let spec = registry
            .get(name)
            .ok_or_else(|| EvalError::UnknownOperation(name.clone()))?;
        spec.arity.check(spec.name, args.len())?;

        tracing::trace!(op = spec.name, depth = self.depth, "dispatch");
        (spec.handler)(self, args)
    }

    /// Write one line of `print` output.
    pub(crate) fn emit(&mut self, value: &Value) -> EvalResult<()> {
        writeln!(self.out, "{value}")?;
        Ok(())
    }
}

/// Evaluate `expr` against `env` with the built-in operations, printing to
/// standard output.
///
/// Bindings made by the program remain in `env` afterwards, even when
/// evaluation fails part-way.
pub fn evaluate(env: &mut Environment, expr: &Expr) -> EvalResult<Value> {
    let mut stdout = io::stdout().lock();
    let mut evaluator = Evaluator::new(OpRegistry::global(), &mut stdout).with_env(std::mem::take(env));
    let result = evaluator.evaluate(expr);
    *env = evaluator.into_env();
    result
}

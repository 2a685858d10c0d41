//! Built-in operation handlers.
//!
//! Every handler receives its operands unevaluated. The dispatcher has
//! already checked the operand count against the handler's [`Arity`], so
//! positional indexing below is in bounds.

use std::cmp::Ordering;

use jexp_types::Expr;

use crate::error::{EvalError, EvalResult};
use crate::evaluator::Evaluator;
use crate::registry::{Arity, OpSpec};
use crate::Value;

/// Every built-in operation, registered by [`OpRegistry::standard`](crate::OpRegistry::standard).
pub(crate) static OPERATIONS: &[OpSpec] = &[
    OpSpec { name: "abs", arity: Arity::Exact(1), handler: op_abs },
    OpSpec { name: "add", arity: Arity::Exact(2), handler: op_add },
    OpSpec { name: "equal", arity: Arity::Exact(2), handler: op_equal },
    OpSpec { name: "leq", arity: Arity::Exact(2), handler: op_leq },
    OpSpec { name: "geq", arity: Arity::Exact(2), handler: op_geq },
    OpSpec { name: "get", arity: Arity::Exact(1), handler: op_get },
    OpSpec { name: "set", arity: Arity::Exact(2), handler: op_set },
    OpSpec { name: "seq", arity: Arity::AtLeast(1), handler: op_seq },
    OpSpec { name: "if", arity: Arity::Range(2, 3), handler: op_if },
    OpSpec { name: "while", arity: Arity::AtLeast(2), handler: op_while },
    OpSpec { name: "repeat", arity: Arity::Exact(2), handler: op_repeat },
    OpSpec { name: "print", arity: Arity::AtLeast(0), handler: op_print },
    OpSpec { name: "array", arity: Arity::Exact(1), handler: op_array },
];

// ── Arithmetic & comparison ──────────────────────────────────────────────

fn op_abs(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    match ev.evaluate(&args[0])? {
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| EvalError::ArithmeticTrap(format!("abs({n}) overflows"))),
        other => Err(EvalError::TypeMismatch(format!(
            "'abs' requires integer, got {}",
            other.type_name()
        ))),
    }
}

fn op_add(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    let left = ev.evaluate(&args[0])?;
    let right = ev.evaluate(&args[1])?;
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => a
            .checked_add(*b)
            .map(Value::Int)
            .ok_or_else(|| EvalError::ArithmeticTrap(format!("{a} + {b} overflows"))),
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
        _ => Err(EvalError::TypeMismatch(format!(
            "cannot add {} and {}",
            left.type_name(),
            right.type_name()
        ))),
    }
}

fn op_equal(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    let left = ev.evaluate(&args[0])?;
    let right = ev.evaluate(&args[1])?;
    Ok(Value::Bool(left == right))
}

fn op_leq(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    compare(ev, "leq", args, Ordering::is_le)
}

fn op_geq(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    compare(ev, "geq", args, Ordering::is_ge)
}

/// Integers compare numerically, strings lexicographically.
fn compare(
    ev: &mut Evaluator<'_>,
    op: &str,
    args: &[Expr],
    holds: fn(Ordering) -> bool,
) -> EvalResult<Value> {
    let left = ev.evaluate(&args[0])?;
    let right = ev.evaluate(&args[1])?;
    let ordering = match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        _ => {
            return Err(EvalError::TypeMismatch(format!(
                "'{op}' cannot compare {} and {}",
                left.type_name(),
                right.type_name()
            )));
        }
    };
    Ok(Value::Bool(holds(ordering)))
}

// ── Variables ────────────────────────────────────────────────────────────

fn op_get(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    let name = literal_name("get", args, 0)?;
    ev.env()
        .get(name)
        .cloned()
        .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))
}

fn op_set(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    let name = literal_name("set", args, 0)?;
    let value = ev.evaluate(&args[1])?;
    tracing::debug!(name, %value, "set");
    ev.env_mut().set(name, value.clone());
    Ok(value)
}

// ── Control flow ─────────────────────────────────────────────────────────

fn op_seq(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    let mut last = Value::Nothing;
    for arg in args {
        last = ev.evaluate(arg)?;
    }
    Ok(last)
}

fn op_if(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    if ev.evaluate(&args[0])?.is_truthy() {
        ev.evaluate(&args[1])
    } else if let Some(otherwise) = args.get(2) {
        ev.evaluate(otherwise)
    } else {
        Ok(Value::Nothing)
    }
}

fn op_while(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    let (cond, body) = (&args[0], &args[1..]);
    while ev.evaluate(cond)?.is_truthy() {
        for stmt in body {
            ev.evaluate(stmt)?;
        }
    }
    Ok(Value::Nothing)
}

fn op_repeat(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    let count = literal_count("repeat", args, 0)?;
    for _ in 0..count {
        ev.evaluate(&args[1])?;
    }
    Ok(Value::Nothing)
}

// ── Output & data ────────────────────────────────────────────────────────

fn op_print(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    for arg in args {
        let value = ev.evaluate(arg)?;
        ev.emit(&value)?;
    }
    Ok(Value::Nothing)
}

fn op_array(_ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult<Value> {
    let len = literal_count("array", args, 0)?;
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(len)
        .map_err(|_| EvalError::Allocation {
            op: "array".to_string(),
            len,
        })?;
    slots.resize(len, Value::Nothing);
    Ok(Value::Array(slots))
}

// ── Literal operands ─────────────────────────────────────────────────────

/// An operand that must be a variable-name token, taken as written.
fn literal_name<'e>(op: &str, args: &'e [Expr], position: usize) -> EvalResult<&'e str> {
    let arg = &args[position];
    arg.as_str().ok_or_else(|| EvalError::ExpectedLiteral {
        op: op.to_string(),
        position,
        expected: "a variable name",
        found: arg.to_string(),
    })
}

/// An operand that must be a non-negative integer, taken as written.
fn literal_count(op: &str, args: &[Expr], position: usize) -> EvalResult<usize> {
    let arg = &args[position];
    arg.as_int()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| EvalError::ExpectedLiteral {
            op: op.to_string(),
            position,
            expected: "a non-negative integer literal",
            found: arg.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_name() {
        let args = [Expr::from("x"), Expr::Int(1)];
        assert_eq!(literal_name("set", &args, 0).unwrap(), "x");
        let err = literal_name("set", &args, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'set' operand 1 must be a variable name, got 1"
        );
    }

    #[test]
    fn test_literal_count_rejects_expressions_and_negatives() {
        assert_eq!(literal_count("array", &[Expr::Int(4)], 0).unwrap(), 4);
        assert!(literal_count("array", &[Expr::Int(-1)], 0).is_err());
        let nested = [Expr::form("add", [Expr::Int(1), Expr::Int(2)])];
        let err = literal_count("repeat", &nested, 0).unwrap_err();
        assert!(err.to_string().contains(r#"["add",1,2]"#));
    }

    #[test]
    fn test_huge_array_is_an_error() {
        let registry = crate::OpRegistry::global();
        let mut sink = Vec::new();
        let mut ev = Evaluator::new(registry, &mut sink);
        let err = op_array(&mut ev, &[Expr::Int(i64::MAX)]).unwrap_err();
        assert!(matches!(err, EvalError::Allocation { len, .. } if len == i64::MAX as usize));
    }

    #[test]
    fn test_every_operation_is_unique() {
        let mut names: Vec<_> = OPERATIONS.iter().map(|spec| spec.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), OPERATIONS.len());
    }
}

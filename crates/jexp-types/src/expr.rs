//! The decoded program tree.
//!
//! A program is a single [`Expr`]. Scalars evaluate to themselves; a list
//! whose head is a string names an operation applied to the remaining,
//! still-unevaluated elements. Shape checks on lists are left to the
//! evaluator so that an empty list or a non-string head is reported at the
//! point where it would have been dispatched.

use serde::Serialize;
use std::fmt;

/// A node of the program tree, exactly as decoded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Expr {
    Int(i64),
    Str(String),
    Bool(bool),
    List(Vec<Expr>),
}

impl Expr {
    /// Build a compound form `[op, args...]`.
    pub fn form(op: &str, args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::List(
            std::iter::once(Expr::Str(op.to_string()))
                .chain(args)
                .collect(),
        )
    }

    /// View this node as a compound form: operation name plus raw operands.
    ///
    /// Returns `None` for scalars, empty lists, and lists whose head is not
    /// a string.
    pub fn as_form(&self) -> Option<(&str, &[Expr])> {
        match self {
            Expr::List(items) => match items.split_first() {
                Some((Expr::Str(op), args)) => Some((op.as_str(), args)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expr::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Expr::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Human-readable name of this node's shape, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Int(_) => "integer",
            Expr::Str(_) => "string",
            Expr::Bool(_) => "boolean",
            Expr::List(_) => "list",
        }
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::Int(n)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::Str(s.to_string())
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Bool(b)
    }
}

/// Renders the node back as compact JSON.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

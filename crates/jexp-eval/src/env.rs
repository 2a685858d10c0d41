//! Variable environment for the jexp evaluator.

use crate::Value;
use std::collections::BTreeMap;

/// The single, flat variable store of a running program.
///
/// There is no scoping: every `set` writes the one global binding for its
/// name and every `get` reads it. Iteration order is by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: BTreeMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Bind `name`, overwriting any prior binding. Returns the prior value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.bindings.insert(name.into(), value)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let mut env = Environment::new();
        assert_eq!(env.set("x", Value::Int(1)), None);
        assert_eq!(env.set("x", Value::from("one")), Some(Value::Int(1)));
        assert_eq!(env.get("x"), Some(&Value::from("one")));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_missing_is_none() {
        let env = Environment::new();
        assert!(env.is_empty());
        assert_eq!(env.get("missing"), None);
    }
}

//! Evaluator configuration.

/// Default bound on compound-form nesting.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Environment variable overriding [`EvalConfig::max_depth`].
pub const MAX_DEPTH_ENV: &str = "JEXP_MAX_DEPTH";

/// Tunables for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum number of compound forms being evaluated at once.
    pub max_depth: usize,
}

impl EvalConfig {
    /// Defaults, overridden by `JEXP_MAX_DEPTH` when it holds a positive integer.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(MAX_DEPTH_ENV).ok().as_deref())
    }

    fn from_env_value(raw: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = raw {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => config.max_depth = depth,
                _ => tracing::warn!(
                    value = raw,
                    "ignoring {MAX_DEPTH_ENV}: expected a positive integer"
                ),
            }
        }
        config
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

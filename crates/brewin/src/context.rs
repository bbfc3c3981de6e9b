//! Evaluation context configuration

/// Configuration for one evaluation run.
///
/// Passed to [`Evaluator::with_context`](crate::Evaluator::with_context);
/// the default is what [`Evaluator::new`](crate::Evaluator::new) uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalContext {
    /// Maximum depth of nested function calls (stack overflow
    /// protection). Forcing lazy assignments does not count.
    pub max_call_depth: usize,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_call_depth: 1000,
        }
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom call depth limit.
    pub fn with_max_call_depth(max_depth: usize) -> Self {
        Self {
            max_call_depth: max_depth,
        }
    }
}

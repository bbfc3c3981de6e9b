//! Completion signals for statement sequences

use crate::error::EvalError;
use crate::Value;

/// How a statement (or a sequence of statements) completed.
///
/// Anything other than `Normal` halts the enclosing sequence and is passed
/// outward until something consumes it: a function call consumes `Return`,
/// a `try` with a matching handler consumes `Raise`.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Fell off the end; continue with the next statement
    Normal,

    /// `return` with the returned value (`None` for a bare `return;`)
    Return(Option<Value>),

    /// An exception with its tag
    Raise(String),
}

impl Signal {
    /// Whether execution continues with the next statement.
    pub fn is_normal(&self) -> bool {
        matches!(self, Signal::Normal)
    }

    /// The tag of an in-flight exception.
    pub fn raised_tag(&self) -> Option<&str> {
        match self {
            Signal::Raise(tag) => Some(tag),
            _ => None,
        }
    }

    /// Turn an error carrying a raise back into a signal.
    ///
    /// Fatal errors stay errors.
    pub fn from_error(err: EvalError) -> Result<Signal, EvalError> {
        match err {
            EvalError::Raise(tag) => Ok(Signal::Raise(tag)),
            fatal => Err(fatal),
        }
    }
}

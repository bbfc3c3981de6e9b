//! Error types for Brewin evaluation

use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// Category of a fatal error, as reported to [`Host::fail`](crate::Host::fail).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Redeclaration, undefined variable, undefined function or arity
    Name,
    /// Operator, argument, return or condition type mismatch
    Type,
    /// Bad field access or an unhandled `raise`
    Fault,
    /// Call depth limit exceeded
    Resource,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Name => "NameError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Fault => "FaultError",
            ErrorKind::Resource => "ResourceError",
        };
        f.write_str(name)
    }
}

/// Errors raised while loading or evaluating a program.
///
/// Every variant except [`EvalError::Raise`] is fatal. `Raise` carries a
/// language-level exception out of an expression (a call whose body raised,
/// or a thunk whose forcing raised) until the statement executor turns it
/// back into a [`Signal::Raise`](crate::Signal::Raise).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Name resolution failure
    #[error("NameError: {message}")]
    NameError {
        /// What could not be resolved
        message: String,
    },

    /// Type mismatch
    #[error("TypeError: {message}")]
    TypeError {
        /// What was expected and what was found
        message: String,
    },

    /// Invalid field access, arithmetic fault or unhandled raise
    #[error("FaultError: {message}")]
    FaultError {
        /// What went wrong
        message: String,
    },

    /// Call depth limit exceeded
    #[error("stack overflow: call depth {depth} exceeds maximum {max}")]
    StackOverflow {
        /// Depth at which the limit was hit
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// A language-level `raise` in flight
    #[error("unhandled exception `{0}`")]
    Raise(String),
}

impl EvalError {
    /// Create a `NameError`.
    pub fn name(message: impl Into<String>) -> Self {
        EvalError::NameError {
            message: message.into(),
        }
    }

    /// Create a `TypeError`.
    pub fn type_error(message: impl Into<String>) -> Self {
        EvalError::TypeError {
            message: message.into(),
        }
    }

    /// Create a `FaultError`.
    pub fn fault(message: impl Into<String>) -> Self {
        EvalError::FaultError {
            message: message.into(),
        }
    }

    /// The category reported to the host.
    ///
    /// A `Raise` that reaches the host has gone unhandled, which is a fault.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::NameError { .. } => ErrorKind::Name,
            EvalError::TypeError { .. } => ErrorKind::Type,
            EvalError::FaultError { .. } | EvalError::Raise(_) => ErrorKind::Fault,
            EvalError::StackOverflow { .. } => ErrorKind::Resource,
        }
    }

    /// The message without the category prefix.
    pub fn message(&self) -> String {
        match self {
            EvalError::NameError { message }
            | EvalError::TypeError { message }
            | EvalError::FaultError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for Brewin operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Get the Brewin type name of a value, for error messages.
pub fn type_name(value: &Value) -> String {
    match value {
        Value::Int(_) => "int".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Nil => "nil".to_string(),
        Value::Object { type_name, .. } => type_name.clone(),
    }
}

//! Display and Debug implementations for Value

use std::fmt;

use super::*;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{:?}", s.as_ref()),
            Value::Nil => write!(f, "nil"),
            Value::Object {
                type_name,
                instance: None,
            } => write!(f, "nil as {}", type_name),
            Value::Object {
                instance: Some(r), ..
            } => write!(f, "{:?}", r),
        }
    }
}

/// The form `print` writes: `true`/`false` for booleans, `nil` for nil and
/// nil handles, strings without quotes.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
            Value::Nil
            | Value::Object {
                instance: None, ..
            } => write!(f, "nil"),
            Value::Object { type_name, .. } => write!(f, "<{}>", type_name),
        }
    }
}

//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::rc::Rc;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    /// Create a nil handle of the given struct type
    pub fn nil_of(type_name: impl Into<String>) -> Self {
        Value::Object {
            type_name: type_name.into(),
            instance: None,
        }
    }

    /// Wrap a struct handle
    pub fn object(instance: StructRef) -> Self {
        Value::Object {
            type_name: instance.type_name(),
            instance: Some(instance),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Check if value is `nil` or a nil struct handle
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil | Value::Object { instance: None, .. })
    }

    /// Check if value is `nil` or any struct handle
    pub fn is_struct_like(&self) -> bool {
        matches!(self, Value::Nil | Value::Object { .. })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract integer value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&**s),
            _ => None,
        }
    }

    /// Extract a non-nil struct handle
    pub fn as_struct(&self) -> Option<&StructRef> {
        match self {
            Value::Object {
                instance: Some(r), ..
            } => Some(r),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

/// Structural equality for tests and memo checks.
///
/// Struct handles are equal when they are the same instance (or both nil
/// of the same type). The language's `==` has extra typing rules and lives
/// in the binary operator evaluator.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (
                Value::Object {
                    type_name: ta,
                    instance: ia,
                },
                Value::Object {
                    type_name: tb,
                    instance: ib,
                },
            ) => {
                ta == tb
                    && match (ia, ib) {
                        (Some(a), Some(b)) => a.ptr_eq(b),
                        (None, None) => true,
                        _ => false,
                    }
            }
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<StructRef> for Value {
    fn from(r: StructRef) -> Self {
        Value::object(r)
    }
}

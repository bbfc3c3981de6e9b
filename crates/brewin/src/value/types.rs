//! Declared types and the coercions applied at typed slots

use std::fmt;

use crate::error::{type_name, EvalError};

use super::Value;

/// A declared type: a primitive, `void`, or a struct name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// `int`
    Int,
    /// `bool`
    Bool,
    /// `string`
    String,
    /// `void` (return types only)
    Void,
    /// A user-declared struct
    Struct(String),
}

impl Type {
    /// Interpret a type name. Anything that is not a primitive is taken to
    /// be a struct name; the validator checks that it was declared.
    pub fn parse(name: &str) -> Self {
        match name {
            "int" => Type::Int,
            "bool" => Type::Bool,
            "string" => Type::String,
            "void" => Type::Void,
            other => Type::Struct(other.to_string()),
        }
    }

    /// Whether this is one of the primitive types.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Int | Type::Bool | Type::String)
    }

    /// The value a slot of this type starts with.
    ///
    /// int → 0, bool → false, string → "", struct → nil of that type.
    pub fn default_value(&self) -> Value {
        match self {
            Type::Int => Value::Int(0),
            Type::Bool => Value::Bool(false),
            Type::String => Value::string(""),
            Type::Void => Value::Nil,
            Type::Struct(name) => Value::nil_of(name.clone()),
        }
    }

    /// Convert a value for storage in a slot of this type.
    ///
    /// `nil` becomes a nil handle of the slot's struct type. Struct handles
    /// must match the slot's struct exactly.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` on any mismatch; `void` accepts nothing.
    pub fn coerce(&self, value: Value) -> Result<Value, EvalError> {
        match (self, value) {
            (Type::Int, v @ Value::Int(_)) => Ok(v),
            (Type::Bool, v @ Value::Bool(_)) => Ok(v),
            (Type::String, v @ Value::String(_)) => Ok(v),
            (Type::Struct(name), Value::Nil) => Ok(Value::nil_of(name.clone())),
            (Type::Struct(name), v @ Value::Object { .. }) if type_name(&v) == *name => Ok(v),
            (expected, other) => Err(EvalError::type_error(format!(
                "expected `{}`, found `{}`",
                expected,
                type_name(&other)
            ))),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => f.write_str("int"),
            Type::Bool => f.write_str("bool"),
            Type::String => f.write_str("string"),
            Type::Void => f.write_str("void"),
            Type::Struct(name) => f.write_str(name),
        }
    }
}

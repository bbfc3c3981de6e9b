//! Value representation for runtime values

mod compound;
mod display;
mod impls;
mod thunk;
mod types;

pub use compound::{StructInstance, StructRef};
pub use thunk::{Deferred, Thunk, ThunkState};
pub use types::Type;

use std::rc::Rc;

/// Runtime value representation for the Brewin evaluator.
///
/// Primitives are copied by value. Struct handles share one mutable
/// instance between every copy of the handle. Unevaluated assignments never
/// appear here: they live in a binding's [`Slot`](crate::environment::Slot)
/// until a read forces them.
#[derive(Clone)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),

    /// Boolean: `true` or `false`
    Bool(bool),

    /// Immutable string
    String(Rc<str>),

    /// The untyped `nil` literal
    Nil,

    /// A struct handle of a known type; `instance` is `None` for a nil
    /// handle (a struct-typed slot that holds `nil`)
    Object {
        /// The struct's declared type name
        type_name: String,
        /// The shared instance, if any
        instance: Option<StructRef>,
    },
}

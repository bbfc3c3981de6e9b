//! Struct instances and the shared handles that point at them

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::environment::{Binding, Slot};

/// A struct instance with named fields.
///
/// Uses IndexMap so fields keep declaration order. Each field is a full
/// binding carrying the field's declared type. Field assignment stores an
/// evaluated value already coerced to that type, so field slots are always
/// ready.
#[derive(Debug, Clone)]
pub struct StructInstance {
    /// The struct's type name (e.g., "Point", "Node")
    pub type_name: String,

    /// The struct's fields in definition order
    pub fields: IndexMap<String, Binding>,
}

impl StructInstance {
    /// Create an instance with no fields.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a field (builder pattern)
    pub fn with_field(mut self, name: impl Into<String>, binding: Binding) -> Self {
        self.fields.insert(name.into(), binding);
        self
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.fields.get(name)
    }
}

/// Shared, mutable, reference-counted handle to a [`StructInstance`].
///
/// Cloning the handle aliases the instance; equality is identity.
#[derive(Clone)]
pub struct StructRef(Rc<RefCell<StructInstance>>);

impl StructRef {
    /// Wrap a freshly built instance.
    pub fn new(instance: StructInstance) -> Self {
        Self(Rc::new(RefCell::new(instance)))
    }

    /// The instance's type name.
    pub fn type_name(&self) -> String {
        self.0.borrow().type_name.clone()
    }

    /// A copy of a field's binding. Thunks inside stay shared.
    pub fn field(&self, name: &str) -> Option<Binding> {
        self.0.borrow().get(name).cloned()
    }

    /// Replace the slot of an existing field, keeping its declared type.
    ///
    /// Returns `false` if the field does not exist.
    pub fn set_field(&self, name: &str, slot: Slot) -> bool {
        match self.0.borrow_mut().fields.get_mut(name) {
            Some(binding) => {
                binding.slot = slot;
                true
            }
            None => false,
        }
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<String> {
        self.0.borrow().fields.keys().cloned().collect()
    }

    /// Whether two handles point at the same instance.
    pub fn ptr_eq(&self, other: &StructRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for StructRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StructRef<{}>({:p})", self.type_name(), Rc::as_ptr(&self.0))
    }
}

//! Loaded program: function and struct tables, built once and read-only
//! during evaluation.

mod validate;

use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::ast::{self, Stmt};
use crate::error::EvalError;
use crate::value::Type;

pub use validate::validate;

/// A user function with its declared types resolved.
#[derive(Debug, Clone)]
pub struct Function {
    /// Function name
    pub name: String,

    /// Parameters as `(name, type)` in declaration order
    pub params: Vec<(String, Type)>,

    /// Declared return type
    pub return_type: Type,

    /// Function body
    pub body: Vec<Stmt>,
}

impl Function {
    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A struct declaration with its field types resolved.
#[derive(Debug, Clone)]
pub struct StructType {
    /// Struct type name
    pub name: String,

    /// Fields as `(name, type)` in declaration order
    pub fields: Vec<(String, Type)>,
}

/// Function table keyed by (name, arity) plus struct table keyed by name.
///
/// # Example
///
/// ```
/// use brewin::ast::build::*;
/// use brewin::LoadedProgram;
///
/// let program = LoadedProgram::load(program(
///     vec![structure("Point", &[("x", "int")])],
///     vec![func("main", &[], "void", vec![])],
/// ))
/// .unwrap();
///
/// assert!(program.function("main", 0).is_some());
/// assert!(program.struct_type("Point").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoadedProgram {
    functions: HashMap<(String, usize), Rc<Function>>,
    structs: IndexMap<String, Rc<StructType>>,
}

impl LoadedProgram {
    /// Build the tables and validate every declared type.
    ///
    /// # Errors
    ///
    /// Returns `NameError` for duplicate declarations or a missing `main`,
    /// and `TypeError` for a type name that is neither primitive nor a
    /// declared struct.
    pub fn load(program: ast::Program) -> Result<Self, EvalError> {
        validate(&program)?;

        let structs = program
            .structs
            .into_iter()
            .map(|def| {
                let fields = def
                    .fields
                    .into_iter()
                    .map(|f| (f.name, Type::parse(&f.var_type)))
                    .collect();
                (
                    def.name.clone(),
                    Rc::new(StructType {
                        name: def.name,
                        fields,
                    }),
                )
            })
            .collect();

        let functions = program
            .functions
            .into_iter()
            .map(|def| {
                let params: Vec<(String, Type)> = def
                    .params
                    .into_iter()
                    .map(|p| (p.name, Type::parse(&p.var_type)))
                    .collect();
                (
                    (def.name.clone(), params.len()),
                    Rc::new(Function {
                        name: def.name,
                        params,
                        return_type: Type::parse(&def.return_type),
                        body: def.body,
                    }),
                )
            })
            .collect();

        Ok(Self { functions, structs })
    }

    /// Look up a function by name and arity.
    pub fn function(&self, name: &str, arity: usize) -> Option<Rc<Function>> {
        self.functions.get(&(name.to_string(), arity)).cloned()
    }

    /// Look up a struct type by name.
    pub fn struct_type(&self, name: &str) -> Option<Rc<StructType>> {
        self.structs.get(name).cloned()
    }

    /// Check if any function with this name exists, at any arity.
    pub fn has_function_named(&self, name: &str) -> bool {
        self.functions.keys().any(|(n, _)| n == name)
    }

    /// Number of functions.
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Struct names in declaration order.
    pub fn struct_names(&self) -> impl Iterator<Item = &str> {
        self.structs.keys().map(String::as_str)
    }
}

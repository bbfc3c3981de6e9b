//! Load-time checks run before `main` executes

use std::collections::HashSet;

use crate::ast::{Program, TypedName};
use crate::error::EvalError;

const PRIMITIVES: [&str; 3] = ["int", "bool", "string"];

/// Check a program's declarations.
///
/// Struct declarations may refer to each other (and to themselves) in any
/// order, so every struct name is collected before any type is checked.
///
/// # Errors
///
/// - `NameError`: a duplicate struct, field, parameter or `(name, arity)`
///   function, or no `main` taking zero arguments
/// - `TypeError`: a field, parameter or return type that is neither
///   primitive nor a declared struct; `void` is accepted only as a return
///   type
pub fn validate(program: &Program) -> Result<(), EvalError> {
    let mut structs = HashSet::new();
    for def in &program.structs {
        if PRIMITIVES.contains(&def.name.as_str()) || def.name == "void" {
            return Err(EvalError::type_error(format!(
                "struct name `{}` shadows a built-in type",
                def.name
            )));
        }
        if !structs.insert(def.name.as_str()) {
            return Err(EvalError::name(format!(
                "struct `{}` defined more than once",
                def.name
            )));
        }
    }

    for def in &program.structs {
        check_unique(&def.fields, "field", &def.name)?;
        for field in &def.fields {
            check_slot_type(&structs, &field.var_type).map_err(|bad| {
                EvalError::type_error(format!(
                    "invalid type `{}` for field `{}.{}`",
                    bad, def.name, field.name
                ))
            })?;
        }
    }

    let mut signatures = HashSet::new();
    for def in &program.functions {
        if !signatures.insert((def.name.as_str(), def.params.len())) {
            return Err(EvalError::name(format!(
                "function `{}` with {} parameter(s) defined more than once",
                def.name,
                def.params.len()
            )));
        }
        check_unique(&def.params, "parameter", &def.name)?;
        for param in &def.params {
            check_slot_type(&structs, &param.var_type).map_err(|bad| {
                EvalError::type_error(format!(
                    "invalid type `{}` for parameter `{}` of `{}`",
                    bad, param.name, def.name
                ))
            })?;
        }
        if def.return_type != "void" {
            check_slot_type(&structs, &def.return_type).map_err(|bad| {
                EvalError::type_error(format!(
                    "invalid return type `{}` for `{}`",
                    bad, def.name
                ))
            })?;
        }
    }

    if !signatures.contains(&("main", 0)) {
        return Err(EvalError::name("No main() function was found"));
    }

    Ok(())
}

/// A type usable for a variable, parameter or field.
fn check_slot_type<'a>(structs: &HashSet<&str>, name: &'a str) -> Result<(), &'a str> {
    if PRIMITIVES.contains(&name) || structs.contains(name) {
        Ok(())
    } else {
        Err(name)
    }
}

fn check_unique(names: &[TypedName], what: &str, owner: &str) -> Result<(), EvalError> {
    let mut seen = HashSet::new();
    for typed in names {
        if !seen.insert(typed.name.as_str()) {
            return Err(EvalError::name(format!(
                "{} `{}` of `{}` declared more than once",
                what, typed.name, owner
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;

    fn main_fn() -> crate::ast::FunctionDef {
        func("main", &[], "void", vec![])
    }

    #[test]
    fn test_valid_program() {
        let p = program(
            vec![
                structure("List", &[("head", "Node")]),
                structure("Node", &[("value", "int"), ("next", "Node")]),
            ],
            vec![main_fn(), func("len", &[("l", "List")], "int", vec![])],
        );
        assert!(validate(&p).is_ok());
    }

    #[test]
    fn test_missing_main() {
        let p = program(vec![], vec![func("main", &[("x", "int")], "void", vec![])]);
        assert_eq!(
            validate(&p),
            Err(EvalError::name("No main() function was found"))
        );
    }

    #[test]
    fn test_unknown_field_type() {
        let p = program(vec![structure("P", &[("x", "float")])], vec![main_fn()]);
        assert!(matches!(validate(&p), Err(EvalError::TypeError { .. })));
    }

    #[test]
    fn test_void_parameter_rejected() {
        let p = program(vec![], vec![main_fn(), func("f", &[("x", "void")], "int", vec![])]);
        assert!(matches!(validate(&p), Err(EvalError::TypeError { .. })));
    }

    #[test]
    fn test_unknown_return_type() {
        let p = program(vec![], vec![main_fn(), func("f", &[], "Ghost", vec![])]);
        assert!(matches!(validate(&p), Err(EvalError::TypeError { .. })));
    }

    #[test]
    fn test_duplicates() {
        let dup_struct = program(
            vec![structure("P", &[]), structure("P", &[])],
            vec![main_fn()],
        );
        assert!(matches!(validate(&dup_struct), Err(EvalError::NameError { .. })));

        let dup_fn = program(vec![], vec![main_fn(), main_fn()]);
        assert!(matches!(validate(&dup_fn), Err(EvalError::NameError { .. })));

        let dup_field = program(
            vec![structure("P", &[("x", "int"), ("x", "bool")])],
            vec![main_fn()],
        );
        assert!(matches!(validate(&dup_field), Err(EvalError::NameError { .. })));

        let dup_param = program(
            vec![],
            vec![main_fn(), func("f", &[("a", "int"), ("a", "int")], "void", vec![])],
        );
        assert!(matches!(validate(&dup_param), Err(EvalError::NameError { .. })));
    }
}

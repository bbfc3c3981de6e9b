//! `if` statements and condition checks

use crate::ast::{Expr, Stmt};
use crate::error::type_name;
use crate::{EvalError, Evaluator, Value};

use super::{exec_block, Evaluate, Signal};

/// `if (condition) { then_body } else { else_body }`
///
/// The taken branch runs in its own block.
///
/// # Errors
///
/// Returns `TypeError` if the condition is not a bool.
pub fn exec_if(
    condition: &Expr,
    then_body: &[Stmt],
    else_body: Option<&[Stmt]>,
    ev: &mut Evaluator<'_>,
) -> Result<Signal, EvalError> {
    if eval_condition(condition, "if", ev)? {
        exec_block(then_body, ev)
    } else if let Some(else_body) = else_body {
        exec_block(else_body, ev)
    } else {
        Ok(Signal::Normal)
    }
}

/// Evaluate a condition, which must be a bool.
///
/// # Errors
///
/// Returns `TypeError` naming `construct` for any other value.
pub fn eval_condition(
    condition: &Expr,
    construct: &str,
    ev: &mut Evaluator<'_>,
) -> Result<bool, EvalError> {
    match condition.eval(ev)? {
        Value::Bool(b) => Ok(b),
        other => Err(EvalError::type_error(format!(
            "expected `bool` in {} condition, found `{}`",
            construct,
            type_name(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;
    use crate::{BufferHost, LoadedProgram};

    fn run(body: Vec<Stmt>) -> (Result<Signal, EvalError>, Vec<String>) {
        let loaded =
            LoadedProgram::load(program(vec![], vec![func("main", &[], "void", vec![])])).unwrap();
        let mut host = BufferHost::new();
        let result = {
            let mut ev = Evaluator::new(loaded, &mut host);
            crate::eval::exec_stmts(&body, &mut ev)
        };
        (result, host.lines().to_vec())
    }

    #[test]
    fn test_branches() {
        let (result, lines) = run(vec![
            if_else(
                boolean(true),
                vec![print(vec![string("then")])],
                vec![print(vec![string("else")])],
            ),
            if_else(
                boolean(false),
                vec![print(vec![string("then")])],
                vec![print(vec![string("else")])],
            ),
            if_then(boolean(false), vec![print(vec![string("skipped")])]),
        ]);
        assert_eq!(result, Ok(Signal::Normal));
        assert_eq!(lines, ["then", "else"]);
    }

    #[test]
    fn test_integer_condition_is_type_error() {
        let (result, _) = run(vec![if_then(int(1), vec![])]);
        assert!(matches!(result, Err(EvalError::TypeError { .. })));
    }

    #[test]
    fn test_branch_block_scoping() {
        let (result, _) = run(vec![
            if_then(boolean(true), vec![var_def("inner")]),
            assign("inner", int(1)),
        ]);
        assert!(matches!(result, Err(EvalError::NameError { .. })));
    }
}

//! `for` loops

use crate::ast::{Assign, Expr, Stmt};
use crate::{EvalError, Evaluator};

use super::branch::eval_condition;
use super::{exec_block, Execute, Signal};

/// `for (init; condition; update) { body }`
///
/// `init` runs once. While the condition holds, the body runs in a fresh
/// block and then `update` runs. A `return` or `raise` from the body leaves
/// the loop at once, skipping `update`.
///
/// # Errors
///
/// Returns `TypeError` if the condition is not a bool.
pub fn exec_for(
    init: &Assign,
    condition: &Expr,
    update: &Assign,
    body: &[Stmt],
    ev: &mut Evaluator<'_>,
) -> Result<Signal, EvalError> {
    init.exec(ev)?;

    loop {
        if !eval_condition(condition, "for", ev)? {
            return Ok(Signal::Normal);
        }

        match exec_block(body, ev)? {
            Signal::Normal => {}
            signal => return Ok(signal),
        }

        update.exec(ev)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;
    use crate::value::Value;
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

    fn counting_loop(body: Vec<Stmt>) -> Stmt {
        for_loop(
            assignment("i", int(0)),
            lt(var("i"), int(3)),
            assignment("i", add(var("i"), int(1))),
            body,
        )
    }

    #[test]
    fn test_counts() {
        let (result, lines) = run(vec![
            var_def("i"),
            counting_loop(vec![print(vec![var("i")])]),
        ]);
        assert_eq!(result, Ok(Signal::Normal));
        assert_eq!(lines, ["0", "1", "2"]);
    }

    #[test]
    fn test_return_skips_update() {
        let (result, lines) = run(vec![
            var_def("i"),
            counting_loop(vec![
                if_then(eq(var("i"), int(1)), vec![ret(var("i"))]),
                print(vec![var("i")]),
            ]),
        ]);
        assert_eq!(result, Ok(Signal::Return(Some(Value::Int(1)))));
        assert_eq!(lines, ["0"]);
    }

    #[test]
    fn test_non_bool_condition() {
        let (result, _) = run(vec![
            var_def("i"),
            for_loop(
                assignment("i", int(0)),
                var("i"),
                assignment("i", int(0)),
                vec![],
            ),
        ]);
        assert!(matches!(result, Err(EvalError::TypeError { .. })));
    }
}

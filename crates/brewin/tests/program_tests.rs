use brewin::ast::build::*;
use brewin::*;
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════
// Load-time Validation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_bad_types_abort_before_main_runs() {
    let mut host = BufferHost::new();
    let result = run_program(
        program(
            vec![structure("P", &[("x", "float")])],
            vec![func("main", &[], "void", vec![print(vec![string("ran")])])],
        ),
        &mut host,
    );
    assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::Type));
    assert!(host.lines().is_empty());
    assert_eq!(host.failure().map(|(kind, _)| kind), Some(ErrorKind::Type));
}

#[test]
fn test_forward_and_self_references_are_allowed() {
    let loaded = LoadedProgram::load(program(
        vec![
            structure("Tree", &[("root", "Leaf")]),
            structure("Leaf", &[("value", "int"), ("sibling", "Leaf")]),
        ],
        vec![
            func("main", &[], "void", vec![]),
            func("grow", &[("t", "Tree")], "Leaf", vec![]),
        ],
    ));
    assert!(loaded.is_ok());
}

#[test]
fn test_missing_main_is_name_error() {
    let mut host = BufferHost::new();
    let result = run_program(program(vec![], vec![func("start", &[], "void", vec![])]), &mut host);
    assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::Name));
    assert_eq!(
        host.failure(),
        Some((ErrorKind::Name, "No main() function was found"))
    );
}

#[test]
fn test_duplicate_function_signature() {
    let result = LoadedProgram::load(program(
        vec![],
        vec![
            func("main", &[], "void", vec![]),
            func("f", &[("a", "int")], "int", vec![]),
            func("f", &[("b", "bool")], "int", vec![]),
        ],
    ));
    assert!(matches!(result, Err(EvalError::NameError { .. })));
}

// ═══════════════════════════════════════════════════════════════════════
// Evaluator and Host
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_failure_reported_once() {
    let mut host = BufferHost::new();
    let loaded = LoadedProgram::load(program(
        vec![],
        vec![func(
            "main",
            &[],
            "void",
            vec![print(vec![string("partial")]), raise(string("Oops"))],
        )],
    ))
    .unwrap();

    let err = Evaluator::new(loaded, &mut host).run().unwrap_err();
    assert_eq!(err, EvalError::fault("unhandled exception `Oops`"));
    assert_eq!(host.lines(), ["partial"]);
    assert_eq!(
        host.failure(),
        Some((ErrorKind::Fault, "unhandled exception `Oops`"))
    );
}

#[test]
fn test_evaluator_can_run_twice() -> anyhow::Result<()> {
    let loaded = LoadedProgram::load(program(
        vec![],
        vec![func("main", &[], "void", vec![var_def("x"), print(vec![string("run")])])],
    ))?;
    let mut host = BufferHost::new();
    {
        let mut ev = Evaluator::new(loaded, &mut host);
        ev.run()?;
        ev.run()?;
        assert_eq!(ev.env().call_depth(), 0);
    }
    assert_eq!(host.lines(), ["run", "run"]);
    Ok(())
}

#[test]
fn test_context_limits_depth() {
    let ctx = EvalContext::with_max_call_depth(3);
    let loaded = LoadedProgram::load(program(
        vec![],
        vec![func("main", &[], "void", vec![])],
    ))
    .unwrap();
    let mut host = BufferHost::new();
    let ev = Evaluator::with_context(loaded, &mut host, ctx.clone());
    assert_eq!(ev.context(), &ctx);
}

// ═══════════════════════════════════════════════════════════════════════
// JSON Frontend
// ═══════════════════════════════════════════════════════════════════════

const COUNTDOWN: &str = r#"{
    "functions": [
        {
            "name": "main",
            "body": [
                { "var_def": { "name": "n", "var_type": "int" } },
                {
                    "for": {
                        "init": { "name": "n", "expr": { "int": 3 } },
                        "condition": {
                            "binary": { "op": ">", "lhs": { "var": "n" }, "rhs": { "int": 0 } }
                        },
                        "update": {
                            "name": "n",
                            "expr": {
                                "binary": { "op": "-", "lhs": { "var": "n" }, "rhs": { "int": 1 } }
                            }
                        },
                        "body": [ { "call": { "name": "print", "args": [ { "var": "n" } ] } } ]
                    }
                },
                { "call": { "name": "print", "args": [ { "string": "liftoff" } ] } }
            ]
        }
    ]
}"#;

#[test]
fn test_json_program_runs() -> anyhow::Result<()> {
    let program = JsonFrontend::new().parse_program(COUNTDOWN)?;
    let mut host = BufferHost::new();
    run_program(program, &mut host)?;
    assert_eq!(host.lines(), ["3", "2", "1", "liftoff"]);
    Ok(())
}

#[test]
fn test_json_syntax_error() {
    let err = JsonFrontend.parse_program("{ \"functions\": 3 }").unwrap_err();
    assert!(err.to_string().starts_with("Parse error"));
    assert!(err.location.is_some());
}

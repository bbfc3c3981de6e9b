use brewin::ast::build::*;
use brewin::ast::{BinaryOp, FunctionDef, Stmt};
use brewin::*;
use pretty_assertions::assert_eq;

// Helper to run a program made of `main` plus extra functions
fn run(
    body: Vec<Stmt>,
    functions: Vec<FunctionDef>,
) -> (std::result::Result<(), EvalError>, Vec<String>) {
    let mut all = vec![func("main", &[], "void", body)];
    all.extend(functions);
    let mut host = BufferHost::new();
    let result = run_program(program(vec![], all), &mut host);
    (result, host.lines().to_vec())
}

// Helper for programs that only print
fn output(body: Vec<Stmt>) -> Vec<String> {
    let (result, lines) = run(body, vec![]);
    assert_eq!(result, Ok(()));
    lines
}

fn error_of(body: Vec<Stmt>, functions: Vec<FunctionDef>) -> EvalError {
    let (result, _) = run(body, functions);
    result.expect_err("program should fail")
}

// ═══════════════════════════════════════════════════════════════════════
// Literals and Printing
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_print_literals() {
    assert_eq!(
        output(vec![print(vec![int(42), string(" "), boolean(true), string(" "), nil()])]),
        ["42 true nil"]
    );
}

#[test]
fn test_print_without_arguments() {
    assert_eq!(output(vec![print(vec![])]), [""]);
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_division_truncates_toward_zero() {
    assert_eq!(
        output(vec![print(vec![binary(BinaryOp::Div, neg(int(7)), int(2))])]),
        ["-3"]
    );
}

#[test]
fn test_arithmetic_precedence_is_tree_shape() {
    // (2 + 3) * 4
    let expr = binary(BinaryOp::Mul, add(int(2), int(3)), int(4));
    assert_eq!(output(vec![print(vec![expr])]), ["20"]);
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        output(vec![print(vec![add(string("brew"), string("in"))])]),
        ["brewin"]
    );
}

#[test]
fn test_division_by_zero_is_fault() {
    let err = error_of(vec![print(vec![binary(BinaryOp::Div, int(1), int(0))])], vec![]);
    assert_eq!(err.kind(), ErrorKind::Fault);
}

#[test]
fn test_mixed_arithmetic_is_type_error() {
    let err = error_of(vec![print(vec![add(int(1), string("1"))])], vec![]);
    assert_eq!(err.kind(), ErrorKind::Type);
}

// ═══════════════════════════════════════════════════════════════════════
// Comparison and Logic
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_equality_across_primitive_types() {
    assert_eq!(
        output(vec![
            print(vec![eq(int(1), int(1))]),
            print(vec![eq(int(1), boolean(true))]),
            print(vec![binary(BinaryOp::Ne, string("a"), int(1))]),
        ]),
        ["true", "false", "true"]
    );
}

#[test]
fn test_comparison_requires_ints() {
    let err = error_of(vec![print(vec![lt(string("a"), string("b"))])], vec![]);
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_logic_short_circuits() {
    let boom = func("boom", &[], "bool", vec![raise(string("boom"))]);
    let (result, lines) = run(
        vec![
            print(vec![binary(BinaryOp::And, boolean(false), call("boom", vec![]))]),
            print(vec![binary(BinaryOp::Or, boolean(true), call("boom", vec![]))]),
        ],
        vec![boom],
    );
    assert_eq!(result, Ok(()));
    assert_eq!(lines, ["false", "true"]);
}

#[test]
fn test_no_integer_truthiness() {
    let err = error_of(
        vec![print(vec![binary(BinaryOp::And, int(1), boolean(true))])],
        vec![],
    );
    assert_eq!(err.kind(), ErrorKind::Type);
    let err = error_of(vec![print(vec![not(int(0))])], vec![]);
    assert_eq!(err.kind(), ErrorKind::Type);
}

// ═══════════════════════════════════════════════════════════════════════
// Functions
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_recursive_factorial() {
    let fact = func(
        "fact",
        &[("n", "int")],
        "int",
        vec![
            if_then(
                binary(BinaryOp::Le, var("n"), int(1)),
                vec![ret(int(1))],
            ),
            ret(binary(
                BinaryOp::Mul,
                var("n"),
                call("fact", vec![sub(var("n"), int(1))]),
            )),
        ],
    );
    let (result, lines) = run(vec![print(vec![call("fact", vec![int(10)])])], vec![fact]);
    assert_eq!(result, Ok(()));
    assert_eq!(lines, ["3628800"]);
}

#[test]
fn test_overloading_by_arity() {
    let (result, lines) = run(
        vec![
            print(vec![call("f", vec![])]),
            print(vec![call("f", vec![int(1)])]),
        ],
        vec![
            func("f", &[], "string", vec![ret(string("none"))]),
            func("f", &[("a", "int")], "string", vec![ret(string("one"))]),
        ],
    );
    assert_eq!(result, Ok(()));
    assert_eq!(lines, ["none", "one"]);
}

#[test]
fn test_unknown_function_and_arity() {
    assert_eq!(error_of(vec![call_stmt("nope", vec![])], vec![]).kind(), ErrorKind::Name);
    let f = func("f", &[], "void", vec![]);
    assert_eq!(
        error_of(vec![call_stmt("f", vec![int(1)])], vec![f]).kind(),
        ErrorKind::Name
    );
}

#[test]
fn test_missing_return_gives_default() {
    let (result, lines) = run(
        vec![
            print(vec![call("i", vec![])]),
            print(vec![call("b", vec![])]),
            print(vec![string("["), call("s", vec![]), string("]")]),
        ],
        vec![
            func("i", &[], "int", vec![]),
            func("b", &[], "bool", vec![ret_void()]),
            func("s", &[], "string", vec![]),
        ],
    );
    assert_eq!(result, Ok(()));
    assert_eq!(lines, ["0", "false", "[]"]);
}

#[test]
fn test_return_type_mismatch() {
    let f = func("f", &[], "int", vec![ret(string("no"))]);
    assert_eq!(
        error_of(vec![call_stmt("f", vec![])], vec![f]).kind(),
        ErrorKind::Type
    );
    let g = func("g", &[], "void", vec![ret(int(1))]);
    assert_eq!(
        error_of(vec![call_stmt("g", vec![])], vec![g]).kind(),
        ErrorKind::Type
    );
}

#[test]
fn test_argument_type_mismatch() {
    let f = func("f", &[("n", "int")], "void", vec![]);
    assert_eq!(
        error_of(vec![call_stmt("f", vec![string("x")])], vec![f]).kind(),
        ErrorKind::Type
    );
}

#[test]
fn test_arguments_are_evaluated_eagerly() {
    let noisy = func(
        "noisy",
        &[],
        "int",
        vec![print(vec![string("evaluated")]), ret(int(1))],
    );
    let ignore = func("ignore", &[("n", "int")], "void", vec![]);
    let (result, lines) = run(
        vec![call_stmt("ignore", vec![call("noisy", vec![])])],
        vec![noisy, ignore],
    );
    assert_eq!(result, Ok(()));
    assert_eq!(lines, ["evaluated"]);
}

#[test]
fn test_stack_overflow_is_resource_error() {
    let forever = func(
        "forever",
        &[("n", "int")],
        "int",
        vec![ret(call("forever", vec![add(var("n"), int(1))]))],
    );
    let mut host = BufferHost::new();
    let result = run_program_with_context(
        program(
            vec![],
            vec![
                func("main", &[], "void", vec![call_stmt("forever", vec![int(0)])]),
                forever,
            ],
        ),
        &mut host,
        EvalContext::with_max_call_depth(64),
    );
    assert!(matches!(result, Err(EvalError::StackOverflow { max: 64, .. })));
    assert_eq!(host.failure().map(|(kind, _)| kind), Some(ErrorKind::Resource));
}

// ═══════════════════════════════════════════════════════════════════════
// Input
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_input_builtins() {
    let mut host = BufferHost::with_input(["4", "38", "Ada"]);
    let body = vec![
        var_def("a"),
        assign("a", call("inputi", vec![string("first? ")])),
        var_def("b"),
        assign("b", call("inputi", vec![])),
        print(vec![add(var("a"), var("b"))]),
        print(vec![string("hi "), call("inputs", vec![])]),
    ];
    let result = run_program(program(vec![], vec![func("main", &[], "void", body)]), &mut host);
    assert_eq!(result, Ok(()));
    assert_eq!(host.lines(), ["first? ", "42", "hi Ada"]);
}

#[test]
fn test_inputi_rejects_non_integer() {
    let mut host = BufferHost::with_input(["forty-two"]);
    let body = vec![print(vec![call("inputi", vec![])])];
    let result = run_program(program(vec![], vec![func("main", &[], "void", body)]), &mut host);
    assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::Type));
}

#[test]
fn test_input_with_two_arguments_is_name_error() {
    let err = error_of(
        vec![print(vec![call("inputs", vec![string("a"), string("b")])])],
        vec![],
    );
    assert_eq!(err.kind(), ErrorKind::Name);
}

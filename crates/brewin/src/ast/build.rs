//! Terse constructors for AST nodes.
//!
//! Frontends and tests assemble programs with these instead of spelling out
//! every enum variant and `Box`.
//!
//! ```
//! use brewin::ast::build::*;
//!
//! let main = func("main", &[], "void", vec![
//!     var_def("x"),
//!     assign("x", add(int(1), int(2))),
//!     print(vec![var("x")]),
//! ]);
//! assert_eq!(main.body.len(), 3);
//! ```

use std::rc::Rc;

use super::{
    Assign, BinaryOp, Call, Catch, Expr, FunctionDef, Program, Stmt, StructDef, TypedName,
    UnaryOp,
};

// ═══════════════════════════════════════════════════════════════════════
// Declarations
// ═══════════════════════════════════════════════════════════════════════

/// Build a program from its structs and functions.
pub fn program(structs: Vec<StructDef>, functions: Vec<FunctionDef>) -> Program {
    Program { structs, functions }
}

/// Build a function declaration; `params` are `(name, type)` pairs.
pub fn func(
    name: &str,
    params: &[(&str, &str)],
    return_type: &str,
    body: Vec<Stmt>,
) -> FunctionDef {
    FunctionDef {
        name: name.to_string(),
        params: typed_names(params),
        return_type: return_type.to_string(),
        body,
    }
}

/// Build a struct declaration; `fields` are `(name, type)` pairs.
pub fn structure(name: &str, fields: &[(&str, &str)]) -> StructDef {
    StructDef {
        name: name.to_string(),
        fields: typed_names(fields),
    }
}

fn typed_names(pairs: &[(&str, &str)]) -> Vec<TypedName> {
    pairs
        .iter()
        .map(|(name, var_type)| TypedName {
            name: (*name).to_string(),
            var_type: (*var_type).to_string(),
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Statements
// ═══════════════════════════════════════════════════════════════════════

/// `var name;`
pub fn var_def(name: &str) -> Stmt {
    Stmt::VarDef {
        name: name.to_string(),
        var_type: None,
    }
}

/// `var name: var_type;`
pub fn typed_var_def(name: &str, var_type: &str) -> Stmt {
    Stmt::VarDef {
        name: name.to_string(),
        var_type: Some(var_type.to_string()),
    }
}

/// The assignment node shared by `=` statements and `for` headers.
pub fn assignment(name: &str, expr: Expr) -> Assign {
    Assign {
        name: name.to_string(),
        expr: Rc::new(expr),
    }
}

/// `name = expr;`
pub fn assign(name: &str, expr: Expr) -> Stmt {
    Stmt::Assign(assignment(name, expr))
}

/// `name(args);` as a statement
pub fn call_stmt(name: &str, args: Vec<Expr>) -> Stmt {
    Stmt::Call(Call {
        name: name.to_string(),
        args,
    })
}

/// `print(args);`
pub fn print(args: Vec<Expr>) -> Stmt {
    call_stmt("print", args)
}

/// `if (condition) { then_body }`
pub fn if_then(condition: Expr, then_body: Vec<Stmt>) -> Stmt {
    Stmt::If {
        condition,
        then_body,
        else_body: None,
    }
}

/// `if (condition) { then_body } else { else_body }`
pub fn if_else(condition: Expr, then_body: Vec<Stmt>, else_body: Vec<Stmt>) -> Stmt {
    Stmt::If {
        condition,
        then_body,
        else_body: Some(else_body),
    }
}

/// `for (init; condition; update) { body }`
pub fn for_loop(init: Assign, condition: Expr, update: Assign, body: Vec<Stmt>) -> Stmt {
    Stmt::For {
        init,
        condition,
        update,
        body,
    }
}

/// `return expr;`
pub fn ret(expr: Expr) -> Stmt {
    Stmt::Return(Some(expr))
}

/// `return;`
pub fn ret_void() -> Stmt {
    Stmt::Return(None)
}

/// `try { body } catch ...`; `catches` are `(tag, handler)` pairs.
pub fn try_catch(body: Vec<Stmt>, catches: Vec<(&str, Vec<Stmt>)>) -> Stmt {
    Stmt::Try {
        body,
        catches: catches
            .into_iter()
            .map(|(tag, body)| Catch {
                tag: tag.to_string(),
                body,
            })
            .collect(),
    }
}

/// `raise expr;`
pub fn raise(expr: Expr) -> Stmt {
    Stmt::Raise(expr)
}

// ═══════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════

/// Integer literal
pub fn int(value: i64) -> Expr {
    Expr::Int(value)
}

/// String literal
pub fn string(value: &str) -> Expr {
    Expr::Str(value.to_string())
}

/// Boolean literal
pub fn boolean(value: bool) -> Expr {
    Expr::Bool(value)
}

/// `nil`
pub fn nil() -> Expr {
    Expr::Nil
}

/// Variable or dotted field read
pub fn var(name: &str) -> Expr {
    Expr::Var(name.to_string())
}

/// `new T`
pub fn new(type_name: &str) -> Expr {
    Expr::New(type_name.to_string())
}

/// Call expression
pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Call(Call {
        name: name.to_string(),
        args,
    })
}

/// Any binary operation
pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

/// `lhs + rhs`
pub fn add(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinaryOp::Add, lhs, rhs)
}

/// `lhs - rhs`
pub fn sub(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinaryOp::Sub, lhs, rhs)
}

/// `lhs == rhs`
pub fn eq(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinaryOp::Eq, lhs, rhs)
}

/// `lhs < rhs`
pub fn lt(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinaryOp::Lt, lhs, rhs)
}

/// `neg operand`
pub fn neg(operand: Expr) -> Expr {
    Expr::Unary {
        op: UnaryOp::Neg,
        operand: Box::new(operand),
    }
}

/// `!operand`
pub fn not(operand: Expr) -> Expr {
    Expr::Unary {
        op: UnaryOp::Not,
        operand: Box::new(operand),
    }
}

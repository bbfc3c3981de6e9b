//! Brewin abstract syntax tree
//!
//! The evaluator never parses source text. Programs arrive from a
//! [`Frontend`](crate::frontend::Frontend) as these immutable nodes, either
//! built directly (see [`build`]) or deserialized from their JSON form.
//!
//! Assignment right-hand sides are held behind `Rc` so a thunk can keep a
//! handle to its expression without copying the tree.

pub mod build;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Name of a declared type: `int`, `bool`, `string`, `void` or a struct name.
pub type TypeName = String;

/// A parsed program as produced by the AST provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    /// Struct declarations, in source order
    #[serde(default)]
    pub structs: Vec<StructDef>,

    /// Function declarations, in source order
    #[serde(default)]
    pub functions: Vec<FunctionDef>,
}

/// A `struct Name { field: type; ... }` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDef {
    /// Struct type name
    pub name: String,

    /// Fields in declaration order
    pub fields: Vec<TypedName>,
}

/// A name paired with its declared type (parameters and struct fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedName {
    /// Parameter or field name
    pub name: String,

    /// Declared type
    pub var_type: TypeName,
}

/// A `func name(params) : return_type { body }` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Function name
    pub name: String,

    /// Parameters in declaration order
    #[serde(default)]
    pub params: Vec<TypedName>,

    /// Declared return type, `void` when nothing is returned
    #[serde(default = "void_type")]
    pub return_type: TypeName,

    /// Function body
    #[serde(default)]
    pub body: Vec<Stmt>,
}

fn void_type() -> TypeName {
    "void".to_string()
}

/// Statement nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    /// `var name;` or `var name: type;`
    VarDef {
        /// Declared name
        name: String,
        /// Optional declared type; untyped variables start as `nil`
        #[serde(default)]
        var_type: Option<TypeName>,
    },

    /// `name = expr;` (lazy)
    Assign(Assign),

    /// A call evaluated for its side effects
    Call(Call),

    /// `if (condition) { ... } else { ... }`
    If {
        /// Must evaluate to a bool
        condition: Expr,
        /// Taken when the condition is true
        then_body: Vec<Stmt>,
        /// Taken when the condition is false
        #[serde(default)]
        else_body: Option<Vec<Stmt>>,
    },

    /// `for (init; condition; update) { ... }`
    For {
        /// Assignment run once before the loop
        init: Assign,
        /// Checked before every iteration
        condition: Expr,
        /// Assignment run after every completed iteration
        update: Assign,
        /// Loop body
        body: Vec<Stmt>,
    },

    /// `return;` or `return expr;`
    Return(Option<Expr>),

    /// `try { ... } catch "tag" { ... }`
    Try {
        /// Protected statements
        body: Vec<Stmt>,
        /// Handlers, searched in order
        #[serde(default)]
        catches: Vec<Catch>,
    },

    /// `raise expr;`
    Raise(Expr),
}

/// An assignment target and its (unevaluated) right-hand side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assign {
    /// Variable name, or a dotted field path such as `p.next.value`
    pub name: String,

    /// Right-hand side, captured by the thunk
    pub expr: Rc<Expr>,
}

/// A function call, used both as a statement and as an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Callee name
    pub name: String,

    /// Arguments, evaluated left to right
    #[serde(default)]
    pub args: Vec<Expr>,
}

/// One `catch` clause of a `try` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catch {
    /// Exception tag this handler matches
    pub tag: String,

    /// Handler body
    pub body: Vec<Stmt>,
}

/// Expression nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Integer literal
    Int(i64),

    /// String literal
    #[serde(rename = "string")]
    Str(String),

    /// `true` / `false`
    Bool(bool),

    /// `nil`
    Nil,

    /// Variable or dotted field read
    Var(String),

    /// `new T`
    New(TypeName),

    /// Function call
    Call(Call),

    /// Binary operation
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        lhs: Box<Expr>,
        /// Right operand
        rhs: Box<Expr>,
    },

    /// Unary operation
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
    },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `+`
    #[serde(rename = "+")]
    Add,
    /// `-`
    #[serde(rename = "-")]
    Sub,
    /// `*`
    #[serde(rename = "*")]
    Mul,
    /// `/`
    #[serde(rename = "/")]
    Div,
    /// `==`
    #[serde(rename = "==")]
    Eq,
    /// `!=`
    #[serde(rename = "!=")]
    Ne,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
    /// `&&`
    #[serde(rename = "&&")]
    And,
    /// `||`
    #[serde(rename = "||")]
    Or,
}

impl BinaryOp {
    /// The operator as written in source.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Arithmetic negation (`neg`)
    #[serde(rename = "neg")]
    Neg,
    /// Logical not (`!`)
    #[serde(rename = "!")]
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => f.write_str("neg"),
            UnaryOp::Not => f.write_str("!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_op_symbols() {
        assert_eq!(BinaryOp::Add.to_string(), "+");
        assert_eq!(BinaryOp::Le.to_string(), "<=");
        assert_eq!(BinaryOp::Or.to_string(), "||");
        assert_eq!(UnaryOp::Neg.to_string(), "neg");
    }

    #[test]
    fn test_function_defaults_to_void() {
        let func: FunctionDef = serde_json::from_str(r#"{ "name": "main" }"#).unwrap();
        assert_eq!(func.return_type, "void");
        assert!(func.params.is_empty());
        assert!(func.body.is_empty());
    }

    #[test]
    fn test_expr_json_shape() {
        let expr: Expr = serde_json::from_str(
            r#"{ "binary": { "op": "+", "lhs": { "int": 1 }, "rhs": { "var": "x" } } }"#,
        )
        .unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Add,
                lhs: Box::new(Expr::Int(1)),
                rhs: Box::new(Expr::Var("x".to_string())),
            }
        );

        let nil: Expr = serde_json::from_str(r#""nil""#).unwrap();
        assert_eq!(nil, Expr::Nil);
    }
}

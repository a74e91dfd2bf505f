//! AST definitions for supported expressions

use serde::{Deserialize, Serialize};

/// Supported expression AST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Variable or path: a, a.b, a[0].c, a["key"]
    Path(Vec<PathSegment>),

    /// Unary operation: -a, !b
    Unary { op: UnaryOp, expr: Box<Expr> },

    /// Literal: 42, 3.14, true, "hello"
    Literal(Literal),

    /// Parenthesized: (a)
    Paren(Box<Expr>),

    /// Array literal: [a, b]
    Array(Vec<Expr>),

    /// Tuple literal: (a, b), ()
    Tuple(Vec<Expr>),
}

/// Path segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Identifier: foo
    Ident(String),
    /// Index: [0]
    Index(usize),
    /// String key: ["name"]
    Key(String),
    /// Tuple index: .0
    TupleIndex(usize),
}

/// Unary operators
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UnaryOp {
    Neg, // -
    Not, // !
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i128),
    Float(f64),
    Bool(bool),
    Char(char),
    String(String),
}

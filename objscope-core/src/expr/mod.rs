//! Expression evaluation module
//!
//! Parses Rust-flavoured access expressions (`cfg.users[0].name`) and
//! evaluates them against a scope of named values.

pub mod ast;
pub mod error;
pub mod eval;
pub mod parser;

pub use ast::Expr;
pub use error::EvalError;
pub use eval::{Evaluator, Scope};
pub use parser::parse_expr;

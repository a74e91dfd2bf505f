//! Expression parser using syn
//!
//! Converts Rust expression strings to our AST.

use quote::ToTokens;
use syn::{
    Expr as SynExpr, ExprArray, ExprField, ExprIndex, ExprLit, ExprParen, ExprPath, ExprTuple,
    ExprUnary,
};

use super::ast::{Expr, Literal, PathSegment, UnaryOp};
use super::error::EvalError;

/// Parse an expression string into our AST
pub fn parse_expr(input: &str) -> Result<Expr, EvalError> {
    let syn_expr: SynExpr = syn::parse_str(input).map_err(EvalError::parse)?;

    convert_expr(&syn_expr)
}

/// Convert syn expression to our AST
fn convert_expr(expr: &SynExpr) -> Result<Expr, EvalError> {
    match expr {
        // Unary operations: -a, !b; `*a` reads through to `a`
        SynExpr::Unary(ExprUnary { op, expr, .. }) => match op {
            syn::UnOp::Neg(_) => Ok(Expr::Unary {
                op: UnaryOp::Neg,
                expr: Box::new(convert_expr(expr)?),
            }),
            syn::UnOp::Not(_) => Ok(Expr::Unary {
                op: UnaryOp::Not,
                expr: Box::new(convert_expr(expr)?),
            }),
            syn::UnOp::Deref(_) => convert_expr(expr),
            _ => Err(EvalError::unsupported("unknown unary operator")),
        },

        // Literals: 42, 3.14, true
        SynExpr::Lit(ExprLit { lit, .. }) => Ok(Expr::Literal(convert_literal(lit)?)),

        // Variables, field access and indexing all become paths
        SynExpr::Path(_) | SynExpr::Field(_) | SynExpr::Index(_) => {
            Ok(Expr::Path(extract_path_segments(expr)?))
        }

        // Parenthesized: (a)
        SynExpr::Paren(ExprParen { expr, .. }) => Ok(Expr::Paren(Box::new(convert_expr(expr)?))),

        // Invisible groups from macro expansion
        SynExpr::Group(group) => convert_expr(&group.expr),

        // Reference: &a is the same value for inspection purposes
        SynExpr::Reference(r) => convert_expr(&r.expr),

        // Array literal: [a, b]
        SynExpr::Array(ExprArray { elems, .. }) => Ok(Expr::Array(
            elems.iter().map(convert_expr).collect::<Result<_, _>>()?,
        )),

        // Tuple literal: (a, b), ()
        SynExpr::Tuple(ExprTuple { elems, .. }) => Ok(Expr::Tuple(
            elems.iter().map(convert_expr).collect::<Result<_, _>>()?,
        )),

        // Arithmetic and comparisons - not supported
        SynExpr::Binary(_) => Err(EvalError::unsupported("binary operators")),

        // Casts - not supported
        SynExpr::Cast(_) => Err(EvalError::unsupported("casts")),

        // Function calls - not supported
        SynExpr::Call(_) => Err(EvalError::unsupported("function calls")),

        // Method calls - not supported
        SynExpr::MethodCall(_) => Err(EvalError::unsupported("method calls")),

        // Closures - not supported
        SynExpr::Closure(_) => Err(EvalError::unsupported("closures")),

        // Block expressions - not supported
        SynExpr::Block(_) => Err(EvalError::unsupported("block expressions")),

        // Other unsupported expressions
        other => Err(EvalError::unsupported(format!(
            "`{}`",
            other.to_token_stream()
        ))),
    }
}

/// Extract path segments from nested field/index expressions
fn extract_path_segments(expr: &SynExpr) -> Result<Vec<PathSegment>, EvalError> {
    match expr {
        SynExpr::Path(ExprPath { path, qself, .. }) => {
            let ident = match (qself, path.get_ident()) {
                (None, Some(ident)) => ident,
                _ => return Err(EvalError::unsupported("qualified paths")),
            };
            Ok(vec![PathSegment::Ident(ident.to_string())])
        }
        SynExpr::Field(ExprField { base, member, .. }) => {
            let mut segments = extract_path_segments(base)?;
            match member {
                syn::Member::Named(ident) => {
                    segments.push(PathSegment::Ident(ident.to_string()));
                }
                syn::Member::Unnamed(index) => {
                    segments.push(PathSegment::TupleIndex(index.index as usize));
                }
            }
            Ok(segments)
        }
        SynExpr::Index(ExprIndex { expr, index, .. }) => {
            let mut segments = extract_path_segments(expr)?;
            // Index must be a literal integer or string
            match index.as_ref() {
                SynExpr::Lit(ExprLit {
                    lit: syn::Lit::Int(lit_int),
                    ..
                }) => {
                    let idx = lit_int.base10_parse::<usize>().map_err(EvalError::parse)?;
                    segments.push(PathSegment::Index(idx));
                }
                SynExpr::Lit(ExprLit {
                    lit: syn::Lit::Str(lit_str),
                    ..
                }) => {
                    segments.push(PathSegment::Key(lit_str.value()));
                }
                _ => return Err(EvalError::unsupported("dynamic index expressions")),
            }
            Ok(segments)
        }
        SynExpr::Paren(ExprParen { expr, .. }) => extract_path_segments(expr),
        SynExpr::Reference(r) => extract_path_segments(&r.expr),
        SynExpr::Unary(ExprUnary {
            op: syn::UnOp::Deref(_),
            expr,
            ..
        }) => extract_path_segments(expr),
        _ => Err(EvalError::unsupported("complex path expression")),
    }
}

/// Convert syn literal to our Literal
fn convert_literal(lit: &syn::Lit) -> Result<Literal, EvalError> {
    match lit {
        syn::Lit::Int(i) => Ok(Literal::Int(
            i.base10_parse::<i128>().map_err(EvalError::parse)?,
        )),
        syn::Lit::Float(f) => Ok(Literal::Float(
            f.base10_parse::<f64>().map_err(EvalError::parse)?,
        )),
        syn::Lit::Bool(b) => Ok(Literal::Bool(b.value)),
        syn::Lit::Char(c) => Ok(Literal::Char(c.value())),
        syn::Lit::Str(s) => Ok(Literal::String(s.value())),
        _ => Err(EvalError::unsupported("byte literals")),
    }
}

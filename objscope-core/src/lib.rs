//! objscope Core Library
//!
//! Lazily expanded object inspection trees:
//! - Dynamic value model with explicit introspection capabilities
//! - Attribute and container discovery
//! - HTML labels and tree rendering
//! - `%oi` / `%di` shell over an expression evaluator
//! - JSON-RPC protocol types for objscope-server

pub mod config;
pub mod expr;
pub mod object;
pub mod protocol;
pub mod render;
pub mod shell;
pub mod tree;

pub use config::{ConfigError, InspectorConfig};
pub use expr::{parse_expr, EvalError, Evaluator, Expr, Scope};
pub use object::{Object, TypeDef, Value};
pub use protocol::{Request, Response};
pub use shell::{Magic, Shell, ShellError};
pub use tree::{Command, InspectError, Inspector, InspectorKind, NodeId, TreeView};

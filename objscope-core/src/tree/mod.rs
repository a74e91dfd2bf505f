//! Lazily expanded inspection trees

pub mod discover;
mod inspector;
mod node;
mod view;

pub use discover::{Child, Discovery, COMPUTED_MARKER};
pub use inspector::{Command, Expansion, Inspector, InspectorKind};
pub use node::{LazyNode, NodeId, NodeState};
pub use view::{NodeView, TreeView};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InspectError {
    #[error("Unknown node {id}")]
    UnknownNode { id: NodeId },
}

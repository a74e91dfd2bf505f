//! Serializable snapshots of inspector trees

use serde::{Deserialize, Serialize};

use crate::render::TypeName;

use super::inspector::InspectorKind;
use super::node::{LazyNode, NodeId};

/// Whole-tree snapshot handed to a front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeView {
    pub kind: InspectorKind,
    pub roots: Vec<NodeId>,
    /// Every node, indexed by id
    pub nodes: Vec<NodeView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    pub type_name: TypeName,
    pub expanded: bool,
    pub opened: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
}

impl NodeView {
    pub(crate) fn new(id: NodeId, node: &LazyNode) -> Self {
        Self {
            id,
            label: node.label().to_string(),
            field_name: node.field_name().map(str::to_string),
            type_name: node.type_name().clone(),
            expanded: node.is_expanded(),
            opened: node.is_opened(),
            children: node.children().to_vec(),
        }
    }
}

impl TreeView {
    pub fn node(&self, id: NodeId) -> Option<&NodeView> {
        self.nodes.get(id.index())
    }
}

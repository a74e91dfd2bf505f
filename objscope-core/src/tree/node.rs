//! Lazy tree nodes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::InspectorConfig;
use crate::object::Value;
use crate::render::{render_label, TypeName};

use super::discover::Discovery;

/// Index of a node inside its inspector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Expansion state of a node
#[derive(Debug)]
pub enum NodeState {
    /// Children not discovered yet; the wrapped value is still held
    Unexpanded(Value),
    /// Children discovered; the value handle has been released
    Expanded(Vec<NodeId>),
}

/// A tree node wrapping one inspected value
///
/// Type names and label are computed when the node is created; children
/// are only discovered when the node is first expanded.
#[derive(Debug)]
pub struct LazyNode {
    field_name: Option<String>,
    type_name: TypeName,
    label: String,
    discovery: Discovery,
    parent: Option<NodeId>,
    state: NodeState,
    opened: bool,
}

impl LazyNode {
    pub fn new(
        value: Value,
        field_name: Option<String>,
        discovery: Discovery,
        parent: Option<NodeId>,
        config: &InspectorConfig,
    ) -> Self {
        let type_name = TypeName::of(&value.value_type());
        let label = render_label(&value, field_name.as_deref(), &type_name, config);
        Self {
            field_name,
            type_name,
            label,
            discovery,
            parent,
            state: NodeState::Unexpanded(value),
            opened: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    pub fn discovery(&self) -> Discovery {
        self.discovery
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn state(&self) -> &NodeState {
        &self.state
    }

    /// The wrapped value, until the node is expanded
    pub fn value(&self) -> Option<&Value> {
        match &self.state {
            NodeState::Unexpanded(value) => Some(value),
            NodeState::Expanded(_) => None,
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self.state, NodeState::Expanded(_))
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// Discovered children; empty before expansion
    pub fn children(&self) -> &[NodeId] {
        match &self.state {
            NodeState::Unexpanded(_) => &[],
            NodeState::Expanded(children) => children,
        }
    }

    /// Release the wrapped value, leaving an expanded node with no children yet
    pub(crate) fn take_value(&mut self) -> Option<Value> {
        match std::mem::replace(&mut self.state, NodeState::Expanded(Vec::new())) {
            NodeState::Unexpanded(value) => Some(value),
            expanded => {
                self.state = expanded;
                None
            }
        }
    }

    pub(crate) fn set_children(&mut self, children: Vec<NodeId>) {
        self.state = NodeState::Expanded(children);
        self.opened = true;
    }

    pub(crate) fn toggle(&mut self) -> bool {
        self.opened = !self.opened;
        self.opened
    }
}

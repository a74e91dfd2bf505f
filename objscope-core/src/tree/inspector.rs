//! Inspector roots
//!
//! An [`Inspector`] owns every node of one tree in an arena. Selecting a node
//! yields a [`Command`]; applying it either populates the node (first time)
//! or flips its open/closed state.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::InspectorConfig;
use crate::object::Value;

use super::discover::{discover, Discovery};
use super::node::{LazyNode, NodeId};
use super::view::{NodeView, TreeView};
use super::InspectError;

/// Which inspector a root is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectorKind {
    /// Attribute inspector
    #[default]
    Object,
    /// Container inspector
    Data,
}

impl InspectorKind {
    pub fn discovery(self) -> Discovery {
        match self {
            InspectorKind::Object => Discovery::Members,
            InspectorKind::Data => Discovery::Contents,
        }
    }

    /// CSS class of the tree container
    pub fn css_class(self) -> &'static str {
        match self {
            InspectorKind::Object => "inspector-object",
            InspectorKind::Data => "inspector-data",
        }
    }
}

/// What a selection asks the tree to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "node", rename_all = "snake_case")]
pub enum Command {
    Expand(NodeId),
    ToggleOpen(NodeId),
}

impl Command {
    pub fn node(&self) -> NodeId {
        match self {
            Command::Expand(id) | Command::ToggleOpen(id) => *id,
        }
    }
}

/// Outcome of applying a [`Command`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expansion {
    /// Children were discovered and attached
    Populated { children: usize },
    /// The node was already populated; its open state flipped
    Toggled { opened: bool },
}

/// Root of an interactive inspection tree
#[derive(Debug)]
pub struct Inspector {
    kind: InspectorKind,
    config: InspectorConfig,
    nodes: Vec<LazyNode>,
    roots: Vec<NodeId>,
    selected: Option<NodeId>,
}

impl Inspector {
    pub fn new(kind: InspectorKind, config: InspectorConfig) -> Self {
        Self {
            kind,
            config,
            nodes: Vec::new(),
            roots: Vec::new(),
            selected: None,
        }
    }

    /// Build a root from anonymous values followed by named ones
    pub fn with_values(
        kind: InspectorKind,
        config: InspectorConfig,
        values: impl IntoIterator<Item = Value>,
        named: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        let mut inspector = Self::new(kind, config);
        for value in values {
            inspector.add_value(value);
        }
        for (name, value) in named {
            inspector.add_named(name, value);
        }
        inspector
    }

    /// Attribute inspector over `values` and `named`
    pub fn objects(
        config: InspectorConfig,
        values: impl IntoIterator<Item = Value>,
        named: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Self::with_values(InspectorKind::Object, config, values, named)
    }

    /// Container inspector over `values` and `named`
    pub fn data(
        config: InspectorConfig,
        values: impl IntoIterator<Item = Value>,
        named: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Self::with_values(InspectorKind::Data, config, values, named)
    }

    pub fn add_value(&mut self, value: Value) -> NodeId {
        let id = self.insert(value, None, None);
        self.roots.push(id);
        id
    }

    pub fn add_named(&mut self, name: impl Into<String>, value: Value) -> NodeId {
        let id = self.insert(value, Some(name.into()), None);
        self.roots.push(id);
        id
    }

    fn insert(&mut self, value: Value, field_name: Option<String>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let node = LazyNode::new(value, field_name, self.kind.discovery(), parent, &self.config);
        self.nodes.push(node);
        id
    }

    pub fn kind(&self) -> InspectorKind {
        self.kind
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Top-level nodes in insertion order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&LazyNode> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut LazyNode, InspectError> {
        self.nodes
            .get_mut(id.index())
            .ok_or(InspectError::UnknownNode { id })
    }

    /// Number of nodes created so far, at every depth
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Populate a node on first call; later calls only flip its open state
    pub fn expand(&mut self, id: NodeId) -> Result<Expansion, InspectError> {
        let node = self.node_mut(id)?;
        let discovery = node.discovery();
        let Some(value) = node.take_value() else {
            let opened = node.toggle();
            return Ok(Expansion::Toggled { opened });
        };

        let discovered = discover(&value, discovery, &self.config);
        drop(value);

        let children: Vec<NodeId> = discovered
            .into_iter()
            .map(|child| self.insert(child.value, child.field_name, Some(id)))
            .collect();
        debug!("expanded node {} into {} children", id, children.len());

        let count = children.len();
        self.node_mut(id)?.set_children(children);
        Ok(Expansion::Populated { children: count })
    }

    /// Flip the open state of a node
    pub fn toggle(&mut self, id: NodeId) -> Result<bool, InspectError> {
        Ok(self.node_mut(id)?.toggle())
    }

    /// Select a node and decide what should happen to it
    pub fn select(&mut self, id: NodeId) -> Result<Command, InspectError> {
        let node = self.node(id).ok_or(InspectError::UnknownNode { id })?;
        let command = if node.is_expanded() {
            Command::ToggleOpen(id)
        } else {
            Command::Expand(id)
        };
        self.selected = Some(id);
        Ok(command)
    }

    pub fn apply(&mut self, command: Command) -> Result<Expansion, InspectError> {
        match command {
            Command::Expand(id) => self.expand(id),
            Command::ToggleOpen(id) => {
                let opened = self.toggle(id)?;
                Ok(Expansion::Toggled { opened })
            }
        }
    }

    /// Handle a selection-changed event
    ///
    /// Only the first newly selected node counts. The selection is cleared
    /// afterwards so that selecting the same node again is a new event.
    pub fn handle_selection(
        &mut self,
        new_selection: &[NodeId],
    ) -> Result<Option<(Command, Expansion)>, InspectError> {
        let Some(&id) = new_selection.first() else {
            return Ok(None);
        };
        let command = self.select(id)?;
        let result = self.apply(command);
        self.selected = None;
        Ok(Some((command, result?)))
    }

    /// Serializable snapshot of the whole tree
    pub fn view(&self) -> TreeView {
        TreeView {
            kind: self.kind,
            roots: self.roots.clone(),
            nodes: self
                .nodes
                .iter()
                .enumerate()
                .map(|(index, node)| NodeView::new(NodeId::new(index), node))
                .collect(),
        }
    }

    /// HTML rendering of the whole tree
    pub fn to_html(&self) -> String {
        crate::render::html::render_tree(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Object, TypeDef};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn no_names() -> Vec<(String, Value)> {
        Vec::new()
    }

    #[test]
    fn test_empty_root() {
        let inspector = Inspector::objects(InspectorConfig::default(), Vec::new(), no_names());
        assert!(inspector.is_empty());
        assert!(inspector.roots().is_empty());
        assert!(inspector.view().nodes.is_empty());
        assert!(inspector.to_html().contains("inspector-object"));
    }

    #[test]
    fn test_roots_anonymous_then_named() {
        let inspector = Inspector::data(
            InspectorConfig::default(),
            vec![Value::I32(1)],
            vec![("b".to_string(), Value::I32(2)), ("a".to_string(), Value::I32(3))],
        );
        let names: Vec<_> = inspector
            .roots()
            .iter()
            .map(|id| inspector.node(*id).unwrap().field_name())
            .collect();
        assert_eq!(names, vec![None, Some("b"), Some("a")]);
    }

    #[test]
    fn test_expand_is_one_shot() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let ty = Rc::new(TypeDef::new("Lazy").with_property("computed", move |_| {
            counter.set(counter.get() + 1);
            Value::I32(1)
        }));
        let obj = Value::from(Object::new(ty).with_field("stored", 2));

        let mut inspector = Inspector::objects(InspectorConfig::default(), vec![obj], no_names());
        let root = inspector.roots()[0];

        assert_eq!(inspector.expand(root).unwrap(), Expansion::Populated { children: 2 });
        assert_eq!(calls.get(), 1);
        assert_eq!(inspector.len(), 3);
        assert!(inspector.node(root).unwrap().value().is_none());

        assert_eq!(inspector.expand(root).unwrap(), Expansion::Toggled { opened: false });
        assert_eq!(inspector.expand(root).unwrap(), Expansion::Toggled { opened: true });
        assert_eq!(calls.get(), 1);
        assert_eq!(inspector.len(), 3);
        assert_eq!(inspector.node(root).unwrap().children().len(), 2);
    }

    #[test]
    fn test_children_inherit_discovery() {
        let nested = Value::list([Value::list([Value::I32(1), Value::I32(2)])]);
        let mut inspector = Inspector::data(InspectorConfig::default(), vec![nested], no_names());
        let root = inspector.roots()[0];
        inspector.expand(root).unwrap();

        let inner = inspector.node(root).unwrap().children()[0];
        assert_eq!(inspector.node(inner).unwrap().parent(), Some(root));
        assert_eq!(inspector.node(inner).unwrap().discovery(), Discovery::Contents);
        assert_eq!(inspector.expand(inner).unwrap(), Expansion::Populated { children: 2 });
    }

    #[test]
    fn test_expand_with_no_children() {
        let mut inspector =
            Inspector::objects(InspectorConfig::default(), vec![Value::Bool(true)], no_names());
        let root = inspector.roots()[0];
        assert_eq!(inspector.expand(root).unwrap(), Expansion::Populated { children: 0 });
        assert!(inspector.node(root).unwrap().is_expanded());
    }

    #[test]
    fn test_selection_dispatch_and_clear() {
        let mut inspector = Inspector::data(
            InspectorConfig::default(),
            vec![Value::list([Value::I32(10)])],
            no_names(),
        );
        let root = inspector.roots()[0];

        assert_eq!(inspector.handle_selection(&[]).unwrap(), None);

        let (command, outcome) = inspector.handle_selection(&[root]).unwrap().unwrap();
        assert_eq!(command, Command::Expand(root));
        assert_eq!(outcome, Expansion::Populated { children: 1 });
        assert_eq!(inspector.selected(), None);

        // Same node again is a fresh event and only toggles
        let (command, outcome) = inspector.handle_selection(&[root]).unwrap().unwrap();
        assert_eq!(command, Command::ToggleOpen(root));
        assert_eq!(outcome, Expansion::Toggled { opened: false });
        assert_eq!(inspector.len(), 2);
    }

    #[test]
    fn test_select_unknown_node() {
        let mut inspector = Inspector::objects(InspectorConfig::default(), Vec::new(), no_names());
        let err = inspector.select(NodeId::from(4)).unwrap_err();
        assert!(matches!(err, InspectError::UnknownNode { .. }));
        assert!(inspector.handle_selection(&[NodeId::from(0)]).is_err());
    }

    #[test]
    fn test_command_serde() {
        let json = serde_json::to_string(&Command::ToggleOpen(NodeId::from(3))).unwrap();
        assert_eq!(json, r#"{"command":"toggle_open","node":3}"#);
    }
}

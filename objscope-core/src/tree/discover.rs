//! Child discovery
//!
//! Both variants are pure: they read the wrapped value and describe the
//! children a node should get, without touching the tree.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::InspectorConfig;
use crate::object::Value;

/// Prefix marking a child whose value came from a computed member
pub const COMPUTED_MARKER: &str = "→ ";

/// How a node finds its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discovery {
    /// Attributes, via member listing and static/live lookup
    Members,
    /// Container contents: mapping entries, sequence elements, set items
    Contents,
}

/// A child about to be attached to a node
#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub field_name: Option<String>,
    pub value: Value,
}

impl Child {
    fn named(name: impl Into<String>, value: Value) -> Self {
        Self {
            field_name: Some(name.into()),
            value,
        }
    }

    fn anonymous(value: Value) -> Self {
        Self {
            field_name: None,
            value,
        }
    }
}

pub fn discover(value: &Value, discovery: Discovery, config: &InspectorConfig) -> Vec<Child> {
    match discovery {
        Discovery::Members => discover_members(value, config),
        Discovery::Contents => discover_contents(value),
    }
}

/// Children for every visible member, stored values first choice
pub fn discover_members(value: &Value, config: &InspectorConfig) -> Vec<Child> {
    let mut children = Vec::new();
    for name in value.members() {
        if name.starts_with('_') && !config.include_underscore {
            continue;
        }
        if let Some(stored) = value.static_attr(&name) {
            children.push(Child::named(name, stored));
        } else if let Some(computed) = value.live_attr(&name) {
            children.push(Child::named(format!("{}{}", COMPUTED_MARKER, name), computed));
        } else {
            debug!("member '{}' of {} did not resolve", name, value.type_name());
        }
    }
    children
}

/// Children for mapping entries, sequence elements or iterated items
pub fn discover_contents(value: &Value) -> Vec<Child> {
    let caps = value.capabilities();

    if caps.keyed_access && caps.key_enumeration {
        // Walk entries in one pass rather than looking each key up again
        return value
            .entries()
            .unwrap_or_default()
            .iter()
            .map(|(key, item)| Child::named(key.repr(), item.clone()))
            .collect();
    }

    if caps.keyed_access && caps.length {
        let len = value.length().unwrap_or(0);
        return (0..len)
            .filter_map(|i| {
                let index = Value::Usize(i);
                let item = value.item(&index)?;
                Some(Child::named(index.repr(), item))
            })
            .collect();
    }

    if caps.iteration {
        return value
            .iterate()
            .unwrap_or_default()
            .into_iter()
            .map(Child::anonymous)
            .collect();
    }

    Vec::new()
}

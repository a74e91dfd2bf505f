//! Introspection capabilities
//!
//! Member listing and attribute lookup drive the attribute inspector;
//! the container capabilities drive the data inspector.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Value;

/// Container capabilities a value exposes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// `item(key)` is meaningful
    pub keyed_access: bool,
    /// `keys()` enumerates the valid keys
    pub key_enumeration: bool,
    /// `length()` is meaningful
    pub length: bool,
    /// `iterate()` yields the contained items
    pub iteration: bool,
}

impl Value {
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Value::Map(_) => Capabilities {
                keyed_access: true,
                key_enumeration: true,
                length: true,
                iteration: true,
            },
            Value::Vec(_) | Value::Tuple(_) | Value::String(_) => Capabilities {
                keyed_access: true,
                key_enumeration: false,
                length: true,
                iteration: true,
            },
            Value::Set(_) => Capabilities {
                keyed_access: false,
                key_enumeration: false,
                length: true,
                iteration: true,
            },
            _ => Capabilities::default(),
        }
    }

    /// Names of every attribute reachable on this value
    ///
    /// Tuple fields come out positionally, followed by `len`; everything
    /// else sorted.
    pub fn members(&self) -> Vec<String> {
        match self {
            Value::Object(obj) => obj
                .fields()
                .iter()
                .map(|(name, _)| name.as_str())
                .chain(obj.class().member_names())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect(),
            Value::Tuple(items) => (0..items.len())
                .map(|i| i.to_string())
                .chain(std::iter::once("len".to_string()))
                .collect(),
            Value::Map(_) => ["is_empty", "keys", "len", "values"]
                .map(str::to_string)
                .to_vec(),
            Value::String(_) | Value::Vec(_) | Value::Set(_) => {
                vec!["is_empty".to_string(), "len".to_string()]
            }
            _ => Vec::new(),
        }
    }

    /// Stored attribute lookup that never runs computed members
    pub fn static_attr(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(obj) => obj
                .field(name)
                .or_else(|| obj.class().attribute(name))
                .cloned(),
            Value::Tuple(items) => name.parse::<usize>().ok().and_then(|i| items.get(i).cloned()),
            _ => None,
        }
    }

    /// Attribute lookup through normal access, computed members included
    pub fn live_attr(&self, name: &str) -> Option<Value> {
        if let Value::Object(obj) = self {
            if let Some(property) = obj.class().property(name) {
                return Some(property.get(obj));
            }
        }
        self.static_attr(name).or_else(|| self.computed_member(name))
    }

    fn computed_member(&self, name: &str) -> Option<Value> {
        let len = match self {
            // Counted in chars, matching `length()`
            Value::String(s) => s.chars().count(),
            Value::Vec(items) | Value::Set(items) => items.len(),
            Value::Tuple(items) => {
                return (name == "len").then(|| Value::Usize(items.len()));
            }
            Value::Map(entries) => {
                match name {
                    "keys" => return Some(Value::list(entries.iter().map(|(k, _)| k.clone()))),
                    "values" => return Some(Value::list(entries.iter().map(|(_, v)| v.clone()))),
                    _ => {}
                }
                entries.len()
            }
            _ => return None,
        };
        match name {
            "len" => Some(Value::Usize(len)),
            "is_empty" => Some(Value::Bool(len == 0)),
            _ => None,
        }
    }

    /// Entries of a mapping, in insertion order
    pub fn entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(&entries[..]),
            _ => None,
        }
    }

    /// Keys of a mapping, in insertion order
    pub fn keys(&self) -> Option<Vec<Value>> {
        match self {
            Value::Map(entries) => Some(entries.iter().map(|(k, _)| k.clone()).collect()),
            _ => None,
        }
    }

    /// Keyed access: map lookup, or positional index into a sequence
    pub fn item(&self, key: &Value) -> Option<Value> {
        match self {
            Value::Map(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone()),
            Value::Vec(items) | Value::Tuple(items) => {
                let index = usize::try_from(key.to_i128()?).ok()?;
                items.get(index).cloned()
            }
            Value::String(s) => {
                let index = usize::try_from(key.to_i128()?).ok()?;
                s.chars().nth(index).map(Value::Char)
            }
            _ => None,
        }
    }

    /// Number of contained items
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Map(entries) => Some(entries.len()),
            Value::Vec(items) | Value::Tuple(items) | Value::Set(items) => Some(items.len()),
            Value::String(s) => Some(s.chars().count()),
            _ => None,
        }
    }

    /// Contained items in iteration order; map iteration yields keys
    pub fn iterate(&self) -> Option<Vec<Value>> {
        match self {
            Value::Map(_) => self.keys(),
            Value::Vec(items) | Value::Tuple(items) | Value::Set(items) => Some(items.to_vec()),
            Value::String(s) => Some(s.chars().map(Value::Char).collect()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Object, TypeDef};
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn account() -> Value {
        let base = Rc::new(TypeDef::new("Entity").with_attribute("_registry", "accounts"));
        let ty = Rc::new(
            TypeDef::new("Account")
                .with_base(base)
                .with_attribute("CURRENCY", "EUR")
                .with_property("balance", |acc| {
                    let cents = acc.field("cents").and_then(Value::to_i128).unwrap_or(0);
                    Value::F64(cents as f64 / 100.0)
                }),
        );
        Value::from(Object::new(ty).with_field("owner", "ada").with_field("cents", 1250i64))
    }

    #[test]
    fn test_object_members_sorted_with_inherited() {
        assert_eq!(
            account().members(),
            vec!["CURRENCY", "_registry", "balance", "cents", "owner"]
        );
    }

    #[test]
    fn test_static_lookup_skips_properties() {
        let acc = account();
        assert_eq!(acc.static_attr("owner"), Some(Value::from("ada")));
        assert_eq!(acc.static_attr("CURRENCY"), Some(Value::from("EUR")));
        assert_eq!(acc.static_attr("balance"), None);
        assert_eq!(acc.live_attr("balance"), Some(Value::F64(12.5)));
        assert_eq!(acc.live_attr("owner"), Some(Value::from("ada")));
        assert_eq!(acc.live_attr("nope"), None);
    }

    #[test]
    fn test_builtin_computed_members() {
        let v = Value::list([Value::I32(1), Value::I32(2)]);
        assert_eq!(v.members(), vec!["is_empty", "len"]);
        assert_eq!(v.static_attr("len"), None);
        assert_eq!(v.live_attr("len"), Some(Value::Usize(2)));
        assert_eq!(v.live_attr("is_empty"), Some(Value::Bool(false)));

        let m = Value::map([(Value::from("a"), Value::I32(1))]);
        assert_eq!(m.live_attr("keys"), Some(Value::list([Value::from("a")])));
        assert_eq!(m.live_attr("values"), Some(Value::list([Value::I32(1)])));
    }

    #[test]
    fn test_tuple_fields_are_static() {
        let t = Value::tuple([Value::I32(7), Value::from("x")]);
        assert_eq!(t.members(), vec!["0", "1", "len"]);
        assert_eq!(t.static_attr("1"), Some(Value::from("x")));
        assert_eq!(t.static_attr("2"), None);
        assert_eq!(t.static_attr("len"), None);
        assert_eq!(t.live_attr("len"), Some(Value::Usize(2)));
    }

    #[test]
    fn test_wide_tuple_members_stay_positional() {
        let t = Value::tuple((0..11).map(Value::I32));
        let members = t.members();
        assert_eq!(members[2], "2");
        assert_eq!(members[10], "10");
        assert_eq!(members.last().map(String::as_str), Some("len"));
    }

    #[test]
    fn test_string_len_counts_chars() {
        let s = Value::from("héllo");
        assert_eq!(s.live_attr("len"), Some(Value::Usize(5)));
        assert_eq!(s.length(), Some(5));
    }

    #[test]
    fn test_capabilities() {
        let map = Value::map(Vec::new());
        let caps = map.capabilities();
        assert!(caps.keyed_access && caps.key_enumeration && caps.length);

        let seq = Value::list(Vec::new()).capabilities();
        assert!(seq.keyed_access && seq.length && !seq.key_enumeration);

        let set = Value::set(Vec::new()).capabilities();
        assert!(!set.keyed_access && set.iteration);

        assert_eq!(Value::I32(1).capabilities(), Capabilities::default());
    }

    #[test]
    fn test_item_access() {
        let seq = Value::list([Value::I32(10), Value::I32(20)]);
        assert_eq!(seq.item(&Value::Usize(1)), Some(Value::I32(20)));
        assert_eq!(seq.item(&Value::I32(5)), None);
        assert_eq!(seq.item(&Value::I32(-1)), None);

        let s = Value::from("héllo");
        assert_eq!(s.item(&Value::Usize(1)), Some(Value::Char('é')));
        assert_eq!(s.length(), Some(5));
    }
}

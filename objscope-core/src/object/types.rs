//! Runtime type descriptions for inspected values
//!
//! Built-in types are a closed set ([`BuiltinType`]); user-defined types are
//! described by a [`TypeDef`] shared between all of its instances.

use std::fmt;
use std::rc::Rc;

use super::Value;

/// Module name reported by every built-in type
pub const BUILTIN_MODULE: &str = "builtins";

/// Types the object model knows natively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Bool,
    Char,
    String,
    Unit,
    Vec,
    Tuple,
    Map,
    Set,
}

impl BuiltinType {
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinType::I8 => "i8",
            BuiltinType::I16 => "i16",
            BuiltinType::I32 => "i32",
            BuiltinType::I64 => "i64",
            BuiltinType::I128 => "i128",
            BuiltinType::Isize => "isize",
            BuiltinType::U8 => "u8",
            BuiltinType::U16 => "u16",
            BuiltinType::U32 => "u32",
            BuiltinType::U64 => "u64",
            BuiltinType::U128 => "u128",
            BuiltinType::Usize => "usize",
            BuiltinType::F32 => "f32",
            BuiltinType::F64 => "f64",
            BuiltinType::Bool => "bool",
            BuiltinType::Char => "char",
            BuiltinType::String => "String",
            BuiltinType::Unit => "()",
            BuiltinType::Vec => "Vec",
            BuiltinType::Tuple => "tuple",
            BuiltinType::Map => "Map",
            BuiltinType::Set => "Set",
        }
    }

    pub fn doc(&self) -> &'static str {
        match self {
            BuiltinType::I8 => "The 8-bit signed integer type.",
            BuiltinType::I16 => "The 16-bit signed integer type.",
            BuiltinType::I32 => "The 32-bit signed integer type.",
            BuiltinType::I64 => "The 64-bit signed integer type.",
            BuiltinType::I128 => "The 128-bit signed integer type.",
            BuiltinType::Isize => "The pointer-sized signed integer type.",
            BuiltinType::U8 => "The 8-bit unsigned integer type.",
            BuiltinType::U16 => "The 16-bit unsigned integer type.",
            BuiltinType::U32 => "The 32-bit unsigned integer type.",
            BuiltinType::U64 => "The 64-bit unsigned integer type.",
            BuiltinType::U128 => "The 128-bit unsigned integer type.",
            BuiltinType::Usize => "The pointer-sized unsigned integer type.",
            BuiltinType::F32 => "A 32-bit floating-point type (IEEE 754 binary32).",
            BuiltinType::F64 => "A 64-bit floating-point type (IEEE 754 binary64).",
            BuiltinType::Bool => "The boolean type.\n\nEither `true` or `false`.",
            BuiltinType::Char => "A character type.\n\nA single Unicode scalar value.",
            BuiltinType::String => "A UTF-8 encoded string.",
            BuiltinType::Unit => "The `()` type, also called \"unit\".\n\nIt has exactly one value, `()`.",
            BuiltinType::Vec => {
                "A growable, ordered sequence of values.\n\nElements are addressed by index, starting at 0."
            }
            BuiltinType::Tuple => {
                "A finite heterogeneous sequence.\n\nElements are addressed positionally as `.0`, `.1`, ..."
            }
            BuiltinType::Map => {
                "An insertion-ordered map from keys to values.\n\nEach key appears at most once."
            }
            BuiltinType::Set => "An insertion-ordered collection of distinct values.",
        }
    }
}

/// Getter backing a computed property
pub type PropertyGetter = Rc<dyn Fn(&Object) -> Value>;

/// Custom representation of a user-defined type's instances
pub type ReprFn = Rc<dyn Fn(&Object) -> String>;

/// A computed attribute: only reachable through live lookup
#[derive(Clone)]
pub struct Property {
    name: String,
    getter: PropertyGetter,
}

impl Property {
    pub fn new(name: impl Into<String>, getter: impl Fn(&Object) -> Value + 'static) -> Self {
        Self {
            name: name.into(),
            getter: Rc::new(getter),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the getter against an instance
    pub fn get(&self, object: &Object) -> Value {
        (self.getter)(object)
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A user-defined type
///
/// Built with the `with_*` methods and then shared through `Rc`:
///
/// ```
/// use std::rc::Rc;
/// use objscope_core::object::{Object, TypeDef, Value};
///
/// let point = Rc::new(
///     TypeDef::new("Point")
///         .with_module("geometry")
///         .with_doc("A point in the plane.")
///         .with_property("norm", |p| {
///             let x = p.field("x").and_then(Value::to_f64).unwrap_or(0.0);
///             let y = p.field("y").and_then(Value::to_f64).unwrap_or(0.0);
///             Value::F64((x * x + y * y).sqrt())
///         }),
/// );
/// let origin = Object::new(point).with_field("x", 0.0).with_field("y", 0.0);
/// assert_eq!(Value::from(origin).to_string(), "Point { x: 0.0, y: 0.0 }");
/// ```
#[derive(Clone, Default)]
pub struct TypeDef {
    name: String,
    module: Option<String>,
    doc: Option<String>,
    base: Option<Rc<TypeDef>>,
    attributes: Vec<(String, Value)>,
    properties: Vec<Property>,
    repr: Option<ReprFn>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Inherit attributes, properties and documentation from `base`
    pub fn with_base(mut self, base: Rc<TypeDef>) -> Self {
        self.base = Some(base);
        self
    }

    /// Add a class-level stored attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_property(
        mut self,
        name: impl Into<String>,
        getter: impl Fn(&Object) -> Value + 'static,
    ) -> Self {
        self.properties.push(Property::new(name, getter));
        self
    }

    pub fn with_repr(mut self, repr: impl Fn(&Object) -> String + 'static) -> Self {
        self.repr = Some(Rc::new(repr));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn base(&self) -> Option<&Rc<TypeDef>> {
        self.base.as_ref()
    }

    pub fn own_doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// This type followed by its bases, nearest first
    pub fn lineage(&self) -> impl Iterator<Item = &TypeDef> {
        std::iter::successors(Some(self), |ty| ty.base.as_deref())
    }

    /// Documentation of the nearest type in the lineage that has any, cleaned
    pub fn resolved_doc(&self) -> Option<String> {
        self.lineage()
            .find_map(|ty| ty.doc.as_deref())
            .map(clean_doc)
    }

    /// Class attribute lookup along the lineage
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.lineage().find_map(|ty| {
            ty.attributes
                .iter()
                .find(|(attr, _)| attr == name)
                .map(|(_, value)| value)
        })
    }

    /// Property lookup along the lineage
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.lineage()
            .find_map(|ty| ty.properties.iter().find(|p| p.name == name))
    }

    /// Every class attribute and property name in the lineage, unsorted
    pub(crate) fn member_names(&self) -> impl Iterator<Item = &str> {
        self.lineage().flat_map(|ty| {
            ty.attributes
                .iter()
                .map(|(name, _)| name.as_str())
                .chain(ty.properties.iter().map(Property::name))
        })
    }

    pub(crate) fn custom_repr(&self) -> Option<&ReprFn> {
        self.lineage().find_map(|ty| ty.repr.as_ref())
    }
}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDef")
            .field("name", &self.name)
            .field("module", &self.module)
            .field("base", &self.base.as_ref().map(|b| b.name()))
            .finish_non_exhaustive()
    }
}

/// An instance of a user-defined type
#[derive(Debug, Clone)]
pub struct Object {
    class: Rc<TypeDef>,
    fields: Vec<(String, Value)>,
}

impl Object {
    pub fn new(class: Rc<TypeDef>) -> Self {
        Self {
            class,
            fields: Vec::new(),
        }
    }

    /// Set an instance field, replacing an existing one of the same name
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    pub fn class(&self) -> &Rc<TypeDef> {
        &self.class
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }
}

/// The runtime type of a [`Value`]
#[derive(Debug, Clone, Copy)]
pub enum ValueType<'a> {
    Builtin(BuiltinType),
    Defined(&'a TypeDef),
}

impl ValueType<'_> {
    pub fn name(&self) -> &str {
        match self {
            ValueType::Builtin(ty) => ty.name(),
            ValueType::Defined(ty) => ty.name(),
        }
    }

    pub fn module(&self) -> Option<&str> {
        match self {
            ValueType::Builtin(_) => Some(BUILTIN_MODULE),
            ValueType::Defined(ty) => ty.module(),
        }
    }

    /// Resolved, cleaned documentation
    pub fn doc(&self) -> Option<String> {
        match self {
            ValueType::Builtin(ty) => Some(ty.doc().to_string()),
            ValueType::Defined(ty) => ty.resolved_doc(),
        }
    }
}

/// Normalize a doc string: expand tabs, strip the first line, remove the
/// common indentation of the remaining lines and drop blank lines at both
/// ends. Indentation is counted in chars.
pub fn clean_doc(doc: &str) -> String {
    let mut lines: Vec<String> = doc.lines().map(expand_tabs).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min();

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(margin) = margin {
        for line in lines.iter_mut().skip(1) {
            *line = match line.char_indices().nth(margin) {
                Some((at, _)) => line[at..].to_string(),
                None => String::new(),
            };
        }
    }

    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    let leading = lines
        .iter()
        .take_while(|line| line.trim().is_empty())
        .count();

    lines[leading..].join("\n")
}

/// Replace tabs with spaces up to the next multiple of 8 columns
fn expand_tabs(line: &str) -> String {
    const TAB_WIDTH: usize = 8;

    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_doc_dedents_and_trims() {
        let doc = "\n    Summary line.\n\n        Indented detail.\n    Back out.\n\n   ";
        assert_eq!(clean_doc(doc), "Summary line.\n\n    Indented detail.\nBack out.");
    }

    #[test]
    fn test_clean_doc_first_line_kept() {
        assert_eq!(clean_doc("First.\n    second\n    third"), "First.\nsecond\nthird");
    }

    #[test]
    fn test_clean_doc_wide_whitespace_indent() {
        assert_eq!(
            clean_doc("Title\n\u{3000}alpha\n  beta"),
            "Title\nalpha\n beta"
        );
    }

    #[test]
    fn test_clean_doc_expands_tabs() {
        assert_eq!(
            clean_doc("Title\n\tfirst\n        second\n\t  third"),
            "Title\nfirst\nsecond\n  third"
        );
    }

    #[test]
    fn test_doc_inherited_from_base() {
        let base = Rc::new(TypeDef::new("Shape").with_doc("  Any shape."));
        let circle = TypeDef::new("Circle").with_base(base);
        assert_eq!(circle.resolved_doc().as_deref(), Some("Any shape."));
        assert!(TypeDef::new("Bare").resolved_doc().is_none());
    }

    #[test]
    fn test_lookup_walks_lineage() {
        let base = Rc::new(
            TypeDef::new("Base")
                .with_attribute("KIND", "base")
                .with_property("answer", |_| Value::I32(42)),
        );
        let derived = TypeDef::new("Derived")
            .with_base(base)
            .with_attribute("KIND", "derived");

        assert_eq!(derived.attribute("KIND"), Some(&Value::from("derived")));
        assert!(derived.property("answer").is_some());
        assert!(derived.property("missing").is_none());
        assert_eq!(derived.lineage().count(), 2);
    }

    #[test]
    fn test_with_field_replaces() {
        let ty = Rc::new(TypeDef::new("Cell"));
        let obj = Object::new(ty).with_field("v", 1).with_field("v", 2);
        assert_eq!(obj.fields().len(), 1);
        assert_eq!(obj.field("v"), Some(&Value::I32(2)));
    }
}

//! Object model for inspected values
//!
//! A [`Value`] is what the shell binds to names and what inspector nodes wrap.
//! Composite values are reference counted and immutable, so handing a value to
//! a tree node shares the graph instead of copying it.

mod introspect;
mod json;
mod types;

pub use introspect::Capabilities;
pub use types::{
    clean_doc, BuiltinType, Object, Property, PropertyGetter, ReprFn, TypeDef, ValueType,
    BUILTIN_MODULE,
};

use std::fmt;
use std::rc::Rc;

/// Runtime value with strict Rust typing
#[derive(Debug, Clone)]
pub enum Value {
    // Signed integers
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),

    // Unsigned integers
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),

    // Floating point
    F32(f32),
    F64(f64),

    // Other primitives
    Bool(bool),
    Char(char),
    String(Rc<str>),
    Unit,

    // Shared composites
    Vec(Rc<[Value]>),
    Tuple(Rc<[Value]>),
    Map(Rc<[(Value, Value)]>),
    Set(Rc<[Value]>),
    Object(Rc<Object>),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Vec(items.into_iter().collect())
    }

    /// Build a tuple; the empty tuple is `()`
    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        let items: Vec<Value> = items.into_iter().collect();
        if items.is_empty() {
            Value::Unit
        } else {
            Value::Tuple(items.into())
        }
    }

    /// Build a map; a repeated key keeps its first position and its last value
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut map: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            match map.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => map.push((key, value)),
            }
        }
        Value::Map(map.into())
    }

    /// Build a set; duplicates are dropped, first occurrence wins
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut set: Vec<Value> = Vec::new();
        for item in items {
            if !set.contains(&item) {
                set.push(item);
            }
        }
        Value::Set(set.into())
    }

    pub fn object(object: Object) -> Self {
        Value::Object(Rc::new(object))
    }

    /// Runtime type of this value
    pub fn value_type(&self) -> ValueType<'_> {
        let builtin = match self {
            Value::I8(_) => BuiltinType::I8,
            Value::I16(_) => BuiltinType::I16,
            Value::I32(_) => BuiltinType::I32,
            Value::I64(_) => BuiltinType::I64,
            Value::I128(_) => BuiltinType::I128,
            Value::Isize(_) => BuiltinType::Isize,
            Value::U8(_) => BuiltinType::U8,
            Value::U16(_) => BuiltinType::U16,
            Value::U32(_) => BuiltinType::U32,
            Value::U64(_) => BuiltinType::U64,
            Value::U128(_) => BuiltinType::U128,
            Value::Usize(_) => BuiltinType::Usize,
            Value::F32(_) => BuiltinType::F32,
            Value::F64(_) => BuiltinType::F64,
            Value::Bool(_) => BuiltinType::Bool,
            Value::Char(_) => BuiltinType::Char,
            Value::String(_) => BuiltinType::String,
            Value::Unit => BuiltinType::Unit,
            Value::Vec(_) => BuiltinType::Vec,
            Value::Tuple(_) => BuiltinType::Tuple,
            Value::Map(_) => BuiltinType::Map,
            Value::Set(_) => BuiltinType::Set,
            Value::Object(obj) => return ValueType::Defined(obj.class()),
        };
        ValueType::Builtin(builtin)
    }

    /// Short name of this value's type
    pub fn type_name(&self) -> &str {
        match self.value_type() {
            ValueType::Builtin(ty) => ty.name(),
            ValueType::Defined(ty) => ty.name(),
        }
    }

    /// Check if this is an integer type
    pub fn is_integer(&self) -> bool {
        self.to_i128().is_some() || matches!(self, Value::U128(_))
    }

    /// Convert to i128 if integer
    pub fn to_i128(&self) -> Option<i128> {
        match self {
            Value::I8(v) => Some(*v as i128),
            Value::I16(v) => Some(*v as i128),
            Value::I32(v) => Some(*v as i128),
            Value::I64(v) => Some(*v as i128),
            Value::I128(v) => Some(*v),
            Value::Isize(v) => Some(*v as i128),
            Value::U8(v) => Some(*v as i128),
            Value::U16(v) => Some(*v as i128),
            Value::U32(v) => Some(*v as i128),
            Value::U64(v) => Some(*v as i128),
            Value::U128(v) => i128::try_from(*v).ok(),
            Value::Usize(v) => Some(*v as i128),
            _ => None,
        }
    }

    /// Convert to f64 if floating point
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::F32(v) => Some(*v as f64),
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Convert to bool
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Re-wrap an integer in this value's integer type, if it fits
    pub fn with_integer(&self, v: i128) -> Option<Value> {
        Some(match self {
            Value::I8(_) => Value::I8(i8::try_from(v).ok()?),
            Value::I16(_) => Value::I16(i16::try_from(v).ok()?),
            Value::I32(_) => Value::I32(i32::try_from(v).ok()?),
            Value::I64(_) => Value::I64(i64::try_from(v).ok()?),
            Value::I128(_) => Value::I128(v),
            Value::Isize(_) => Value::Isize(isize::try_from(v).ok()?),
            Value::U8(_) => Value::U8(u8::try_from(v).ok()?),
            Value::U16(_) => Value::U16(u16::try_from(v).ok()?),
            Value::U32(_) => Value::U32(u32::try_from(v).ok()?),
            Value::U64(_) => Value::U64(u64::try_from(v).ok()?),
            Value::U128(_) => Value::U128(u128::try_from(v).ok()?),
            Value::Usize(_) => Value::Usize(usize::try_from(v).ok()?),
            _ => return None,
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short human-readable summary of the value
    pub fn repr(&self) -> String {
        self.to_string()
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::I128(v) => write!(f, "{}", v),
            Value::Isize(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::U128(v) => write!(f, "{}", v),
            Value::Usize(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{:?}", v),
            Value::F64(v) => write!(f, "{:?}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{:?}", v),
            Value::String(v) => write!(f, "{:?}", v),
            Value::Unit => write!(f, "()"),
            Value::Vec(items) => {
                f.write_str("[")?;
                write_seq(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_seq(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Value::Set(items) => {
                f.write_str("{")?;
                write_seq(f, items)?;
                f.write_str("}")
            }
            Value::Object(obj) => {
                if let Some(repr) = obj.class().custom_repr() {
                    return f.write_str(&repr(obj));
                }
                f.write_str(obj.class().name())?;
                if obj.fields().is_empty() {
                    return Ok(());
                }
                f.write_str(" { ")?;
                for (i, (name, value)) in obj.fields().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::I128(a), Value::I128(b)) => a == b,
            (Value::Isize(a), Value::Isize(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::U128(a), Value::U128(b)) => a == b,
            (Value::Usize(a), Value::Usize(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Unit, Value::Unit) => true,
            (Value::Vec(a), Value::Vec(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            // Instances compare by identity
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128, usize => Usize,
    f32 => F32, f64 => F64, bool => Bool, char => Char,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Vec(items.into())
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_type_names() {
        assert_eq!(Value::I32(42).type_name(), "i32");
        assert_eq!(Value::Bool(true).type_name(), "bool");
        assert_eq!(Value::from("hello").type_name(), "String");
        assert_eq!(Value::list(Vec::new()).type_name(), "Vec");
        assert_eq!(Value::Unit.type_name(), "()");
    }

    #[test]
    fn test_value_repr() {
        assert_eq!(Value::I32(42).repr(), "42");
        assert_eq!(Value::F64(1.0).repr(), "1.0");
        assert_eq!(Value::Char('x').repr(), "'x'");
        assert_eq!(Value::from("say \"hi\"").repr(), r#""say \"hi\"""#);
        assert_eq!(
            Value::list([Value::I32(1), Value::from("a")]).repr(),
            r#"[1, "a"]"#
        );
        assert_eq!(Value::tuple([Value::Bool(true)]).repr(), "(true,)");
        assert_eq!(
            Value::map([(Value::from("k"), Value::I32(1))]).repr(),
            r#"{"k": 1}"#
        );
        assert_eq!(Value::set(Vec::new()).repr(), "{}");
    }

    #[test]
    fn test_object_repr() {
        let ty = Rc::new(TypeDef::new("Point"));
        let p = Object::new(ty).with_field("x", 1).with_field("y", 2);
        assert_eq!(Value::from(p).repr(), "Point { x: 1, y: 2 }");

        let tagged = Rc::new(TypeDef::new("Tag").with_repr(|_| "<tag>".to_string()));
        assert_eq!(Value::from(Object::new(tagged)).repr(), "<tag>");
    }

    #[test]
    fn test_map_keeps_first_position_last_value() {
        let map = Value::map([
            (Value::from("a"), Value::I32(1)),
            (Value::from("b"), Value::I32(2)),
            (Value::from("a"), Value::I32(3)),
        ]);
        assert_eq!(map.repr(), r#"{"a": 3, "b": 2}"#);
    }

    #[test]
    fn test_set_dedup_and_equality() {
        let a = Value::set([Value::I32(1), Value::I32(2), Value::I32(1)]);
        let b = Value::set([Value::I32(2), Value::I32(1)]);
        assert_eq!(a.repr(), "{1, 2}");
        assert_eq!(a, b);
    }

    #[test]
    fn test_with_integer_checks_range() {
        assert_eq!(Value::I8(0).with_integer(127), Some(Value::I8(127)));
        assert_eq!(Value::I8(0).with_integer(128), None);
        assert_eq!(Value::F64(0.0).with_integer(1), None);
    }

    #[test]
    fn test_objects_compare_by_identity() {
        let ty = Rc::new(TypeDef::new("Thing"));
        let a = Value::from(Object::new(ty.clone()));
        let b = Value::from(Object::new(ty));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}

//! Display names for runtime types

use serde::{Deserialize, Serialize};

use crate::object::{ValueType, BUILTIN_MODULE};

/// Short and module-qualified name of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeName {
    pub short: String,
    pub qualified: String,
}

impl TypeName {
    /// Built-in types and types without a module are not qualified
    pub fn of(ty: &ValueType<'_>) -> Self {
        let short = ty.name().to_string();
        let qualified = match ty.module() {
            Some(module) if module != BUILTIN_MODULE => format!("{}.{}", module, short),
            _ => short.clone(),
        };
        Self { short, qualified }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Object, TypeDef, Value};
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[test]
    fn test_builtin_types_unqualified() {
        for value in [
            Value::I32(1),
            Value::from("s"),
            Value::list(vec![Value::Unit]),
            Value::Unit,
        ] {
            let name = TypeName::of(&value.value_type());
            assert_eq!(name.qualified, name.short);
        }
    }

    #[test]
    fn test_module_qualified() {
        let ty = Rc::new(TypeDef::new("Widget").with_module("mymodule"));
        let value = Value::from(Object::new(ty));
        let name = TypeName::of(&value.value_type());
        assert_eq!(name.short, "Widget");
        assert_eq!(name.qualified, "mymodule.Widget");
    }

    #[test]
    fn test_no_module_or_builtin_module() {
        let bare = Value::from(Object::new(Rc::new(TypeDef::new("Loose"))));
        assert_eq!(TypeName::of(&bare.value_type()).qualified, "Loose");

        let shadow = Rc::new(TypeDef::new("Native").with_module(BUILTIN_MODULE));
        let native = Value::from(Object::new(shadow));
        assert_eq!(TypeName::of(&native.value_type()).qualified, "Native");
    }
}

//! Expression evaluator
//!
//! Evaluates expressions against a scope of named values.

use super::ast::{Expr, Literal, PathSegment, UnaryOp};
use super::error::EvalError;
use crate::object::Value;

/// Named variables in insertion order
#[derive(Debug, Clone, Default)]
pub struct Scope {
    entries: Vec<(String, Value)>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`; rebinding keeps its first position
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(existing, _)| existing == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Scope {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut scope = Scope::new();
        for (name, value) in iter {
            scope.set(name, value);
        }
        scope
    }
}

/// Expression evaluator
#[derive(Debug, Default)]
pub struct Evaluator {
    /// Variables available in scope
    variables: Scope,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variables(variables: Scope) -> Self {
        Self { variables }
    }

    /// Add or update a variable
    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.set(name, value);
    }

    pub fn variables(&self) -> &Scope {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut Scope {
        &mut self.variables
    }

    /// Evaluate an expression
    pub fn eval(&self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Path(segments) => self.eval_path(segments),
            Expr::Unary { op, expr } => {
                let v = self.eval(expr)?;
                self.apply_unary(*op, &v)
            }
            Expr::Literal(lit) => Ok(self.literal_to_value(lit)),
            Expr::Paren(inner) => self.eval(inner),
            Expr::Array(items) => Ok(Value::list(
                items
                    .iter()
                    .map(|item| self.eval(item))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Expr::Tuple(items) => Ok(Value::tuple(
                items
                    .iter()
                    .map(|item| self.eval(item))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
        }
    }

    /// Evaluate a path expression
    fn eval_path(&self, segments: &[PathSegment]) -> Result<Value, EvalError> {
        // First segment must be a variable name
        let Some((PathSegment::Ident(name), rest)) = segments.split_first() else {
            return Err(EvalError::Internal(
                "path must start with identifier".to_string(),
            ));
        };

        let mut value = self
            .variables
            .get(name)
            .ok_or_else(|| EvalError::unknown_var(name))?
            .clone();

        for segment in rest {
            value = Self::step(&value, segment)?;
        }

        Ok(value)
    }

    /// Follow one path segment from `value`
    fn step(value: &Value, segment: &PathSegment) -> Result<Value, EvalError> {
        match segment {
            PathSegment::Ident(field) => {
                value
                    .live_attr(field)
                    .ok_or_else(|| EvalError::FieldNotFound {
                        field: field.clone(),
                        type_name: value.type_name().to_string(),
                    })
            }
            PathSegment::TupleIndex(index) => {
                let field = index.to_string();
                value
                    .live_attr(&field)
                    .ok_or_else(|| EvalError::FieldNotFound {
                        field,
                        type_name: value.type_name().to_string(),
                    })
            }
            PathSegment::Index(index) => {
                let caps = value.capabilities();
                if !caps.keyed_access {
                    return Err(EvalError::type_mismatch("indexable value", value.type_name()));
                }
                if caps.key_enumeration {
                    // Integer keys match by value, whatever their width
                    let wanted = *index as i128;
                    return value
                        .keys()
                        .and_then(|keys| keys.into_iter().find(|k| k.to_i128() == Some(wanted)))
                        .and_then(|key| value.item(&key))
                        .ok_or_else(|| EvalError::KeyNotFound {
                            key: index.to_string(),
                            type_name: value.type_name().to_string(),
                        });
                }
                value
                    .item(&Value::Usize(*index))
                    .ok_or_else(|| EvalError::IndexOutOfBounds {
                        index: *index,
                        length: value.length().unwrap_or(0),
                    })
            }
            PathSegment::Key(key) => {
                if !value.capabilities().key_enumeration {
                    return Err(EvalError::type_mismatch("map", value.type_name()));
                }
                value
                    .item(&Value::string(key))
                    .ok_or_else(|| EvalError::KeyNotFound {
                        key: format!("{:?}", key),
                        type_name: value.type_name().to_string(),
                    })
            }
        }
    }

    /// Convert literal to Value
    fn literal_to_value(&self, lit: &Literal) -> Value {
        match lit {
            // Default integer type is i32
            Literal::Int(v) => {
                if let Ok(v) = i32::try_from(*v) {
                    Value::I32(v)
                } else if let Ok(v) = i64::try_from(*v) {
                    Value::I64(v)
                } else {
                    Value::I128(*v)
                }
            }
            // Default float type is f64
            Literal::Float(v) => Value::F64(*v),
            Literal::Bool(v) => Value::Bool(*v),
            Literal::Char(v) => Value::Char(*v),
            Literal::String(v) => Value::string(v),
        }
    }

    fn apply_unary(&self, op: UnaryOp, value: &Value) -> Result<Value, EvalError> {
        let invalid = || EvalError::InvalidOperation {
            op: op.as_str().to_string(),
            operand: value.type_name().to_string(),
        };
        let overflow = || EvalError::Internal("overflow".to_string());

        match op {
            UnaryOp::Neg => {
                if let Some(v) = value.to_i128() {
                    let negated = v.checked_neg().ok_or_else(overflow)?;
                    // Unsigned types have no negation
                    if !matches!(
                        value,
                        Value::I8(_)
                            | Value::I16(_)
                            | Value::I32(_)
                            | Value::I64(_)
                            | Value::I128(_)
                            | Value::Isize(_)
                    ) {
                        return Err(invalid());
                    }
                    value.with_integer(negated).ok_or_else(overflow)
                } else {
                    match value {
                        Value::F32(v) => Ok(Value::F32(-v)),
                        Value::F64(v) => Ok(Value::F64(-v)),
                        _ => Err(invalid()),
                    }
                }
            }
            UnaryOp::Not => {
                if let Some(v) = value.to_bool() {
                    return Ok(Value::Bool(!v));
                }
                // Bitwise not for integers, in the operand's own width
                match value {
                    Value::I8(v) => Ok(Value::I8(!v)),
                    Value::I16(v) => Ok(Value::I16(!v)),
                    Value::I32(v) => Ok(Value::I32(!v)),
                    Value::I64(v) => Ok(Value::I64(!v)),
                    Value::I128(v) => Ok(Value::I128(!v)),
                    Value::Isize(v) => Ok(Value::Isize(!v)),
                    Value::U8(v) => Ok(Value::U8(!v)),
                    Value::U16(v) => Ok(Value::U16(!v)),
                    Value::U32(v) => Ok(Value::U32(!v)),
                    Value::U64(v) => Ok(Value::U64(!v)),
                    Value::U128(v) => Ok(Value::U128(!v)),
                    Value::Usize(v) => Ok(Value::Usize(!v)),
                    _ => Err(invalid()),
                }
            }
        }
    }
}

use std::rc::Rc;

use ordered_float::OrderedFloat;
use strum_macros::Display;

use crate::deferred::Deferred;

/// Insertion ordered mapping, as produced by `group_by`, `tally` and `to_h`.
pub type Hash = indexmap::IndexMap<Value, Value, ahash::RandomState>;

/// A dynamically typed element.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absent value. Also the empty source.
    #[default]
    Nil,
    Boolean(bool),
    Integer(i64),
    Float(OrderedFloat<f64>),
    String(Rc<str>),
    /// A name, such as the operator handed to `inject`.
    Symbol(Rc<str>),
    Array(Rc<[Value]>),
    Hash(Rc<Hash>),
    /// An operation waiting for its callback.
    Deferred(Rc<Deferred>),
}

// a static assertion to ensure that Value never grows in size
#[cfg(target_arch = "x86_64")]
static_assertions::assert_eq_size!(Value, [u8; 24]);

/// The kind of a value, used by kind patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Kind {
    Nil,
    Boolean,
    Integer,
    Float,
    /// Either an integer or a float.
    Numeric,
    String,
    Symbol,
    Array,
    Hash,
    Enumerator,
}

impl Value {
    pub fn symbol(name: &str) -> Self {
        Value::Symbol(name.into())
    }

    /// Pack the positional values of a single visit into one value.
    ///
    /// No values become `Nil`, a single value is returned as is, and more
    /// than one value become an array.
    pub fn pack(values: &[Value]) -> Value {
        match values {
            [] => Value::Nil,
            [value] => value.clone(),
            values => Value::Array(values.into()),
        }
    }

    /// Only `Nil` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Boolean(false))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Whether this value exposes the traversal primitive with elements of
    /// its own. `flat_map` splices such values instead of appending them.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Hash(_) | Value::Deferred(_))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Boolean(_) => Kind::Boolean,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Symbol(_) => Kind::Symbol,
            Value::Array(_) => Kind::Array,
            Value::Hash(_) => Kind::Hash,
            Value::Deferred(_) => Kind::Enumerator,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Symbol(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(&**items),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&Hash> {
        match self {
            Value::Hash(hash) => Some(&**hash),
            _ => None,
        }
    }

    pub fn as_deferred(&self) -> Option<&Deferred> {
        match self {
            Value::Deferred(deferred) => Some(&**deferred),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i.into())
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Integer(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(OrderedFloat(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T, const N: usize> From<[T; N]> for Value
where
    T: Into<Value>,
{
    fn from(items: [T; N]) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

impl From<Hash> for Value {
    fn from(hash: Hash) -> Self {
        Value::Hash(Rc::new(hash))
    }
}

impl From<Deferred> for Value {
    fn from(deferred: Deferred) -> Self {
        Value::Deferred(Rc::new(deferred))
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(Value::from(0).is_truthy());
        assert!(Value::from("").is_truthy());
        assert!(Value::from(Vec::<Value>::new()).is_truthy());
    }

    #[test]
    fn test_pack() {
        assert_eq!(Value::pack(&[]), Value::Nil);
        assert_eq!(Value::pack(&[Value::from(1)]), Value::from(1));
        assert_eq!(
            Value::pack(&[Value::from(1), Value::from("a")]),
            Value::from([Value::from(1), Value::from("a")])
        );
    }

    #[test]
    fn test_nil_is_not_a_sequence() {
        assert!(!Value::Nil.is_sequence());
        assert!(Value::from([1]).is_sequence());
        assert!(!Value::from("abc").is_sequence());
    }
}

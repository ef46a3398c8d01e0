use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error;

use super::Value;

// Structural equality. This is what hash keys use, so `1` and `1.0` are
// different keys, just as they are different elements for `uniq`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (Value::Deferred(a), Value::Deferred(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Boolean(b) => b.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.hash(state),
            Value::String(s) | Value::Symbol(s) => s.hash(state),
            Value::Array(items) => items.hash(state),
            // map equality ignores order, so only the size can be hashed
            Value::Hash(hash) => hash.len().hash(state),
            Value::Deferred(deferred) => Rc::as_ptr(deferred).hash(state),
        }
    }
}

impl Value {
    /// Loose equality, as used by `include?`, `count` and `find_index`.
    ///
    /// Like structural equality, except that integers and floats compare by
    /// numeric value, also inside arrays.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                (*a as f64) == b.0
            }
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| a.loose_eq(b))
            }
            _ => self == other,
        }
    }

    /// Natural three-way comparison.
    ///
    /// Numbers compare with numbers, strings with strings, symbols with
    /// symbols and arrays lexicographically. Any other pair is only
    /// comparable when it is equal. `None` means the values are
    /// incomparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.0.partial_cmp(&b.0),
            (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(&b.0),
            (Value::Float(a), Value::Integer(b)) => a.0.partial_cmp(&(*b as f64)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Symbol(a), Value::Symbol(b)) => Some(a.cmp(b)),
            (Value::Array(a), Value::Array(b)) => {
                for (a, b) in a.iter().zip(b.iter()) {
                    let ordering = a.compare(b)?;
                    if !ordering.is_eq() {
                        return Some(ordering);
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            (a, b) if a == b => Some(Ordering::Equal),
            _ => None,
        }
    }

    /// Compare, failing when the values are incomparable.
    pub(crate) fn try_compare(&self, other: &Value) -> error::Result<Ordering> {
        self.compare(other).ok_or(error::Error::ArgumentError)
    }

    /// Interpret the result of a comparator callback by its sign.
    pub(crate) fn to_ordering(&self) -> error::Result<Ordering> {
        match self {
            Value::Integer(i) => Ok(i.cmp(&0)),
            Value::Float(f) => f.0.partial_cmp(&0.0).ok_or(error::Error::ArgumentError),
            _ => Err(error::Error::TypeError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_and_loose_equality() {
        assert_ne!(Value::from(1), Value::from(1.0));
        assert!(Value::from(1).loose_eq(&Value::from(1.0)));
        assert!(Value::from([1, 2]).loose_eq(&Value::from([1.0, 2.0])));
        assert!(!Value::from("1").loose_eq(&Value::from(1)));
    }

    #[test]
    fn test_compare_mixed_numbers() {
        assert_eq!(
            Value::from(2).compare(&Value::from(1.5)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_compare_arrays_lexicographically() {
        assert_eq!(
            Value::from([1, 2]).compare(&Value::from([1, 3])),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from([1, 2]).compare(&Value::from([1])),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_incomparable() {
        assert_eq!(Value::from(1).compare(&Value::from("a")), None);
        assert_eq!(
            Value::from(1).try_compare(&Value::Nil),
            Err(error::Error::ArgumentError)
        );
        assert_eq!(Value::Nil.compare(&Value::Nil), Some(Ordering::Equal));
    }

    #[test]
    fn test_comparator_sign() {
        assert_eq!(Value::from(-3).to_ordering(), Ok(Ordering::Less));
        assert_eq!(Value::Nil.to_ordering(), Err(error::Error::TypeError));
    }
}

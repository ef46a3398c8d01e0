use std::fmt;

use crate::value::Value;

use super::{Flow, Traverse, Visit};

/// A range of integers, possibly without an end.
///
/// A range without an end is an unbounded source: operations over it only
/// return when something stops the traversal, such as `first` or `take`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    start: i64,
    end: Option<i64>,
    exclusive: bool,
}

impl Range {
    /// The range `start..=end`.
    pub fn new(start: i64, end: i64) -> Self {
        Range {
            start,
            end: Some(end),
            exclusive: false,
        }
    }

    /// The range `start..end`.
    pub fn exclusive(start: i64, end: i64) -> Self {
        Range {
            start,
            end: Some(end),
            exclusive: true,
        }
    }

    /// The range `start..`, which never ends.
    pub fn unbounded(start: i64) -> Self {
        Range {
            start,
            end: None,
            exclusive: false,
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> Option<i64> {
        self.end
    }

    /// Whether a number lies within the range. Floats are compared by
    /// value, anything else is outside.
    pub fn contains(&self, value: &Value) -> bool {
        let x = match value {
            Value::Integer(i) => *i as f64,
            Value::Float(f) => f.0,
            _ => return false,
        };
        if x < self.start as f64 {
            return false;
        }
        match self.end {
            None => true,
            Some(end) if self.exclusive => x < end as f64,
            Some(end) => x <= end as f64,
        }
    }

    // the last element, if the range has an end
    fn last(&self) -> Option<i64> {
        self.end
            .map(|end| if self.exclusive { end.saturating_sub(1) } else { end })
    }
}

impl Traverse for Range {
    fn traverse(&self, visit: &mut Visit<'_>) -> Flow {
        let last = self.last();
        if self.exclusive && self.end == Some(self.start) {
            return Ok(());
        }
        let mut i = self.start;
        loop {
            if let Some(last) = last {
                if i > last {
                    return Ok(());
                }
            }
            visit(&[Value::Integer(i)])?;
            match i.checked_add(1) {
                Some(next) => i = next,
                None => return Ok(()),
            }
        }
    }
}

impl From<std::ops::Range<i64>> for Range {
    fn from(range: std::ops::Range<i64>) -> Self {
        Range::exclusive(range.start, range.end)
    }
}

impl From<std::ops::RangeInclusive<i64>> for Range {
    fn from(range: std::ops::RangeInclusive<i64>) -> Self {
        Range::new(*range.start(), *range.end())
    }
}

impl From<std::ops::RangeFrom<i64>> for Range {
    fn from(range: std::ops::RangeFrom<i64>) -> Self {
        Range::unbounded(range.start)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            None => write!(f, "{}..", self.start),
            Some(end) if self.exclusive => write!(f, "{}...{}", self.start, end),
            Some(end) => write!(f, "{}..{}", self.start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traverse::materialize;

    #[test]
    fn test_inclusive() {
        let items = materialize(&Range::new(1, 3)).unwrap();
        assert_eq!(items, vec![Value::from(1), Value::from(2), Value::from(3)]);
    }

    #[test]
    fn test_exclusive() {
        let items = materialize(&Range::from(1..3)).unwrap();
        assert_eq!(items, vec![Value::from(1), Value::from(2)]);
        assert!(materialize(&Range::from(1..1)).unwrap().is_empty());
    }

    #[test]
    fn test_reversed_is_empty() {
        assert!(materialize(&Range::new(3, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_contains() {
        let range = Range::from(1..5);
        assert!(range.contains(&Value::from(4.5)));
        assert!(!range.contains(&Value::from(5)));
        assert!(Range::unbounded(0).contains(&Value::from(1_000_000)));
        assert!(!range.contains(&Value::from("2")));
    }

    #[test]
    fn test_unbounded_stops_when_asked() {
        let mut seen = Vec::new();
        let flow = Range::from(10..).traverse(&mut |args| {
            seen.push(Value::pack(args));
            if seen.len() == 3 {
                Err(crate::traverse::Stop::Done)
            } else {
                Ok(())
            }
        });
        assert_eq!(flow, Err(crate::traverse::Stop::Done));
        assert_eq!(seen, vec![Value::from(10), Value::from(11), Value::from(12)]);
    }
}

/// The operations, grouped by what they do. Each is written against the
/// traversal primitive alone.
pub(crate) mod aggregate;
pub(crate) mod extreme;
pub(crate) mod filter;
pub(crate) mod quantifier;
pub(crate) mod search;
mod sorting;
pub(crate) mod transform;
pub(crate) mod window;

use std::cmp::Ordering;

use crate::traverse::Block;
use crate::traverse::Stop;
use crate::value::Value;

/// The most elements reserved up front for a caller-sized buffer. Sizes
/// are only bounded by what the caller asks for, not by the source.
pub(crate) const RESERVE_LIMIT: usize = 64;

/// Order two elements, through a comparator callback if given, by their
/// natural order otherwise.
pub(crate) fn compare_with(a: &Value, b: &Value, block: Option<&Block<'_>>) -> Result<Ordering, Stop> {
    match block {
        Some(block) => Ok(block.yield_two(a.clone(), b.clone())?.to_ordering()?),
        None => Ok(a.try_compare(b)?),
    }
}

/// The callback's result for a visit, or the visit itself without a
/// callback.
pub(crate) fn apply(block: Option<&Block<'_>>, args: &[Value]) -> Result<Value, Stop> {
    match block {
        Some(block) => block.call(args),
        None => Ok(Value::pack(args)),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::traverse::Flow;
    use crate::traverse::Traverse;
    use crate::traverse::Visit;
    use crate::value::Value;

    /// A source visiting 1, 2, 3, ... forever.
    pub(crate) struct Naturals;

    impl Traverse for Naturals {
        fn traverse(&self, visit: &mut Visit<'_>) -> Flow {
            let mut i = 1i64;
            loop {
                visit(&[Value::Integer(i)])?;
                i += 1;
            }
        }
    }

    pub(crate) fn ints(items: &[i64]) -> Vec<Value> {
        items.iter().map(|i| Value::Integer(*i)).collect()
    }
}

use std::rc::Rc;

use tracing::trace;

use crate::deferred::Deferred;
use crate::error;
use crate::library::window;
use crate::method::Method;
use crate::pattern::Pattern;
use crate::traverse::{Block, Fallback, Stop, Traverse};
use crate::value::{BinaryOp, Value};

/// The operation set, on top of the traversal primitive.
///
/// Every source that can be cloned into a deferred handle, and so is
/// `Clone + 'static`, gets this for free. Each operation takes its callback
/// as an optional [`Block`]; operations that need one return a
/// [`Deferred`] handle when given none.
///
/// A source that borrows, or cannot be cloned, runs the same operations
/// through [`Method::call`], which never defers.
pub trait Enumerable: Traverse + Clone + 'static {
    /// Validate, then either run the method or defer it.
    fn invoke(&self, method: Method, block: Option<&Block<'_>>) -> error::Result<Value> {
        method.validate(block)?;
        match block {
            None if method.requires_block() => {
                trace!(%method, "no block given");
                Ok(Deferred::new(Rc::new(self.clone()), method).into())
            }
            block => method.call(self, block),
        }
    }

    /// Invoke an operation by name.
    fn send(&self, name: &str, args: &[Value], block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::from_call(name, args)?, block)
    }

    /// `all?`
    fn all(&self, pattern: Option<Pattern>, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::AllMatch(pattern), block)
    }

    /// `any?`
    fn any(&self, pattern: Option<Pattern>, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::AnyMatch(pattern), block)
    }

    /// `none?`
    fn none(&self, pattern: Option<Pattern>, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::NoneMatch(pattern), block)
    }

    /// `one?`
    fn one(&self, pattern: Option<Pattern>, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::OneMatch(pattern), block)
    }

    /// The first element the block accepts; otherwise the fallback's
    /// result, or `Nil`.
    fn detect(&self, ifnone: Option<Fallback>, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Detect(ifnone), block)
    }

    fn find(&self, ifnone: Option<Fallback>, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.detect(ifnone, block)
    }

    fn find_index(&self, value: Option<Value>, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::FindIndex(value), block)
    }

    /// `include?`
    fn include(&self, value: Value) -> error::Result<Value> {
        self.invoke(Method::Include(value), None)
    }

    fn member(&self, value: Value) -> error::Result<Value> {
        self.include(value)
    }

    fn count(&self, value: Option<Value>, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Count(value), block)
    }

    fn inject(
        &self,
        init: Option<Value>,
        op: Option<BinaryOp>,
        block: Option<&Block<'_>>,
    ) -> error::Result<Value> {
        self.invoke(Method::Inject { init, op }, block)
    }

    fn reduce(
        &self,
        init: Option<Value>,
        op: Option<BinaryOp>,
        block: Option<&Block<'_>>,
    ) -> error::Result<Value> {
        self.inject(init, op, block)
    }

    fn sum(&self, init: Option<Value>, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Sum(init.unwrap_or(Value::Integer(0))), block)
    }

    fn max(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Max, block)
    }

    fn min(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Min, block)
    }

    fn max_by(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::MaxBy, block)
    }

    fn min_by(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::MinBy, block)
    }

    fn minmax(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Minmax, block)
    }

    fn minmax_by(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::MinmaxBy, block)
    }

    fn select(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Select, block)
    }

    fn find_all(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.select(block)
    }

    fn filter(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.select(block)
    }

    fn reject(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Reject, block)
    }

    fn partition(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Partition, block)
    }

    fn grep(&self, pattern: Pattern, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Grep(pattern), block)
    }

    fn grep_v(&self, pattern: Pattern, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::GrepV(pattern), block)
    }

    fn drop(&self, n: i64) -> error::Result<Value> {
        self.invoke(Method::Drop(n), None)
    }

    fn drop_while(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::DropWhile, block)
    }

    fn take(&self, n: i64) -> error::Result<Value> {
        self.invoke(Method::Take(n), None)
    }

    fn take_while(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::TakeWhile, block)
    }

    /// The first element, or `Nil`.
    fn first(&self) -> error::Result<Value> {
        self.invoke(Method::First(None), None)
    }

    /// Up to `n` elements.
    fn first_n(&self, n: i64) -> error::Result<Value> {
        self.invoke(Method::First(Some(n)), None)
    }

    fn map(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Map, block)
    }

    fn collect(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.map(block)
    }

    fn flat_map(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::FlatMap, block)
    }

    fn collect_concat(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.flat_map(block)
    }

    fn filter_map(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::FilterMap, block)
    }

    fn group_by(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::GroupBy, block)
    }

    fn uniq(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Uniq, block)
    }

    fn sort(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Sort, block)
    }

    fn sort_by(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::SortBy, block)
    }

    fn to_h(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::ToH, block)
    }

    fn to_a(&self) -> error::Result<Value> {
        self.invoke(Method::ToA, None)
    }

    fn entries(&self) -> error::Result<Value> {
        self.to_a()
    }

    fn tally(&self) -> error::Result<Value> {
        self.invoke(Method::Tally, None)
    }

    fn zip(&self, others: Vec<Value>, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Zip(others), block)
    }

    fn each_cons(&self, n: i64, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::EachCons(n), block)
    }

    fn each_slice(&self, n: i64, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::EachSlice(n), block)
    }

    fn each_with_index(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::EachWithIndex, block)
    }

    fn each_with_object(&self, memo: Value, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::EachWithObject(memo), block)
    }

    /// `each_with_object` over state the caller owns.
    ///
    /// The callback gets each element together with mutable access to
    /// `memo`. Changes stay made even when a later visit fails. The result
    /// is the value of a `Break`, if any.
    fn each_with_object_mut<T>(
        &self,
        memo: &mut T,
        mut f: impl FnMut(Value, &mut T) -> Result<(), Stop>,
    ) -> error::Result<Option<Value>> {
        window::each_with_state(self, memo, &mut f)
    }

    fn each_entry(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::EachEntry, block)
    }

    fn reverse_each(&self, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::ReverseEach, block)
    }

    /// Repeat the elements `n` times, or forever with `None`.
    fn cycle(&self, n: Option<i64>, block: Option<&Block<'_>>) -> error::Result<Value> {
        self.invoke(Method::Cycle(n), block)
    }
}

impl<T> Enumerable for T where T: Traverse + Clone + 'static {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traverse::Range;

    #[test]
    fn test_defers_without_block() {
        let items = Value::from([1, 2, 3]);
        let handle = items.map(None).unwrap();
        assert_eq!(handle.to_string(), "#<Enumerator: map>");
        let double = Block::unary(|v| Ok((v.as_integer().unwrap() * 2).into()));
        let deferred = handle.as_deferred().unwrap();
        assert_eq!(deferred.call(&double), Ok(Value::from([2, 4, 6])));
    }

    #[test]
    fn test_eager_without_block() {
        let items = Value::from([1, 2, 2]);
        assert_eq!(items.count(None, None), Ok(3.into()));
        assert_eq!(items.uniq(None), Ok(Value::from([1, 2])));
    }

    #[test]
    fn test_validated_before_deferring() {
        let items = Value::from([1, 2, 3]);
        assert_eq!(items.each_slice(0, None), Err(error::Error::ArgumentError));
        assert_eq!(items.take(-1), Err(error::Error::ArgumentError));
    }

    #[test]
    fn test_range_source() {
        let range = Range::new(1, 10);
        let even = Block::unary(|v| Ok((v.as_integer().unwrap() % 2 == 0).into()));
        assert_eq!(range.select(Some(&even)), Ok(Value::from([2, 4, 6, 8, 10])));
        assert_eq!(Range::unbounded(1).first_n(3), Ok(Value::from([1, 2, 3])));
    }

    #[test]
    fn test_each_with_object_mut() {
        let mut memo = Vec::new();
        let result = Value::from([1, 2]).each_with_object_mut(&mut memo, |value, memo| {
            memo.push(value);
            Ok(())
        });
        assert_eq!(result, Ok(None));
        assert_eq!(memo, vec![Value::from(1), Value::from(2)]);
    }

    #[test]
    fn test_deferred_composes() {
        let items = Value::from(["a", "b"]);
        let indexed = items.each_with_index(None).unwrap();
        assert_eq!(
            indexed.to_a(),
            Ok(Value::from([
                Value::from([Value::from("a"), Value::from(0)]),
                Value::from([Value::from("b"), Value::from(1)]),
            ]))
        );
    }
}

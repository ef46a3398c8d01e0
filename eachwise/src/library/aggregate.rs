use crate::error;
use crate::library::apply;
use crate::traverse::finish;
use crate::traverse::Block;
use crate::traverse::Traverse;
use crate::value::BinaryOp;
use crate::value::Hash;
use crate::value::Value;

/// Count the elements the callback accepts, the elements equal to the
/// value, or all elements, in that order of precedence.
pub(crate) fn count(
    source: &dyn Traverse,
    value: Option<&Value>,
    block: Option<&Block<'_>>,
) -> error::Result<Value> {
    let mut count = 0i64;
    let flow = source.traverse(&mut |args| {
        let counted = match (block, value) {
            (Some(block), _) => block.call(args)?.is_truthy(),
            (None, Some(value)) => value.loose_eq(&Value::pack(args)),
            (None, None) => true,
        };
        if counted {
            count += 1;
        }
        Ok(())
    });
    finish(flow, || count.into())
}

/// Left fold in traversal order.
///
/// Without an initial value the first element seeds the accumulator. A
/// named operator takes precedence over a callback. The fold is not
/// reordered even if the combination is associative.
pub(crate) fn inject(
    source: &dyn Traverse,
    init: Option<Value>,
    op: Option<BinaryOp>,
    block: Option<&Block<'_>>,
) -> error::Result<Value> {
    let mut acc = init;
    let flow = source.traverse(&mut |args| {
        let value = Value::pack(args);
        acc = Some(match acc.take() {
            None => value,
            Some(acc) => match (op, block) {
                (Some(op), _) => op.apply(&acc, &value)?,
                (None, Some(block)) => block.yield_two(acc, value)?,
                (None, None) => return Err(error::Error::ArgumentError.into()),
            },
        });
        Ok(())
    });
    finish(flow, move || acc.unwrap_or_default())
}

pub(crate) fn sum(
    source: &dyn Traverse,
    init: Value,
    block: Option<&Block<'_>>,
) -> error::Result<Value> {
    let mut acc = init;
    let flow = source.traverse(&mut |args| {
        acc = BinaryOp::Add.apply(&acc, &apply(block, args)?)?;
        Ok(())
    });
    finish(flow, move || acc)
}

/// Count the occurrences of each element, in order of first occurrence.
pub(crate) fn tally(source: &dyn Traverse) -> error::Result<Value> {
    let mut counts: indexmap::IndexMap<Value, i64, ahash::RandomState> = Default::default();
    let flow = source.traverse(&mut |args| {
        *counts.entry(Value::pack(args)).or_insert(0) += 1;
        Ok(())
    });
    finish(flow, move || {
        counts
            .into_iter()
            .map(|(value, count)| (value, count.into()))
            .collect::<Hash>()
            .into()
    })
}

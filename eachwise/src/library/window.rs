use std::collections::VecDeque;

use crate::error;
use crate::library::RESERVE_LIMIT;
use crate::traverse::finish;
use crate::traverse::materialize;
use crate::traverse::settle;
use crate::traverse::Block;
use crate::traverse::Flow;
use crate::traverse::Stop;
use crate::traverse::Traverse;
use crate::value::Value;

/// Every run of `n` consecutive elements, as an array, sliding by one.
pub(crate) fn each_cons(source: &dyn Traverse, n: usize, block: &Block<'_>) -> error::Result<Value> {
    let mut window = VecDeque::with_capacity(n.min(RESERVE_LIMIT));
    let flow = source.traverse(&mut |args| {
        if window.len() == n {
            window.pop_front();
        }
        window.push_back(Value::pack(args));
        if window.len() == n {
            block.yield_one(window.iter().cloned().collect())?;
        }
        Ok(())
    });
    finish(flow, || Value::Nil)
}

/// Consecutive chunks of `n` elements. The last chunk may be shorter; it
/// is only passed on when the source was traversed to its end.
pub(crate) fn each_slice(
    source: &dyn Traverse,
    n: usize,
    block: &Block<'_>,
) -> error::Result<Value> {
    let mut slice = Vec::with_capacity(n.min(RESERVE_LIMIT));
    let flow = source.traverse(&mut |args| {
        slice.push(Value::pack(args));
        if slice.len() == n {
            block.yield_one(std::mem::take(&mut slice).into())?;
        }
        Ok(())
    });
    let flow = match flow {
        Ok(()) if !slice.is_empty() => block.yield_one(slice.into()).map(|_| ()),
        flow => flow,
    };
    finish(flow, || Value::Nil)
}

/// Passes each element with its zero-based position.
pub(crate) fn each_with_index(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    let mut index = 0usize;
    let flow = source.traverse(&mut |args| {
        block.yield_two(Value::pack(args), index.into())?;
        index += 1;
        Ok(())
    });
    finish(flow, || Value::Nil)
}

/// Passes each element with the memo, and returns the memo.
///
/// Values are immutable, so the callback cannot change the memo; state
/// that accumulates goes through [`each_with_state`].
pub(crate) fn each_with_object(
    source: &dyn Traverse,
    memo: Value,
    block: &Block<'_>,
) -> error::Result<Value> {
    let flow = source.traverse(&mut |args| {
        block.yield_two(Value::pack(args), memo.clone())?;
        Ok(())
    });
    finish(flow, move || memo)
}

/// Passes each element with state the caller owns. Changes made by a
/// visit stay made when a later visit fails.
///
/// `Some` is the value of a `Break`.
pub(crate) fn each_with_state<T>(
    source: &dyn Traverse,
    state: &mut T,
    f: &mut dyn FnMut(Value, &mut T) -> Result<(), Stop>,
) -> error::Result<Option<Value>> {
    settle(source.traverse(&mut |args| f(Value::pack(args), state)))
}

/// Passes each visit as a single value.
pub(crate) fn each_entry(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    let flow = source.traverse(&mut |args| {
        block.yield_one(Value::pack(args))?;
        Ok(())
    });
    finish(flow, || Value::Nil)
}

pub(crate) fn reverse_each(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    let flow = materialize(source).and_then(|items| {
        for item in items.into_iter().rev() {
            block.yield_one(item)?;
        }
        Ok(())
    });
    finish(flow, || Value::Nil)
}

/// Pass the elements to the callback `n` times over, or forever without
/// `n`. Only the first pass traverses the source; later passes replay
/// what it visited.
pub(crate) fn cycle(source: &dyn Traverse, n: Option<i64>, block: &Block<'_>) -> error::Result<Value> {
    finish(cycling(source, n, block), || Value::Nil)
}

fn cycling(source: &dyn Traverse, n: Option<i64>, block: &Block<'_>) -> Flow {
    if n.is_some_and(|n| n <= 0) {
        return Ok(());
    }
    let mut visited: Vec<Vec<Value>> = Vec::new();
    source.traverse(&mut |args| {
        visited.push(args.to_vec());
        block.call(args)?;
        Ok(())
    })?;
    if visited.is_empty() {
        return Ok(());
    }
    let mut pass = 1;
    while n.map_or(true, |n| pass < n) {
        for args in &visited {
            block.call(args)?;
        }
        pass += 1;
    }
    Ok(())
}

use std::collections::HashSet;

use crate::error;
use crate::library::apply;
use crate::library::compare_with;
use crate::library::sorting::try_sort;
use crate::traverse::finish;
use crate::traverse::materialize;
use crate::traverse::resolve;
use crate::traverse::Block;
use crate::traverse::Stop;
use crate::traverse::Traverse;
use crate::value::Hash;
use crate::value::Value;

pub(crate) fn map(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    let mut items = Vec::new();
    let flow = source.traverse(&mut |args| {
        items.push(block.call(args)?);
        Ok(())
    });
    finish(flow, move || items.into())
}

/// Like `map`, but results that are sequences themselves are spliced in.
/// Only one level is flattened.
pub(crate) fn flat_map(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    let mut items = Vec::new();
    let flow = source.traverse(&mut |args| {
        let result = block.call(args)?;
        if result.is_sequence() {
            result.traverse(&mut |inner| {
                items.push(Value::pack(inner));
                Ok(())
            })
        } else {
            items.push(result);
            Ok(())
        }
    });
    finish(flow, move || items.into())
}

/// Group elements by the callback's result. Keys are in order of first
/// occurrence, and each group in traversal order.
pub(crate) fn group_by(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    let mut groups: indexmap::IndexMap<Value, Vec<Value>, ahash::RandomState> =
        Default::default();
    let flow = source.traverse(&mut |args| {
        let key = block.call(args)?;
        groups.entry(key).or_default().push(Value::pack(args));
        Ok(())
    });
    finish(flow, move || {
        groups
            .into_iter()
            .map(|(key, group)| (key, group.into()))
            .collect::<Hash>()
            .into()
    })
}

/// The first element for each distinct key, the key being the element
/// itself without a callback.
pub(crate) fn uniq(source: &dyn Traverse, block: Option<&Block<'_>>) -> error::Result<Value> {
    let mut seen: HashSet<Value, ahash::RandomState> = HashSet::default();
    let mut items = Vec::new();
    let flow = source.traverse(&mut |args| {
        if seen.insert(apply(block, args)?) {
            items.push(Value::pack(args));
        }
        Ok(())
    });
    finish(flow, move || items.into())
}

pub(crate) fn sort(source: &dyn Traverse, block: Option<&Block<'_>>) -> error::Result<Value> {
    resolve(sorted(source, block))
}

fn sorted(source: &dyn Traverse, block: Option<&Block<'_>>) -> Result<Value, Stop> {
    let items = materialize(source)?;
    let items = try_sort(items, &mut |a: &Value, b: &Value| compare_with(a, b, block))?;
    Ok(items.into())
}

/// Sort by the callback's result, computed once per element. Elements with
/// equal keys keep their traversal order.
pub(crate) fn sort_by(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    resolve(sorted_by(source, block))
}

fn sorted_by(source: &dyn Traverse, block: &Block<'_>) -> Result<Value, Stop> {
    // (key, index, element)
    let mut decorated = Vec::new();
    source.traverse(&mut |args| {
        let key = block.call(args)?;
        decorated.push((key, decorated.len(), Value::pack(args)));
        Ok(())
    })?;
    let decorated = try_sort(
        decorated,
        &mut |a: &(Value, usize, Value), b: &(Value, usize, Value)| {
            Ok::<_, Stop>(a.0.try_compare(&b.0)?.then(a.1.cmp(&b.1)))
        },
    )?;
    Ok(decorated
        .into_iter()
        .map(|(_, _, value)| value)
        .collect::<Value>())
}

/// Build a hash from `[key, value]` pairs, produced by the callback if
/// given. Later pairs overwrite earlier ones with the same key.
pub(crate) fn to_h(source: &dyn Traverse, block: Option<&Block<'_>>) -> error::Result<Value> {
    let mut hash = Hash::default();
    let flow = source.traverse(&mut |args| {
        let pair = apply(block, args)?;
        match pair.as_array() {
            Some([key, value]) => {
                hash.insert(key.clone(), value.clone());
                Ok(())
            }
            Some(_) => Err(error::Error::ArgumentError.into()),
            None => Err(error::Error::TypeError.into()),
        }
    });
    finish(flow, move || hash.into())
}

pub(crate) fn to_a(source: &dyn Traverse) -> error::Result<Value> {
    resolve(materialize(source).map(Value::from))
}

/// Combine each element with the elements at the same position in the
/// other sequences, padding with `Nil`. With a callback each row is passed
/// to it and nothing is collected.
pub(crate) fn zip(
    source: &dyn Traverse,
    others: &[Value],
    block: Option<&Block<'_>>,
) -> error::Result<Value> {
    // materialized on the first visit, so an empty source never touches
    // the others
    let mut columns: Option<Vec<Vec<Value>>> = None;
    let mut rows = Vec::new();
    let mut index = 0;
    let flow = source.traverse(&mut |args| {
        if columns.is_none() {
            columns = Some(others.iter().map(column).collect::<Result<_, _>>()?);
        }
        let row: Value = std::iter::once(Value::pack(args))
            .chain(
                columns
                    .iter()
                    .flatten()
                    .map(|column| column.get(index).cloned().unwrap_or_default()),
            )
            .collect();
        index += 1;
        match block {
            Some(block) => {
                block.yield_one(row)?;
            }
            None => rows.push(row),
        }
        Ok(())
    });
    let collect = block.is_none();
    finish(flow, move || if collect { rows.into() } else { Value::Nil })
}

fn column(value: &Value) -> Result<Vec<Value>, Stop> {
    match value {
        Value::Array(items) => Ok(items.to_vec()),
        Value::Nil | Value::Hash(_) | Value::Deferred(_) => materialize(value),
        _ => Err(error::Error::TypeError.into()),
    }
}

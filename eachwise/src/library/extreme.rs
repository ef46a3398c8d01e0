use std::cmp::Ordering;

use crate::error;
use crate::library::compare_with;
use crate::traverse::finish;
use crate::traverse::Block;
use crate::traverse::Traverse;
use crate::value::Value;

// The running extreme is only replaced on strict improvement, so the first
// of equal elements wins.

fn extreme(
    source: &dyn Traverse,
    block: Option<&Block<'_>>,
    want: Ordering,
) -> error::Result<Value> {
    let mut best: Option<Value> = None;
    let flow = source.traverse(&mut |args| {
        let value = Value::pack(args);
        let replace = match &best {
            Some(current) => compare_with(&value, current, block)? == want,
            None => true,
        };
        if replace {
            best = Some(value);
        }
        Ok(())
    });
    finish(flow, move || best.unwrap_or_default())
}

fn extreme_by(source: &dyn Traverse, block: &Block<'_>, want: Ordering) -> error::Result<Value> {
    // (key, element)
    let mut best: Option<(Value, Value)> = None;
    let flow = source.traverse(&mut |args| {
        let key = block.call(args)?;
        let replace = match &best {
            Some((current, _)) => key.try_compare(current)? == want,
            None => true,
        };
        if replace {
            best = Some((key, Value::pack(args)));
        }
        Ok(())
    });
    finish(flow, move || best.map(|(_, value)| value).unwrap_or_default())
}

pub(crate) fn max(source: &dyn Traverse, block: Option<&Block<'_>>) -> error::Result<Value> {
    extreme(source, block, Ordering::Greater)
}

pub(crate) fn min(source: &dyn Traverse, block: Option<&Block<'_>>) -> error::Result<Value> {
    extreme(source, block, Ordering::Less)
}

pub(crate) fn max_by(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    extreme_by(source, block, Ordering::Greater)
}

pub(crate) fn min_by(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    extreme_by(source, block, Ordering::Less)
}

/// Both bounds in a single pass, as `[min, max]`. Empty sources give
/// `[nil, nil]`.
pub(crate) fn minmax(source: &dyn Traverse, block: Option<&Block<'_>>) -> error::Result<Value> {
    let mut bounds: Option<(Value, Value)> = None;
    let flow = source.traverse(&mut |args| {
        let value = Value::pack(args);
        match &mut bounds {
            None => bounds = Some((value.clone(), value)),
            Some((min, max)) => {
                if compare_with(&value, min, block)? == Ordering::Less {
                    *min = value.clone();
                }
                if compare_with(&value, max, block)? == Ordering::Greater {
                    *max = value;
                }
            }
        }
        Ok(())
    });
    finish(flow, move || pair(bounds))
}

pub(crate) fn minmax_by(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    // ((key, element), (key, element))
    let mut bounds: Option<((Value, Value), (Value, Value))> = None;
    let flow = source.traverse(&mut |args| {
        let key = block.call(args)?;
        let value = Value::pack(args);
        match &mut bounds {
            None => bounds = Some(((key.clone(), value.clone()), (key, value))),
            Some((min, max)) => {
                if key.try_compare(&min.0)? == Ordering::Less {
                    *min = (key.clone(), value.clone());
                }
                if key.try_compare(&max.0)? == Ordering::Greater {
                    *max = (key, value);
                }
            }
        }
        Ok(())
    });
    finish(flow, move || pair(bounds.map(|(min, max)| (min.1, max.1))))
}

fn pair(bounds: Option<(Value, Value)>) -> Value {
    let (min, max) = bounds.unwrap_or_default();
    Value::from([min, max])
}

use crate::error;
use crate::library::RESERVE_LIMIT;
use crate::pattern::Pattern;
use crate::traverse::finish;
use crate::traverse::Block;
use crate::traverse::Stop;
use crate::traverse::Traverse;
use crate::value::Value;

fn keep(source: &dyn Traverse, block: &Block<'_>, wanted: bool) -> error::Result<Value> {
    let mut items = Vec::new();
    let flow = source.traverse(&mut |args| {
        if block.call(args)?.is_truthy() == wanted {
            items.push(Value::pack(args));
        }
        Ok(())
    });
    finish(flow, move || items.into())
}

pub(crate) fn select(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    keep(source, block, true)
}

pub(crate) fn reject(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    keep(source, block, false)
}

/// `[selected, rejected]`, both in traversal order.
pub(crate) fn partition(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    let mut selected = Vec::new();
    let mut rejected = Vec::new();
    let flow = source.traverse(&mut |args| {
        if block.call(args)?.is_truthy() {
            selected.push(Value::pack(args));
        } else {
            rejected.push(Value::pack(args));
        }
        Ok(())
    });
    finish(flow, move || Value::from([Value::from(selected), Value::from(rejected)]))
}

fn grep_matching(
    source: &dyn Traverse,
    pattern: &Pattern,
    block: Option<&Block<'_>>,
    wanted: bool,
) -> error::Result<Value> {
    let mut items = Vec::new();
    let flow = source.traverse(&mut |args| {
        let value = Value::pack(args);
        if pattern.matches(&value) == wanted {
            items.push(match block {
                Some(block) => block.yield_one(value)?,
                None => value,
            });
        }
        Ok(())
    });
    finish(flow, move || items.into())
}

/// The elements the pattern matches, each passed through the callback if
/// given.
pub(crate) fn grep(
    source: &dyn Traverse,
    pattern: &Pattern,
    block: Option<&Block<'_>>,
) -> error::Result<Value> {
    grep_matching(source, pattern, block, true)
}

pub(crate) fn grep_v(
    source: &dyn Traverse,
    pattern: &Pattern,
    block: Option<&Block<'_>>,
) -> error::Result<Value> {
    grep_matching(source, pattern, block, false)
}

/// The truthy callback results.
pub(crate) fn filter_map(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    let mut items = Vec::new();
    let flow = source.traverse(&mut |args| {
        let value = block.call(args)?;
        if value.is_truthy() {
            items.push(value);
        }
        Ok(())
    });
    finish(flow, move || items.into())
}

pub(crate) fn drop(source: &dyn Traverse, n: usize) -> error::Result<Value> {
    let mut skipped = 0;
    let mut items = Vec::new();
    let flow = source.traverse(&mut |args| {
        if skipped < n {
            skipped += 1;
        } else {
            items.push(Value::pack(args));
        }
        Ok(())
    });
    finish(flow, move || items.into())
}

pub(crate) fn drop_while(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    let mut dropping = true;
    let mut items = Vec::new();
    let flow = source.traverse(&mut |args| {
        // once latched, the callback is no longer consulted
        if dropping && !block.call(args)?.is_truthy() {
            dropping = false;
        }
        if !dropping {
            items.push(Value::pack(args));
        }
        Ok(())
    });
    finish(flow, move || items.into())
}

pub(crate) fn take(source: &dyn Traverse, n: usize) -> error::Result<Value> {
    if n == 0 {
        return Ok(Vec::<Value>::new().into());
    }
    let mut items = Vec::with_capacity(n.min(RESERVE_LIMIT));
    let flow = source.traverse(&mut |args| {
        items.push(Value::pack(args));
        if items.len() >= n {
            return Err(Stop::Done);
        }
        Ok(())
    });
    finish(flow, move || items.into())
}

pub(crate) fn take_while(source: &dyn Traverse, block: &Block<'_>) -> error::Result<Value> {
    let mut items = Vec::new();
    let flow = source.traverse(&mut |args| {
        if !block.call(args)?.is_truthy() {
            return Err(Stop::Done);
        }
        items.push(Value::pack(args));
        Ok(())
    });
    finish(flow, move || items.into())
}

pub(crate) fn first(source: &dyn Traverse) -> error::Result<Value> {
    let mut found = None;
    let flow = source.traverse(&mut |args| {
        found = Some(Value::pack(args));
        Err(Stop::Done)
    });
    finish(flow, move || found.unwrap_or_default())
}

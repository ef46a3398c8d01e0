use crate::error;
use crate::value::Value;

/// Why a traversal ended before visiting every element.
#[derive(Debug, Clone, PartialEq)]
pub enum Stop {
    /// Nothing more is needed: the operation ends with what it has.
    Done,
    /// Leave the operation, which then returns this value.
    Break(Value),
    /// A callback or the source failed.
    Error(error::Error),
}

impl From<error::Error> for Stop {
    fn from(error: error::Error) -> Self {
        Stop::Error(error)
    }
}

/// The outcome of a single visit, and of a whole traversal.
pub type Flow = Result<(), Stop>;

/// The callback a source invokes for every element.
///
/// A visit may carry more than one positional value, such as the key and
/// value of a hash entry.
pub type Visit<'a> = dyn FnMut(&[Value]) -> Flow + 'a;

/// The traversal primitive.
///
/// A source visits each of its elements exactly once, in its own order,
/// and returns when it runs out of elements. A source may be unbounded; it
/// then only returns once a visit asks it to stop. A source must stop
/// immediately when a visit returns `Err`, and hand that `Stop` back to its
/// caller unchanged.
///
/// If you implement this for a `Clone + 'static` type,
/// [`Enumerable`](crate::Enumerable) provides the whole operation set on
/// top of it; those bounds let an operation called without its callback
/// keep the source in a [`Deferred`](crate::Deferred) handle. Any other
/// source runs the operations through [`Method::call`](crate::Method::call).
pub trait Traverse {
    fn traverse(&self, visit: &mut Visit<'_>) -> Flow;
}

impl<T> Traverse for std::rc::Rc<T>
where
    T: Traverse + ?Sized,
{
    fn traverse(&self, visit: &mut Visit<'_>) -> Flow {
        (**self).traverse(visit)
    }
}

// An absent source visits nothing.
impl<T> Traverse for Option<T>
where
    T: Traverse,
{
    fn traverse(&self, visit: &mut Visit<'_>) -> Flow {
        match self {
            Some(source) => source.traverse(visit),
            None => Ok(()),
        }
    }
}

/// Turn the end of a traversal into an operation result.
///
/// `Ok(None)` means the operation produces its own result; a `Break`
/// replaces that result.
pub(crate) fn settle(flow: Flow) -> error::Result<Option<Value>> {
    match flow {
        Ok(()) | Err(Stop::Done) => Ok(None),
        Err(Stop::Break(value)) => Ok(Some(value)),
        Err(Stop::Error(error)) => Err(error),
    }
}

pub(crate) fn finish(flow: Flow, result: impl FnOnce() -> Value) -> error::Result<Value> {
    Ok(settle(flow)?.unwrap_or_else(result))
}

/// Turn the result of a single callback invocation into an operation
/// result.
pub(crate) fn resolve(result: Result<Value, Stop>) -> error::Result<Value> {
    match result {
        Ok(value) | Err(Stop::Break(value)) => Ok(value),
        Err(Stop::Done) => Ok(Value::Nil),
        Err(Stop::Error(error)) => Err(error),
    }
}

/// Collect every element, packed.
pub(crate) fn materialize(source: &(impl Traverse + ?Sized)) -> Result<Vec<Value>, Stop> {
    let mut items = Vec::new();
    source.traverse(&mut |args| {
        items.push(Value::pack(args));
        Ok(())
    })?;
    Ok(items)
}

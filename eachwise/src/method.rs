//! Operations as values.
//!
//! A [`Method`] names an operation together with its arguments, other than
//! the callback. It is what a [`Deferred`](crate::Deferred) handle records,
//! and what `send` parses a call by name into.
use std::fmt;

use strum_macros::IntoStaticStr;
use tracing::{debug, warn};

use crate::error;
use crate::library::{aggregate, extreme, filter, quantifier, search, transform, window};
use crate::pattern::{Matcher, Pattern};
use crate::traverse::{Block, Fallback, Traverse};
use crate::value::{BinaryOp, Value};

#[derive(Debug, Clone, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Method {
    #[strum(serialize = "all?")]
    AllMatch(Option<Pattern>),
    #[strum(serialize = "any?")]
    AnyMatch(Option<Pattern>),
    #[strum(serialize = "none?")]
    NoneMatch(Option<Pattern>),
    #[strum(serialize = "one?")]
    OneMatch(Option<Pattern>),
    Detect(Option<Fallback>),
    FindIndex(Option<Value>),
    #[strum(serialize = "include?")]
    Include(Value),
    Count(Option<Value>),
    Inject {
        init: Option<Value>,
        op: Option<BinaryOp>,
    },
    Sum(Value),
    Max,
    Min,
    MaxBy,
    MinBy,
    Minmax,
    MinmaxBy,
    Select,
    Reject,
    Partition,
    Grep(Pattern),
    GrepV(Pattern),
    Drop(i64),
    DropWhile,
    Take(i64),
    TakeWhile,
    First(Option<i64>),
    Map,
    FlatMap,
    FilterMap,
    GroupBy,
    Uniq,
    Sort,
    SortBy,
    ToH,
    ToA,
    Tally,
    Zip(Vec<Value>),
    EachCons(i64),
    EachSlice(i64),
    EachWithIndex,
    EachWithObject(Value),
    EachEntry,
    ReverseEach,
    Cycle(Option<i64>),
}

impl Method {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Parse a call by name with positional arguments.
    ///
    /// Aliases resolve to the same method. Argument counts are checked
    /// here; argument values are checked by [`Method::validate`].
    ///
    /// `detect` and `find` take no arguments by name: a fallback is not a
    /// value, so it is only given through [`Method::Detect`] or
    /// [`Enumerable::detect`](crate::Enumerable::detect).
    pub fn from_call(name: &str, args: &[Value]) -> error::Result<Self> {
        let method = match name {
            "all?" => Method::AllMatch(optional(args)?.map(Pattern::from)),
            "any?" => Method::AnyMatch(optional(args)?.map(Pattern::from)),
            "none?" => Method::NoneMatch(optional(args)?.map(Pattern::from)),
            "one?" => Method::OneMatch(optional(args)?.map(Pattern::from)),
            "detect" | "find" => {
                none(args)?;
                Method::Detect(None)
            }
            "find_index" => Method::FindIndex(optional(args)?),
            "include?" | "member?" => Method::Include(single(args)?),
            "count" => Method::Count(optional(args)?),
            "inject" | "reduce" => inject(args)?,
            "sum" => Method::Sum(optional(args)?.unwrap_or(Value::Integer(0))),
            "max" => none(args).map(|_| Method::Max)?,
            "min" => none(args).map(|_| Method::Min)?,
            "max_by" => none(args).map(|_| Method::MaxBy)?,
            "min_by" => none(args).map(|_| Method::MinBy)?,
            "minmax" => none(args).map(|_| Method::Minmax)?,
            "minmax_by" => none(args).map(|_| Method::MinmaxBy)?,
            "select" | "find_all" | "filter" => none(args).map(|_| Method::Select)?,
            "reject" => none(args).map(|_| Method::Reject)?,
            "partition" => none(args).map(|_| Method::Partition)?,
            "grep" => Method::Grep(single(args)?.into()),
            "grep_v" => Method::GrepV(single(args)?.into()),
            "drop" => Method::Drop(integer(&single(args)?)?),
            "drop_while" => none(args).map(|_| Method::DropWhile)?,
            "take" => Method::Take(integer(&single(args)?)?),
            "take_while" => none(args).map(|_| Method::TakeWhile)?,
            "first" => Method::First(optional(args)?.as_ref().map(integer).transpose()?),
            "map" | "collect" => none(args).map(|_| Method::Map)?,
            "flat_map" | "collect_concat" => none(args).map(|_| Method::FlatMap)?,
            "filter_map" => none(args).map(|_| Method::FilterMap)?,
            "group_by" => none(args).map(|_| Method::GroupBy)?,
            "uniq" => none(args).map(|_| Method::Uniq)?,
            "sort" => none(args).map(|_| Method::Sort)?,
            "sort_by" => none(args).map(|_| Method::SortBy)?,
            "to_h" => none(args).map(|_| Method::ToH)?,
            "to_a" | "entries" => none(args).map(|_| Method::ToA)?,
            "tally" => none(args).map(|_| Method::Tally)?,
            "zip" => Method::Zip(args.to_vec()),
            "each_cons" => Method::EachCons(integer(&single(args)?)?),
            "each_slice" => Method::EachSlice(integer(&single(args)?)?),
            "each_with_index" => none(args).map(|_| Method::EachWithIndex)?,
            "each_with_object" => Method::EachWithObject(single(args)?),
            "each_entry" => none(args).map(|_| Method::EachEntry)?,
            "reverse_each" => none(args).map(|_| Method::ReverseEach)?,
            "cycle" => Method::Cycle(match optional(args)? {
                None | Some(Value::Nil) => None,
                Some(n) => Some(integer(&n)?),
            }),
            _ => {
                debug!(name, "no such method");
                return Err(error::Error::NoMethod);
            }
        };
        Ok(method)
    }

    /// Check the arguments before anything is traversed.
    pub fn validate(&self, block: Option<&Block<'_>>) -> error::Result<()> {
        let valid = match self {
            Method::Drop(n) | Method::Take(n) | Method::First(Some(n)) => *n >= 0,
            Method::EachCons(n) | Method::EachSlice(n) => *n >= 1,
            Method::Inject { op: None, .. } => block.is_some(),
            _ => true,
        };
        if valid {
            Ok(())
        } else {
            debug!(method = %self, "invalid argument");
            Err(error::Error::ArgumentError)
        }
    }

    /// Whether the method waits for a callback instead of running without
    /// one.
    pub fn requires_block(&self) -> bool {
        matches!(
            self,
            Method::Detect(_)
                | Method::FindIndex(None)
                | Method::MaxBy
                | Method::MinBy
                | Method::MinmaxBy
                | Method::Select
                | Method::Reject
                | Method::Partition
                | Method::DropWhile
                | Method::TakeWhile
                | Method::Map
                | Method::FlatMap
                | Method::FilterMap
                | Method::GroupBy
                | Method::SortBy
                | Method::EachCons(_)
                | Method::EachSlice(_)
                | Method::EachWithIndex
                | Method::EachWithObject(_)
                | Method::EachEntry
                | Method::ReverseEach
                | Method::Cycle(_)
        )
    }

    /// Run the method against a source.
    ///
    /// Methods that require a callback fail with an argument error without
    /// one; [`Enumerable`](crate::Enumerable) defers those instead.
    pub fn call(&self, source: &dyn Traverse, block: Option<&Block<'_>>) -> error::Result<Value> {
        match self {
            Method::AllMatch(pattern) => {
                quantifier::all(source, &Matcher::resolve(pattern.as_ref(), block))
            }
            Method::AnyMatch(pattern) => {
                quantifier::any(source, &Matcher::resolve(pattern.as_ref(), block))
            }
            Method::NoneMatch(pattern) => {
                quantifier::none(source, &Matcher::resolve(pattern.as_ref(), block))
            }
            Method::OneMatch(pattern) => {
                quantifier::one(source, &Matcher::resolve(pattern.as_ref(), block))
            }
            Method::Detect(fallback) => search::detect(source, fallback.as_ref(), required(block)?),
            Method::FindIndex(value) => {
                if value.is_some() && block.is_some() {
                    warn!("given argument not used");
                }
                search::find_index(source, value.as_ref(), block)
            }
            Method::Include(value) => search::include(source, value),
            Method::Count(value) => {
                if value.is_some() && block.is_some() {
                    warn!("given argument not used");
                }
                aggregate::count(source, value.as_ref(), block)
            }
            Method::Inject { init, op } => {
                if op.is_some() && block.is_some() {
                    warn!("given block not used");
                }
                aggregate::inject(source, init.clone(), *op, block)
            }
            Method::Sum(init) => aggregate::sum(source, init.clone(), block),
            Method::Max => extreme::max(source, block),
            Method::Min => extreme::min(source, block),
            Method::MaxBy => extreme::max_by(source, required(block)?),
            Method::MinBy => extreme::min_by(source, required(block)?),
            Method::Minmax => extreme::minmax(source, block),
            Method::MinmaxBy => extreme::minmax_by(source, required(block)?),
            Method::Select => filter::select(source, required(block)?),
            Method::Reject => filter::reject(source, required(block)?),
            Method::Partition => filter::partition(source, required(block)?),
            Method::Grep(pattern) => filter::grep(source, pattern, block),
            Method::GrepV(pattern) => filter::grep_v(source, pattern, block),
            Method::Drop(n) => filter::drop(source, size(*n)?),
            Method::DropWhile => filter::drop_while(source, required(block)?),
            Method::Take(n) => filter::take(source, size(*n)?),
            Method::TakeWhile => filter::take_while(source, required(block)?),
            Method::First(None) => filter::first(source),
            Method::First(Some(n)) => filter::take(source, size(*n)?),
            Method::Map => transform::map(source, required(block)?),
            Method::FlatMap => transform::flat_map(source, required(block)?),
            Method::FilterMap => filter::filter_map(source, required(block)?),
            Method::GroupBy => transform::group_by(source, required(block)?),
            Method::Uniq => transform::uniq(source, block),
            Method::Sort => transform::sort(source, block),
            Method::SortBy => transform::sort_by(source, required(block)?),
            Method::ToH => transform::to_h(source, block),
            Method::ToA => transform::to_a(source),
            Method::Tally => aggregate::tally(source),
            Method::Zip(others) => transform::zip(source, others, block),
            Method::EachCons(n) => window::each_cons(source, size(*n)?, required(block)?),
            Method::EachSlice(n) => window::each_slice(source, size(*n)?, required(block)?),
            Method::EachWithIndex => window::each_with_index(source, required(block)?),
            Method::EachWithObject(memo) => {
                window::each_with_object(source, memo.clone(), required(block)?)
            }
            Method::EachEntry => window::each_entry(source, required(block)?),
            Method::ReverseEach => window::reverse_each(source, required(block)?),
            Method::Cycle(n) => window::cycle(source, *n, required(block)?),
        }
    }
}

// Renders as the method name followed by its arguments, if any.
impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = match self {
            Method::AllMatch(Some(pattern))
            | Method::AnyMatch(Some(pattern))
            | Method::NoneMatch(Some(pattern))
            | Method::OneMatch(Some(pattern))
            | Method::Grep(pattern)
            | Method::GrepV(pattern) => vec![pattern.to_string()],
            Method::Detect(Some(_)) => vec!["#<Proc>".to_string()],
            Method::FindIndex(Some(value))
            | Method::Include(value)
            | Method::Count(Some(value))
            | Method::Sum(value)
            | Method::EachWithObject(value) => vec![value.to_string()],
            Method::Inject { init, op } => init
                .iter()
                .map(Value::to_string)
                .chain(op.iter().map(|op| format!(":{}", op)))
                .collect(),
            Method::Drop(n)
            | Method::Take(n)
            | Method::First(Some(n))
            | Method::EachCons(n)
            | Method::EachSlice(n)
            | Method::Cycle(Some(n)) => vec![n.to_string()],
            Method::Zip(others) => others.iter().map(Value::to_string).collect(),
            _ => Vec::new(),
        };
        if args.is_empty() {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{}({})", self.name(), args.join(", "))
        }
    }
}

fn required<'a, 'b>(block: Option<&'a Block<'b>>) -> error::Result<&'a Block<'b>> {
    block.ok_or(error::Error::ArgumentError)
}

fn size(n: i64) -> error::Result<usize> {
    usize::try_from(n).map_err(|_| error::Error::ArgumentError)
}

fn integer(value: &Value) -> error::Result<i64> {
    match value {
        Value::Integer(i) => Ok(*i),
        // truncated, like an implicit integer conversion
        Value::Float(f) if f.0.is_finite() => Ok(f.0.trunc() as i64),
        _ => Err(error::Error::TypeError),
    }
}

fn arity(args: &[Value], min: usize, max: usize) -> error::Result<()> {
    if args.len() < min || args.len() > max {
        debug!(given = args.len(), min, max, "wrong number of arguments");
        Err(error::Error::ArgumentCount)
    } else {
        Ok(())
    }
}

fn none(args: &[Value]) -> error::Result<()> {
    arity(args, 0, 0)
}

fn single(args: &[Value]) -> error::Result<Value> {
    arity(args, 1, 1)?;
    Ok(args[0].clone())
}

fn optional(args: &[Value]) -> error::Result<Option<Value>> {
    arity(args, 0, 1)?;
    Ok(args.first().cloned())
}

// A trailing symbol names the operator to combine with; what comes before
// it is the initial value.
fn inject(args: &[Value]) -> error::Result<Method> {
    arity(args, 0, 2)?;
    let (op, rest) = match args.split_last() {
        Some((Value::Symbol(name), rest)) => (Some(BinaryOp::parse(name)?), rest),
        _ => (None, args),
    };
    match rest {
        [] => Ok(Method::Inject { init: None, op }),
        [init] => Ok(Method::Inject {
            init: Some(init.clone()),
            op,
        }),
        _ => Err(error::Error::TypeError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    #[test]
    fn test_names() {
        assert_eq!(Method::AllMatch(None).name(), "all?");
        assert_eq!(Method::EachWithIndex.name(), "each_with_index");
        assert_eq!(Method::ToH.name(), "to_h");
        assert_eq!(Method::GrepV(Kind::Nil.into()).name(), "grep_v");
    }

    #[test]
    fn test_aliases() {
        assert!(matches!(Method::from_call("find_all", &[]), Ok(Method::Select)));
        assert!(matches!(Method::from_call("reduce", &[]), Ok(Method::Inject { .. })));
        assert!(matches!(Method::from_call("member?", &[1.into()]), Ok(Method::Include(_))));
    }

    #[test]
    fn test_first_arity() {
        assert!(matches!(Method::from_call("first", &[]), Ok(Method::First(None))));
        assert!(matches!(
            Method::from_call("first", &[2.into()]),
            Ok(Method::First(Some(2)))
        ));
        assert!(matches!(
            Method::from_call("first", &[1.into(), 2.into()]),
            Err(error::Error::ArgumentCount)
        ));
    }

    #[test]
    fn test_inject_arguments() {
        assert!(matches!(
            Method::from_call("inject", &[10.into(), Value::symbol("+")]),
            Ok(Method::Inject {
                init: Some(Value::Integer(10)),
                op: Some(BinaryOp::Add)
            })
        ));
        assert!(matches!(
            Method::from_call("inject", &[Value::symbol("*")]),
            Ok(Method::Inject {
                init: None,
                op: Some(BinaryOp::Multiply)
            })
        ));
        assert!(matches!(
            Method::from_call("inject", &[1.into(), 2.into(), Value::symbol("+")]),
            Err(error::Error::ArgumentCount)
        ));
        assert!(matches!(
            Method::from_call("inject", &[Value::symbol("frobnicate")]),
            Err(error::Error::NoMethod)
        ));
    }

    #[test]
    fn test_unknown_method() {
        assert!(matches!(
            Method::from_call("each_pair", &[]),
            Err(error::Error::NoMethod)
        ));
    }

    #[test]
    fn test_validate_sizes() {
        assert_eq!(Method::Take(-1).validate(None), Err(error::Error::ArgumentError));
        assert_eq!(Method::Take(0).validate(None), Ok(()));
        assert_eq!(Method::EachSlice(0).validate(None), Err(error::Error::ArgumentError));
        assert_eq!(Method::EachCons(1).validate(None), Ok(()));
        assert_eq!(
            Method::Inject { init: None, op: None }.validate(None),
            Err(error::Error::ArgumentError)
        );
    }

    #[test]
    fn test_detect_by_name_takes_no_fallback() {
        assert!(matches!(Method::from_call("find", &[]), Ok(Method::Detect(None))));
        assert!(matches!(
            Method::from_call("detect", &[Value::from(0)]),
            Err(error::Error::ArgumentCount)
        ));
    }

    /// A source borrowing its elements, which cannot be kept in a handle.
    struct Borrowed<'a>(&'a [Value]);

    impl Traverse for Borrowed<'_> {
        fn traverse(&self, visit: &mut crate::traverse::Visit<'_>) -> crate::traverse::Flow {
            for item in self.0 {
                visit(std::slice::from_ref(item))?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_call_on_borrowed_source() {
        let items = vec![Value::from(3), Value::from(1), Value::from(2)];
        let source = Borrowed(&items);
        assert_eq!(Method::Sort.call(&source, None), Ok(Value::from([1, 2, 3])));
        let fallback = Fallback::new(|| Ok("none".into()));
        let big = Block::unary(|v| Ok((v.as_integer() > Some(5)).into()));
        assert_eq!(
            Method::Detect(Some(fallback)).call(&source, Some(&big)),
            Ok("none".into())
        );
        // without a callback nothing can be deferred
        assert_eq!(
            Method::Map.call(&source, None),
            Err(error::Error::ArgumentError)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Method::EachSlice(2).to_string(), "each_slice(2)");
        assert_eq!(Method::Map.to_string(), "map");
        assert_eq!(
            Method::Inject {
                init: Some(1.into()),
                op: Some(BinaryOp::Add)
            }
            .to_string(),
            "inject(1, :+)"
        );
    }
}

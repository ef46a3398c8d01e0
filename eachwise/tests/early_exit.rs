use std::cell::{Cell, RefCell};
use std::rc::Rc;

use eachwise::{error, Block, Enumerable, Flow, Range, Stop, Traverse, Value, Visit};

/// A source that records how many elements it handed out.
#[derive(Clone)]
struct Counting {
    len: i64,
    visited: Rc<Cell<i64>>,
}

impl Counting {
    fn new(len: i64) -> Self {
        Counting {
            len,
            visited: Default::default(),
        }
    }

    fn visited(&self) -> i64 {
        self.visited.get()
    }
}

impl Traverse for Counting {
    fn traverse(&self, visit: &mut Visit<'_>) -> Flow {
        for i in 0..self.len {
            self.visited.set(self.visited.get() + 1);
            visit(&[Value::Integer(i)])?;
        }
        Ok(())
    }
}

fn equals(n: i64) -> Block<'static> {
    Block::unary(move |v| Ok((v.as_integer() == Some(n)).into()))
}

#[test]
fn test_quantifiers_stop_at_decision() {
    let source = Counting::new(100);
    assert_eq!(source.any(None, Some(&equals(3))), Ok(true.into()));
    assert_eq!(source.visited(), 4);

    let source = Counting::new(100);
    assert_eq!(source.all(None, Some(&equals(0))), Ok(false.into()));
    assert_eq!(source.visited(), 2);

    let source = Counting::new(100);
    let small = Block::unary(|v| Ok((v.as_integer() < Some(5)).into()));
    assert_eq!(source.one(None, Some(&small)), Ok(false.into()));
    assert_eq!(source.visited(), 2);
}

#[test]
fn test_searches_stop_at_match() {
    let source = Counting::new(100);
    assert_eq!(source.detect(None, Some(&equals(9))), Ok(9.into()));
    assert_eq!(source.visited(), 10);

    let source = Counting::new(100);
    assert_eq!(source.find_index(Some(5.into()), None), Ok(5.into()));
    assert_eq!(source.visited(), 6);

    let source = Counting::new(100);
    assert_eq!(source.include(2.into()), Ok(true.into()));
    assert_eq!(source.visited(), 3);
}

#[test]
fn test_first_and_take_stop_early() {
    let source = Counting::new(100);
    assert_eq!(source.first(), Ok(0.into()));
    assert_eq!(source.visited(), 1);

    let source = Counting::new(100);
    assert_eq!(source.first_n(3), Ok(Value::from([0, 1, 2])));
    assert_eq!(source.visited(), 3);

    let source = Counting::new(100);
    assert_eq!(source.take(0), Ok(Value::from(Vec::<Value>::new())));
    assert_eq!(source.visited(), 0);
}

#[test]
fn test_invalid_arguments_are_eager() {
    let source = Counting::new(10);
    assert_eq!(source.take(-1), Err(error::Error::ArgumentError));
    assert_eq!(source.drop(-2), Err(error::Error::ArgumentError));
    assert_eq!(source.first_n(-1), Err(error::Error::ArgumentError));
    assert_eq!(source.each_cons(0, None), Err(error::Error::ArgumentError));
    assert_eq!(source.each_slice(-3, None), Err(error::Error::ArgumentError));
    assert_eq!(source.inject(None, None, None), Err(error::Error::ArgumentError));
    assert_eq!(source.visited(), 0);
}

#[test]
fn test_unbounded_range() {
    let naturals = Range::unbounded(1);
    let big = Block::unary(|v| Ok((v.as_integer() > Some(99)).into()));
    assert_eq!(naturals.detect(None, Some(&big)), Ok(100.into()));
    let small = Block::unary(|v| Ok((v.as_integer() < Some(4)).into()));
    assert_eq!(naturals.take_while(Some(&small)), Ok(Value::from([1, 2, 3])));
    assert_eq!(naturals.first_n(2), Ok(Value::from([1, 2])));
}

#[test]
fn test_cycle_traverses_once_and_replays() {
    let source = Counting::new(4);
    let mut seen = Vec::new();
    let block = Block::unary(|v| {
        seen.push(v);
        Ok(Value::Nil)
    });
    assert_eq!(source.cycle(Some(3), Some(&block)), Ok(Value::Nil));
    drop(block);
    assert_eq!(source.visited(), 4);
    assert_eq!(seen.len(), 12);
    assert_eq!(&seen[8..], &seen[..4]);
}

#[test]
fn test_break_out_of_cycle() {
    let mut seen = Vec::new();
    let block = Block::unary(|v| {
        seen.push(v);
        if seen.len() == 5 {
            Err(Stop::Break("stopped".into()))
        } else {
            Ok(Value::Nil)
        }
    });
    assert_eq!(
        Value::from([1, 2]).cycle(None, Some(&block)),
        Ok("stopped".into())
    );
    drop(block);
    assert_eq!(seen, vec![1.into(), 2.into(), 1.into(), 2.into(), 1.into()]);
}

#[test]
fn test_break_value_becomes_result() {
    let block = Block::unary(|v| {
        if v.as_integer() == Some(2) {
            Err(Stop::Break("two".into()))
        } else {
            Ok(v)
        }
    });
    assert_eq!(Value::from([1, 2, 3]).map(Some(&block)), Ok("two".into()));
}

#[test]
fn test_error_discards_partial_result() {
    let source = Counting::new(10);
    let block = Block::unary(|v| {
        if v.as_integer() == Some(3) {
            Err(error::Error::TypeError.into())
        } else {
            Ok(v)
        }
    });
    assert_eq!(source.map(Some(&block)), Err(error::Error::TypeError));
    assert_eq!(source.visited(), 4);
}

#[test]
fn test_reentrant_block() {
    let slot: Rc<RefCell<Option<Rc<Block<'static>>>>> = Default::default();
    let inner = slot.clone();
    let block = Rc::new(Block::unary(move |v| {
        let again = inner.borrow().clone();
        match again {
            Some(block) => block.call(&[v]),
            None => Ok(v),
        }
    }));
    *slot.borrow_mut() = Some(block.clone());
    assert_eq!(
        Value::from([1, 2]).map(Some(&*block)),
        Err(error::Error::Reentrant)
    );
    slot.borrow_mut().take();
}

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error;
use crate::value::Value;

use super::Stop;

type BlockFn<'a> = dyn FnMut(&[Value]) -> Result<Value, Stop> + 'a;

/// A callback handed to an operation.
///
/// It receives the positional values of a visit and returns a value, or a
/// [`Stop`] to end the operation early. A block is not reentrant: invoking
/// it from within itself is an error.
pub struct Block<'a> {
    f: RefCell<Box<BlockFn<'a>>>,
}

impl<'a> Block<'a> {
    pub fn new(f: impl FnMut(&[Value]) -> Result<Value, Stop> + 'a) -> Self {
        Block {
            f: RefCell::new(Box::new(f)),
        }
    }

    /// A block taking the visit as a single value.
    pub fn unary(mut f: impl FnMut(Value) -> Result<Value, Stop> + 'a) -> Self {
        Self::new(move |args| f(Value::pack(args)))
    }

    /// A block taking the first two positional values, missing ones
    /// being `Nil`.
    pub fn binary(mut f: impl FnMut(Value, Value) -> Result<Value, Stop> + 'a) -> Self {
        Self::new(move |args| {
            let a = args.first().cloned().unwrap_or_default();
            let b = args.get(1).cloned().unwrap_or_default();
            f(a, b)
        })
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, Stop> {
        let mut f = self
            .f
            .try_borrow_mut()
            .map_err(|_| error::Error::Reentrant)?;
        (&mut **f)(args)
    }

    pub(crate) fn yield_one(&self, value: Value) -> Result<Value, Stop> {
        self.call(std::slice::from_ref(&value))
    }

    pub(crate) fn yield_two(&self, a: Value, b: Value) -> Result<Value, Stop> {
        self.call(&[a, b])
    }
}

impl fmt::Debug for Block<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Block")
    }
}

/// The callable `detect` falls back on when no element matches.
#[derive(Clone)]
pub struct Fallback(Rc<dyn Fn() -> Result<Value, Stop>>);

impl Fallback {
    pub fn new(f: impl Fn() -> Result<Value, Stop> + 'static) -> Self {
        Fallback(Rc::new(f))
    }

    pub fn call(&self) -> Result<Value, Stop> {
        (self.0)()
    }
}

impl fmt::Debug for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fallback")
    }
}

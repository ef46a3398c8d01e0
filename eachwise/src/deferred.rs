use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::error;
use crate::method::Method;
use crate::traverse::{Block, Flow, Stop, Traverse, Visit};
use crate::value::Value;

/// An operation waiting for its callback.
///
/// Operations that need a callback return one of these when called
/// without. It records the source and the operation with its arguments,
/// and can be invoked any number of times. It is itself a source: its
/// elements are whatever the operation hands to its callback, so
/// `each_slice(2)` deferred visits the slices, and `each_with_index`
/// deferred visits element and index pairs.
pub struct Deferred {
    source: Rc<dyn Traverse>,
    method: Method,
}

impl Deferred {
    pub fn new(source: Rc<dyn Traverse>, method: Method) -> Self {
        trace!(%method, "deferred");
        Deferred { source, method }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Run the operation against the original source with the callback.
    pub fn call(&self, block: &Block<'_>) -> error::Result<Value> {
        trace!(method = %self.method, "re-dispatch");
        self.method.call(&*self.source, Some(block))
    }
}

impl Traverse for Deferred {
    fn traverse(&self, visit: &mut Visit<'_>) -> Flow {
        trace!(method = %self.method, "re-dispatch as source");
        // A stop asked for by the visit must reach our caller as is, not
        // be interpreted by the operation: `Done` would otherwise just
        // end the operation, and a `Break` would become its result.
        let mut escaped = None;
        let result = {
            let adapter = Block::new(|args| match visit(args) {
                Ok(()) => Ok(Value::Nil),
                Err(stop) => {
                    escaped = Some(stop);
                    Err(Stop::Done)
                }
            });
            self.method.call(&*self.source, Some(&adapter))
        };
        match escaped {
            Some(stop) => Err(stop),
            None => result.map(|_| ()).map_err(Stop::from),
        }
    }
}

impl fmt::Display for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Enumerator: {}>", self.method)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

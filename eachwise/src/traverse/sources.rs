use crate::error;
use crate::value::Value;

use super::{Flow, Traverse, Visit};

// Arrays visit their elements, hashes visit each entry as a key and a value,
// and `Nil` is the source that represents nothing. Deferred operations
// re-dispatch to the operation they wait on. No other value can be
// traversed.
impl Traverse for Value {
    fn traverse(&self, visit: &mut Visit<'_>) -> Flow {
        match self {
            Value::Nil => Ok(()),
            Value::Array(items) => {
                for item in items.iter() {
                    visit(std::slice::from_ref(item))?;
                }
                Ok(())
            }
            Value::Hash(hash) => {
                for (key, value) in hash.iter() {
                    visit(&[key.clone(), value.clone()])?;
                }
                Ok(())
            }
            Value::Deferred(deferred) => deferred.traverse(visit),
            _ => Err(error::Error::TypeError.into()),
        }
    }
}

impl Traverse for Vec<Value> {
    fn traverse(&self, visit: &mut Visit<'_>) -> Flow {
        for item in self {
            visit(std::slice::from_ref(item))?;
        }
        Ok(())
    }
}

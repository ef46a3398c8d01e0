/// Values travelling through a traversal.
///
/// Elements, callback results and operation results are all a [`Value`].
/// Values are immutable and cheap to clone; compound values share their
/// contents.
mod compare;
mod display;
mod op;
mod value_core;

pub use op::BinaryOp;
pub use value_core::{Hash, Kind, Value};

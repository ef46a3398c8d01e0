/// The traversal primitive, and the sources and callbacks that take part
/// in a traversal.
///
/// Every operation of the library is written against [`Traverse`] alone.
mod block;
mod range;
mod sources;
mod traits;

pub use block::{Block, Fallback};
pub use range::Range;
pub use traits::{Flow, Stop, Traverse, Visit};

pub(crate) use traits::{finish, materialize, resolve, settle};

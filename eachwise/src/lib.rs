//! Collection operations derived from a single traversal primitive.
//!
//! Implement [`Traverse`] for a source and [`Enumerable`] provides the
//! whole operation set on it: quantifiers, searches, folds, extremes,
//! filters, transformations and windows. Operations that need a callback
//! return a [`Deferred`] handle when called without one.
mod deferred;
mod enumerable;
pub mod error;
mod library;
mod method;
mod pattern;
mod traverse;
mod value;

pub use deferred::Deferred;
pub use enumerable::Enumerable;
pub use method::Method;
pub use pattern::{Matcher, Pattern};
pub use traverse::{Block, Fallback, Flow, Range, Stop, Traverse, Visit};
pub use value::{BinaryOp, Hash, Kind, Value};

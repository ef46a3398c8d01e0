use strum::EnumMessage;
use strum_macros::{Display, EnumMessage};

/// Error code raised by a sequence operation.
///
/// The first paragraph of each variant's documentation is its message, the
/// rest is a note explaining when it is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumMessage)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Error {
    /// Invalid argument.
    ///
    /// An argument is outside of the range the operation accepts, such as a
    /// negative count for `take` or a window size below one for
    /// `each_cons`. Also raised when two elements cannot be compared by an
    /// ordering operation, and when `inject` has nothing to combine with.
    /// Detected before the traversal starts, except for comparisons.
    ArgumentError,
    /// Wrong number of arguments.
    ///
    /// An operation invoked by name received more positional arguments than
    /// it accepts, or fewer than it requires.
    ArgumentCount,
    /// Type mismatch.
    ///
    /// A value does not have the shape an operation needs, such as an element
    /// of `to_h` that is not a two item array, or a `zip` argument that
    /// cannot be materialized into an array. Detected during traversal when
    /// the offending value is processed.
    TypeError,
    /// Undefined operation.
    ///
    /// No operation or binary operator exists with the given name.
    NoMethod,
    /// Numeric overflow.
    ///
    /// Integer arithmetic produced a result outside of the 64 bit range.
    Overflow,
    /// Division by zero.
    ///
    /// Integer division or remainder with a zero divisor.
    ZeroDivision,
    /// Callback re-entered.
    ///
    /// A callback was invoked again while it was still running.
    Reentrant,
}

impl Error {
    pub fn code(&self) -> String {
        self.to_string()
    }

    pub fn message(&self) -> &str {
        self.documentation_pieces().0
    }

    pub fn note(&self) -> &str {
        self.documentation_pieces().1
    }

    fn documentation_pieces(&self) -> (&str, &str) {
        if let Some(documentation) = self.get_documentation() {
            let mut pieces = documentation.splitn(2, "\n\n");
            let first = pieces.next().unwrap_or("");
            let second = pieces.next().unwrap_or("");
            (first, second)
        } else {
            ("", "")
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
